//! Key derivation digest.

use md5::{Digest, Md5};

/// Returns the lowercase hex MD5 digest of `key`.
///
/// The 32-character result is a valid AES-256 key for [`crate::encrypt`].
/// Not suitable for password storage.
#[must_use]
pub fn hash(key: &str) -> String {
    hex::encode(Md5::digest(key.as_bytes()))
}
