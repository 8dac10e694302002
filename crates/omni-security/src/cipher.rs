//! AES-GCM encryption of short secrets.
//!
//! The key is the raw bytes of a text secret: 16 bytes selects AES-128-GCM,
//! 32 bytes selects AES-256-GCM (see [`crate::hash`] for deriving one). The
//! sealed form is the random nonce followed by the ciphertext and tag.

use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use omni_core::{exception, TechResult};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Failure while sealing or opening data.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid key size {0}")]
    KeyLength(usize),

    #[error("sealed data of {0} bytes is shorter than the nonce")]
    Truncated(usize),

    #[error("encryption failed")]
    Seal,

    #[error("message authentication failed")]
    Open,

    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),
}

/// Encrypts `plain` under `key`, returning `nonce || ciphertext`.
pub fn encrypt(plain: &str, key: &str) -> TechResult<Vec<u8>> {
    let sealed = match key.len() {
        16 => seal::<Aes128Gcm>(plain.as_bytes(), key.as_bytes()),
        32 => seal::<Aes256Gcm>(plain.as_bytes(), key.as_bytes()),
        n => Err(CipherError::KeyLength(n)),
    };
    sealed.map_err(|e| exception("failed to encrypt GCM data", &e))
}

/// Decrypts the output of [`encrypt`] under the same `key`.
pub fn decrypt(data: &[u8], key: &str) -> TechResult<String> {
    let opened = match key.len() {
        16 => open::<Aes128Gcm>(data, key.as_bytes()),
        32 => open::<Aes256Gcm>(data, key.as_bytes()),
        n => Err(CipherError::KeyLength(n)),
    };
    opened
        .and_then(|plain| String::from_utf8(plain).map_err(CipherError::from))
        .map_err(|e| exception("failed to decrypt GCM data", &e))
}

fn seal<A: Aead + AeadCore + KeyInit>(plain: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = A::new_from_slice(key).map_err(|_| CipherError::KeyLength(key.len()))?;
    let nonce = A::generate_nonce(&mut OsRng);
    let ciphertext = cipher.encrypt(&nonce, plain).map_err(|_| CipherError::Seal)?;

    let mut sealed = Vec::with_capacity(nonce.len() + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn open<A: Aead + AeadCore + KeyInit>(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let nonce_len = <A as AeadCore>::NonceSize::USIZE;
    if data.len() < nonce_len {
        return Err(CipherError::Truncated(data.len()));
    }

    let cipher = A::new_from_slice(key).map_err(|_| CipherError::KeyLength(key.len()))?;
    let (nonce, ciphertext) = data.split_at(nonce_len);
    cipher
        .decrypt(Nonce::<A>::from_slice(nonce), ciphertext)
        .map_err(|_| CipherError::Open)
}
