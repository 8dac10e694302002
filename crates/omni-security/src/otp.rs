//! Numeric one-time passwords.

use rand::rngs::OsRng;
use rand::Rng;

const OTP_DIGITS: &[u8] = b"0123456789";

/// Returns `length` random decimal digits drawn from the OS CSPRNG.
///
/// Leading zeros are kept, so the result must be handled as text.
#[must_use]
pub fn random_otp(length: usize) -> String {
    (0..length)
        .map(|_| char::from(OTP_DIGITS[OsRng.gen_range(0..OTP_DIGITS.len())]))
        .collect()
}
