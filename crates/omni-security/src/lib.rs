//! # Omni Security
//!
//! Small security helpers shared by services: AES-GCM encryption of short
//! secrets, MD5 key derivation, numeric OTPs and random passwords.
//! Failures are reported as logged [`omni_core::TechnicalError`]s.

pub mod cipher;
pub mod digest;
pub mod otp;
pub mod password;

pub use cipher::{decrypt, encrypt, CipherError};
pub use digest::hash;
pub use otp::random_otp;
pub use password::{random_password, PasswordError};
