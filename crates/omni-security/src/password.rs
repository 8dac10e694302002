//! Random password generation.

use omni_core::{exception, TechResult};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"~!@#$%^&*()_+`-={}|[]\\:\"<>?,./";

/// Password request that cannot be satisfied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("number of digits and symbols exceeds the total length")]
    ExceedsTotalLength,

    #[error("number of letters exceeds the {} available without repetition", LETTERS.len())]
    LettersExceedsAvailable,

    #[error("number of digits exceeds the {} available without repetition", DIGITS.len())]
    DigitsExceedsAvailable,

    #[error("number of symbols exceeds the {} available without repetition", SYMBOLS.len())]
    SymbolsExceedsAvailable,
}

/// Generates a `length`-character password with exactly `digits` digits and
/// `symbols` symbols, the rest being mixed-case letters.
///
/// No character appears twice.
pub fn random_password(length: usize, digits: usize, symbols: usize) -> TechResult<String> {
    let password = generate(length, digits, symbols).map_err(|e| exception("failed to generate password", &e))?;
    debug!(length, digits, symbols, "Generated password");
    Ok(password)
}

fn generate(length: usize, digits: usize, symbols: usize) -> Result<String, PasswordError> {
    let letters = length
        .checked_sub(digits)
        .and_then(|rest| rest.checked_sub(symbols))
        .ok_or(PasswordError::ExceedsTotalLength)?;

    if letters > LETTERS.len() {
        return Err(PasswordError::LettersExceedsAvailable);
    }
    if digits > DIGITS.len() {
        return Err(PasswordError::DigitsExceedsAvailable);
    }
    if symbols > SYMBOLS.len() {
        return Err(PasswordError::SymbolsExceedsAvailable);
    }

    let mut rng = OsRng;
    let mut chars: Vec<u8> = LETTERS
        .choose_multiple(&mut rng, letters)
        .chain(DIGITS.choose_multiple(&mut rng, digits))
        .chain(SYMBOLS.choose_multiple(&mut rng, symbols))
        .copied()
        .collect();
    chars.shuffle(&mut rng);

    Ok(chars.into_iter().map(char::from).collect())
}
