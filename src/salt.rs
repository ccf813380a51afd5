use crate::{encoder::EncodeError, params::SALT_LEN};
use rand::{CryptoRng, RngCore};
use std::fmt;
use thiserror::Error;

const DIGITS: &[u8; 10] = b"0123456789";
const UPPER: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const CLASSES: [&[u8]; 3] = [DIGITS, UPPER, LOWER];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaltError {
    #[error("salt must be exactly {expected} characters, got {0}", expected = SALT_LEN)]
    InvalidLength(usize),
    #[error("salt character {0:?} is outside [0-9A-Za-z]")]
    InvalidCharacter(char),
}

/// A 12 character salt drawn from `[0-9A-Za-z]`.
///
/// The characters are used as-is as PBKDF2 salt bytes and written verbatim into
/// the encoded hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Draws a fresh salt from a cryptographically secure RNG.
    ///
    /// Each position first picks one of the three character classes with equal
    /// probability, then a character uniformly within that class. Both draws use
    /// rejection sampling so neither is biased by the modulo.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, EncodeError> {
        let mut salt = [0u8; SALT_LEN];
        for slot in salt.iter_mut() {
            let class = CLASSES[uniform_below(rng, CLASSES.len() as u8)? as usize];
            *slot = class[uniform_below(rng, class.len() as u8)? as usize];
        }
        Ok(Self(salt))
    }

    /// Wraps a known salt, e.g. one read back from storage or pinned in a test.
    pub fn new(salt: &str) -> Result<Self, SaltError> {
        let chars = salt.chars().count();
        if chars != SALT_LEN {
            return Err(SaltError::InvalidLength(chars));
        }
        if let Some(bad) = salt.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(SaltError::InvalidCharacter(bad));
        }

        let mut bytes = [0u8; SALT_LEN];
        bytes.copy_from_slice(salt.as_bytes());
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Salt").field(&self.as_str()).finish()
    }
}

/// Returns a uniform value in `0..n` from single random bytes.
fn uniform_below<R: RngCore + ?Sized>(rng: &mut R, n: u8) -> Result<u8, EncodeError> {
    debug_assert!(n > 0);
    // Largest multiple of n that fits in a byte; anything at or above it is redrawn.
    let zone = 256 / n as u16 * n as u16;
    let mut byte = [0u8; 1];
    loop {
        rng.try_fill_bytes(&mut byte)
            .map_err(EncodeError::EntropyUnavailable)?;
        if (byte[0] as u16) < zone {
            return Ok(byte[0] % n);
        }
    }
}
