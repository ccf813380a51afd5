//! The `PBKDF2$<algorithm>$<iterations>$<salt>$<key>` storage format used by
//! mosquitto-auth-plug and its helper tools.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub const TAG: &str = "PBKDF2";
pub const SEPARATOR: char = '$';
const FIELD_COUNT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed PBKDF2 hash: {0}")]
    Malformed(&'static str),
    #[error("unsupported PBKDF2 algorithm {0:?}")]
    UnsupportedAlgorithm(String),
}

/// The HMAC hash used as PBKDF2 pseudorandom function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prf {
    Sha1,
    Sha256,
    Sha512,
}

impl Prf {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Fills `out` with `PBKDF2-HMAC-<self>(password, salt, rounds)`.
    pub(crate) fn derive(self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
        match self {
            Self::Sha1 => pbkdf2::pbkdf2_hmac::<sha1::Sha1>(password, salt, rounds, out),
            Self::Sha256 => pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password, salt, rounds, out),
            Self::Sha512 => pbkdf2::pbkdf2_hmac::<sha2::Sha512>(password, salt, rounds, out),
        }
    }
}

impl fmt::Display for Prf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prf {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(FormatError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

/// A complete encoded password hash, ready to be stored.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedHash(String);

impl EncodedHash {
    pub(crate) fn assemble(prf: Prf, iterations: u32, salt: &str, key: &[u8]) -> Self {
        let key = STANDARD.encode(key);
        Self(format!(
            "{TAG}{SEPARATOR}{prf}{SEPARATOR}{iterations}{SEPARATOR}{salt}{SEPARATOR}{key}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The salt field, exactly as stored.
    pub fn salt(&self) -> &str {
        self.field(3)
    }

    /// The base64 derived-key field.
    pub fn derived_key(&self) -> &str {
        self.field(4)
    }

    fn field(&self, index: usize) -> &str {
        self.0.split(SEPARATOR).nth(index).unwrap_or_default()
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Debug hides the key so hashes don't end up verbatim in logs.
impl fmt::Debug for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedHash")
            .field("salt", &self.salt())
            .finish_non_exhaustive()
    }
}

impl AsRef<str> for EncodedHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncodedHash> for String {
    fn from(hash: EncodedHash) -> Self {
        hash.0
    }
}

/// The fields of a stored hash string, with the derived key base64-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFields<'a> {
    pub prf: Prf,
    pub iterations: u32,
    /// Raw salt characters; they are used as PBKDF2 salt bytes without decoding.
    pub salt: &'a str,
    pub key: Vec<u8>,
}

impl<'a> HashFields<'a> {
    pub fn parse(stored: &'a str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = stored.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(FormatError::Malformed("expected 5 '$'-separated fields"));
        }

        if fields[0] != TAG {
            return Err(FormatError::Malformed("missing PBKDF2 tag"));
        }

        let prf = fields[1].parse::<Prf>()?;

        let iterations = fields[2]
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or(FormatError::Malformed("iteration count is not a positive integer"))?;

        let salt = fields[3];
        if salt.is_empty() {
            return Err(FormatError::Malformed("empty salt"));
        }

        let key = STANDARD
            .decode(fields[4])
            .map_err(|_| FormatError::Malformed("derived key is not valid base64"))?;
        if key.is_empty() {
            return Err(FormatError::Malformed("empty derived key"));
        }

        Ok(Self {
            prf,
            iterations,
            salt,
            key,
        })
    }
}
