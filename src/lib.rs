//! Salted PBKDF2 password hashes in the `PBKDF2$sha256$901$<salt>$<key>` storage format
//! understood by mosquitto-auth-plug.
//!
//! [`PasswordEncoder`] derives a 48 byte PBKDF2-HMAC-SHA256 key from a password and a
//! fresh 12 character salt and formats it as a single `$`-separated string.
//! [`PasswordVerifier`] checks candidate passwords against such strings, including
//! `sha1` and `sha512` variants written by other tools of the same format.

mod encoder;
mod format;
mod memory;
mod params;
mod salt;
mod verifier;

pub use crate::{
    encoder::{EncodeError, PasswordEncoder},
    format::{EncodedHash, FormatError, HashFields, Prf, SEPARATOR, TAG},
    params::{EncoderParams, ITERATIONS, KEY_LEN, PRF, SALT_LEN},
    salt::{Salt, SaltError},
    verifier::{PasswordVerifier, VerifyError},
};
