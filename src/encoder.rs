use crate::{
    format::EncodedHash,
    memory::KeyBuffer,
    params::EncoderParams,
    salt::Salt,
};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("secure random source unavailable")]
    EntropyUnavailable(#[source] rand::Error),
}

/// Produces salted PBKDF2-HMAC-SHA256 hashes in the `PBKDF2$sha256$901$<salt>$<key>` format.
///
/// The encoder holds no RNG state. [`encode`](Self::encode) draws from the OS
/// CSPRNG, so a single encoder can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PasswordEncoder {
    params: EncoderParams,
}

impl PasswordEncoder {
    /// Creates an encoder with the fixed scheme parameters.
    ///
    /// # Parameters
    /// * PRF: HMAC-SHA256
    /// * Iterations: 901
    /// * Derived key length: 48 bytes
    /// * Salt: 12 characters from `[0-9A-Za-z]`
    pub fn new() -> Self {
        Self {
            params: EncoderParams::DEFAULT,
        }
    }

    pub fn params(&self) -> &EncoderParams {
        &self.params
    }

    /// Hashes a password with a fresh salt from the OS random source.
    ///
    /// Any byte sequence is accepted, including the empty password.
    ///
    /// # Returns
    /// * `Result<EncodedHash, EncodeError>` - The encoded hash, or an error if the
    ///   random source could not supply a salt
    pub fn encode(&self, password: &[u8]) -> Result<EncodedHash, EncodeError> {
        self.encode_with_rng(password, &mut OsRng)
    }

    /// Hashes a password, drawing the salt from the given RNG.
    pub fn encode_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        password: &[u8],
        rng: &mut R,
    ) -> Result<EncodedHash, EncodeError> {
        let salt = Salt::generate(rng)?;
        Ok(self.encode_with_salt(password, &salt))
    }

    /// Hashes a password with a caller-chosen salt. Deterministic.
    pub fn encode_with_salt(&self, password: &[u8], salt: &Salt) -> EncodedHash {
        let params = &self.params;
        trace!(
            prf = %params.prf(),
            iterations = params.iterations(),
            key_len = params.key_len(),
            "deriving password hash"
        );

        let mut key = KeyBuffer::zeroed(params.key_len());
        params
            .prf()
            .derive(password, salt.as_bytes(), params.iterations(), key.as_mut_slice());

        EncodedHash::assemble(params.prf(), params.iterations(), salt.as_str(), key.as_slice())
    }
}
