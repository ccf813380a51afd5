use crate::format::Prf;

// Parameters of the mosquitto-auth-plug PBKDF2 scheme.
// Changing any of these breaks compatibility with stored hashes.
pub const ITERATIONS: u32 = 901;
pub const KEY_LEN: usize = 48; // 384 bits, 64 base64 chars
pub const SALT_LEN: usize = 12;
pub const PRF: Prf = Prf::Sha256;

/// Immutable parameter set used by [`PasswordEncoder`](crate::PasswordEncoder).
///
/// Only the default instance can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderParams {
    prf: Prf,
    iterations: u32,
    key_len: usize,
    salt_len: usize,
}

impl EncoderParams {
    pub const DEFAULT: Self = Self {
        prf: PRF,
        iterations: ITERATIONS,
        key_len: KEY_LEN,
        salt_len: SALT_LEN,
    };

    pub fn prf(&self) -> Prf {
        self.prf
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }
}

impl Default for EncoderParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
