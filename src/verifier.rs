use crate::{
    format::{FormatError, HashFields},
    memory::KeyBuffer,
};
use constant_time_eq::constant_time_eq;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("stored hash rejected: {0}")]
    InvalidHash(#[from] FormatError),
}

/// Checks candidate passwords against stored `PBKDF2$...` hashes.
///
/// Hashes are not limited to what [`PasswordEncoder`](crate::PasswordEncoder)
/// produces: `sha1`, `sha256` and `sha512`, any iteration count, any salt string
/// and any key length are accepted, so hashes written by other tools in the
/// same format verify as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordVerifier;

impl PasswordVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - The candidate password
    /// * `stored_hash` - The stored `PBKDF2$<alg>$<iterations>$<salt>$<key>` string
    ///
    /// # Returns
    /// * `Result<bool, VerifyError>` - True if the password matches, false if it
    ///   doesn't, an error if `stored_hash` cannot be parsed
    pub fn verify(&self, password: &[u8], stored_hash: &str) -> Result<bool, VerifyError> {
        let fields = HashFields::parse(stored_hash).map_err(|e| {
            debug!(error = %e, "rejecting stored hash");
            e
        })?;

        trace!(
            prf = %fields.prf,
            iterations = fields.iterations,
            key_len = fields.key.len(),
            "re-deriving password hash"
        );

        let mut candidate = KeyBuffer::zeroed(fields.key.len());
        fields.prf.derive(
            password,
            fields.salt.as_bytes(),
            fields.iterations,
            candidate.as_mut_slice(),
        );

        Ok(constant_time_eq(candidate.as_slice(), &fields.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PasswordEncoder, Salt};
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_encode_and_verify() {
        let encoder = PasswordEncoder::new();
        let verifier = PasswordVerifier::new();
        let password = b"correct_horse_battery_staple";

        let hash = encoder.encode(password).unwrap();
        assert!(
            verifier.verify(password, hash.as_str()).unwrap(),
            "Password verification failed for valid password"
        );
    }

    #[test]
    fn test_verify_wrong_password() {
        let encoder = PasswordEncoder::new();
        let verifier = PasswordVerifier::new();

        let hash = encoder.encode(b"correct_horse_battery_staple").unwrap();
        assert!(
            !verifier.verify(b"wrong_password_guess", hash.as_str()).unwrap(),
            "Wrong password should not verify successfully"
        );
    }

    #[test]
    fn test_verify_empty_password() {
        let hash = PasswordEncoder::new().encode(b"").unwrap();
        let verifier = PasswordVerifier::new();

        assert!(verifier.verify(b"", hash.as_str()).unwrap());
        assert!(!verifier.verify(b" ", hash.as_str()).unwrap());
    }

    #[test]
    fn test_verify_golden_value() {
        let stored =
            "PBKDF2$sha256$901$abcdefghijkl$PFx6eGPVr4rfpyQHbnDrtIaRmz7g+w5fHgR6vVSS0mdpOxXwE796ym0JK9OBPijr";
        assert!(PasswordVerifier::new().verify(b"123456", stored).unwrap());
    }

    // Hashes written by other tools of the same format: sha1 with a base64 salt
    // used as raw characters, and sha512 with a 24 byte key.
    #[test_case(
        b"password",
        "PBKDF2$sha1$98$XaIs9vQgmLujKHZG4/B3dNTbeP2PyaVKySTirZznBrE=$2DX/HZDTojVbfgAIdozBi6CihjWP1+akYnh/h9uQfIVl6pLoAiwJe1ey2WW2BnT+"
        ; "sha1 base64 salt"
    )]
    #[test_case(
        b"secret",
        "PBKDF2$sha512$901$0123456789ab$tFXoSpozeIGSQJNd8nc5E0Pb8x/oWl3j"
        ; "sha512 short key"
    )]
    fn test_verify_foreign_hashes(password: &[u8], stored: &str) {
        let verifier = PasswordVerifier::new();
        assert!(verifier.verify(password, stored).unwrap());
        assert!(!verifier.verify(b"not the password", stored).unwrap());
    }

    #[test]
    fn test_altered_key_does_not_match() {
        // Golden hash with the first key byte changed.
        let stored =
            "PBKDF2$sha256$901$abcdefghijkl$QFx6eGPVr4rfpyQHbnDrtIaRmz7g+w5fHgR6vVSS0mdpOxXwE796ym0JK9OBPijr";
        assert!(!PasswordVerifier::new().verify(b"123456", stored).unwrap());
    }

    #[test]
    fn test_invalid_stored_hash() {
        let verifier = PasswordVerifier::new();

        assert!(
            matches!(
                verifier.verify(b"test_password_123", "invalid_hash_format"),
                Err(VerifyError::InvalidHash(FormatError::Malformed(_)))
            ),
            "Invalid hash format should return InvalidHash"
        );
        assert_eq!(
            verifier.verify(b"test_password_123", "PBKDF2$md5$901$abcdefghijkl$AAAA"),
            Err(VerifyError::InvalidHash(FormatError::UnsupportedAlgorithm(
                "md5".into()
            )))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_verify_accepts_only_original(
            // Printable ASCII only: HMAC zero-pads short keys, so "a" and "a\0" collide.
            password in "[ -~]{0,48}",
            other in "[ -~]{0,48}",
            salt in "[0-9A-Za-z]{12}",
        ) {
            let encoder = PasswordEncoder::new();
            let verifier = PasswordVerifier::new();
            let hash = encoder.encode_with_salt(password.as_bytes(), &Salt::new(&salt).unwrap());

            prop_assert!(verifier.verify(password.as_bytes(), hash.as_str()).unwrap());
            if other != password {
                prop_assert!(!verifier.verify(other.as_bytes(), hash.as_str()).unwrap());
            }
        }
    }
}
