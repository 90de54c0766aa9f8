use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::{UserError, UserResult};

/// One-way password transform plus verification against a stored hash
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> UserResult<String>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` cannot be parsed
    fn verify(&self, plaintext: &str, hash: &str) -> UserResult<bool>;
}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`)
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Argon2id with the crate's recommended parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom cost parameters: memory in KiB, iterations, parallelism
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> UserResult<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(UserError::PasswordHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_is_phc_and_salted() {
        let hasher = hasher();
        let first = hasher.hash("s3cret").unwrap();
        let second = hasher.hash("s3cret").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, "s3cret");
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify() {
        let hasher = hasher();
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hasher.verify("s3cret", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_accepts_hash_from_other_params() {
        let hash = Argon2Hasher::new().hash("s3cret").unwrap();
        assert!(hasher().verify("s3cret", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            hasher().verify("s3cret", "not-a-hash"),
            Err(UserError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_invalid_params() {
        assert!(Argon2Hasher::with_params(1, 0, 1).is_err());
    }
}
