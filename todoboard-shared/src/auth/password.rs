/// Password hashing
///
/// [`PasswordEncoder`] hashes new passwords with the configured
/// [`PasswordScheme`] and verifies stored hashes of either scheme, picking
/// the verifier from the hash prefix (`$2a$`/`$2b$`/`$2y$` for bcrypt,
/// `$argon2id$` for Argon2id). Switching `PASSWORD_SCHEME` therefore never
/// locks out existing users.
///
/// # Example
///
/// ```
/// use todoboard_shared::auth::password::{PasswordEncoder, PasswordScheme};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let encoder = PasswordEncoder::new(PasswordScheme::Bcrypt, 4);
/// let hash = encoder.encode("Sup3rSecret")?;
///
/// assert!(encoder.matches("Sup3rSecret", &hash)?);
/// assert!(!encoder.matches("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use std::{fmt, str::FromStr};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),

    /// Unknown `PASSWORD_SCHEME` value
    #[error("Unknown password scheme: {0}")]
    UnknownScheme(String),
}

/// Hashing algorithm used for new passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Bcrypt,
    Argon2id,
}

impl PasswordScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordScheme::Bcrypt => "bcrypt",
            PasswordScheme::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordScheme {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(PasswordScheme::Bcrypt),
            "argon2id" | "argon2" => Ok(PasswordScheme::Argon2id),
            other => Err(PasswordError::UnknownScheme(other.to_string())),
        }
    }
}

/// Hashes and verifies passwords
#[derive(Debug, Clone, Copy)]
pub struct PasswordEncoder {
    scheme: PasswordScheme,
    bcrypt_cost: u32,
}

impl Default for PasswordEncoder {
    fn default() -> Self {
        Self::new(PasswordScheme::Bcrypt, DEFAULT_BCRYPT_COST)
    }
}

impl PasswordEncoder {
    pub fn new(scheme: PasswordScheme, bcrypt_cost: u32) -> Self {
        Self { scheme, bcrypt_cost }
    }

    /// Scheme used for new hashes
    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hashes `raw` with the configured scheme
    pub fn encode(&self, raw: &str) -> Result<String, PasswordError> {
        match self.scheme {
            PasswordScheme::Bcrypt => bcrypt::hash(raw, self.bcrypt_cost)
                .map_err(|e| PasswordError::HashError(format!("bcrypt: {}", e))),
            PasswordScheme::Argon2id => hash_argon2id(raw),
        }
    }

    /// Checks `raw` against a stored hash of either scheme
    ///
    /// `Ok(false)` means the password is wrong; `Err` means the hash itself
    /// could not be read.
    pub fn matches(&self, raw: &str, hash: &str) -> Result<bool, PasswordError> {
        if hash.starts_with("$argon2") {
            verify_argon2id(raw, hash)
        } else if hash.starts_with("$2") {
            bcrypt::verify(raw, hash)
                .map_err(|e| PasswordError::InvalidHash(format!("bcrypt: {}", e)))
        } else {
            Err(PasswordError::InvalidHash(
                "unrecognized hash prefix".to_string(),
            ))
        }
    }
}

/// Argon2id with m=64 MB, t=3, p=4 and a 32-byte output
fn hash_argon2id(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

fn verify_argon2id(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // A salt with no digest parses, but can never verify
    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("missing hash output".to_string()));
    }

    // Parameters are read from the hash itself
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Validates the strength of a new password
///
/// Requires at least 8 characters, one digit and one uppercase letter.
/// Used by the change-password request validator.
///
/// ```
/// use todoboard_shared::auth::password::validate_password_strength;
///
/// assert!(validate_password_strength("Passw0rd").is_ok());
/// assert!(validate_password_strength("Sh0rT").is_err());
/// assert!(validate_password_strength("password1").is_err());
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    Ok(())
}
