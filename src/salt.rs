use getrandom::fill;

use crate::error::{Argon2Error, BINDING_RNG_UNAVAILABLE, Result};

/// Length of salts produced by [`generate_salt`] (16 bytes).
pub const SALT_LEN: usize = 16;

/// Generate a random salt from the OS generator.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill(&mut salt).map_err(|e| {
        Argon2Error::binding(
            BINDING_RNG_UNAVAILABLE,
            format!("OS random generator unavailable: {e}"),
        )
    })?;
    Ok(salt)
}
