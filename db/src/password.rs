//! Password hashing with a fixed bcrypt work factor.

use anyhow::Context;

/// Fixed bcrypt cost applied to every stored password.
pub const HASH_COST: u32 = 10;

/// Derive the one-way hash stored in place of a plaintext password.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, HASH_COST).context("failed to hash password")
}
