//! Entity ID and verification token generation.

use rand::Rng;
use uuid::Uuid;

/// Length of a rendered verification token (128 bits as lowercase hex).
pub const TOKEN_LENGTH: usize = 32;

/// Mint a new primary key.
///
/// UUIDv7 embeds a millisecond timestamp in its leading bits, so IDs created
/// later sort after earlier ones when compared as strings.
pub fn new_entity_id() -> String {
    Uuid::now_v7().to_string()
}

/// Generate a fresh verification token: 128 random bits from the
/// thread-local CSPRNG, rendered as [`TOKEN_LENGTH`] hex characters.
pub fn new_verification_token() -> String {
    let bits: u128 = rand::rng().random();
    format!("{bits:0width$x}", width = TOKEN_LENGTH)
}

/// Whether `token` has the shape produced by [`new_verification_token`].
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
