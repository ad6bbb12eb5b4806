//! Party code generation
//!
//! Short shareable identifiers for parties. Codes are random with no
//! uniqueness check against the store; a collision silently overwrites
//! the earlier party (see `PartyStore::insert`).

use rand::Rng;
use tracing::debug;

/// Length of a party code
pub const CODE_LEN: usize = 6;

/// Alphabet for party codes: uppercase letters and digits (36 symbols)
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a party code: 6 characters drawn uniformly from A-Z0-9
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let code: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    debug!(%code, "generate_code: generated");
    code
}

/// Generate a party code using the thread-local RNG
pub fn generate_code_default() -> String {
    generate_code(&mut rand::rng())
}
