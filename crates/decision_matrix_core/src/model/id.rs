//! Short identifier generator for options, criteria and projects.
//!
//! Ids are 9-character lowercase base-36 tokens. They are unique enough for
//! a single user's local documents, not globally unique.

use uuid::Uuid;

/// Length of every generated identifier.
pub const ID_LEN: usize = 9;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a fresh identifier from the random bits of a v4 uuid.
pub fn generate_id() -> String {
    // Low bytes of a v4 uuid are fully random; version/variant bits sit higher.
    let mut bits = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(char::from(ALPHABET[(bits % 36) as usize]));
        bits /= 36;
    }
    id
}
