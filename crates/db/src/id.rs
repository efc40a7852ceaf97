//! Todo id generation
//!
//! Ids are short lowercase hex strings derived from a salted hash of the
//! description. The generator yields a bounded number of candidates; the
//! repository checks each against the store and takes the first unused one.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of generated ids in hex characters
pub const ID_LENGTH: usize = 12;

/// Maximum candidates produced before giving up
const MAX_ATTEMPTS: usize = 16;

/// Generator for candidate todo ids
#[derive(Debug)]
pub struct IdGenerator {
    seed: String,
    attempts: usize,
}

impl IdGenerator {
    /// Create a generator seeded with the todo description
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            attempts: 0,
        }
    }

    /// Produce the next candidate id, or `None` once attempts are exhausted.
    ///
    /// Candidates consisting only of digits are skipped: SurrealDB would
    /// store those as numeric record ids, which breaks the lexicographic
    /// tiebreak ordering the pagination contract relies on.
    pub fn next_id(&mut self) -> Option<String> {
        while self.attempts < MAX_ATTEMPTS {
            self.attempts += 1;

            let salt: u64 = rand::rng().random();
            let mut hasher = Sha256::new();
            hasher.update(self.seed.as_bytes());
            hasher.update(salt.to_le_bytes());
            let digest = hasher.finalize();

            let id: String = digest
                .iter()
                .take(ID_LENGTH / 2)
                .map(|b| format!("{:02x}", b))
                .collect();

            if id.chars().any(|c| c.is_ascii_alphabetic()) {
                return Some(id);
            }
        }
        None
    }
}

/// Check whether a string is a well-formed todo id.
///
/// Used before ids from the outside are spliced into record references.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
