//! Entry id generation
//!
//! Ids written in a document are arbitrary strings. When an entry header
//! carries no `[id]`, one is generated: 8 characters drawn from an alphabet
//! without the look-alike characters `l`, `0`, `1` and `9`.
//!
//! Generation goes through the [`IdSource`] trait so callers (and tests)
//! can pin ids. The default [`ProcessIds`] draws from a single keyed hash
//! stream seeded once per process, so rapid repeated parses never reuse
//! a seed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::Utc;

/// Characters used for generated ids
pub const ID_ALPHABET: &[u8] = b"abcdefghijkmnopqrstuvwxyz2345678";

/// Length of a generated id
pub const GENERATED_ID_LEN: usize = 8;

/// A source of fresh entry ids
pub trait IdSource {
    /// Returns the next id
    fn next_id(&mut self) -> String;
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

/// Maps hash output onto the id alphabet
fn encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(GENERATED_ID_LEN)
        .map(|b| ID_ALPHABET[*b as usize % ID_ALPHABET.len()] as char)
        .collect()
}

/// Derives one id from a key and a counter value
fn derive(key: &[u8; 32], counter: u64) -> String {
    let hash = blake3::keyed_hash(key, &counter.to_le_bytes());
    encode(hash.as_bytes())
}

static PROCESS_KEY: OnceLock<[u8; 32]> = OnceLock::new();
static PROCESS_COUNTER: AtomicU64 = AtomicU64::new(0);

fn process_key() -> &'static [u8; 32] {
    PROCESS_KEY.get_or_init(|| {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&Utc::now().timestamp_nanos_opt().unwrap_or(0).to_le_bytes());
        hasher.update(&std::process::id().to_le_bytes());
        // Stack address varies between runs under ASLR
        let marker = 0u8;
        hasher.update(&(&marker as *const u8 as usize).to_le_bytes());
        *hasher.finalize().as_bytes()
    })
}

/// Process-wide id stream
///
/// All instances share one seed and one counter, so ids never repeat
/// within a process regardless of how many parsers are created.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdSource for ProcessIds {
    fn next_id(&mut self) -> String {
        let counter = PROCESS_COUNTER.fetch_add(1, Ordering::Relaxed);
        derive(process_key(), counter)
    }
}

/// Counts upward through the alphabet: `aaaaaaaa`, `aaaaaaab`, ...
///
/// Meant for tests that need to know generated ids ahead of time.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let base = ID_ALPHABET.len() as u64;
        let mut n = self.next;
        self.next += 1;

        let mut chars = [ID_ALPHABET[0]; GENERATED_ID_LEN];
        for slot in chars.iter_mut().rev() {
            *slot = ID_ALPHABET[(n % base) as usize];
            n /= base;
        }
        chars.iter().map(|c| *c as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn has_generated_shape(id: &str) -> bool {
        id.len() == GENERATED_ID_LEN && id.bytes().all(|b| ID_ALPHABET.contains(&b))
    }

    #[test]
    fn alphabet_excludes_ambiguous_characters() {
        for c in [b'l', b'0', b'1', b'9'] {
            assert!(!ID_ALPHABET.contains(&c));
        }
        assert_eq!(ID_ALPHABET.len(), 32);
    }

    #[test]
    fn process_ids_have_expected_shape() {
        let mut ids = ProcessIds;
        for _ in 0..100 {
            assert!(has_generated_shape(&ids.next_id()));
        }
    }

    #[test]
    fn process_ids_do_not_repeat_across_instances() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let mut ids = ProcessIds;
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "aaaaaaaa");
        assert_eq!(ids.next_id(), "aaaaaaab");
        assert_eq!(ids.next_id(), "aaaaaaac");
    }

    #[test]
    fn sequential_ids_carry_into_next_position() {
        let mut ids = SequentialIds { next: 32 };
        assert_eq!(ids.next_id(), "aaaaaaba");
    }

    #[test]
    fn borrowed_source_advances_owner() {
        fn draw<I: IdSource>(mut source: I) -> String {
            source.next_id()
        }

        let mut ids = SequentialIds::new();
        assert_eq!(draw(&mut ids), "aaaaaaaa");
        assert_eq!(ids.next_id(), "aaaaaaab");
    }
}
