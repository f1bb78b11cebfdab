//! Identity generation for entities
//!
//! Ids are opaque strings. Production code uses [`RandomIds`]; tests inject
//! [`SequentialIds`] to get predictable values.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh, unique entity ids
pub trait IdGenerator {
    /// Produce the next id. Never returns the same value twice.
    fn next_id(&self) -> String;
}

/// Deterministic ids of the form `{prefix}-{n}`, starting at 1
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    /// Create a generator with the given prefix
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

/// Draw ids from `ids` until one is not `taken`
///
/// Terminates because a generator never repeats and the taken set is finite.
pub fn next_free_id(ids: &dyn IdGenerator, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id();
        if !taken(&id) {
            return id;
        }
        crate::debug!("Generated id {id} is already in use; drawing another");
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIds::new("module");
        assert_eq!(ids.next_id(), "module-1");
        assert_eq!(ids.next_id(), "module-2");
        assert_eq!(ids.next_id(), "module-3");
    }

    #[test]
    fn test_next_free_id_skips_taken() {
        let ids = SequentialIds::new("g");
        let taken = ["g-1", "g-2", "g-4"];
        assert_eq!(next_free_id(&ids, |id| taken.contains(&id)), "g-3");
        assert_eq!(next_free_id(&ids, |id| taken.contains(&id)), "g-5");
    }

    #[test]
    fn test_random_ids_are_unique() {
        let ids = RandomIds;
        let seen: HashSet<String> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 100);
    }
}
