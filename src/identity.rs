//! Opaque identity generation.
//!
//! Every connection, button step, action, and feedback in an export gets a
//! fresh identifier. Production uses random v4 UUIDs; tests plug in
//! [`SequentialIds`] so expected documents can be written out literally.

use uuid::Uuid;

/// Source of fresh, unique opaque tokens.
pub trait IdGenerator {
    /// Produce a token never returned before by this generator.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUID generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator producing `{prefix}-0001`, `{prefix}-0002`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{:04}", self.prefix, self.counter)
    }
}
