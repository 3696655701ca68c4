use crc32fast::Hasher;

use crate::document::PopupDocument;

/// Derive a stable document seed from arbitrary text using CRC32.
pub fn seed_from(text: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for elements within a document.
///
/// Ids are `{seed}-{n}`; the seed ties them to one document, the counter
/// makes generation deterministic for a fixed seed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(seed_text: &str) -> Self {
        Self {
            seed: seed_from(seed_text),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential id.
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate the next id not already taken by the document. Hand-edited
    /// documents may contain ids from any scheme, so collisions are skipped
    /// rather than assumed away.
    pub fn unique_id(&mut self, doc: &PopupDocument) -> String {
        loop {
            let id = self.next_id();
            if !doc.contains_id(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
