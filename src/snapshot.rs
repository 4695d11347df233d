/// Data structures for Link Organizer
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete topics/links state at a point in time.
///
/// `topics` keeps insertion order. `links` maps a topic name to its URLs,
/// also in insertion order. This is the shape written to storage, to every
/// backup entry and to exported files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub topics: Vec<String>,
    pub links: BTreeMap<String, Vec<String>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    /// Links stored for `topic`, or an empty slice when it has none yet
    pub fn links_for(&self, topic: &str) -> &[String] {
        self.links.get(topic).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }
}
