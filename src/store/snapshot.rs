use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scan::digest::Digest;

/// Last known state: normalized path -> digest.
///
/// Serializes as a flat JSON object so the file stays readable by hand.
/// Sorted keys keep both the file and diff output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, Digest>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Snapshot::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&Digest> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Digest)> {
        self.entries.iter()
    }
}

impl From<BTreeMap<String, Digest>> for Snapshot {
    fn from(entries: BTreeMap<String, Digest>) -> Self {
        Snapshot { entries }
    }
}

impl FromIterator<(String, Digest)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Digest)>>(iter: I) -> Self {
        Snapshot {
            entries: iter.into_iter().collect(),
        }
    }
}
