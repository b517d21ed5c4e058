// types.rs
use ahash::AHashMap;
use serde::{Serialize, Deserialize, Serializer};
use serde::ser::SerializeMap;

/// One A-id to B-id pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelatedPair {
    pub source_id: i64,
    pub target_id: i64,
}

/// Mapping from source-A ids to source-B ids.
///
/// Keys are unique and iterate in first-insertion order. Re-inserting an
/// existing key replaces its value but keeps its position. Nothing prevents
/// several keys from sharing one value.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMap {
    pairs: Vec<CorrelatedPair>,
    index: AHashMap<i64, usize>,
}

impl CorrelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source_id -> target_id`, returning the previous value if the
    /// key was already present.
    pub fn insert(&mut self, source_id: i64, target_id: i64) -> Option<i64> {
        match self.index.get(&source_id) {
            Some(&pos) => {
                let previous = self.pairs[pos].target_id;
                self.pairs[pos].target_id = target_id;
                Some(previous)
            }
            None => {
                self.index.insert(source_id, self.pairs.len());
                self.pairs.push(CorrelatedPair { source_id, target_id });
                None
            }
        }
    }

    pub fn get(&self, source_id: i64) -> Option<i64> {
        self.index.get(&source_id).map(|&pos| self.pairs[pos].target_id)
    }

    pub fn contains_target(&self, target_id: i64) -> bool {
        self.pairs.iter().any(|p| p.target_id == target_id)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CorrelatedPair> {
        self.pairs.iter()
    }
}

impl PartialEq for CorrelationMap {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl Eq for CorrelationMap {}

impl FromIterator<(i64, i64)> for CorrelationMap {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> Self {
        let mut map = CorrelationMap::new();
        for (source_id, target_id) in iter {
            map.insert(source_id, target_id);
        }
        map
    }
}

impl<'a> IntoIterator for &'a CorrelationMap {
    type Item = &'a CorrelatedPair;
    type IntoIter = std::slice::Iter<'a, CorrelatedPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

// Serialized as a JSON object: {"<a-id>": <b-id>, ...}
impl Serialize for CorrelationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            map.serialize_entry(&pair.source_id.to_string(), &pair.target_id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_first_position() {
        let mut map = CorrelationMap::new();
        assert_eq!(map.insert(5, 50), None);
        assert_eq!(map.insert(1, 10), None);
        assert_eq!(map.insert(5, 55), Some(50));

        let keys: Vec<i64> = map.iter().map(|p| p.source_id).collect();
        assert_eq!(keys, vec![5, 1]);
        assert_eq!(map.get(5), Some(55));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn targets_may_repeat() {
        let map: CorrelationMap = vec![(1, 100), (2, 100)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert!(map.contains_target(100));
        assert!(!map.contains_target(1));
    }

    #[test]
    fn serializes_with_string_keys_in_order() {
        let map: CorrelationMap = vec![(3, 30), (1, 10)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"3":30,"1":10}"#);

        let empty = serde_json::to_string(&CorrelationMap::new()).unwrap();
        assert_eq!(empty, "{}");
    }
}
