//! Insertion-ordered command map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::PushCommand;

/// Mapping from command name to [`PushCommand`], preserving the key order
/// of the source document.
///
/// Commands are handled strictly in this order. A duplicate key replaces
/// the earlier value but keeps its original position, matching JSON object
/// semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMap {
    entries: Vec<(String, PushCommand)>,
}

impl CommandMap {
    /// Creates an empty command map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a command, replacing an existing entry with the same name
    /// in place.
    pub fn insert(&mut self, name: impl Into<String>, cmd: PushCommand) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = cmd,
            None => self.entries.push((name, cmd)),
        }
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&PushCommand> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PushCommand)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Iterates command names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for CommandMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, cmd) in &self.entries {
            map.serialize_entry(name, cmd)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CommandMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = CommandMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of command name to push command")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut commands =
                    CommandMap { entries: Vec::with_capacity(access.size_hint().unwrap_or(0)) };
                while let Some((name, cmd)) = access.next_entry::<String, PushCommand>()? {
                    commands.insert(name, cmd);
                }
                Ok(commands)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(host: &str) -> PushCommand {
        serde_json::from_value(serde_json::json!({
            "basedir": "/base",
            "src": "src",
            "host": host,
            "dbs": ["db1"],
        }))
        .unwrap()
    }

    #[test]
    fn preserves_document_order() {
        let json = r#"{
            "zeta": {"basedir": "/b", "src": "s", "host": "http://z/", "dbs": ["d"]},
            "alpha": {"basedir": "/b", "src": "s", "host": "http://a/", "dbs": ["d"]},
            "mid": {"basedir": "/b", "src": "s", "host": "http://m/", "dbs": ["d"]}
        }"#;
        let map: CommandMap = serde_json::from_str(json).unwrap();
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_insert_replaces_in_place() {
        let mut map = CommandMap::new();
        map.insert("a", cmd("http://one/"));
        map.insert("b", cmd("http://two/"));
        map.insert("a", cmd("http://three/"));

        assert_eq!(map.len(), 2);
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(map.get("a").unwrap().host, "http://three/");
    }

    #[test]
    fn roundtrips_through_json() {
        let mut map = CommandMap::new();
        map.insert("docs", cmd("http://h/"));
        let json = serde_json::to_string(&map).unwrap();
        let back: CommandMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
