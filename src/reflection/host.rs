// Raw host-side reflection records and the provider interface
//
// A `HostRecord` is one object as the engine reports it: kind tag and
// visibility are plain strings, references are unvalidated ids. The adapter
// is the only consumer that interprets them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One member as reported by the host reflection system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostMember {
    pub name: String,
    /// Declared type text, e.g. `Array<Ammo>` or `float`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Host visibility tag: public / protected / private
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl HostMember {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            visibility: "public".to_string(),
            description: String::new(),
            default_value: None,
        }
    }

    pub fn with_visibility(mut self, visibility: &str) -> Self {
        self.visibility = visibility.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }
}

/// One object as reported by the host reflection system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostRecord {
    /// Stable qualified name
    pub id: String,
    /// Host kind tag: class / struct / enum / asset
    pub kind: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Parent type id, when the object inherits from another
    #[serde(default)]
    pub parent: Option<String>,
    /// Explicit reference fields, in declaration order
    #[serde(default)]
    pub references: Vec<String>,
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<HostMember>,
}

impl HostRecord {
    pub fn new(id: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            display_name: None,
            category: None,
            description: String::new(),
            parent: None,
            references: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_reference(mut self, target: &str) -> Self {
        self.references.push(target.to_string());
        self
    }

    pub fn with_member(mut self, member: HostMember) -> Self {
        self.members.push(member);
        self
    }
}

/// Read-only query interface over the host object graph
///
/// The core never mutates host state and never queries it after the walk
/// phase; `ids` doubles as the content-browser listing used to seed roots.
pub trait ReflectionProvider {
    /// Look up one object by id
    fn record(&self, id: &str) -> Option<&HostRecord>;

    /// All ids the host knows, in ascending order
    fn ids(&self) -> Vec<String>;

    /// True when the host knows the id, documented or not
    fn knows(&self, id: &str) -> bool {
        self.record(id).is_some()
    }
}

/// Provider backed by a JSON reflection dump exported from the engine
///
/// The dump is an array of `HostRecord` values. Duplicate ids keep the first
/// record.
#[derive(Debug, Default)]
pub struct DumpProvider {
    records: BTreeMap<String, HostRecord>,
}

impl DumpProvider {
    /// Load a reflection dump from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a reflection dump from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Vec<HostRecord> = serde_json::from_str(json)?;
        let mut records = BTreeMap::new();
        for record in parsed {
            records.entry(record.id.clone()).or_insert(record);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ReflectionProvider for DumpProvider {
    fn record(&self, id: &str) -> Option<&HostRecord> {
        self.records.get(id)
    }

    fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }
}

/// In-memory provider for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryProvider {
    records: BTreeMap<String, HostRecord>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: HostRecord) -> &mut Self {
        self.records.insert(record.id.clone(), record);
        self
    }
}

impl ReflectionProvider for MemoryProvider {
    fn record(&self, id: &str) -> Option<&HostRecord> {
        self.records.get(id)
    }

    fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"[
        {
            "id": "Game.Weapon",
            "kind": "class",
            "category": "Weapons",
            "parent": "Engine.Actor",
            "references": ["Game.Ammo"],
            "members": [
                {"name": "damage", "type": "float", "visibility": "public"},
                {"name": "owner", "type": "Engine.Pawn", "visibility": "private"}
            ]
        },
        {"id": "Game.Ammo", "kind": "struct", "category": "Weapons"}
    ]"#;

    #[test]
    fn test_dump_from_json() {
        let provider = DumpProvider::from_json(DUMP).unwrap();
        assert_eq!(provider.len(), 2);

        let weapon = provider.record("Game.Weapon").unwrap();
        assert_eq!(weapon.kind, "class");
        assert_eq!(weapon.parent.as_deref(), Some("Engine.Actor"));
        assert_eq!(weapon.members.len(), 2);
        assert_eq!(weapon.members[1].visibility, "private");
    }

    #[test]
    fn test_dump_ids_sorted() {
        let provider = DumpProvider::from_json(DUMP).unwrap();
        assert_eq!(provider.ids(), vec!["Game.Ammo", "Game.Weapon"]);
    }

    #[test]
    fn test_dump_rejects_invalid_json() {
        assert!(DumpProvider::from_json("not json").is_err());
    }

    #[test]
    fn test_dump_duplicate_ids_keep_first() {
        let json = r#"[
            {"id": "A", "kind": "class", "description": "first"},
            {"id": "A", "kind": "struct", "description": "second"}
        ]"#;
        let provider = DumpProvider::from_json(json).unwrap();
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.record("A").unwrap().description, "first");
    }

    #[test]
    fn test_dump_load_missing_file() {
        assert!(DumpProvider::load(Path::new("/nonexistent/dump.json")).is_err());
    }

    #[test]
    fn test_memory_provider_knows() {
        let mut provider = MemoryProvider::new();
        provider.add(HostRecord::new("Game.Ammo", "struct"));

        assert!(provider.knows("Game.Ammo"));
        assert!(!provider.knows("Game.Rifle"));
    }

    #[test]
    fn test_record_builders() {
        let record = HostRecord::new("Game.Weapon", "class")
            .with_category("Weapons")
            .with_parent("Engine.Actor")
            .with_reference("Game.Ammo")
            .with_member(
                HostMember::new("damage", "float")
                    .with_description("Base damage per hit")
                    .with_default("10.0"),
            );

        assert_eq!(record.category.as_deref(), Some("Weapons"));
        assert_eq!(record.references, vec!["Game.Ammo"]);
        assert_eq!(record.members[0].default_value.as_deref(), Some("10.0"));
    }
}
