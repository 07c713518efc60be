// Neutral data model for documentable entities
//
// Everything downstream of the reflection adapter operates on these inert
// descriptors. Cross-entity relationships are expressed as id-based edges,
// never as direct links, so cyclic host graphs stay representable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of documentable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Struct,
    Enum,
    Asset,
    /// Placeholder for a reachable entity whose descriptor could not be built
    Unknown,
}

impl EntityKind {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Struct => "struct",
            EntityKind::Enum => "enum",
            EntityKind::Asset => "asset",
            EntityKind::Unknown => "unknown",
        }
    }
}

/// Member visibility as declared on the host object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// True for members hidden behind the include-private switch
    pub fn is_private(&self) -> bool {
        !matches!(self, Visibility::Public)
    }
}

/// A property or function of an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberDescriptor {
    /// Member name
    pub name: String,
    /// Declared type, as text
    pub type_name: String,
    /// Declared visibility
    pub visibility: Visibility,
    /// Free-text description
    pub description: String,
    /// Default value, as text
    pub default_value: Option<String>,
}

/// Kind of relationship a reference expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// Parent type edge
    Inherits,
    /// Explicit reference field
    Contains,
    /// Textual cross-reference found in member declarations
    Mention,
}

impl RefKind {
    /// Only inheritance and containment pull new entities into a walk
    pub fn is_traversable(&self) -> bool {
        matches!(self, RefKind::Inherits | RefKind::Contains)
    }
}

/// A raw cross-reference recorded on an entity, in discovery order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawReference {
    pub target: String,
    pub kind: RefKind,
}

impl RawReference {
    pub fn new(target: impl Into<String>, kind: RefKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }

    pub fn inherits(target: impl Into<String>) -> Self {
        Self::new(target, RefKind::Inherits)
    }

    pub fn contains(target: impl Into<String>) -> Self {
        Self::new(target, RefKind::Contains)
    }

    pub fn mention(target: impl Into<String>) -> Self {
        Self::new(target, RefKind::Mention)
    }
}

/// One documentable unit, immutable once produced by the adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityDescriptor {
    /// Stable qualified name, unique within a run
    pub id: String,
    pub kind: EntityKind,
    /// Display name, usually the last segment of the id
    pub display_name: String,
    /// Category or module tag used for output grouping
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Members in host declaration order
    pub members: Vec<MemberDescriptor>,
    /// Raw references in discovery order
    pub references: Vec<RawReference>,
}

impl EntityDescriptor {
    /// Placeholder for a reachable id whose host object could not be described
    pub fn missing(id: impl Into<String>) -> Self {
        let id = id.into();
        let display_name = id.rsplit('.').next().unwrap_or(&id).to_string();
        Self {
            id,
            kind: EntityKind::Unknown,
            display_name,
            category: "unknown".to_string(),
            description: String::new(),
            members: Vec::new(),
            references: Vec::new(),
        }
    }

    /// True for walker placeholders
    pub fn is_placeholder(&self) -> bool {
        self.kind == EntityKind::Unknown
    }

    /// References that the walker may expand
    pub fn traversable_refs(&self) -> impl Iterator<Item = &RawReference> {
        self.references.iter().filter(|r| r.kind.is_traversable())
    }

    /// Members visible under the given privacy setting, declaration order kept
    pub fn visible_members(&self, include_private: bool) -> impl Iterator<Item = &MemberDescriptor> {
        self.members
            .iter()
            .filter(move |m| include_private || !m.visibility.is_private())
    }
}

/// Resolution outcome for one reference edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Target is documented in the same set
    Resolved,
    /// Target is a known host entity outside the documented set
    External,
    /// Target is unknown
    Unresolved,
}

/// A resolved relationship between two entities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceEdge {
    pub source: String,
    pub target: String,
    pub kind: RefKind,
    pub status: ResolutionStatus,
}

impl ReferenceEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RefKind,
        status: ResolutionStatus,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            status,
        }
    }
}

/// Metadata recorded for one generation run
///
/// The timestamp never reaches rendered output; re-running on an unchanged
/// graph must produce byte-identical files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub roots: Vec<String>,
    pub started_at: DateTime<Utc>,
}

/// The full output of one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentationSet {
    /// Entities keyed by id; BTreeMap keeps iteration deterministic
    pub entities: BTreeMap<String, EntityDescriptor>,
    /// All reference edges, one per raw-reference occurrence
    pub edges: Vec<ReferenceEdge>,
    /// Run metadata
    pub run: RunInfo,
}

impl DocumentationSet {
    pub fn new(roots: Vec<String>) -> Self {
        Self {
            entities: BTreeMap::new(),
            edges: Vec::new(),
            run: RunInfo {
                roots,
                started_at: Utc::now(),
            },
        }
    }

    /// Insert an entity, ignoring duplicates (first descriptor wins)
    pub fn insert(&mut self, entity: EntityDescriptor) -> bool {
        if self.entities.contains_key(&entity.id) {
            return false;
        }
        self.entities.insert(entity.id.clone(), entity);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&EntityDescriptor> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Edges originating from the given entity, in recorded order
    pub fn edges_from(&self, id: &str) -> Vec<&ReferenceEdge> {
        self.edges.iter().filter(|e| e.source == id).collect()
    }

    /// Entities grouped by category; groups and members sorted by id
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&EntityDescriptor>> {
        let mut groups: BTreeMap<&str, Vec<&EntityDescriptor>> = BTreeMap::new();
        for entity in self.entities.values() {
            groups.entry(entity.category.as_str()).or_default().push(entity);
        }
        groups
    }

    /// First non-empty description reachable through resolved inheritance
    /// edges, starting at the entity itself
    pub fn effective_description(&self, id: &str) -> Option<&str> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return None;
            }
            let entity = self.get(current)?;
            if !entity.description.is_empty() {
                return Some(&entity.description);
            }
            current = self
                .edges
                .iter()
                .find(|e| {
                    e.source == current
                        && e.kind == RefKind::Inherits
                        && e.status == ResolutionStatus::Resolved
                })
                .map(|e| e.target.as_str())?;
        }
    }

    /// Every resolved edge must target an entity present in the set
    pub fn check_edge_invariant(&self) -> std::result::Result<(), String> {
        for edge in &self.edges {
            if edge.status == ResolutionStatus::Resolved && !self.contains(&edge.target) {
                return Err(format!(
                    "resolved edge {} -> {} targets an entity outside the set",
                    edge.source, edge.target
                ));
            }
            if edge.source.is_empty() {
                return Err("edge with empty source".to_string());
            }
        }
        Ok(())
    }
}
