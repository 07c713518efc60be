// Graph walker
//
// Breadth-first traversal of the host graph from a root set. The visited
// set bounds the walk on cyclic graphs; the depth bound is inclusive and
// counted in traversal edges. Per-node failures become diagnostics, not
// aborts.

use crate::model::{DocumentationSet, EntityDescriptor};
use crate::reflection::{describe, ReflectionProvider};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// A non-fatal problem recorded during a walk or resolution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    /// Entity id the problem is anchored to
    pub id: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Result of walking the host graph from a root set
#[derive(Debug)]
pub struct WalkResult {
    /// Deduplicated entities, keyed by id
    pub set: DocumentationSet,
    /// Per-node failures: unsupported kinds, ids the host cannot find
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk the host graph breadth-first from the given roots
///
/// Roots are expanded in ascending id order, as is each node's frontier, so
/// the output is deterministic on an unchanged graph. Only inheritance and
/// containment references are followed; mentions are recorded on the
/// descriptors but never traversed.
pub fn walk(
    provider: &dyn ReflectionProvider,
    roots: &[String],
    max_depth: usize,
) -> WalkResult {
    let mut set = DocumentationSet::new(roots.to_vec());
    let mut diagnostics = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();

    let mut ordered_roots: Vec<&String> = roots.iter().collect();
    ordered_roots.sort();
    ordered_roots.dedup();

    for root in ordered_roots {
        if visited.insert(root.clone()) {
            queue.push_back((root.clone(), 0));
        }
    }

    while let Some((id, depth)) = queue.pop_front() {
        let entity = match provider.record(&id) {
            Some(record) => match describe(record) {
                Ok(entity) => entity,
                Err(e) => {
                    diagnostics.push(Diagnostic::new(&id, e.to_string()));
                    EntityDescriptor::missing(&id)
                }
            },
            None => {
                diagnostics.push(Diagnostic::new(&id, "host has no record for this id"));
                continue;
            }
        };

        // Frontier in ascending target order; the bound truncates expansion
        // but the boundary entity itself is already in the set.
        if depth < max_depth {
            let mut frontier: Vec<&str> = entity
                .traversable_refs()
                .map(|r| r.target.as_str())
                .collect();
            frontier.sort_unstable();

            for target in frontier {
                if visited.insert(target.to_string()) {
                    queue.push_back((target.to_string(), depth + 1));
                }
            }
        }

        set.insert(entity);
    }

    WalkResult { set, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;
    use crate::reflection::{HostMember, HostRecord, MemoryProvider};

    fn weapon_world() -> MemoryProvider {
        let mut provider = MemoryProvider::new();
        provider
            .add(
                HostRecord::new("Game.Weapon", "class")
                    .with_category("Weapons")
                    .with_parent("Engine.Actor")
                    .with_reference("Game.Ammo"),
            )
            .add(HostRecord::new("Engine.Actor", "class").with_category("Engine"))
            .add(
                HostRecord::new("Game.Ammo", "struct")
                    .with_category("Weapons")
                    .with_reference("Game.Weapon"),
            );
        provider
    }

    #[test]
    fn test_walk_depth_one_scenario() {
        let provider = weapon_world();
        let result = walk(&provider, &["Game.Weapon".to_string()], 1);

        let ids: Vec<&str> = result.set.entities.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["Engine.Actor", "Game.Ammo", "Game.Weapon"]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_walk_depth_zero_roots_only() {
        let provider = weapon_world();
        let result = walk(&provider, &["Game.Weapon".to_string()], 0);

        assert_eq!(result.set.len(), 1);
        assert!(result.set.contains("Game.Weapon"));
    }

    #[test]
    fn test_walk_terminates_on_cycles() {
        let mut provider = MemoryProvider::new();
        provider
            .add(HostRecord::new("A", "class").with_parent("B"))
            .add(HostRecord::new("B", "class").with_reference("A"));

        let result = walk(&provider, &["A".to_string()], 50);
        assert_eq!(result.set.len(), 2);
        assert!(result.set.contains("A"));
        assert!(result.set.contains("B"));
    }

    #[test]
    fn test_walk_each_entity_appears_once() {
        // Inheritance diamond: D -> B -> A, D -> C -> A
        let mut provider = MemoryProvider::new();
        provider
            .add(HostRecord::new("A", "class"))
            .add(HostRecord::new("B", "class").with_parent("A"))
            .add(HostRecord::new("C", "class").with_parent("A"))
            .add(
                HostRecord::new("D", "class")
                    .with_parent("B")
                    .with_reference("C"),
            );

        let result = walk(&provider, &["D".to_string()], 10);
        assert_eq!(result.set.len(), 4);
    }

    #[test]
    fn test_walk_mentions_not_traversed() {
        let mut provider = MemoryProvider::new();
        provider
            .add(
                HostRecord::new("A", "class")
                    .with_member(HostMember::new("other", "Game.Other")),
            )
            .add(HostRecord::new("Game.Other", "class"));

        let result = walk(&provider, &["A".to_string()], 5);
        assert_eq!(result.set.len(), 1);
        assert!(!result.set.contains("Game.Other"));
    }

    #[test]
    fn test_walk_unsupported_kind_becomes_placeholder() {
        let mut provider = MemoryProvider::new();
        provider
            .add(HostRecord::new("A", "class").with_reference("Game.OnFired"))
            .add(HostRecord::new("Game.OnFired", "delegate"));

        let result = walk(&provider, &["A".to_string()], 1);

        let placeholder = result.set.get("Game.OnFired").unwrap();
        assert_eq!(placeholder.kind, EntityKind::Unknown);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("delegate"));
    }

    #[test]
    fn test_walk_missing_record_is_diagnosed_and_skipped() {
        let mut provider = MemoryProvider::new();
        provider.add(HostRecord::new("A", "class").with_reference("Ghost"));

        let result = walk(&provider, &["A".to_string()], 2);
        assert_eq!(result.set.len(), 1);
        assert!(!result.set.contains("Ghost"));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].id, "Ghost");
    }

    #[test]
    fn test_walk_duplicate_roots_collapse() {
        let provider = weapon_world();
        let roots = vec!["Game.Weapon".to_string(), "Game.Weapon".to_string()];
        let result = walk(&provider, &roots, 0);
        assert_eq!(result.set.len(), 1);
    }

    #[test]
    fn test_walk_deterministic_across_runs() {
        let provider = weapon_world();
        let roots = vec!["Game.Weapon".to_string()];

        let first = walk(&provider, &roots, 3);
        let second = walk(&provider, &roots, 3);
        assert_eq!(first.set.entities, second.set.entities);
    }
}
