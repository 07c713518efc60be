// Reference resolver
//
// Pure lookup: every raw reference occurrence on every walked entity
// becomes one edge. The known-id snapshot is captured from the provider
// before resolution starts; no host queries happen here.

use crate::model::{DocumentationSet, ReferenceEdge, ResolutionStatus};
use crate::walk::Diagnostic;
use std::collections::BTreeSet;

/// Outcome of resolving a walked set
#[derive(Debug)]
pub struct ResolveResult {
    /// One edge per raw-reference occurrence, source-id then recorded order
    pub edges: Vec<ReferenceEdge>,
    /// One diagnostic per unresolved reference
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolveResult {
    pub fn unresolved_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| e.status == ResolutionStatus::Unresolved)
            .count()
    }
}

/// Resolve every raw reference in the set against the set itself and the
/// known-id snapshot
///
/// Occurrences are not deduplicated: two references to the same target keep
/// two edges, since each carries its own kind context.
pub fn resolve(set: &DocumentationSet, known_ids: &BTreeSet<String>) -> ResolveResult {
    let mut edges = Vec::new();
    let mut diagnostics = Vec::new();

    for entity in set.entities.values() {
        for reference in &entity.references {
            let status = if set.contains(&reference.target) {
                ResolutionStatus::Resolved
            } else if known_ids.contains(&reference.target) {
                ResolutionStatus::External
            } else {
                ResolutionStatus::Unresolved
            };

            if status == ResolutionStatus::Unresolved {
                diagnostics.push(Diagnostic::new(
                    &entity.id,
                    format!("unresolved reference to `{}`", reference.target),
                ));
            }

            edges.push(ReferenceEdge::new(
                &entity.id,
                &reference.target,
                reference.kind,
                status,
            ));
        }
    }

    ResolveResult { edges, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DocumentationSet, EntityDescriptor, EntityKind, RawReference, RefKind,
    };

    fn entity(id: &str, references: Vec<RawReference>) -> EntityDescriptor {
        EntityDescriptor {
            id: id.to_string(),
            kind: EntityKind::Class,
            display_name: id.to_string(),
            category: "game".to_string(),
            description: String::new(),
            members: Vec::new(),
            references,
        }
    }

    fn known(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_in_set() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("A", vec![RawReference::inherits("B")]));
        set.insert(entity("B", Vec::new()));

        let result = resolve(&set, &known(&["A", "B"]));
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].status, ResolutionStatus::Resolved);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_external() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("A", vec![RawReference::mention("Engine.Pawn")]));

        let result = resolve(&set, &known(&["A", "Engine.Pawn"]));
        assert_eq!(result.edges[0].status, ResolutionStatus::External);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_unresolved_with_diagnostic() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("A", vec![RawReference::contains("Ghost")]));

        let result = resolve(&set, &known(&["A"]));
        assert_eq!(result.edges[0].status, ResolutionStatus::Unresolved);
        assert_eq!(result.unresolved_count(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("Ghost"));
    }

    #[test]
    fn test_resolve_never_marks_non_member_resolved() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("A", vec![RawReference::inherits("Outside")]));

        let result = resolve(&set, &known(&["A", "Outside"]));
        assert_ne!(result.edges[0].status, ResolutionStatus::Resolved);
    }

    #[test]
    fn test_resolve_keeps_duplicate_occurrences() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity(
            "A",
            vec![
                RawReference::contains("B"),
                RawReference::mention("B"),
            ],
        ));
        set.insert(entity("B", Vec::new()));

        let result = resolve(&set, &known(&["A", "B"]));
        assert_eq!(result.edges.len(), 2);
        assert_eq!(result.edges[0].kind, RefKind::Contains);
        assert_eq!(result.edges[1].kind, RefKind::Mention);
    }

    #[test]
    fn test_resolve_edges_ordered_by_source_id() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("Zeta", vec![RawReference::contains("Alpha")]));
        set.insert(entity("Alpha", vec![RawReference::contains("Zeta")]));

        let result = resolve(&set, &known(&["Alpha", "Zeta"]));
        let sources: Vec<&str> = result.edges.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_resolve_upholds_set_invariant() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(entity("A", vec![RawReference::inherits("B")]));
        set.insert(entity("B", vec![RawReference::mention("Ghost")]));

        let result = resolve(&set, &known(&["A", "B"]));
        set.edges = result.edges;
        assert!(set.check_edge_invariant().is_ok());
    }
}
