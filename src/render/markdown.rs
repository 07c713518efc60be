// Markdown renderer
//
// Hand-assembled documents: an index grouped by category plus one page per
// entity. Members keep host declaration order.

use crate::error::Result;
use crate::model::{DocumentationSet, EntityDescriptor, RefKind, ReferenceEdge};
use crate::render::{
    entity_doc_path, href_from_index, link_target, summary_line, LinkTarget, RenderConfig,
    RenderedDoc,
};

/// Render the set as markdown documents, index first
pub fn render(set: &DocumentationSet, config: &RenderConfig) -> Result<Vec<RenderedDoc>> {
    let mut docs = Vec::new();
    docs.push(RenderedDoc::new(
        format!("index.{}", config.format.extension()),
        render_index(set, config),
    ));

    for entity in set.entities.values() {
        docs.push(RenderedDoc::new(
            entity_doc_path(entity, config.format),
            render_entity(set, config, entity),
        ));
    }

    Ok(docs)
}

/// Index page: all entities grouped by category, each entry linked
fn render_index(set: &DocumentationSet, config: &RenderConfig) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", config.project_name));
    md.push_str(&format!("{} entities documented.\n\n", set.len()));

    for (category, entities) in set.by_category() {
        md.push_str(&format!("## {}\n\n", category));
        for entity in entities {
            let summary = summary_line(&entity.description);
            if summary.is_empty() {
                md.push_str(&format!(
                    "- [{}]({})\n",
                    entity.display_name,
                    href_from_index(entity, config.format)
                ));
            } else {
                md.push_str(&format!(
                    "- [{}]({}) — {}\n",
                    entity.display_name,
                    href_from_index(entity, config.format),
                    summary
                ));
            }
        }
        md.push('\n');
    }

    md
}

/// One entity page
fn render_entity(
    set: &DocumentationSet,
    config: &RenderConfig,
    entity: &EntityDescriptor,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", entity.display_name));
    md.push_str(&format!(
        "`{}` · {} · `{}`\n\n",
        entity.kind.label(),
        entity.category,
        entity.id
    ));

    if entity.is_placeholder() {
        md.push_str("No descriptor could be produced for this entity.\n");
        return md;
    }

    // Entities without their own text borrow the nearest ancestor's
    let description = set.effective_description(&entity.id).unwrap_or("");
    if !description.is_empty() {
        md.push_str(description);
        md.push_str("\n\n");
    }

    let edges = set.edges_from(&entity.id);

    let inherits: Vec<&&ReferenceEdge> = edges
        .iter()
        .filter(|e| e.kind == RefKind::Inherits)
        .collect();
    if !inherits.is_empty() {
        md.push_str("## Inherits\n\n");
        for edge in inherits {
            md.push_str(&format!("- {}\n", reference_inline(set, config, edge)));
        }
        md.push('\n');
    }

    let members: Vec<_> = entity.visible_members(config.include_private).collect();
    if !members.is_empty() {
        md.push_str("## Members\n\n");
        md.push_str("| Name | Type | Default | Description |\n");
        md.push_str("| --- | --- | --- | --- |\n");
        for member in members {
            md.push_str(&format!(
                "| `{}` | `{}` | {} | {} |\n",
                member.name,
                member.type_name,
                member
                    .default_value
                    .as_deref()
                    .map(|d| format!("`{}`", d))
                    .unwrap_or_default(),
                summary_line(&member.description)
            ));
        }
        md.push('\n');
    }

    let others: Vec<&&ReferenceEdge> = edges
        .iter()
        .filter(|e| e.kind != RefKind::Inherits)
        .collect();
    if !others.is_empty() {
        md.push_str("## References\n\n");
        for edge in others {
            let verb = match edge.kind {
                RefKind::Contains => "contains",
                RefKind::Mention => "mentions",
                RefKind::Inherits => "inherits",
            };
            md.push_str(&format!(
                "- {} {}\n",
                verb,
                reference_inline(set, config, edge)
            ));
        }
        md.push('\n');
    }

    md
}

/// Inline rendering of one reference: link when resolved or redirected,
/// plain text otherwise
fn reference_inline(set: &DocumentationSet, config: &RenderConfig, edge: &ReferenceEdge) -> String {
    let label = set
        .get(&edge.target)
        .map(|t| t.display_name.as_str())
        .unwrap_or(edge.target.as_str());

    match link_target(set, config, &edge.target, edge.status) {
        LinkTarget::Internal(href) => format!("[{}]({})", label, href),
        LinkTarget::External(url) => format!("[{}]({})", label, url),
        LinkTarget::Plain => format!("`{}`", edge.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        EntityKind, MemberDescriptor, RawReference, ResolutionStatus, Visibility,
    };

    fn fixture() -> (DocumentationSet, RenderConfig) {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(EntityDescriptor {
            id: "Game.Weapon".to_string(),
            kind: EntityKind::Class,
            display_name: "Weapon".to_string(),
            category: "Weapons".to_string(),
            description: "Base weapon.\nLonger text.".to_string(),
            members: vec![
                MemberDescriptor {
                    name: "damage".to_string(),
                    type_name: "float".to_string(),
                    visibility: Visibility::Public,
                    description: "Damage per hit".to_string(),
                    default_value: Some("10.0".to_string()),
                },
                MemberDescriptor {
                    name: "seed".to_string(),
                    type_name: "int32".to_string(),
                    visibility: Visibility::Private,
                    description: String::new(),
                    default_value: None,
                },
            ],
            references: vec![RawReference::inherits("Engine.Actor")],
        });
        set.insert(EntityDescriptor {
            id: "Engine.Actor".to_string(),
            kind: EntityKind::Class,
            display_name: "Actor".to_string(),
            category: "Engine".to_string(),
            description: String::new(),
            members: Vec::new(),
            references: Vec::new(),
        });
        set.edges = vec![ReferenceEdge::new(
            "Game.Weapon",
            "Engine.Actor",
            RefKind::Inherits,
            ResolutionStatus::Resolved,
        )];

        let config = RenderConfig {
            project_name: "Test Docs".to_string(),
            ..Default::default()
        };
        (set, config)
    }

    #[test]
    fn test_render_doc_count_and_order() {
        let (set, config) = fixture();
        let docs = render(&set, &config).unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].path.to_str().unwrap(), "index.md");
        assert_eq!(docs[1].path.to_str().unwrap(), "engine/engine-actor.md");
        assert_eq!(docs[2].path.to_str().unwrap(), "weapons/game-weapon.md");
    }

    #[test]
    fn test_index_groups_by_category() {
        let (set, config) = fixture();
        let docs = render(&set, &config).unwrap();
        let index = &docs[0].content;

        assert!(index.contains("# Test Docs"));
        assert!(index.contains("## Engine"));
        assert!(index.contains("## Weapons"));
        assert!(index.contains("[Weapon](weapons/game-weapon.md) — Base weapon."));
    }

    #[test]
    fn test_entity_page_links_resolved_inheritance() {
        let (set, config) = fixture();
        let docs = render(&set, &config).unwrap();
        let weapon = &docs[2].content;

        assert!(weapon.contains("# Weapon"));
        assert!(weapon.contains("## Inherits"));
        assert!(weapon.contains("[Actor](../engine/engine-actor.md)"));
    }

    #[test]
    fn test_members_filtered_and_ordered() {
        let (set, mut config) = fixture();

        let docs = render(&set, &config).unwrap();
        let weapon = &docs[2].content;
        assert!(weapon.contains("| `damage` | `float` | `10.0` | Damage per hit |"));
        assert!(!weapon.contains("seed"));

        config.include_private = true;
        let docs = render(&set, &config).unwrap();
        assert!(docs[2].content.contains("`seed`"));
    }

    #[test]
    fn test_unresolved_renders_plain() {
        let (mut set, config) = fixture();
        set.edges.push(ReferenceEdge::new(
            "Game.Weapon",
            "Ghost",
            RefKind::Mention,
            ResolutionStatus::Unresolved,
        ));

        let docs = render(&set, &config).unwrap();
        let weapon = &docs[2].content;
        assert!(weapon.contains("mentions `Ghost`"));
        assert!(!weapon.contains("](Ghost)"));
    }

    #[test]
    fn test_description_falls_back_through_inheritance() {
        let (mut set, config) = fixture();
        set.insert(EntityDescriptor {
            id: "Game.Rifle".to_string(),
            kind: EntityKind::Class,
            display_name: "Rifle".to_string(),
            category: "Weapons".to_string(),
            description: String::new(),
            members: Vec::new(),
            references: vec![RawReference::inherits("Game.Weapon")],
        });
        set.edges.push(ReferenceEdge::new(
            "Game.Rifle",
            "Game.Weapon",
            RefKind::Inherits,
            ResolutionStatus::Resolved,
        ));

        let docs = render(&set, &config).unwrap();
        let rifle = docs
            .iter()
            .find(|d| d.path.ends_with("game-rifle.md"))
            .unwrap();
        assert!(rifle.content.contains("Base weapon."));
    }

    #[test]
    fn test_placeholder_page_is_stub() {
        let mut set = DocumentationSet::new(Vec::new());
        set.insert(EntityDescriptor::missing("Game.Ghost"));
        let config = RenderConfig::default();

        let docs = render(&set, &config).unwrap();
        assert!(docs[1]
            .content
            .contains("No descriptor could be produced"));
    }
}
