// HTML renderer
//
// Builds template contexts in Rust and keeps the templates dumb. Every run
// also carries the static stylesheet so the output directory is
// self-contained.

use crate::error::Result;
use crate::model::{DocumentationSet, EntityDescriptor, RefKind, ReferenceEdge};
use crate::render::{
    entity_doc_path, href_from_index, link_target, summary_line, LinkTarget, RenderConfig,
    RenderedDoc,
};
use crate::render::templates::TemplateEngine;
use serde::Serialize;
use tera::Context;

#[derive(Debug, Serialize)]
struct IndexEntry {
    name: String,
    href: String,
    summary: String,
}

#[derive(Debug, Serialize)]
struct CategoryGroup {
    name: String,
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Serialize)]
struct MemberRow {
    name: String,
    type_name: String,
    default_value: Option<String>,
    description: String,
}

#[derive(Debug, Serialize)]
struct RefRow {
    verb: String,
    label: String,
    href: Option<String>,
}

/// Render the set as an HTML document tree, index first, stylesheet last
pub fn render(set: &DocumentationSet, config: &RenderConfig) -> Result<Vec<RenderedDoc>> {
    let engine = TemplateEngine::new()?;
    let mut docs = Vec::new();

    docs.push(RenderedDoc::new(
        "index.html",
        render_index(&engine, set, config)?,
    ));

    for entity in set.entities.values() {
        docs.push(RenderedDoc::new(
            entity_doc_path(entity, config.format),
            render_entity(&engine, set, config, entity)?,
        ));
    }

    docs.push(RenderedDoc::new(
        "assets/style.css",
        include_str!("../../assets/style.css"),
    ));

    Ok(docs)
}

fn render_index(
    engine: &TemplateEngine,
    set: &DocumentationSet,
    config: &RenderConfig,
) -> Result<String> {
    let categories: Vec<CategoryGroup> = set
        .by_category()
        .into_iter()
        .map(|(name, entities)| CategoryGroup {
            name: name.to_string(),
            entries: entities
                .iter()
                .map(|entity| IndexEntry {
                    name: entity.display_name.clone(),
                    href: href_from_index(entity, config.format),
                    summary: summary_line(&entity.description).to_string(),
                })
                .collect(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("project_name", &config.project_name);
    context.insert("total", &set.len());
    context.insert("categories", &categories);
    context.insert("css_href", "assets/style.css");

    engine.render("index.html", &context)
}

fn render_entity(
    engine: &TemplateEngine,
    set: &DocumentationSet,
    config: &RenderConfig,
    entity: &EntityDescriptor,
) -> Result<String> {
    let edges = set.edges_from(&entity.id);

    let inherits: Vec<RefRow> = edges
        .iter()
        .filter(|e| e.kind == RefKind::Inherits)
        .map(|e| ref_row(set, config, e))
        .collect();

    let references: Vec<RefRow> = edges
        .iter()
        .filter(|e| e.kind != RefKind::Inherits)
        .map(|e| ref_row(set, config, e))
        .collect();

    let members: Vec<MemberRow> = entity
        .visible_members(config.include_private)
        .map(|m| MemberRow {
            name: m.name.clone(),
            type_name: m.type_name.clone(),
            default_value: m.default_value.clone(),
            description: summary_line(&m.description).to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("project_name", &config.project_name);
    context.insert("entity", entity);
    context.insert(
        "description",
        set.effective_description(&entity.id).unwrap_or(""),
    );
    context.insert("kind", entity.kind.label());
    context.insert("placeholder", &entity.is_placeholder());
    context.insert("inherits", &inherits);
    context.insert("members", &members);
    context.insert("references", &references);
    context.insert("index_href", "../index.html");
    context.insert("css_href", "../assets/style.css");

    engine.render("entity.html", &context)
}

fn ref_row(set: &DocumentationSet, config: &RenderConfig, edge: &ReferenceEdge) -> RefRow {
    let verb = match edge.kind {
        RefKind::Inherits => "inherits",
        RefKind::Contains => "contains",
        RefKind::Mention => "mentions",
    };

    match link_target(set, config, &edge.target, edge.status) {
        LinkTarget::Internal(href) => RefRow {
            verb: verb.to_string(),
            label: set
                .get(&edge.target)
                .map(|t| t.display_name.clone())
                .unwrap_or_else(|| edge.target.clone()),
            href: Some(href),
        },
        LinkTarget::External(url) => RefRow {
            verb: verb.to_string(),
            label: edge.target.clone(),
            href: Some(url),
        },
        LinkTarget::Plain => RefRow {
            verb: verb.to_string(),
            label: edge.target.clone(),
            href: None,
        },
    }
}
