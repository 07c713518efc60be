// Document renderer
//
// Pure: turns a DocumentationSet plus a render configuration into an
// ordered list of (path, content) pairs. Writing is the orchestrator's job.

pub mod html;
pub mod markdown;
pub mod templates;

use crate::config::{LinkRedirects, OutputFormat};
use crate::error::Result;
use crate::model::{DocumentationSet, EntityDescriptor, ResolutionStatus};
use std::path::PathBuf;

/// Rendering configuration, carried separately from the walk settings
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub include_private: bool,
    pub project_name: String,
    pub redirects: LinkRedirects,
}

/// One rendered document: path relative to the destination, plus content
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDoc {
    pub path: PathBuf,
    pub content: String,
}

impl RenderedDoc {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// How one reference occurrence should appear in a document
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// Relative href to another document in the set
    Internal(String),
    /// Redirected URL for a known-but-excluded host entity
    External(String),
    /// Plain text, no link
    Plain,
}

/// Render the whole set in the configured format
///
/// Output order: index first, then entity documents ascending by id. HTML
/// output also carries its static stylesheet.
pub fn render(set: &DocumentationSet, config: &RenderConfig) -> Result<Vec<RenderedDoc>> {
    match config.format {
        OutputFormat::Markdown => markdown::render(set, config),
        OutputFormat::Html => html::render(set, config),
    }
}

/// Convert text to URL-friendly slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Document path for an entity, relative to the destination root
pub fn entity_doc_path(entity: &EntityDescriptor, format: OutputFormat) -> PathBuf {
    PathBuf::from(slugify(&entity.category)).join(format!(
        "{}.{}",
        slugify(&entity.id),
        format.extension()
    ))
}

/// Href from the index to an entity document
pub fn href_from_index(entity: &EntityDescriptor, format: OutputFormat) -> String {
    format!(
        "{}/{}.{}",
        slugify(&entity.category),
        slugify(&entity.id),
        format.extension()
    )
}

/// Href from one entity document to another (both live one level deep)
pub fn href_between(target: &EntityDescriptor, format: OutputFormat) -> String {
    format!("../{}", href_from_index(target, format))
}

/// Decide how a reference occurrence renders, honoring edge status and the
/// redirect tables
pub fn link_target(
    set: &DocumentationSet,
    config: &RenderConfig,
    target_id: &str,
    status: ResolutionStatus,
) -> LinkTarget {
    match status {
        ResolutionStatus::Resolved => match set.get(target_id) {
            Some(target) => LinkTarget::Internal(href_between(target, config.format)),
            None => LinkTarget::Plain,
        },
        ResolutionStatus::External => match config.redirects.resolve(target_id) {
            Some(url) => LinkTarget::External(url.to_string()),
            None => LinkTarget::Plain,
        },
        ResolutionStatus::Unresolved => LinkTarget::Plain,
    }
}

/// First line of a description, for index listings
pub fn summary_line(description: &str) -> &str {
    description.lines().next().unwrap_or("").trim()
}
