//! Reflectdoc - Generate reference docs from a game engine's reflection dump
//!
//! Walks a reflected type/object graph from a configured root set, resolves
//! cross-references, and renders one document per entity plus a
//! category-grouped index as Markdown or HTML.

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod reflection;
pub mod render;
pub mod resolve;
pub mod walk;

// Re-export main types
pub use config::{Config, LinkRedirects, OutputFormat};
pub use error::{Error, Result};
pub use generate::{generate, GenerationReport, Generator};
pub use model::{
    DocumentationSet, EntityDescriptor, EntityKind, MemberDescriptor, RawReference,
    RefKind, ReferenceEdge, ResolutionStatus, Visibility,
};
pub use reflection::{DumpProvider, HostMember, HostRecord, MemoryProvider, ReflectionProvider};
pub use render::{RenderConfig, RenderedDoc};
pub use walk::Diagnostic;
