// Generation orchestrator
//
// Drives root resolution -> walk -> resolve -> render -> write. Each stage
// is synchronous; nothing is rolled back across stages, but the write stage
// is scoped: a failed run removes the files it wrote before surfacing the
// error.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::reflection::ReflectionProvider;
use crate::render::{render, RenderConfig, RenderedDoc};
use crate::resolve::resolve;
use crate::walk::{walk, Diagnostic};
use chrono::{DateTime, Utc};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Report returned by a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Entities documented, placeholders included
    pub entities: usize,
    /// Files written to the destination
    pub files_written: usize,
    /// Unresolved reference count
    pub unresolved: usize,
    /// Per-node and per-reference diagnostics, in pipeline order
    pub diagnostics: Vec<Diagnostic>,
    /// SHA-256 over the rendered output; equal runs produce equal digests
    pub digest: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Documented {} entities in {} files, {} unresolved references, {} diagnostics",
            self.entities,
            self.files_written,
            self.unresolved,
            self.diagnostics.len()
        )
    }
}

/// Orchestrates one generation run
pub struct Generator {
    config: Config,
    verbose: bool,
}

impl Generator {
    /// Create a generator with a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            verbose: false,
        })
    }

    /// Create generator with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the pipeline and write the documentation set to the destination
    pub fn generate(&self, provider: &dyn ReflectionProvider) -> Result<GenerationReport> {
        let roots = self.resolve_roots(provider)?;

        let walk_result = walk(provider, &roots, self.config.generation.max_depth);
        let mut set = walk_result.set;
        let mut diagnostics = walk_result.diagnostics;

        if set.is_empty() {
            return Err(Error::EmptyRootSet);
        }

        // Known-id snapshot: the resolver never queries the host itself.
        let known_ids: BTreeSet<String> = provider.ids().into_iter().collect();
        let resolve_result = resolve(&set, &known_ids);
        let unresolved = resolve_result.unresolved_count();
        set.edges = resolve_result.edges;
        diagnostics.extend(resolve_result.diagnostics);

        let render_config = RenderConfig {
            format: self.config.output.format,
            include_private: self.config.generation.include_private,
            project_name: self.config.project.name.clone(),
            redirects: self.config.redirects.clone(),
        };
        let docs = render(&set, &render_config)?;
        let digest = output_digest(&docs);

        let files_written = self.write_docs(&docs)?;

        Ok(GenerationReport {
            entities: set.len(),
            files_written,
            unresolved,
            diagnostics,
            digest,
            started_at: set.run.started_at,
        })
    }

    /// Expand root patterns against the host id universe
    ///
    /// Each entry matches as an exact id first, then as a glob pattern.
    /// An empty `roots` list selects every id the host reports.
    fn resolve_roots(&self, provider: &dyn ReflectionProvider) -> Result<Vec<String>> {
        let ids = provider.ids();

        if self.config.generation.roots.is_empty() {
            if ids.is_empty() {
                return Err(Error::EmptyRootSet);
            }
            return Ok(ids);
        }

        let mut roots: BTreeSet<String> = BTreeSet::new();
        for entry in &self.config.generation.roots {
            if provider.knows(entry) {
                roots.insert(entry.clone());
                continue;
            }
            let pattern = Pattern::new(entry)?;
            for id in ids.iter().filter(|id| pattern.matches(id)) {
                roots.insert(id.clone());
            }
        }

        if roots.is_empty() {
            return Err(Error::EmptyRootSet);
        }
        Ok(roots.into_iter().collect())
    }

    /// Write every rendered document under the destination, then sweep
    /// generated files a previous run left behind
    fn write_docs(&self, docs: &[RenderedDoc]) -> Result<usize> {
        let destination = &self.config.output.destination;
        let mut guard = DestinationGuard::open(destination)?;

        let progress = if self.verbose {
            let pb = ProgressBar::new(docs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for doc in docs {
            if let Some(ref pb) = progress {
                pb.set_message(doc.path.display().to_string());
                pb.inc(1);
            }
            guard.write(&doc.path, &doc.content)?;
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Write complete");
        }

        let written = guard.commit();
        sweep_stale(destination, &written);

        Ok(written.len())
    }
}

/// Entry point: run one generation against a provider
pub fn generate(config: &Config, provider: &dyn ReflectionProvider) -> Result<GenerationReport> {
    Generator::new(config.clone())?.generate(provider)
}

/// Scoped access to the output destination
///
/// Tracks every file it writes; dropping the guard without `commit` removes
/// them again, so a failed run leaves no partial output.
struct DestinationGuard {
    root: PathBuf,
    written: Vec<PathBuf>,
    committed: bool,
}

impl DestinationGuard {
    fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| Error::destination_write(root, e))?;
        Ok(Self {
            root: root.to_path_buf(),
            written: Vec::new(),
            committed: false,
        })
    }

    fn write(&mut self, rel_path: &Path, content: &str) -> Result<()> {
        let full = self.root.join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::destination_write(parent, e))?;
        }
        fs::write(&full, content).map_err(|e| Error::destination_write(&full, e))?;
        self.written.push(rel_path.to_path_buf());
        Ok(())
    }

    fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.written)
    }
}

impl Drop for DestinationGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for rel_path in &self.written {
            let full = self.root.join(rel_path);
            let _ = fs::remove_file(&full);
            if let Some(parent) = full.parent() {
                let _ = fs::remove_dir(parent);
            }
        }
    }
}

/// Remove generated documents a previous run left behind
///
/// Only files with generated extensions are touched; anything else in the
/// destination is left alone.
fn sweep_stale(destination: &Path, written: &[PathBuf]) {
    let keep: BTreeSet<&Path> = written.iter().map(PathBuf::as_path).collect();

    for entry in WalkDir::new(destination)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let is_generated = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e, "md" | "html"))
            .unwrap_or(false);
        if !is_generated {
            continue;
        }

        let rel = match entry.path().strip_prefix(destination) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !keep.contains(rel) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

/// SHA-256 over the rendered output in document order
fn output_digest(docs: &[RenderedDoc]) -> String {
    let mut hasher = Sha256::new();
    for doc in docs {
        hasher.update(doc.path.to_string_lossy().as_bytes());
        hasher.update([0]);
        hasher.update(doc.content.as_bytes());
        hasher.update([0]);
    }
    format!("{:x}", hasher.finalize())
}
