use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration
///
/// Persisted as `reflectdoc.toml` between sessions; CLI flags are merged on
/// top with `merge_cli`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
    pub redirects: LinkRedirects,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

/// Walk and extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Root set: exact entity ids or glob patterns over the host id space
    pub roots: Vec<String>,
    /// Inclusive traversal depth in edges; 0 documents the roots alone
    pub max_depth: usize,
    /// Emit private and protected members
    pub include_private: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub destination: PathBuf,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
}

impl OutputFormat {
    /// File extension for documents of this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

/// Redirect tables for documentation links
///
/// Checked in order: native, documentation, class, asset. Empty values are
/// ignored. Keys iterate sorted, so rendered output is stable regardless of
/// the order entries were written in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkRedirects {
    pub native: BTreeMap<String, String>,
    pub documentation: BTreeMap<String, String>,
    pub class: BTreeMap<String, String>,
    pub asset: BTreeMap<String, String>,
}

impl LinkRedirects {
    /// Resolve a link through the redirect tables, first non-empty match wins
    pub fn resolve(&self, link: &str) -> Option<&str> {
        [
            &self.native,
            &self.documentation,
            &self.class,
            &self.asset,
        ]
        .into_iter()
        .filter_map(|table| table.get(link))
        .find(|target| !target.is_empty())
        .map(String::as_str)
    }

    /// True when any table holds a non-empty redirect for the link
    pub fn has_redirect(&self, link: &str) -> bool {
        self.resolve(link).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.native.is_empty()
            && self.documentation.is_empty()
            && self.class.is_empty()
            && self.asset.is_empty()
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            description: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            max_depth: 5,
            include_private: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            destination: PathBuf::from("./reflectdoc-out"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serialize back to TOML, used by the settings surface
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::other(e.to_string()))
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        roots: Vec<String>,
        depth: Option<usize>,
        include_private: bool,
        format: Option<String>,
        destination: Option<PathBuf>,
    ) {
        if !roots.is_empty() {
            self.generation.roots = roots;
        }

        if let Some(d) = depth {
            self.generation.max_depth = d;
        }

        if include_private {
            self.generation.include_private = true;
        }

        if let Some(fmt) = format {
            self.output.format = match fmt.as_str() {
                "html" => OutputFormat::Html,
                _ => OutputFormat::Markdown,
            };
        }

        if let Some(dest) = destination {
            self.output.destination = dest;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.generation.max_depth > 100 {
            return Err(Error::config_validation("max_depth cannot exceed 100"));
        }

        if self
            .generation
            .roots
            .iter()
            .any(|r| r.trim().is_empty())
        {
            return Err(Error::config_validation("root patterns cannot be blank"));
        }

        if self.output.destination.as_os_str().is_empty() {
            return Err(Error::config_validation("output destination is required"));
        }

        Ok(())
    }
}
