//! Configuration handling for yuca.
//! Template descriptors ship with every template bundle; generation configs
//! come from a recipe's `gen_config` section.

use crate::error::{YucaError, YucaResult};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File name of the descriptor inside a template directory.
pub const DESCRIPTOR_FILE: &str = "config.yml";

/// Rejects paths that could leave the output directory: absolute paths,
/// drive prefixes and `..` components.
///
/// # Errors
/// * `YucaError::ConfigError` naming the offending path
pub fn ensure_output_relative<P: AsRef<Path>>(path: P) -> YucaResult<()> {
    let path = path.as_ref();
    let escapes = path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes || path.as_os_str().is_empty() {
        return Err(YucaError::ConfigError(format!(
            "'{}' is not a path inside the output directory",
            path.display()
        )));
    }
    Ok(())
}

/// Treats an explicit YAML `null` like an absent section.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Metadata of a template bundle.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateDescriptor {
    /// Overridable slots: logical name to destination file name
    #[serde(deserialize_with = "null_as_default")]
    pub overridable_files: IndexMap<String, String>,

    /// Settings used when the user does not provide their own
    #[serde(deserialize_with = "null_as_default")]
    pub default_settings: Map<String, Value>,

    /// Locale bundles keyed by language tag
    #[serde(deserialize_with = "null_as_default")]
    pub intl: Map<String, Value>,

    /// Output-relative paths of the files to render
    #[serde(deserialize_with = "null_as_default")]
    pub template_files: Vec<PathBuf>,

    /// Escape format tag for string leaves
    #[serde(rename = "scape_format", alias = "escape_format")]
    pub escape_format: Option<String>,
}

impl TemplateDescriptor {
    /// Parses a descriptor from YAML text.
    pub fn parse(content: &str) -> YucaResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| YucaError::ConfigError(format!("Invalid template descriptor: {e}")))
    }

    /// Loads `config.yml` from a template directory.
    ///
    /// # Errors
    /// * `YucaError::ConfigError` if the file is missing or malformed
    pub fn load<P: AsRef<Path>>(template_dir: P) -> YucaResult<Self> {
        let path = template_dir.as_ref().join(DESCRIPTOR_FILE);
        if !path.is_file() {
            return Err(YucaError::ConfigError(format!(
                "Template descriptor not found: {}",
                path.display()
            )));
        }
        debug!("Loading template descriptor from {}", path.display());
        Self::parse(&fs::read_to_string(&path)?)
    }

    /// Checks that every template file and overridable slot stays inside
    /// the output directory.
    pub fn validate(&self) -> YucaResult<()> {
        self.template_files
            .iter()
            .map(PathBuf::as_path)
            .chain(self.overridable_files.values().map(Path::new))
            .try_for_each(ensure_output_relative)
    }
}

/// User choices for one generation run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Directory holding the user's static assets
    #[serde(rename = "static")]
    pub static_dir: Option<PathBuf>,

    /// Chosen assets: logical name to source file name
    #[serde(deserialize_with = "null_as_default")]
    pub files: IndexMap<String, String>,

    #[serde(deserialize_with = "null_as_default")]
    pub overrides: Map<String, Value>,

    #[serde(deserialize_with = "null_as_default")]
    pub filters: Map<String, Value>,

    #[serde(deserialize_with = "null_as_default")]
    pub settings: Map<String, Value>,
}

/// Loads a YAML document into a context value.
pub fn load_yaml_value<P: AsRef<Path>>(path: P) -> YucaResult<Value> {
    let path = path.as_ref();
    debug!("Loading data from {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
