use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::config::extension_set::ExtensionSet;
use crate::config::presets::Preset;
use crate::error::{CollectorError, Result};

/// What to do when a file disappears between enumeration and archival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilePolicy {
    /// Stop the run with `SourceVanished`
    #[default]
    Abort,
    /// Log a warning and continue with the next file
    Skip,
}

/// How the destination archive is held during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveMode {
    /// Open, append and finalize the archive for every file
    #[default]
    PerFile,
    /// Keep one writer open for the whole run
    HeldOpen,
}

/// On-disk YAML configuration. Every field is optional; command-line values
/// are layered on top by [`CollectorConfig::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    /// Kept as a raw value so a scalar can be told apart from a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,

    #[serde(default)]
    pub presets: Vec<Preset>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub on_missing: MissingFilePolicy,

    #[serde(default)]
    pub archive_mode: ArchiveMode,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub presets: Vec<Preset>,
    pub media: bool,
    pub verbose: bool,
    pub skip_missing: bool,
    pub keep_open: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct CollectionSettings {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub extensions: ExtensionSet,
    pub verbose: bool,
    pub on_missing: MissingFilePolicy,
    pub archive_mode: ArchiveMode,
}

impl CollectorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CollectorError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CollectorError::Config(format!("failed to parse YAML config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CollectorError::Config(format!("failed to serialize config: {}", e)))?;

        fs::write(path, yaml).map_err(|e| CollectorError::io(path, e))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Starting point written by `init-config`
    pub fn template() -> Self {
        CollectorConfig {
            source: Some(PathBuf::from(".")),
            destination: Some(PathBuf::from("collected.zip")),
            extensions: Some(Value::Sequence(Vec::new())),
            presets: vec![Preset::Documents],
            ..Default::default()
        }
    }

    /// The configured extension strings.
    ///
    /// The criterion must be a list; a single string is rejected rather than
    /// being read as a sequence of characters.
    pub fn extension_criteria(&self) -> Result<Vec<String>> {
        match &self.extensions {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(CollectorError::InvalidCriteria(format!(
                        "extension entries must be strings, got {:?}",
                        other
                    ))),
                })
                .collect(),
            Some(Value::String(s)) => Err(CollectorError::InvalidCriteria(format!(
                "extensions must be a list, got the single string {:?}",
                s
            ))),
            Some(other) => Err(CollectorError::InvalidCriteria(format!(
                "extensions must be a list, got {:?}",
                other
            ))),
        }
    }

    /// Layer command-line values on top of this configuration.
    ///
    /// Scalars from the command line win; extensions and presets from both
    /// sources are unioned.
    pub fn resolve(self, overrides: Overrides) -> Result<CollectionSettings> {
        let mut suffixes = self.extension_criteria()?;
        suffixes.extend(overrides.extensions);

        let mut extensions = ExtensionSet::new(&suffixes)?;
        for preset in self.presets.iter().chain(overrides.presets.iter()) {
            extensions = extensions.with_preset(*preset);
        }
        if overrides.media {
            extensions = extensions.union(&ExtensionSet::media());
        }

        let source = overrides
            .source
            .or(self.source)
            .ok_or_else(|| CollectorError::Config("no source directory given".to_string()))?;
        let destination = overrides
            .destination
            .or(self.destination)
            .ok_or_else(|| CollectorError::Config("no destination archive given".to_string()))?;

        let on_missing = if overrides.skip_missing {
            MissingFilePolicy::Skip
        } else {
            self.on_missing
        };
        let archive_mode = if overrides.keep_open {
            ArchiveMode::HeldOpen
        } else {
            self.archive_mode
        };

        Ok(CollectionSettings {
            source,
            destination,
            extensions,
            verbose: overrides.verbose || self.verbose,
            on_missing,
            archive_mode,
        })
    }
}

/// Load the config file if one was given, otherwise start from defaults
pub fn load_or_default(path: Option<&Path>) -> Result<CollectorConfig> {
    match path {
        Some(p) => CollectorConfig::from_yaml_file(p),
        None => Ok(CollectorConfig::default()),
    }
}
