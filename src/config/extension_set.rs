use std::collections::BTreeSet;

use crate::config::presets::Preset;
use crate::error::{CollectorError, Result};

/// The filter criterion: a set of lowercase filename suffixes.
///
/// A file matches when its lowercased name ends with any member. Members are
/// used exactly as given apart from lowercasing; `txt` is not turned into
/// `.txt`. An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: BTreeSet<String>,
}

impl ExtensionSet {
    /// Build a set from operator-supplied suffixes.
    ///
    /// Fails with `InvalidCriteria` on an empty entry, which would otherwise
    /// match every file.
    pub fn new<I, S>(suffixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = ExtensionSet::default();
        for suffix in suffixes {
            let suffix = suffix.as_ref();
            if suffix.is_empty() {
                return Err(CollectorError::InvalidCriteria(
                    "extension entries must not be empty".to_string(),
                ));
            }
            set.suffixes.insert(suffix.to_lowercase());
        }
        Ok(set)
    }

    pub fn from_preset(preset: Preset) -> Self {
        ExtensionSet {
            suffixes: preset.extensions().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Union of the given presets
    pub fn from_presets(presets: &[Preset]) -> Self {
        presets
            .iter()
            .fold(ExtensionSet::default(), |set, &p| set.union(&ExtensionSet::from_preset(p)))
    }

    /// Union of all four built-in presets
    pub fn media() -> Self {
        ExtensionSet::from_presets(&Preset::ALL)
    }

    pub fn union(mut self, other: &ExtensionSet) -> Self {
        self.suffixes.extend(other.suffixes.iter().cloned());
        self
    }

    pub fn with_preset(self, preset: Preset) -> Self {
        self.union(&ExtensionSet::from_preset(preset))
    }

    /// Case-insensitive suffix match against a full filename
    pub fn matches(&self, filename: &str) -> bool {
        if self.suffixes.is_empty() {
            return false;
        }
        let lowered = filename.to_lowercase();
        self.suffixes.iter().any(|suffix| lowered.ends_with(suffix.as_str()))
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}
