// ============================================================
// Layer 4 — Blacklist
// ============================================================
// Stroke files known to be low quality (picked out by the low
// likelihood a trained model assigned them). The set is loaded
// once, never modified, and passed by reference to the
// correlator.
//
// Accepted file formats:
//   *.json  → ["a01-000u-01.xml", "a01-000u-02.xml"]
//   other   → one basename per line, `#` starts a comment line

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
}

impl Blacklist {
    /// A blacklist that excludes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    /// Load a blacklist file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read blacklist '{}'", path.display()))?;

        let blacklist = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let names: Vec<String> = serde_json::from_str(&content)
                .with_context(|| format!("Blacklist '{}' is not a JSON string array", path.display()))?;
            Self::from_names(names)
        } else {
            Self::from_names(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#')),
            )
        };

        tracing::info!("Loaded {} blacklisted stroke files", blacklist.len());
        Ok(blacklist)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
