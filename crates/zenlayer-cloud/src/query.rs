//! Helpers shared by data-source handlers

use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// Stable identifier for a result set.
///
/// CRC-32 (IEEE) over the concatenated IDs, read as a signed 32-bit
/// integer and made non-negative; `i32::MIN` maps to 0.
pub fn hash_ids<S: AsRef<str>>(ids: &[S]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    for id in ids {
        hasher.update(id.as_ref().as_bytes());
    }
    let signed = hasher.finalize() as i32;
    signed.checked_abs().unwrap_or(0).to_string()
}

/// Optional `name_regex` filter
#[derive(Debug, Clone, Default)]
pub struct NameFilter(Option<Regex>);

impl NameFilter {
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let regex = match pattern.filter(|p| !p.is_empty()) {
            Some(p) => Some(Regex::new(p)?),
            None => None,
        };
        Ok(Self(regex))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0.as_ref().is_none_or(|r| r.is_match(name))
    }
}

/// Write the projected list as pretty JSON
pub async fn write_output_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    tracing::debug!(path = %path.display(), "wrote data source output");
    Ok(())
}
