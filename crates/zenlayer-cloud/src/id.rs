//! Composite identifiers for attachment resources
//!
//! Parts are joined with `:` when none of them contains a colon. Otherwise
//! a versioned, length-prefixed form is used: `~1|<len>:<part><len>:<part>`.

use crate::error::{CloudError, Result};

const VERSIONED_PREFIX: &str = "~1|";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    parts: Vec<String>,
}

impl CompositeId {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse an identifier that must have exactly `expected` parts (2 or 3)
    pub fn parse(id: &str, expected: usize) -> Result<Self> {
        let invalid = |reason: String| CloudError::InvalidId {
            id: id.to_string(),
            reason,
        };

        if !(2..=3).contains(&expected) {
            return Err(invalid(format!("unsupported part count {expected}")));
        }

        let parts = match id.strip_prefix(VERSIONED_PREFIX) {
            Some(rest) => decode_versioned(rest).map_err(invalid)?,
            None => id.split(':').map(str::to_string).collect(),
        };

        if parts.len() != expected {
            return Err(invalid(format!(
                "expected {expected} parts, found {}",
                parts.len()
            )));
        }
        if parts.iter().any(String::is_empty) {
            return Err(invalid("empty part".to_string()));
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> &str {
        self.parts.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn encode(&self) -> String {
        let plain = self
            .parts
            .iter()
            .all(|p| !p.contains(':'))
            && !self.parts.first().is_some_and(|p| p.starts_with(VERSIONED_PREFIX));

        if plain {
            return self.parts.join(":");
        }

        let mut out = String::from(VERSIONED_PREFIX);
        for part in &self.parts {
            out.push_str(&part.len().to_string());
            out.push(':');
            out.push_str(part);
        }
        out
    }
}

impl std::fmt::Display for CompositeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

fn decode_versioned(mut rest: &str) -> std::result::Result<Vec<String>, String> {
    let mut parts = Vec::new();
    while !rest.is_empty() {
        let (len, tail) = rest
            .split_once(':')
            .ok_or_else(|| "missing length prefix".to_string())?;
        let len: usize = len
            .parse()
            .map_err(|_| format!("invalid length prefix {len:?}"))?;
        if tail.len() < len || !tail.is_char_boundary(len) {
            return Err("truncated part".to_string());
        }
        parts.push(tail[..len].to_string());
        rest = &tail[len..];
    }
    Ok(parts)
}

/// `"<a>:<b>"`
pub fn parse_pair(id: &str) -> Result<(String, String)> {
    let id = CompositeId::parse(id, 2)?;
    Ok((id.part(0).to_string(), id.part(1).to_string()))
}

/// `"<a>:<b>:<c>"`
pub fn parse_triple(id: &str) -> Result<(String, String, String)> {
    let id = CompositeId::parse(id, 3)?;
    Ok((
        id.part(0).to_string(),
        id.part(1).to_string(),
        id.part(2).to_string(),
    ))
}
