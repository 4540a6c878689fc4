//! Path patterns
//!
//! A pattern is a sequence of literal segments and `:name` parameter
//! segments. Matching is segment-by-segment with equal segment counts;
//! there is no wildcard or catch-all.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(AppError::invalid_pattern(pattern, "must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in split_segments(pattern) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(AppError::invalid_pattern(pattern, "empty parameter name"));
                }
                if segments.contains(&Segment::Param(name.to_string())) {
                    return Err(AppError::invalid_pattern(
                        pattern,
                        format!("duplicate parameter ':{name}'"),
                    ));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Mount this pattern under `prefix` (itself a pattern)
    pub fn prefixed(&self, prefix: &str) -> Result<Self> {
        let prefix = prefix.trim_end_matches('/');
        let joined = if self.segments.is_empty() {
            if prefix.is_empty() { "/".to_string() } else { prefix.to_string() }
        } else {
            format!("{prefix}{}", self.raw)
        };
        Self::parse(&joined)
    }

    /// Bound parameters when `path` matches, `None` otherwise.
    ///
    /// Literals compare against the raw segment; parameter values are
    /// percent-decoded, with invalid UTF-8 replaced.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8_lossy();
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }
}

/// Non-empty segments, so `/api/people/` and `/api/people` are the same path
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
