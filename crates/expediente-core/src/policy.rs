//! Resolution policies
//!
//! The folder data this system exports carries two conventions that differ
//! between deployments: whether the export root's own name leads every
//! path, and what to do when two siblings share a name. Both are explicit,
//! configuration-visible choices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the export root appears in resolved paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMode {
    /// Root name is the first segment of every path (`A`, `A/B`)
    #[default]
    Inclusive,
    /// Root maps to the empty path and descendants omit its name (`""`, `B`)
    Relative,
}

/// What to do when two siblings resolve to the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep both; the later arrival gets its id appended to the name
    #[default]
    Disambiguate,
    /// Keep the first arrival; drop the later one (and its subtree)
    Skip,
}

/// Options consumed by the path resolver and document binder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default)]
    pub root_mode: RootMode,
    #[serde(default)]
    pub collision: CollisionPolicy,
}

impl fmt::Display for RootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootMode::Inclusive => write!(f, "inclusive"),
            RootMode::Relative => write!(f, "relative"),
        }
    }
}

impl FromStr for RootMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(RootMode::Inclusive),
            "relative" => Ok(RootMode::Relative),
            other => Err(format!(
                "unknown root mode '{}': expected 'inclusive' or 'relative'",
                other
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Disambiguate => write!(f, "disambiguate"),
            CollisionPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disambiguate" => Ok(CollisionPolicy::Disambiguate),
            "skip" => Ok(CollisionPolicy::Skip),
            other => Err(format!(
                "unknown collision policy '{}': expected 'disambiguate' or 'skip'",
                other
            )),
        }
    }
}
