//! Value objects: closed vocabularies read from the config document.
//!
//! The enumerations accept any string at deserialisation time and keep
//! unrecognised values as `Unknown`, so that validation can report them
//! with the exact location in the document instead of a bare parse error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// License
// ============================================================================

/// License applied to generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum License {
    /// Not set at this layer; inherits whatever an ancestor chose.
    #[default]
    Unset,
    /// Explicitly no license text.
    None,
    /// The 3-clause ("new") BSD license.
    NewBsd,
    Unknown(String),
}

impl License {
    pub const KNOWN: &'static [&'static str] = &["none", "newbsd"];

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::None => "none",
            Self::NewBsd => "newbsd",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for License {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "none" => Self::None,
            "newbsd" => Self::NewBsd,
            _ => Self::Unknown(value),
        }
    }
}

impl From<License> for String {
    fn from(value: License) -> Self {
        value.as_str().to_owned()
    }
}

impl FromStr for License {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Version control
// ============================================================================

/// Version control system a generated project is meant to live in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VcsType {
    #[default]
    Unset,
    None,
    Git,
    Hg,
    Unknown(String),
}

impl VcsType {
    pub const KNOWN: &'static [&'static str] = &["none", "git", "hg"];

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::None => "none",
            Self::Git => "git",
            Self::Hg => "hg",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for VcsType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "none" => Self::None,
            "git" => Self::Git,
            "hg" => Self::Hg,
            _ => Self::Unknown(value),
        }
    }
}

impl From<VcsType> for String {
    fn from(value: VcsType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// File kind
// ============================================================================

/// Behavioural kind of a generated file, parsed from its `Type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Go,
    Test,
    Readme,
    Makefile,
    License,
    Other,
}

impl FileKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "go" => Self::Go,
            "test" => Self::Test,
            "readme" => Self::Readme,
            "makefile" => Self::Makefile,
            "license" => Self::License,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Test => "test",
            Self::Readme => "readme",
            Self::Makefile => "makefile",
            Self::License => "license",
            Self::Other => "other",
        }
    }

    /// Go source files carry a package clause.
    pub fn is_go_source(&self) -> bool {
        matches!(self, Self::Go | Self::Test)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
