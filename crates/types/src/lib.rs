#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions shared by the cpr installer crates
//!
//! This crate provides the host platform identity, the per-run install
//! phases and the report handed back to the CLI.

pub mod reports;

pub use reports::{InstallPhase, InstallReport};

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Operating system the installer is running on (or pretending to)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    /// Any identifier outside the supported set, kept verbatim for messages
    Other(String),
}

impl HostOs {
    /// Identity of the running host
    #[must_use]
    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Parse an OS identifier
    ///
    /// Accepts both Rust target names (`linux`, `macos`, `windows`) and the
    /// node-style names (`darwin`, `win32`) that users tend to pass around.
    #[must_use]
    pub fn from_identifier(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::MacOs,
            "windows" | "win32" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical identifier
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Other(id) => id,
        }
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    #[must_use]
    pub fn is_unix_like(&self) -> bool {
        matches!(self, Self::Linux | Self::MacOs)
    }

    /// Whether the installer knows how to handle this host
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl Serialize for HostOs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for HostOs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Self::from_identifier(&id))
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}

impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}
