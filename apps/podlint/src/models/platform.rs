//! Target platforms a specification can be linted for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// A supported target platform.
pub enum Platform {
    Ios,
    Osx,
    Tvos,
    Watchos,
    Visionos,
}

impl Platform {
    /// Every supported platform, in linting order.
    pub const ALL: [Platform; 5] = [
        Platform::Ios,
        Platform::Osx,
        Platform::Tvos,
        Platform::Watchos,
        Platform::Visionos,
    ];

    /// Identifier used as a key in specification files.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Osx => "osx",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
            Platform::Visionos => "visionos",
        }
    }

    /// Human-readable label used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Osx => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
            Platform::Visionos => "visionOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "osx" | "macos" => Ok(Platform::Osx),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            "visionos" => Ok(Platform::Visionos),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

/// Parse a list of platform names, failing on the first unknown one.
pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Platform>, String> {
    let mut out = Vec::new();
    for n in names {
        let p: Platform = n.as_ref().parse()?;
        if !out.contains(&p) {
            out.push(p);
        }
    }
    Ok(out)
}
