//! Shared data models: the specification object model, platforms, and the
//! lint findings produced by the analyzer.

pub mod platform;
pub mod spec;

use platform::Platform;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a finding.
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single finding. Severity and message are fixed at construction; only
/// the platform list grows as the same finding is hit again.
pub struct LintResult {
    severity: Severity,
    message: String,
    platforms: Vec<Platform>,
}

impl LintResult {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        LintResult {
            severity,
            message: message.into(),
            platforms: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Platforms that triggered this finding, in trigger order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Append a platform. No deduplication happens here.
    pub fn record_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    fn is_same_finding(&self, severity: Severity, message: &str) -> bool {
        self.severity == severity && self.message == message
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
/// Findings keyed by `(severity, message)`, in first-occurrence order.
pub struct Results {
    items: Vec<LintResult>,
}

impl Results {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a finding. An existing entry with the same severity and
    /// message is reused; the platform, when present, is appended to it.
    pub fn add(&mut self, severity: Severity, message: &str, platform: Option<Platform>) {
        let idx = match self
            .items
            .iter()
            .position(|r| r.is_same_finding(severity, message))
        {
            Some(i) => i,
            None => {
                self.items.push(LintResult::new(severity, message));
                self.items.len() - 1
            }
        };
        if let Some(p) = platform {
            self.items[idx].record_platform(p);
        }
    }

    /// Merge another result set, applying the same dedup rule as `add`.
    pub fn absorb(&mut self, other: Results) {
        for r in other.items {
            match self
                .items
                .iter_mut()
                .find(|mine| mine.is_same_finding(r.severity, &r.message))
            {
                Some(mine) => mine.platforms.extend(r.platforms),
                None => self.items.push(r),
            }
        }
    }

    pub fn as_slice(&self) -> &[LintResult] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LintResult> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|r| r.severity == severity).count()
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a LintResult;
    type IntoIter = std::slice::Iter<'a, LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
/// Aggregated counts used by printers and exit codes.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Lint outcome for one specification file.
pub struct Report {
    /// Display name of the root specification.
    pub spec: String,
    /// Source file, relative to the project root when possible.
    pub file: Option<String>,
    /// Platforms the specification was linted for.
    pub platforms: Vec<Platform>,
    pub results: Results,
    pub summary: Summary,
}

impl Report {
    pub fn new(spec: String, platforms: Vec<Platform>, results: Results) -> Self {
        let summary = Summary {
            errors: results.count(Severity::Error),
            warnings: results.count(Severity::Warning),
        };
        Report {
            spec,
            file: None,
            platforms,
            results,
            summary,
        }
    }

    /// Errors always fail; warnings fail unless explicitly allowed.
    pub fn passed(&self, allow_warnings: bool) -> bool {
        self.summary.errors == 0 && (allow_warnings || self.summary.warnings == 0)
    }
}
