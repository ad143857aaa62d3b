//! Rule checks run against one specification consumer.
//!
//! Every finding goes through `add_result`, which keeps one entry per
//! `(severity, message)` pair and records the consumer's platform on it.

use crate::attributes::FILE_PATTERN_ATTRIBUTES;
use crate::consumer::Consumer;
use crate::models::{LintResult, Results, Severity};

/// Runs the fixed rule sequence and accumulates findings.
pub struct Analyzer<'a> {
    consumer: &'a dyn Consumer,
    results: Results,
}

impl<'a> Analyzer<'a> {
    pub fn new(consumer: &'a dyn Consumer) -> Self {
        Analyzer {
            consumer,
            results: Results::new(),
        }
    }

    /// Point the analyzer at another consumer, keeping accumulated results.
    pub fn rebind(&mut self, consumer: &'a dyn Consumer) {
        self.consumer = consumer;
    }

    /// Run all checks. They are independent; any subset may fire.
    pub fn analyze(&mut self) {
        log::trace!(
            "analyzing {} for {}",
            self.consumer.spec_name(),
            self.consumer
                .platform()
                .map(|p| p.display_name())
                .unwrap_or("no platform")
        );
        self.validate_file_patterns();
        self.check_requires_arc_specified();
        self.check_if_spec_is_empty();
        self.check_install_hooks();
    }

    pub fn results(&self) -> &[LintResult] {
        self.results.as_slice()
    }

    pub fn into_results(self) -> Results {
        self.results
    }

    /// File patterns must be relative. Each attribute is reported once.
    fn validate_file_patterns(&mut self) {
        for attr in FILE_PATTERN_ATTRIBUTES {
            let patterns = attr.read(self.consumer).flatten();
            if patterns.iter().any(|p| p.starts_with('/')) {
                self.error(&format!(
                    "File patterns must be relative and cannot start with a slash ({}).",
                    attr.name
                ));
            }
        }
    }

    // Only an unspecified value warns; an explicit `false` is fine.
    fn check_requires_arc_specified(&mut self) {
        if self.consumer.requires_arc().is_none() {
            self.warning(
                "A value for `requires_arc` should be specified until the migration to a `true` default.",
            );
        }
    }

    fn check_if_spec_is_empty(&mut self) {
        let c = self.consumer;
        let no_content = c.source_files().is_empty()
            && c.resources().is_empty()
            && c.preserve_paths().is_empty()
            && c.dependencies().is_empty()
            && c.vendored_libraries().is_empty()
            && c.vendored_frameworks().is_empty();
        if no_content && c.spec().subspecs.is_empty() {
            self.error(&format!(
                "The {} spec is empty (no source files, resources, preserve paths, vendored_libraries, vendored_frameworks dependencies or subspecs).",
                c.spec_name()
            ));
        }
    }

    fn check_install_hooks(&mut self) {
        let consumer = self.consumer;
        let spec = consumer.spec();
        if spec.has_pre_install() {
            self.warning(
                "The pre install hook of the specification DSL has been deprecated, use the `resource_bundles` or the `prepare_command` attributes.",
            );
        }
        if spec.has_post_install() {
            self.warning(
                "The post install hook of the specification DSL has been deprecated, use the `resource_bundles` or the  `prepare_command` attributes.",
            );
        }
    }

    fn error(&mut self, message: &str) {
        self.add_result(Severity::Error, message);
    }

    fn warning(&mut self, message: &str) {
        self.add_result(Severity::Warning, message);
    }

    pub(crate) fn add_result(&mut self, severity: Severity, message: &str) {
        let platform = self.consumer.platform();
        self.results.add(severity, message, platform);
    }
}
