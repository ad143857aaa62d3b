//! Per-platform view of a specification.
//!
//! The analyzer never reads a `Specification` directly. It goes through the
//! `Consumer` contract, which resolves platform overrides and inherited values
//! for one platform (or for no platform at all).

use crate::models::platform::Platform;
use crate::models::spec::{self, FilePatterns, SpecAttributes, Specification};
use std::collections::BTreeMap;

/// Capabilities the analyzer needs from a specification projection.
pub trait Consumer {
    /// The underlying specification (subspecs, hooks).
    fn spec(&self) -> &Specification;
    /// Name used in finding messages.
    fn spec_name(&self) -> String;
    /// Active platform; `None` for a platform-agnostic view.
    fn platform(&self) -> Option<Platform>;
    /// `None` when no value is specified anywhere.
    fn requires_arc(&self) -> Option<bool>;

    fn source_files(&self) -> Vec<String>;
    fn public_header_files(&self) -> Vec<String>;
    fn project_header_files(&self) -> Vec<String>;
    fn private_header_files(&self) -> Vec<String>;
    fn vendored_frameworks(&self) -> Vec<String>;
    fn vendored_libraries(&self) -> Vec<String>;
    fn resources(&self) -> Vec<String>;
    fn exclude_files(&self) -> Vec<String>;
    fn preserve_paths(&self) -> Vec<String>;
    fn resource_bundles(&self) -> BTreeMap<String, Vec<String>>;
    fn dependencies(&self) -> BTreeMap<String, Vec<String>>;

    /// Value of a file-pattern attribute that is keyed by category.
    fn resource_bundle_patterns(&self) -> FilePatterns {
        FilePatterns::ByCategory(self.resource_bundles())
    }
}

/// Consumer backed by a spec lineage (root … spec) and an optional platform.
pub struct PlatformConsumer<'a> {
    lineage: Vec<&'a Specification>,
    platform: Option<Platform>,
}

impl<'a> PlatformConsumer<'a> {
    /// Build a consumer. `lineage` must be non-empty and end with the spec
    /// being consumed.
    pub fn new(lineage: Vec<&'a Specification>, platform: Option<Platform>) -> Option<Self> {
        if lineage.is_empty() {
            return None;
        }
        Some(PlatformConsumer { lineage, platform })
    }

    /// Consumer for a root specification.
    pub fn root(spec: &'a Specification, platform: Option<Platform>) -> Self {
        PlatformConsumer {
            lineage: vec![spec],
            platform,
        }
    }

    fn current(&self) -> &'a Specification {
        // non-empty by construction
        self.lineage[self.lineage.len() - 1]
    }

    /// Shared attributes followed by the platform override, if any.
    fn layers(&self) -> impl Iterator<Item = &'a SpecAttributes> {
        let spec = self.current();
        std::iter::once(&spec.attributes)
            .chain(self.platform.and_then(|p| spec.platform_attributes(p)))
    }

    fn merged_list(&self, pick: fn(&SpecAttributes) -> &Vec<String>) -> Vec<String> {
        self.layers().flat_map(|a| pick(a).iter().cloned()).collect()
    }

    fn merged_map(
        &self,
        pick: fn(&SpecAttributes) -> &BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for layer in self.layers() {
            for (k, v) in pick(layer) {
                out.entry(k.clone()).or_default().extend(v.iter().cloned());
            }
        }
        out
    }
}

impl Consumer for PlatformConsumer<'_> {
    fn spec(&self) -> &Specification {
        self.current()
    }

    fn spec_name(&self) -> String {
        spec::display_name(&self.lineage)
    }

    fn platform(&self) -> Option<Platform> {
        self.platform
    }

    fn requires_arc(&self) -> Option<bool> {
        // Nearest spec first; within a spec the platform override wins.
        self.lineage.iter().rev().find_map(|s| {
            let over = self
                .platform
                .and_then(|p| s.platform_attributes(p))
                .and_then(|a| a.requires_arc.as_ref());
            over.or(s.attributes.requires_arc.as_ref())
                .map(|v| v.as_flag())
        })
    }

    fn source_files(&self) -> Vec<String> {
        self.merged_list(|a| &a.source_files)
    }

    fn public_header_files(&self) -> Vec<String> {
        self.merged_list(|a| &a.public_header_files)
    }

    fn project_header_files(&self) -> Vec<String> {
        self.merged_list(|a| &a.project_header_files)
    }

    fn private_header_files(&self) -> Vec<String> {
        self.merged_list(|a| &a.private_header_files)
    }

    fn vendored_frameworks(&self) -> Vec<String> {
        self.merged_list(|a| &a.vendored_frameworks)
    }

    fn vendored_libraries(&self) -> Vec<String> {
        self.merged_list(|a| &a.vendored_libraries)
    }

    fn resources(&self) -> Vec<String> {
        self.merged_list(|a| &a.resources)
    }

    fn exclude_files(&self) -> Vec<String> {
        self.merged_list(|a| &a.exclude_files)
    }

    fn preserve_paths(&self) -> Vec<String> {
        self.merged_list(|a| &a.preserve_paths)
    }

    fn resource_bundles(&self) -> BTreeMap<String, Vec<String>> {
        self.merged_map(|a| &a.resource_bundles)
    }

    fn dependencies(&self) -> BTreeMap<String, Vec<String>> {
        self.merged_map(|a| &a.dependencies)
    }
}
