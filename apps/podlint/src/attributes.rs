//! Registry of specification attributes that hold file patterns.

use crate::consumer::Consumer;
use crate::models::spec::FilePatterns;

/// A file-pattern attribute: its name and how to read it from a consumer.
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub read: fn(&dyn Consumer) -> FilePatterns,
}

impl AttributeDescriptor {
    pub fn read(&self, consumer: &dyn Consumer) -> FilePatterns {
        (self.read)(consumer)
    }
}

/// Every file-pattern attribute, in declaration order.
pub static FILE_PATTERN_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor {
        name: "source_files",
        read: |c| FilePatterns::List(c.source_files()),
    },
    AttributeDescriptor {
        name: "public_header_files",
        read: |c| FilePatterns::List(c.public_header_files()),
    },
    AttributeDescriptor {
        name: "project_header_files",
        read: |c| FilePatterns::List(c.project_header_files()),
    },
    AttributeDescriptor {
        name: "private_header_files",
        read: |c| FilePatterns::List(c.private_header_files()),
    },
    AttributeDescriptor {
        name: "vendored_frameworks",
        read: |c| FilePatterns::List(c.vendored_frameworks()),
    },
    AttributeDescriptor {
        name: "vendored_libraries",
        read: |c| FilePatterns::List(c.vendored_libraries()),
    },
    AttributeDescriptor {
        name: "resource_bundles",
        read: |c| c.resource_bundle_patterns(),
    },
    AttributeDescriptor {
        name: "resources",
        read: |c| FilePatterns::List(c.resources()),
    },
    AttributeDescriptor {
        name: "exclude_files",
        read: |c| FilePatterns::List(c.exclude_files()),
    },
    AttributeDescriptor {
        name: "preserve_paths",
        read: |c| FilePatterns::List(c.preserve_paths()),
    },
];

/// Look up a file-pattern attribute by name.
pub fn attribute(name: &str) -> Option<&'static AttributeDescriptor> {
    FILE_PATTERN_ATTRIBUTES.iter().find(|a| a.name == name)
}
