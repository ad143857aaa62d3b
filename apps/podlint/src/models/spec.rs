//! Specification object model loaded from `.podspec.json` / `.podspec.yaml`.
//!
//! Only the attributes the analyzer reads are modeled; every other key in the
//! source document (summary, homepage, license, ...) is accepted and ignored.
//! List-valued attributes accept either a single string or a list of strings.

use crate::error::LoadError;
use crate::models::platform::Platform;
use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
/// A package specification, possibly with nested subspecs.
pub struct Specification {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Declared platforms mapped to an optional deployment target.
    #[serde(default)]
    pub platforms: BTreeMap<String, Option<String>>,
    #[serde(flatten)]
    pub attributes: SpecAttributes,
    #[serde(default)]
    pub ios: Option<SpecAttributes>,
    #[serde(default)]
    pub osx: Option<SpecAttributes>,
    #[serde(default)]
    pub tvos: Option<SpecAttributes>,
    #[serde(default)]
    pub watchos: Option<SpecAttributes>,
    #[serde(default)]
    pub visionos: Option<SpecAttributes>,
    #[serde(default)]
    pub subspecs: Vec<Specification>,
    /// Opaque hook bodies; only their presence matters.
    #[serde(default)]
    pub pre_install: Option<Json>,
    #[serde(default)]
    pub post_install: Option<Json>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Attributes that can be given once for all platforms or per platform.
pub struct SpecAttributes {
    #[serde(default)]
    pub requires_arc: Option<RequiresArc>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub source_files: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub public_header_files: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub project_header_files: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub private_header_files: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub vendored_frameworks: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub vendored_libraries: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub resources: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub exclude_files: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub preserve_paths: Vec<String>,
    #[serde(default, deserialize_with = "map_of_lists")]
    pub resource_bundles: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "map_of_lists")]
    pub dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// `requires_arc` is either a flag or the subset of files compiled with ARC.
pub enum RequiresArc {
    Flag(bool),
    Files(OneOrMany),
}

impl RequiresArc {
    /// Collapse to the tri-state flag: naming files counts as enabled.
    pub fn as_flag(&self) -> bool {
        match self {
            RequiresArc::Flag(b) => *b,
            RequiresArc::Files(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

fn string_or_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(d)?
        .map(OneOrMany::into_vec)
        .unwrap_or_default())
}

fn map_of_lists<'de, D>(d: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<OneOrMany>>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.map(OneOrMany::into_vec).unwrap_or_default()))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Value of a file-pattern attribute as read from a consumer.
pub enum FilePatterns {
    List(Vec<String>),
    ByCategory(BTreeMap<String, Vec<String>>),
}

impl FilePatterns {
    /// Flatten one level: category keys in sorted order, lists concatenated.
    pub fn flatten(self) -> Vec<String> {
        match self {
            FilePatterns::List(v) => v,
            FilePatterns::ByCategory(m) => m.into_values().flatten().collect(),
        }
    }
}

impl Specification {
    /// Load a specification, picking the decoder from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let decode_yaml = match ext.as_deref() {
            Some("json") => false,
            Some("yaml") | Some("yml") => true,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };
        let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading specification from {}", path.display());
        if decode_yaml {
            Self::from_yaml_str(&data).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_json_str(&data).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Attribute overrides for one platform, if the spec declares any.
    pub fn platform_attributes(&self, platform: Platform) -> Option<&SpecAttributes> {
        match platform {
            Platform::Ios => self.ios.as_ref(),
            Platform::Osx => self.osx.as_ref(),
            Platform::Tvos => self.tvos.as_ref(),
            Platform::Watchos => self.watchos.as_ref(),
            Platform::Visionos => self.visionos.as_ref(),
        }
    }

    /// Declared platforms that are recognized, or every platform when none
    /// are declared. Unrecognized keys are skipped.
    pub fn available_platforms(&self) -> Vec<Platform> {
        let declared: Vec<Platform> = self
            .platforms
            .keys()
            .filter_map(|k| k.parse::<Platform>().ok())
            .collect();
        if self.platforms.is_empty() {
            Platform::ALL.to_vec()
        } else {
            Platform::ALL
                .into_iter()
                .filter(|p| declared.contains(p))
                .collect()
        }
    }

    pub fn has_pre_install(&self) -> bool {
        self.pre_install.as_ref().is_some_and(|v| !v.is_null())
    }

    pub fn has_post_install(&self) -> bool {
        self.post_install.as_ref().is_some_and(|v| !v.is_null())
    }

    /// All nested subspecs, depth-first pre-order.
    pub fn recursive_subspecs(&self) -> Vec<&Specification> {
        self.lineages()
            .into_iter()
            .skip(1)
            .filter_map(|l| l.last().copied())
            .collect()
    }

    /// The ancestry chain (root … spec) of this spec and of every nested
    /// subspec, depth-first pre-order starting with `[self]`.
    pub fn lineages(&self) -> Vec<Vec<&Specification>> {
        let mut out = Vec::new();
        collect_lineages(self, &mut Vec::new(), &mut out);
        out
    }

    /// `name (version)`, `name`, or `No-name`.
    pub fn display_name(&self) -> String {
        display_name(&[self])
    }
}

fn collect_lineages<'a>(
    spec: &'a Specification,
    chain: &mut Vec<&'a Specification>,
    out: &mut Vec<Vec<&'a Specification>>,
) {
    chain.push(spec);
    out.push(chain.clone());
    for sub in &spec.subspecs {
        collect_lineages(sub, chain, out);
    }
    chain.pop();
}

/// Render a spec from its lineage: full `Root/Sub` name plus the root version.
pub fn display_name(lineage: &[&Specification]) -> String {
    let Some(root) = lineage.first() else {
        return "No-name".to_string();
    };
    let Some(root_name) = root.name.as_deref() else {
        return "No-name".to_string();
    };
    let mut name = root_name.to_string();
    for sub in &lineage[1..] {
        name.push('/');
        name.push_str(sub.name.as_deref().unwrap_or("No-name"));
    }
    match root.version.as_deref() {
        Some(v) if !v.is_empty() => format!("{} ({})", name, v),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "name": "Networking",
        "version": "2.1.0",
        "summary": "ignored",
        "platforms": { "ios": "12.0", "osx": "10.13" },
        "requires_arc": true,
        "source_files": "Sources/**/*.swift",
        "resource_bundles": { "Assets": ["Res/*.png"], "Strings": "Res/*.strings" },
        "dependencies": { "Alamofire": ["~> 5.0"], "Logging": [] },
        "ios": { "frameworks": "UIKit", "source_files": ["iOS/*.swift"] },
        "subspecs": [
            { "name": "Core", "source_files": ["Core/*.swift"],
              "subspecs": [ { "name": "Extras" } ] }
        ]
    }"#;

    #[test]
    fn test_json_decoding_accepts_string_or_list() {
        let spec = Specification::from_json_str(SAMPLE).unwrap();
        assert_eq!(spec.attributes.source_files, vec!["Sources/**/*.swift"]);
        assert_eq!(
            spec.attributes.resource_bundles.get("Strings").unwrap(),
            &vec!["Res/*.strings".to_string()]
        );
        assert_eq!(spec.attributes.dependencies.len(), 2);
        assert_eq!(spec.attributes.requires_arc, Some(RequiresArc::Flag(true)));
        let ios = spec.platform_attributes(Platform::Ios).unwrap();
        assert_eq!(ios.source_files, vec!["iOS/*.swift"]);
        assert!(spec.platform_attributes(Platform::Osx).is_none());
    }

    #[test]
    fn test_malformed_pattern_value_is_a_load_error() {
        let err = Specification::from_json_str(r#"{ "name": "X", "source_files": 42 }"#);
        assert!(err.is_err());
        let err = Specification::from_json_str(r#"{ "name": "X", "resource_bundles": ["a"] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_requires_arc_file_list_counts_as_enabled() {
        let spec =
            Specification::from_json_str(r#"{ "name": "X", "requires_arc": ["Arc/*.m"] }"#).unwrap();
        assert!(spec.attributes.requires_arc.unwrap().as_flag());
    }

    #[test]
    fn test_available_platforms() {
        let spec = Specification::from_json_str(SAMPLE).unwrap();
        assert_eq!(spec.available_platforms(), vec![Platform::Ios, Platform::Osx]);
        let bare = Specification::from_json_str(r#"{ "name": "X" }"#).unwrap();
        assert_eq!(bare.available_platforms(), Platform::ALL.to_vec());
    }

    #[test]
    fn test_lineages_and_display_names() {
        let spec = Specification::from_json_str(SAMPLE).unwrap();
        let names: Vec<String> = spec.lineages().iter().map(|l| display_name(l)).collect();
        assert_eq!(
            names,
            vec![
                "Networking (2.1.0)",
                "Networking/Core (2.1.0)",
                "Networking/Core/Extras (2.1.0)"
            ]
        );
        assert_eq!(spec.recursive_subspecs().len(), 2);
        assert_eq!(Specification::default().display_name(), "No-name");
    }

    #[test]
    fn test_hooks_presence_ignores_null() {
        let spec = Specification::from_json_str(
            r#"{ "name": "X", "pre_install": "puts 'hi'", "post_install": null }"#,
        )
        .unwrap();
        assert!(spec.has_pre_install());
        assert!(!spec.has_post_install());
    }

    #[test]
    fn test_flatten_uses_sorted_categories() {
        let mut m = BTreeMap::new();
        m.insert("b".to_string(), vec!["2".to_string()]);
        m.insert("a".to_string(), vec!["1".to_string(), "1b".to_string()]);
        assert_eq!(FilePatterns::ByCategory(m).flatten(), vec!["1", "1b", "2"]);
    }

    #[test]
    fn test_from_path_yaml_and_unsupported() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("Demo.podspec.yaml");
        let mut f = fs::File::create(&p).unwrap();
        writeln!(
            f,
            "{}",
            r#"
name: Demo
version: "1.0"
source_files:
  - Demo/*.m
osx:
  resources: Demo/mac.png
"#
        )
        .unwrap();
        let spec = Specification::from_path(&p).unwrap();
        assert_eq!(spec.display_name(), "Demo (1.0)");
        assert_eq!(
            spec.platform_attributes(Platform::Osx).unwrap().resources,
            vec!["Demo/mac.png"]
        );

        let bad = dir.path().join("Demo.podspec");
        fs::write(&bad, "Pod::Spec.new").unwrap();
        assert!(matches!(
            Specification::from_path(&bad),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_yaml_str_matches_json_model() {
        let yaml = Specification::from_yaml_str(
            "name: Kit\nversion: '2.1'\nrequires_arc: false\npost_install: legacy\n\
             ios:\n  source_files: [Kit/iOS/*.m]\n\
             subspecs:\n  - name: Net\n    dependencies:\n      AFNetworking: ['~> 4.0']\n",
        )
        .unwrap();
        let json = Specification::from_json_str(
            r#"{ "name": "Kit", "version": "2.1", "requires_arc": false, "post_install": "legacy",
                 "ios": { "source_files": ["Kit/iOS/*.m"] },
                 "subspecs": [ { "name": "Net", "dependencies": { "AFNetworking": ["~> 4.0"] } } ] }"#,
        )
        .unwrap();
        for spec in [&yaml, &json] {
            assert_eq!(spec.display_name(), "Kit (2.1)");
            assert!(spec.has_post_install());
            assert!(!spec.has_pre_install());
            assert_eq!(
                spec.platform_attributes(Platform::Ios).unwrap().source_files,
                vec!["Kit/iOS/*.m"]
            );
            let names: Vec<String> = spec.lineages().iter().map(|l| display_name(l)).collect();
            assert_eq!(names, vec!["Kit (2.1)", "Kit/Net (2.1)"]);
        }
        assert!(Specification::from_yaml_str("name: [unclosed").is_err());
    }
}
