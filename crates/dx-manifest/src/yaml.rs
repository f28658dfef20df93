//! Raw YAML manifest loading.
//!
//! The on-disk form uses author-friendly field names (`href`, `sdk`,
//! `collapse`); this module deserializes it and converts to the typed
//! [`NavNode`] tree, validating structure along the way. SDK declarations
//! are *not* checked against the universe here - that is the scope
//! resolver's job, so all conflicts surface in one report.

use serde::Deserialize;

use dx_content::DocKey;
use dx_sdk::{Sdk, SdkSet, SdkUniverse, UniverseError};

use crate::node::NavNode;

/// Error loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Malformed YAML.
    #[error("invalid manifest YAML: {0}")]
    Yaml(String),
    /// Invalid SDK enumeration.
    #[error("invalid SDK enumeration: {0}")]
    Universe(#[from] UniverseError),
    /// A node declared both a link target and children.
    #[error("nav entry '{title}' has both href and children")]
    LeafWithChildren {
        /// Offending entry title.
        title: String,
    },
    /// A node declared neither a link target nor children.
    #[error("nav entry '{title}' has neither href nor children")]
    EmptyEntry {
        /// Offending entry title.
        title: String,
    },
}

/// The loaded navigation manifest: SDK universe plus navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    /// Closed enumeration of valid SDK identifiers.
    pub universe: SdkUniverse,
    /// Top-level navigation nodes.
    pub nav: Vec<NavNode>,
}

impl Manifest {
    /// Parse a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for malformed YAML, an invalid SDK
    /// enumeration, or structurally invalid nav entries.
    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            serde_yaml::from_str(content).map_err(|e| ManifestError::Yaml(e.to_string()))?;

        let universe = SdkUniverse::new(raw.sdks.into_iter().map(Sdk::new).collect())?;
        let nav = raw
            .nav
            .into_iter()
            .map(RawNavEntry::into_node)
            .collect::<Result<_, _>>()?;

        Ok(Self { universe, nav })
    }
}

/// On-disk manifest shape.
#[derive(Debug, Deserialize)]
struct RawManifest {
    /// SDK identifier enumeration, in author order.
    sdks: Vec<String>,
    /// Navigation tree.
    #[serde(default)]
    nav: Vec<RawNavEntry>,
}

/// On-disk nav entry shape (leaf and group share one record).
#[derive(Debug, Deserialize)]
struct RawNavEntry {
    title: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    sdk: Option<Vec<String>>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    collapse: Option<bool>,
    #[serde(default)]
    children: Option<Vec<RawNavEntry>>,
}

impl RawNavEntry {
    fn into_node(self) -> Result<NavNode, ManifestError> {
        let sdks = self
            .sdk
            .map(|ids| ids.into_iter().map(Sdk::new).collect::<SdkSet>());

        match (self.href, self.children) {
            (Some(_), Some(_)) => Err(ManifestError::LeafWithChildren { title: self.title }),
            (None, None) => Err(ManifestError::EmptyEntry { title: self.title }),
            (Some(href), None) => Ok(NavNode::Leaf {
                title: self.title,
                doc: DocKey::new(href),
                sdks,
                icon: self.icon,
            }),
            (None, Some(children)) => Ok(NavNode::Group {
                title: self.title,
                sdks,
                collapsed: self.collapse.unwrap_or(false),
                children: children
                    .into_iter()
                    .map(RawNavEntry::into_node)
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = "\
sdks: [react, swift]
nav:
  - title: Getting Started
    href: getting-started
  - title: Guides
    sdk: [react]
    collapse: true
    children:
      - title: Setup
        href: guides/setup
        icon: rocket
";

    #[test]
    fn test_from_yaml_builds_tree() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();

        assert_eq!(manifest.universe.len(), 2);
        assert_eq!(manifest.nav.len(), 2);

        let NavNode::Leaf { title, doc, .. } = &manifest.nav[0] else {
            panic!("expected leaf");
        };
        assert_eq!(title, "Getting Started");
        assert_eq!(doc, &DocKey::new("getting-started"));

        let NavNode::Group {
            title,
            sdks,
            collapsed,
            children,
        } = &manifest.nav[1]
        else {
            panic!("expected group");
        };
        assert_eq!(title, "Guides");
        assert!(sdks.as_ref().unwrap().contains(&Sdk::new("react")));
        assert!(collapsed);
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_from_yaml_leaf_icon() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();

        let NavNode::Group { children, .. } = &manifest.nav[1] else {
            panic!("expected group");
        };
        let NavNode::Leaf { icon, .. } = &children[0] else {
            panic!("expected leaf");
        };

        assert_eq!(icon.as_deref(), Some("rocket"));
    }

    #[test]
    fn test_from_yaml_rejects_href_with_children() {
        let yaml = "\
sdks: [react]
nav:
  - title: Bad
    href: bad
    children:
      - title: Child
        href: child
";
        let err = Manifest::from_yaml(yaml).unwrap_err();

        assert!(matches!(err, ManifestError::LeafWithChildren { title } if title == "Bad"));
    }

    #[test]
    fn test_from_yaml_rejects_empty_entry() {
        let yaml = "\
sdks: [react]
nav:
  - title: Floating
";
        let err = Manifest::from_yaml(yaml).unwrap_err();

        assert!(matches!(err, ManifestError::EmptyEntry { title } if title == "Floating"));
    }

    #[test]
    fn test_from_yaml_rejects_duplicate_sdk() {
        let yaml = "sdks: [react, react]\nnav: []\n";

        assert!(matches!(
            Manifest::from_yaml(yaml),
            Err(ManifestError::Universe(_))
        ));
    }

    #[test]
    fn test_from_yaml_unknown_sdk_in_nav_is_not_checked_here() {
        // Universe validation of declarations belongs to the scope resolver
        let yaml = "\
sdks: [react]
nav:
  - title: Leaf
    href: leaf
    sdk: [kotlin]
";
        assert!(Manifest::from_yaml(yaml).is_ok());
    }
}
