//! Navigation tree nodes.

use serde::Serialize;

use dx_content::DocKey;
use dx_sdk::SdkSet;

/// One node of the navigation manifest tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NavNode {
    /// A link to a document.
    Leaf {
        /// Display title.
        title: String,
        /// Target document.
        doc: DocKey,
        /// Explicit SDK declaration; `None` inherits from the enclosing group.
        #[serde(skip_serializing_if = "Option::is_none")]
        sdks: Option<SdkSet>,
        /// Decorative icon name.
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    /// A titled group of child nodes.
    Group {
        /// Display title.
        title: String,
        /// Explicit SDK declaration; `None` inherits from the enclosing group.
        #[serde(skip_serializing_if = "Option::is_none")]
        sdks: Option<SdkSet>,
        /// Whether the group renders collapsed by default.
        collapsed: bool,
        /// Ordered children.
        children: Vec<NavNode>,
    },
}

impl NavNode {
    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Leaf { title, .. } | Self::Group { title, .. } => title,
        }
    }

    /// Explicit SDK declaration, if any.
    #[must_use]
    pub fn declared_sdks(&self) -> Option<&SdkSet> {
        match self {
            Self::Leaf { sdks, .. } | Self::Group { sdks, .. } => sdks.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_sdk::Sdk;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_accessor() {
        let leaf = NavNode::Leaf {
            title: "Setup".to_owned(),
            doc: DocKey::new("guides/setup"),
            sdks: None,
            icon: None,
        };
        let group = NavNode::Group {
            title: "Guides".to_owned(),
            sdks: None,
            collapsed: false,
            children: Vec::new(),
        };

        assert_eq!(leaf.title(), "Setup");
        assert_eq!(group.title(), "Guides");
    }

    #[test]
    fn test_declared_sdks_accessor() {
        let declared: SdkSet = [Sdk::new("react")].into_iter().collect();
        let leaf = NavNode::Leaf {
            title: "Setup".to_owned(),
            doc: DocKey::new("guides/setup"),
            sdks: Some(declared.clone()),
            icon: None,
        };

        assert_eq!(leaf.declared_sdks(), Some(&declared));
    }
}
