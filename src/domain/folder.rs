//! Folder edges and the name-keyed folder tree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Indentation added per tree level when rendering.
const INDENT: usize = 2;

/// A folder and the name of its parent (empty for top-level folders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEdge {
    pub name: String,
    pub parent: String,
}

impl FolderEdge {
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
        }
    }
}

/// Parent name to ordered child names.
///
/// Keyed by name only: two folders with the same name under different
/// parents share one child list when rendered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderTree {
    children: HashMap<String, Vec<String>>,
}

impl FolderTree {
    /// Returns the children recorded under `parent`, in edge order.
    pub fn children(&self, parent: &str) -> &[String] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Renders the tree depth-first from the root, one folder per line.
    ///
    /// Edges that form a cycle recurse without bound.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into("", 0, &mut lines);
        lines
    }

    fn render_into(&self, parent: &str, indent: usize, lines: &mut Vec<String>) {
        for name in self.children(parent) {
            lines.push(format!("{}{}", " ".repeat(indent), name));
            if self.children.contains_key(name) {
                self.render_into(name, indent + INDENT, lines);
            }
        }
    }
}

/// Case-sensitive substring match of a folder filter against a folder name.
///
/// An empty filter matches everything; unfiled notes (empty folder name)
/// never match a non-empty filter.
pub fn folder_matches(folder: &str, filter: &str) -> bool {
    filter.is_empty() || (!folder.is_empty() && folder.contains(filter))
}

/// Groups a flat edge list by parent name.
pub fn build_tree(edges: &[FolderEdge]) -> FolderTree {
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for edge in edges {
        children
            .entry(edge.parent.clone())
            .or_default()
            .push(edge.name.clone());
    }
    FolderTree { children }
}

/// Builds and renders the tree as newline-joined text.
pub fn render_tree(edges: &[FolderEdge]) -> String {
    build_tree(edges).render().join("\n")
}
