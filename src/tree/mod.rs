//! Hierarchical property-path trees.
//!
//! A flat list of property paths such as
//!
//! ```text
//! prop1
//! prop4 --> sub_prop1
//! prop5 --> sub_prop1 --> sub_sub_prop1
//! ```
//!
//! is merged into one rooted tree where every node is one path segment:
//!
//! ```text
//! Features (0)
//! ├── prop5 (0-0)
//! │   └── sub_prop1 (0-0-0)
//! │       └── sub_sub_prop1 (0-0-0-0)
//! ├── prop4 (0-1)
//! │   └── sub_prop1 (0-1-0)
//! └── prop1 (0-2)
//! ```
//!
//! Every node gets a positional key: the root key `0` followed by the sibling
//! position of each node on the way down. [`TreeBuilder::build`] returns the
//! tree together with a [`KeyIndex`] mapping each key back to the path the
//! node stands for.
//!
//! Nodes live in a flat arena ([`PropertyTree`]) and refer to their children
//! by [`NodeId`]. [`PropertyTree::to_node`] produces the nested
//! `{title, key, children}` shape tree-select widgets consume.

mod key_index;

pub use key_index::KeyIndex;

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::core::{ProptreeError, Result};
use crate::path::{PathSegmenter, PropertyPath};

/// Label of the synthetic root when none is configured.
pub const DEFAULT_ROOT_TITLE: &str = "Features";

/// Key of the synthetic root node.
pub const ROOT_KEY: &str = "0";

/// Index of a node inside a [`PropertyTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    label: String,
    key: String,
    children: Vec<NodeId>,
}

/// Arena-backed property tree.
///
/// Node 0 is always the root. Children keep insertion order and no two
/// siblings share a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTree {
    nodes: Vec<NodeData>,
}

impl PropertyTree {
    fn with_root(title: &str) -> Self {
        Self {
            nodes: vec![NodeData {
                label: title.to_string(),
                key: ROOT_KEY.to_string(),
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(NodeId::ROOT)
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        NodeRef { tree: self, id }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// All nodes in creation order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Locate a node by its positional key.
    ///
    /// Keys encode sibling positions, so this walks straight down instead of
    /// searching.
    pub fn find_by_key(&self, key: &str) -> Option<NodeRef<'_>> {
        let mut parts = key.split('-');
        if parts.next()? != ROOT_KEY {
            return None;
        }
        let mut current = NodeId::ROOT;
        for part in parts {
            let position: usize = part.parse().ok()?;
            current = *self.nodes[current.0].children.get(position)?;
        }
        Some(self.node(current))
    }

    /// Labels from the first level below the root down to the node at `key`.
    pub fn labels_for_key(&self, key: &str) -> Option<Vec<&str>> {
        let mut parts = key.split('-');
        if parts.next()? != ROOT_KEY {
            return None;
        }
        let mut current = NodeId::ROOT;
        let mut labels = Vec::new();
        for part in parts {
            let position: usize = part.parse().ok()?;
            current = *self.nodes[current.0].children.get(position)?;
            labels.push(self.nodes[current.0].label.as_str());
        }
        Some(labels)
    }

    /// Export as an owned nested structure.
    pub fn to_node(&self) -> TreeNode {
        self.export(NodeId::ROOT)
    }

    fn export(&self, id: NodeId) -> TreeNode {
        let data = &self.nodes[id.0];
        TreeNode {
            label: data.label.clone(),
            key: data.key.clone(),
            children: data.children.iter().map(|c| self.export(*c)).collect(),
        }
    }

    fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.0].children.len()
    }

    /// Position and id of the child of `parent` labelled `label`.
    fn child_position(&self, parent: NodeId, label: &str) -> Option<(usize, NodeId)> {
        self.nodes[parent.0]
            .children
            .iter()
            .enumerate()
            .find(|(_, child)| self.nodes[child.0].label == label)
            .map(|(position, child)| (position, *child))
    }

    fn push_child(&mut self, parent: NodeId, label: String, key: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            label,
            key,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Serialize for PropertyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_node().serialize(serializer)
    }
}

/// Borrowed view of one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a PropertyTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &'a str {
        &self.tree.nodes[self.id.0].label
    }

    pub fn key(&self) -> &'a str {
        &self.tree.nodes[self.id.0].key
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.is_leaf(self.id)
    }

    pub fn child_count(&self) -> usize {
        self.tree.child_count(self.id)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.nodes[self.id.0]
            .children
            .iter()
            .map(move |id| NodeRef { tree, id: *id })
    }

    /// The child labelled `label`, if any.
    pub fn child(&self, label: &str) -> Option<NodeRef<'a>> {
        self.tree
            .child_position(self.id, label)
            .map(|(_, id)| NodeRef {
                tree: self.tree,
                id,
            })
    }

    /// Labels of the children in insertion order.
    pub fn child_labels(&self) -> Vec<&'a str> {
        self.children().map(|c| c.label()).collect()
    }
}

/// Owned nested form of a tree, as consumed by tree-select widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(rename = "title")]
    pub label: String,
    pub key: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Builds a [`PropertyTree`] and its [`KeyIndex`] from property paths.
///
/// # Examples
///
/// ```rust
/// use proptree_cli::tree::TreeBuilder;
///
/// let builder = TreeBuilder::new().with_ignore(["prop3"]);
/// let (tree, index) = builder.build_from_strings(&[
///     "prop3",
///     "prop4 --> sub_prop1",
///     "prop4 --> sub_prop2",
/// ]);
///
/// assert_eq!(tree.root().child_labels(), ["prop4"]);
/// assert_eq!(index.get("0-0-1"), Some("prop4 --> sub_prop2"));
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    segmenter: PathSegmenter,
    root_title: String,
    ignore: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            segmenter: PathSegmenter::default(),
            root_title: DEFAULT_ROOT_TITLE.to_string(),
            ignore: HashSet::new(),
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a segmenter with a different delimiter.
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: PathSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Label of the synthetic root.
    #[must_use]
    pub fn with_root_title(mut self, title: impl Into<String>) -> Self {
        self.root_title = title.into();
        self
    }

    /// Add segment labels that must not produce nodes.
    #[must_use]
    pub fn with_ignore<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn segmenter(&self) -> &PathSegmenter {
        &self.segmenter
    }

    /// Build the tree and key index from parsed paths.
    pub fn build(&self, paths: &[PropertyPath]) -> (PropertyTree, KeyIndex) {
        self.build_with(paths, true)
    }

    /// Segment raw path strings, then [`build`](Self::build).
    pub fn build_from_strings<S: AsRef<str>>(&self, raw: &[S]) -> (PropertyTree, KeyIndex) {
        let paths = self.segmenter.split_all(raw);
        self.build(&paths)
    }

    /// Build from a JSON array of path strings.
    ///
    /// # Errors
    ///
    /// Returns [`ProptreeError::InvalidInput`] when `value` is not an array
    /// or any entry is not a string.
    pub fn build_from_json(&self, value: &serde_json::Value) -> Result<(PropertyTree, KeyIndex)> {
        let entries = value
            .as_array()
            .ok_or_else(|| ProptreeError::invalid_input("expected a JSON array of property paths"))?;

        let raw = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.as_str().ok_or_else(|| {
                    ProptreeError::invalid_input(format!(
                        "entry {i} is not a string: {entry}"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.build_from_strings(&raw))
    }

    /// Find the node a raw path string leads to by walking labels from the
    /// root, skipping ignored segments the same way insertion does.
    ///
    /// Unlike [`KeyIndex::key_for`] this also finds nodes whose index entry
    /// was recorded for a longer path through an ignored segment.
    pub fn locate<'t>(&self, tree: &'t PropertyTree, raw: &str) -> Option<NodeRef<'t>> {
        let path = self.segmenter.split(raw);
        let mut current = tree.root();
        let mut moved = false;
        for segment in path.segments() {
            if self.ignore.contains(segment) {
                continue;
            }
            current = current.child(segment)?;
            moved = true;
        }
        moved.then_some(current)
    }

    fn build_with(&self, paths: &[PropertyPath], fast_path: bool) -> (PropertyTree, KeyIndex) {
        let mut tree = PropertyTree::with_root(&self.root_title);
        let mut index = KeyIndex::new();

        // Deepest paths first so shorter paths reuse the interior nodes they
        // share. sort_by is stable, keeping input order within a depth.
        let mut ordered: Vec<&PropertyPath> = paths.iter().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()));

        for path in ordered {
            self.insert(&mut tree, &mut index, path, fast_path);
        }

        debug!(
            paths = paths.len(),
            nodes = tree.len() - 1,
            ignored = self.ignore.len(),
            "Built property tree"
        );

        (tree, index)
    }

    fn insert(
        &self,
        tree: &mut PropertyTree,
        index: &mut KeyIndex,
        path: &PropertyPath,
        fast_path: bool,
    ) {
        let mut parent = NodeId::ROOT;
        let mut chain: Vec<usize> = vec![0];

        for (depth, segment) in path.segments().iter().enumerate() {
            if self.ignore.contains(segment) {
                continue;
            }

            if fast_path && tree.is_leaf(parent) {
                self.append_chain(tree, index, path, depth, parent, chain);
                return;
            }

            match tree.child_position(parent, segment) {
                Some((position, child)) => {
                    chain.push(position);
                    parent = child;
                }
                None => {
                    let position = tree.child_count(parent);
                    parent = self.add_node(tree, index, path, depth, parent, &chain, position);
                    chain.push(position);
                }
            }
        }
    }

    /// Fresh branch: every remaining segment becomes the only child of the
    /// previous one.
    fn append_chain(
        &self,
        tree: &mut PropertyTree,
        index: &mut KeyIndex,
        path: &PropertyPath,
        start: usize,
        mut parent: NodeId,
        mut chain: Vec<usize>,
    ) {
        for (depth, segment) in path.segments().iter().enumerate().skip(start) {
            if self.ignore.contains(segment) {
                continue;
            }
            parent = self.add_node(tree, index, path, depth, parent, &chain, 0);
            chain.push(0);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn add_node(
        &self,
        tree: &mut PropertyTree,
        index: &mut KeyIndex,
        path: &PropertyPath,
        depth: usize,
        parent: NodeId,
        chain: &[usize],
        position: usize,
    ) -> NodeId {
        let key = child_key(chain, position);
        let rendered = path.prefix_string(depth + 1, self.segmenter.delimiter());
        let label = path.segments()[depth].clone();

        trace!(key = %key, path = %rendered, "Adding tree node");

        index.insert(key.clone(), rendered);
        tree.push_child(parent, label, key)
    }
}

fn child_key(chain: &[usize], position: usize) -> String {
    let mut key = chain
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("-");
    key.push('-');
    key.push_str(&position.to_string());
    key
}
