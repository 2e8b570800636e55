//! Flat, index-addressed syntax tree
//!
//! Every parser produces a [`SyntaxTree`]. Nodes live in one vector in
//! preorder, so a depth-first walk is a linear scan. The tree is lossless:
//! text between a node's children that no child covers is kept as a
//! [`WHITESPACE`] (or [`TEXT`]) leaf, so the leaves always tile the source.

use smallvec::SmallVec;
use std::{fmt, ops::Range};

/// Kind of leaves holding only whitespace.
pub const WHITESPACE: &str = "whitespace";
/// Kind of leaves holding uncovered text that is not whitespace.
pub const TEXT: &str = "text";

const COMMENT_KINDS: &[&str] = &["line_comment", "block_comment", "doc_comment", "shebang"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: &'static str,
    /// Name of the field this node fills in its parent, if any.
    pub field: Option<&'static str>,
    pub named: bool,
    pub error: bool,
    /// Character range.
    pub range: Range<usize>,
    /// Byte range into [`SyntaxTree::source`].
    pub bytes: Range<usize>,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
}

/// Syntax tree of one version of a document.
#[derive(Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        debug_assert!(id.index() < self.nodes.len());
        SyntaxNode { tree: self, id }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first, parents before children, children in source order.
    pub fn preorder(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        (0..self.nodes.len()).map(|index| self.node(NodeId(index as u32)))
    }

    pub fn leaves(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        self.preorder().filter(|node| node.data().children.is_empty())
    }

    /// Deepest node whose range contains `offset`.
    pub fn node_at(&self, offset: usize) -> SyntaxNode<'_> {
        let mut current = self.root();
        'descend: loop {
            for child in current.children() {
                let range = child.range();
                if range.start <= offset && offset < range.end {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    pub fn has_errors(&self) -> bool {
        self.nodes.iter().any(|node| node.error)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(
            f: &mut fmt::Formatter<'_>,
            node: SyntaxNode<'_>,
            depth: usize,
        ) -> fmt::Result {
            writeln!(f, "{:indent$}{node:?}", "", indent = depth * 2)?;
            for child in node.children() {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
        write_node(f, self.root(), 0)
    }
}

/// Borrowed handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()]
    }

    pub fn kind(&self) -> &'static str {
        self.data().kind
    }

    pub fn field(&self) -> Option<&'static str> {
        self.data().field
    }

    pub fn is_named(&self) -> bool {
        self.data().named
    }

    pub fn is_error(&self) -> bool {
        self.data().error
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind() == WHITESPACE
    }

    /// Whitespace or a comment.
    pub fn is_trivia(&self) -> bool {
        self.is_whitespace() || COMMENT_KINDS.contains(&self.kind())
    }

    pub fn range(&self) -> Range<usize> {
        self.data().range.clone()
    }

    pub fn start(&self) -> usize {
        self.data().range.start
    }

    pub fn end(&self) -> usize {
        self.data().range.end
    }

    pub fn text(&self) -> &'a str {
        &self.tree.source[self.data().bytes.clone()]
    }

    pub fn parent(&self) -> Option<SyntaxNode<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn first_child(&self) -> Option<SyntaxNode<'a>> {
        self.children().next()
    }

    pub fn child_by_field(&self, field: &str) -> Option<SyntaxNode<'a>> {
        self.children().find(|child| child.field() == Some(field))
    }

    fn sibling(&self, step: isize) -> Option<SyntaxNode<'a>> {
        let parent = self.parent()?;
        let siblings = &parent.data().children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        let target = index.checked_add_signed(step)?;
        siblings.get(target).map(|&id| self.tree.node(id))
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'a>> {
        self.sibling(-1)
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'a>> {
        self.sibling(1)
    }

    /// Previous sibling that is not whitespace or a comment.
    pub fn prev_significant(&self) -> Option<SyntaxNode<'a>> {
        let mut node = self.prev_sibling()?;
        while node.is_trivia() {
            node = node.prev_sibling()?;
        }
        Some(node)
    }

    /// Next sibling that is not whitespace or a comment.
    pub fn next_significant(&self) -> Option<SyntaxNode<'a>> {
        let mut node = self.next_sibling()?;
        while node.is_trivia() {
            node = node.next_sibling()?;
        }
        Some(node)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Some(field) = self.field() {
            write!(f, " ({field})")?;
        }
        write!(f, " {:?}", self.range())?;
        if self.data().children.is_empty() {
            write!(f, " {:?}", self.text())?;
        }
        Ok(())
    }
}

/// Builds a [`SyntaxTree`] in preorder.
///
/// Nodes opened with [`TreeBuilder::start_node`] collect every node pushed
/// until the matching [`TreeBuilder::finish_node`]. The first node started is
/// the root.
pub(crate) struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            nodes: Vec::new(),
            open: Vec::new(),
        }
    }

    fn push(&mut self, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        data.parent = self.open.last().copied();
        if let Some(parent) = data.parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(data);
        id
    }

    pub(crate) fn start_node(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        start: usize,
        start_byte: usize,
    ) -> NodeId {
        let id = self.push(NodeData {
            kind,
            field,
            named,
            error: false,
            range: start..start,
            bytes: start_byte..start_byte,
            parent: None,
            children: SmallVec::new(),
        });
        self.open.push(id);
        id
    }

    pub(crate) fn finish_node(&mut self, end: usize, end_byte: usize) {
        if let Some(id) = self.open.pop() {
            let node = &mut self.nodes[id.index()];
            node.range.end = end;
            node.bytes.end = end_byte;
        }
    }

    /// Push a childless node under the innermost open node.
    pub(crate) fn leaf(
        &mut self,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        range: Range<usize>,
        bytes: Range<usize>,
    ) -> NodeId {
        self.push(NodeData {
            kind,
            field,
            named,
            error: false,
            range,
            bytes,
            parent: None,
            children: SmallVec::new(),
        })
    }

    /// Push a [`WHITESPACE`] or [`TEXT`] leaf for uncovered source.
    pub(crate) fn gap(&mut self, range: Range<usize>, bytes: Range<usize>) {
        let kind = if self.source[bytes.clone()].chars().all(char::is_whitespace) {
            WHITESPACE
        } else {
            TEXT
        };
        self.leaf(kind, None, false, range, bytes);
    }

    pub(crate) fn mark_error(&mut self, id: NodeId) {
        self.nodes[id.index()].error = true;
    }

    /// Close every node still open at the end of the source.
    pub(crate) fn finish(mut self, end: usize) -> SyntaxTree {
        let end_byte = self.source.len();
        while !self.open.is_empty() {
            self.finish_node(end, end_byte);
        }
        SyntaxTree {
            source: self.source,
            nodes: self.nodes,
        }
    }
}
