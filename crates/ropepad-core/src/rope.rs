//! Persistent byte rope.
//!
//! A `TextRope` is an immutable binary tree over the document bytes. Every
//! editing operation returns a new rope and leaves the receiver untouched;
//! unmodified subtrees are shared between the old and new roots through
//! `Arc`, so keeping an older revision around costs only the nodes that
//! changed.
use std::fmt;
use std::sync::Arc;

use crate::error::RopeError;

/// Maximum number of bytes stored in a single leaf.
pub const MAX_LEAF_LEN: usize = 8;

enum Node {
    Leaf(Box<[u8]>),
    Branch {
        left: Arc<Node>,
        right: Arc<Node>,
        /// Total length of `left`.
        weight: usize,
        len: usize,
        depth: usize,
    },
}

impl Node {
    fn len(&self) -> usize {
        match self {
            Node::Leaf(data) => data.len(),
            Node::Branch { len, .. } => *len,
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch { depth, .. } => *depth,
        }
    }

    fn branch(left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        let weight = left.len();
        let len = weight + right.len();
        let depth = 1 + left.depth().max(right.depth());
        Arc::new(Node::Branch {
            left,
            right,
            weight,
            len,
            depth,
        })
    }

    /// Builds a balanced tree by halving `bytes` until each piece fits in a leaf.
    /// `bytes` must be non-empty.
    fn build(bytes: &[u8]) -> Arc<Node> {
        if bytes.len() <= MAX_LEAF_LEN {
            return Arc::new(Node::Leaf(bytes.into()));
        }
        let mid = bytes.len() / 2;
        Node::branch(Node::build(&bytes[..mid]), Node::build(&bytes[mid..]))
    }
}

/// An immutable, structurally shared byte rope.
///
/// The empty rope has no root node. Offsets are raw byte offsets; multibyte
/// characters get no special treatment.
#[derive(Clone, Default)]
pub struct TextRope {
    root: Option<Arc<Node>>,
}

impl TextRope {
    /// Creates an empty rope.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Creates a rope holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::new();
        }
        Self::from_node(Node::build(bytes))
    }

    fn from_node(node: Arc<Node>) -> Self {
        Self { root: Some(node) }
    }

    /// Total number of bytes.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.len())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: 0 for the empty rope, 1 for a single leaf.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Returns true if both ropes share the same root node.
    pub fn ptr_eq(&self, other: &TextRope) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns the byte at offset `i`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `i >= len`.
    pub fn index(&self, i: usize) -> Result<u8, RopeError> {
        let len = self.len();
        let mut node = match &self.root {
            Some(root) if i < len => &**root,
            _ => return Err(RopeError::OutOfRange { index: i, len }),
        };
        let mut i = i;
        loop {
            match node {
                Node::Leaf(data) => return Ok(data[i]),
                Node::Branch {
                    left,
                    right,
                    weight,
                    ..
                } => {
                    if i < *weight {
                        node = &**left;
                    } else {
                        i -= *weight;
                        node = &**right;
                    }
                }
            }
        }
    }

    /// Joins two ropes under a new branch. An empty operand returns the
    /// other one unchanged.
    pub fn concat(left: TextRope, right: TextRope) -> TextRope {
        match (left.root, right.root) {
            (None, root) | (root, None) => TextRope { root },
            (Some(l), Some(r)) => TextRope::from_node(Node::branch(l, r)),
        }
    }

    /// Splits into the prefix `[0, i)` and the suffix `[i, len)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `i > len`.
    pub fn split(&self, i: usize) -> Result<(TextRope, TextRope), RopeError> {
        let len = self.len();
        if i > len {
            return Err(RopeError::OutOfRange { index: i, len });
        }
        match &self.root {
            Some(root) => Ok(split_node(root, i)),
            None => Ok((TextRope::new(), TextRope::new())),
        }
    }

    /// Returns a new rope with `text` inserted at offset `i`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `i > len`.
    pub fn insert(&self, i: usize, text: impl AsRef<[u8]>) -> Result<TextRope, RopeError> {
        let (left, right) = self.split(i)?;
        let middle = TextRope::from_bytes(text.as_ref());
        Ok(TextRope::concat(TextRope::concat(left, middle), right))
    }

    /// Returns a new rope without the bytes in `[start, end)`.
    ///
    /// An empty range returns a rope sharing this rope's root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end` or `end > len`.
    pub fn delete(&self, start: usize, end: usize) -> Result<TextRope, RopeError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(self.clone());
        }
        let (left, rest) = self.split(start)?;
        let (_, right) = rest.split(end - start)?;
        Ok(TextRope::concat(left, right))
    }

    /// Returns the piece `[start, end)` as a rope sharing this rope's nodes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end` or `end > len`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TextRope, RopeError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(TextRope::new());
        }
        let (_, rest) = self.split(start)?;
        let (middle, _) = rest.split(end - start)?;
        Ok(middle)
    }

    /// Returns a copy of the bytes in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end` or `end > len`.
    pub fn substring(&self, start: usize, end: usize) -> Result<Vec<u8>, RopeError> {
        self.slice(start, end).map(|piece| piece.to_bytes())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), RopeError> {
        let len = self.len();
        if start > end || end > len {
            return Err(RopeError::InvalidRange { start, end, len });
        }
        Ok(())
    }

    /// Iterates over the leaf byte runs in document order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            stack: self.root.iter().map(|n| &**n).collect(),
        }
    }

    /// Iterates over every byte in document order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.chunks().flat_map(|chunk| chunk.iter().copied())
    }

    /// Flattens the rope into a contiguous byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Rebuilds the rope as a balanced tree with the same content.
    pub fn rebalance(&self) -> TextRope {
        TextRope::from_bytes(&self.to_bytes())
    }

    /// Renders the tree shape, one node per line, for debugging.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        match &self.root {
            Some(root) => write_structure(root, "", &mut out),
            None => out.push_str("<empty>\n"),
        }
        out
    }
}

fn split_node(node: &Arc<Node>, i: usize) -> (TextRope, TextRope) {
    if i == 0 {
        return (TextRope::new(), TextRope::from_node(Arc::clone(node)));
    }
    if i == node.len() {
        return (TextRope::from_node(Arc::clone(node)), TextRope::new());
    }
    match &**node {
        Node::Leaf(data) => (
            TextRope::from_bytes(&data[..i]),
            TextRope::from_bytes(&data[i..]),
        ),
        Node::Branch {
            left,
            right,
            weight,
            ..
        } => {
            if i < *weight {
                let (a, b) = split_node(left, i);
                (a, TextRope::concat(b, TextRope::from_node(Arc::clone(right))))
            } else if i > *weight {
                let (a, b) = split_node(right, i - *weight);
                (TextRope::concat(TextRope::from_node(Arc::clone(left)), a), b)
            } else {
                (
                    TextRope::from_node(Arc::clone(left)),
                    TextRope::from_node(Arc::clone(right)),
                )
            }
        }
    }
}

fn write_structure(node: &Node, indent: &str, out: &mut String) {
    use std::fmt::Write as _;
    match node {
        Node::Leaf(data) => {
            let _ = writeln!(
                out,
                "{indent}Leaf: {:?} (len={})",
                String::from_utf8_lossy(data),
                data.len()
            );
        }
        Node::Branch {
            left,
            right,
            weight,
            len,
            ..
        } => {
            let _ = writeln!(out, "{indent}Node: weight={weight}, len={len}");
            write_structure(left, &format!("{indent}  L:"), out);
            write_structure(right, &format!("{indent}  R:"), out);
        }
    }
}

/// Iterator over the leaf byte runs of a `TextRope`.
///
/// Walks the tree with an explicit stack, so deep trees don't recurse.
pub struct Chunks<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(data) => return Some(&data[..]),
                Node::Branch { left, right, .. } => {
                    self.stack.push(&**right);
                    self.stack.push(&**left);
                }
            }
        }
        None
    }
}

impl From<&str> for TextRope {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl From<&[u8]> for TextRope {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl PartialEq for TextRope {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.bytes().eq(other.bytes())
    }
}

impl Eq for TextRope {}

impl fmt::Display for TextRope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl fmt::Debug for TextRope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRope")
            .field("len", &self.len())
            .field("depth", &self.depth())
            .finish()
    }
}
