//! Parent-aware navigation over a node tree.
//!
//! Nodes own their children and carry no parent pointers. A [`Cursor`]
//! supplies the missing direction: it addresses a node as a path of child
//! indices from the root, so moving up is dropping the last index rather
//! than following a back-edge.

use super::Node;

/// A location in a node tree, with parent navigation.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
  root: &'a Node,
  path: Vec<usize>,
}

impl<'a> Cursor<'a> {
  /// A cursor at the root of `tree`.
  pub fn new(root: &'a Node) -> Self {
    Self {
      root,
      path: Vec::new(),
    }
  }

  /// The node this cursor points at.
  pub fn node(&self) -> &'a Node {
    let mut current = self.root;
    for &index in &self.path {
      current = &current.children[index];
    }
    current
  }

  pub fn is_root(&self) -> bool {
    self.path.is_empty()
  }

  pub fn has_parent(&self) -> bool {
    !self.path.is_empty()
  }

  /// Number of edges between the cursor and the root.
  pub fn depth(&self) -> usize {
    self.path.len()
  }

  pub fn parent(&self) -> Option<Cursor<'a>> {
    if self.path.is_empty() {
      return None;
    }
    let mut path = self.path.clone();
    path.pop();
    Some(Cursor {
      root: self.root,
      path,
    })
  }

  /// All ancestors, nearest first, ending at the root.
  pub fn ancestors(&self) -> Vec<Cursor<'a>> {
    let mut ancestors = Vec::with_capacity(self.path.len());
    let mut current = self.clone();
    while let Some(parent) = current.parent() {
      ancestors.push(parent.clone());
      current = parent;
    }
    ancestors
  }

  /// Cursors to the children of the current node, in order.
  pub fn children(&self) -> Vec<Cursor<'a>> {
    (0..self.node().children.len())
      .map(|index| {
        let mut path = self.path.clone();
        path.push(index);
        Cursor {
          root: self.root,
          path,
        }
      })
      .collect()
  }

  /// Cursors to the other children of the parent, excluding this node.
  pub fn siblings(&self) -> Vec<Cursor<'a>> {
    let Some(parent) = self.parent() else {
      return Vec::new();
    };
    let own_index = *self.path.last().unwrap_or(&0);
    parent
      .children()
      .into_iter()
      .filter(|sibling| *sibling.path.last().unwrap_or(&0) != own_index)
      .collect()
  }

  /// First of self-then-ancestors whose node matches.
  pub fn find_up<P>(&self, pred: P) -> Option<Cursor<'a>>
  where
    P: Fn(&Node) -> bool,
  {
    if pred(self.node()) {
      return Some(self.clone());
    }
    self.ancestors().into_iter().find(|c| pred(c.node()))
  }

  /// First node in the subtree (self included, pre-order) whose node
  /// matches.
  pub fn find_down<P>(&self, pred: P) -> Option<Cursor<'a>>
  where
    P: Fn(&Node) -> bool,
  {
    self.find_down_inner(&pred)
  }

  fn find_down_inner<P>(&self, pred: &P) -> Option<Cursor<'a>>
  where
    P: Fn(&Node) -> bool,
  {
    if pred(self.node()) {
      return Some(self.clone());
    }
    for child in self.children() {
      if let Some(found) = child.find_down_inner(pred) {
        return Some(found);
      }
    }
    None
  }
}
