//! Tree query and transformation helpers.
//!
//! All traversals are depth-first in source order, matching the order layout
//! visits nodes. Transformations build new trees; the receiver is unchanged.

use super::Node;

impl Node {
  /// First node (self included, pre-order) matching the predicate.
  pub fn find<P>(&self, pred: P) -> Option<&Node>
  where
    P: Fn(&Node) -> bool,
  {
    self.find_inner(&pred)
  }

  fn find_inner<P>(&self, pred: &P) -> Option<&Node>
  where
    P: Fn(&Node) -> bool,
  {
    if pred(self) {
      return Some(self);
    }
    self.children.iter().find_map(|child| child.find_inner(pred))
  }

  /// Every node (self included) matching the predicate, in pre-order.
  pub fn find_all<P>(&self, pred: P) -> Vec<&Node>
  where
    P: Fn(&Node) -> bool,
  {
    let mut found = Vec::new();
    self.collect_matching(&pred, &mut found);
    found
  }

  fn collect_matching<'a, P>(&'a self, pred: &P, found: &mut Vec<&'a Node>)
  where
    P: Fn(&Node) -> bool,
  {
    if pred(self) {
      found.push(self);
    }
    for child in &self.children {
      child.collect_matching(pred, found);
    }
  }

  /// True if any node in the subtree matches.
  pub fn any<P>(&self, pred: P) -> bool
  where
    P: Fn(&Node) -> bool,
  {
    self.find(pred).is_some()
  }

  /// True if every node in the subtree matches.
  pub fn all<P>(&self, pred: P) -> bool
  where
    P: Fn(&Node) -> bool,
  {
    !self.any(|node| !pred(node))
  }

  /// Number of nodes in the subtree, self included.
  pub fn count(&self) -> usize {
    1 + self.children.iter().map(Node::count).sum::<usize>()
  }

  /// Folds the subtree in pre-order with a generic accumulator.
  pub fn fold<B, F>(&self, init: B, mut f: F) -> B
  where
    F: FnMut(B, &Node) -> B,
  {
    self.fold_inner(init, &mut f)
  }

  fn fold_inner<B, F>(&self, init: B, f: &mut F) -> B
  where
    F: FnMut(B, &Node) -> B,
  {
    let mut acc = f(init, self);
    for child in &self.children {
      acc = child.fold_inner(acc, f);
    }
    acc
  }

  /// Like [`Node::fold`], additionally passing the depth of each node
  /// (0 for the receiver).
  pub fn fold_with_depth<B, F>(&self, init: B, mut f: F) -> B
  where
    F: FnMut(B, &Node, usize) -> B,
  {
    self.fold_depth_inner(init, 0, &mut f)
  }

  fn fold_depth_inner<B, F>(&self, init: B, depth: usize, f: &mut F) -> B
  where
    F: FnMut(B, &Node, usize) -> B,
  {
    let mut acc = f(init, self, depth);
    for child in &self.children {
      acc = child.fold_depth_inner(acc, depth + 1, f);
    }
    acc
  }

  /// Builds a new tree by applying `f` to every node. The children of each
  /// result are the mapped children of the original node; whatever children
  /// `f` returns are discarded.
  pub fn map<F>(&self, f: F) -> Node
  where
    F: Fn(&Node) -> Node,
  {
    self.map_inner(&f)
  }

  fn map_inner<F>(&self, f: &F) -> Node
  where
    F: Fn(&Node) -> Node,
  {
    let mut mapped = f(self);
    mapped.children = self.children.iter().map(|child| child.map_inner(f)).collect();
    mapped
  }

  /// Keeps the subtree rooted at nodes matching the predicate. A
  /// non-matching node is dropped together with its descendants; returns
  /// `None` when the receiver itself does not match.
  pub fn filter<P>(&self, pred: P) -> Option<Node>
  where
    P: Fn(&Node) -> bool,
  {
    self.filter_inner(&pred)
  }

  fn filter_inner<P>(&self, pred: &P) -> Option<Node>
  where
    P: Fn(&Node) -> bool,
  {
    if !pred(self) {
      return None;
    }
    let mut kept = self.clone_shallow();
    kept.children = self
      .children
      .iter()
      .filter_map(|child| child.filter_inner(pred))
      .collect();
    Some(kept)
  }

  /// Keeps nodes that match or have a matching descendant, pruning branches
  /// with no matches anywhere.
  pub fn filter_deep<P>(&self, pred: P) -> Option<Node>
  where
    P: Fn(&Node) -> bool,
  {
    self.filter_deep_inner(&pred)
  }

  fn filter_deep_inner<P>(&self, pred: &P) -> Option<Node>
  where
    P: Fn(&Node) -> bool,
  {
    let kept_children: Vec<Node> = self
      .children
      .iter()
      .filter_map(|child| child.filter_deep_inner(pred))
      .collect();
    if pred(self) || !kept_children.is_empty() {
      let mut kept = self.clone_shallow();
      kept.children = kept_children;
      Some(kept)
    } else {
      None
    }
  }

  /// Builds a new tree where nodes matching the predicate are replaced by
  /// `f(node)`, keeping the original children of replaced nodes.
  pub fn transform<P, F>(&self, pred: P, f: F) -> Node
  where
    P: Fn(&Node) -> bool,
    F: Fn(&Node) -> Node,
  {
    self.transform_inner(&pred, &f)
  }

  fn transform_inner<P, F>(&self, pred: &P, f: &F) -> Node
  where
    P: Fn(&Node) -> bool,
    F: Fn(&Node) -> Node,
  {
    let mut result = if pred(self) {
      f(self)
    } else {
      self.clone_shallow()
    };
    result.children = self
      .children
      .iter()
      .map(|child| child.transform_inner(pred, f))
      .collect();
    result
  }

  fn clone_shallow(&self) -> Node {
    Node {
      style: self.style.clone(),
      text: self.text.clone(),
      children: Vec::new(),
      rect: self.rect,
    }
  }
}
