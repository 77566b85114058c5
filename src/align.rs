//! Post-layout alignment, distribution and grid snapping over flat node
//! lists.
//!
//! These utilities edit node rects directly and are all idempotent: applying
//! an operation twice leaves the same result as applying it once.

use crate::geometry::Axis;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Alignment target for [`align_nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignMode {
  /// Smallest x in the group.
  Left,
  /// Largest x in the group.
  Right,
  /// Smallest y in the group.
  Top,
  /// Largest y in the group.
  Bottom,
  /// Mean x of the group.
  CenterX,
  /// Mean y of the group.
  CenterY,
}

/// Aligns all nodes to the min/max/mean of the group's current positions.
pub fn align_nodes(nodes: &mut [Node], mode: AlignMode) {
  if nodes.is_empty() {
    return;
  }
  match mode {
    AlignMode::Left => {
      let target = fold_positions(nodes, |n| n.rect.x, f64::min);
      set_positions(nodes, Axis::Horizontal, target);
    }
    AlignMode::Right => {
      let target = fold_positions(nodes, |n| n.rect.x, f64::max);
      set_positions(nodes, Axis::Horizontal, target);
    }
    AlignMode::Top => {
      let target = fold_positions(nodes, |n| n.rect.y, f64::min);
      set_positions(nodes, Axis::Vertical, target);
    }
    AlignMode::Bottom => {
      let target = fold_positions(nodes, |n| n.rect.y, f64::max);
      set_positions(nodes, Axis::Vertical, target);
    }
    AlignMode::CenterX => {
      let target = mean(nodes, |n| n.rect.x);
      set_positions(nodes, Axis::Horizontal, target);
    }
    AlignMode::CenterY => {
      let target = mean(nodes, |n| n.rect.y);
      set_positions(nodes, Axis::Vertical, target);
    }
  }
}

fn fold_positions(nodes: &[Node], get: impl Fn(&Node) -> f64, pick: impl Fn(f64, f64) -> f64) -> f64 {
  let mut iter = nodes.iter().map(get);
  let first = iter.next().unwrap_or(0.0);
  iter.fold(first, pick)
}

fn mean(nodes: &[Node], get: impl Fn(&Node) -> f64) -> f64 {
  nodes.iter().map(get).sum::<f64>() / nodes.len() as f64
}

fn set_positions(nodes: &mut [Node], axis: Axis, value: f64) {
  for node in nodes {
    match axis {
      Axis::Horizontal => node.rect.x = value,
      Axis::Vertical => node.rect.y = value,
    }
  }
}

/// Equalizes the gaps between consecutive nodes along `axis`, keeping the
/// first and last nodes (in spatial order) in place.
pub fn distribute_nodes(nodes: &mut [Node], axis: Axis) {
  if nodes.len() < 3 {
    return;
  }

  let position = |node: &Node| match axis {
    Axis::Horizontal => node.rect.x,
    Axis::Vertical => node.rect.y,
  };
  let extent = |node: &Node| match axis {
    Axis::Horizontal => node.rect.width,
    Axis::Vertical => node.rect.height,
  };

  let mut order: Vec<usize> = (0..nodes.len()).collect();
  order.sort_by(|&a, &b| position(&nodes[a]).total_cmp(&position(&nodes[b])));

  let first = order[0];
  let last = order[nodes.len() - 1];
  let span = position(&nodes[last]) + extent(&nodes[last])
    - position(&nodes[first]);
  let total: f64 = order.iter().map(|&i| extent(&nodes[i])).sum();
  let gap = (span - total) / (nodes.len() - 1) as f64;

  let mut cursor = position(&nodes[first]);
  for &index in &order {
    match axis {
      Axis::Horizontal => nodes[index].rect.x = cursor,
      Axis::Vertical => nodes[index].rect.y = cursor,
    }
    cursor += extent(&nodes[index]) + gap;
  }
}

/// Snaps every node position to multiples of `grid_size`, rounding half
/// away from zero. Non-positive or non-finite grid sizes leave the input
/// unchanged.
pub fn snap_nodes(nodes: &mut [Node], grid_size: f64) {
  snap_to_grid(nodes, grid_size, 0.0, 0.0);
}

/// [`snap_nodes`] relative to an origin:
/// `new = round((pos - origin) / grid) * grid + origin`.
pub fn snap_to_grid(nodes: &mut [Node], grid_size: f64, origin_x: f64, origin_y: f64) {
  if !(grid_size.is_finite() && grid_size > 0.0) {
    return;
  }
  for node in nodes {
    node.rect.x = ((node.rect.x - origin_x) / grid_size).round() * grid_size + origin_x;
    node.rect.y = ((node.rect.y - origin_y) / grid_size).round() * grid_size + origin_y;
  }
}
