//! Block layout: normal-flow vertical stacking.
//!
//! Children stack top to bottom in source order. Margins offset each child
//! but never collapse. Auto-width children stretch to the available width;
//! auto heights complete from aspect ratio when the width is known, else
//! from content.

use super::{flow_layout, resolve_box, zero_subtree, LayoutContext};
use crate::geometry::{Constraints, Size, UNBOUNDED};
use crate::node::Node;
use crate::style::Display;

/// Lays out `node` as a block container. Returns the border-box size.
pub fn layout_block(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
  let constraints = constraints.normalized();
  let metrics = resolve_box(
    node,
    constraints.bounded_width(),
    constraints.bounded_height(),
    ctx,
  );

  // Block-level boxes fill the available inline space when their width is
  // auto; an unbounded constraint falls back to max-content sizing.
  let width = metrics
    .width
    .or(constraints.bounded_width())
    .unwrap_or_else(|| super::intrinsic::max_content(node, crate::geometry::Axis::Horizontal, ctx));
  let width = metrics.clamp_width(width);

  let content_width = (width - metrics.padding_border_horizontal()).max(0.0);
  let content_height_basis = metrics
    .height
    .map(|h| (h - metrics.padding_border_vertical()).max(0.0));
  let (origin_x, origin_y) = metrics.content_origin();

  let mut cursor = 0.0f64;
  for child in &mut node.children {
    if child.style.display == Display::None {
      zero_subtree(child);
      continue;
    }
    if child.style.position.is_out_of_flow() {
      continue;
    }

    let child_metrics = resolve_box(child, Some(content_width), content_height_basis, ctx);
    let available = (content_width - child_metrics.margin.horizontal()).max(0.0);
    let child_width = child_metrics.clamp_width(child_metrics.width.unwrap_or(available));

    let child_height = match child_metrics.height {
      Some(height) => Some(child_metrics.clamp_height(height)),
      None if child.style.aspect_ratio > 0.0 => {
        Some(child_metrics.clamp_height(child_width / child.style.aspect_ratio))
      }
      None => None,
    };

    let child_constraints = match child_height {
      Some(height) => Constraints::tight(child_width, height),
      None => Constraints {
        min_width: child_width,
        max_width: child_width,
        min_height: 0.0,
        max_height: UNBOUNDED,
      },
    };
    let child_size = flow_layout(child, child_constraints, ctx);

    child.rect.x = origin_x + child_metrics.margin.left;
    child.rect.y = origin_y + cursor + child_metrics.margin.top;
    cursor += child_metrics.margin.top + child_size.height + child_metrics.margin.bottom;
  }

  // Text occupies the content box alongside (behind) any children.
  let text_height = node
    .text
    .as_deref()
    .map(|text| ctx.measure_text(text, &node.style, content_width).height)
    .unwrap_or(0.0);

  // Content can push a block container past its explicit height.
  let content_height = cursor.max(text_height) + metrics.padding_border_vertical();
  let height = match metrics.height {
    Some(explicit) => explicit.max(content_height),
    None => content_height,
  };
  let height = metrics.clamp_height(height);

  let size = constraints.constrain(Size::new(width, height));
  node.rect.width = size.width;
  node.rect.height = size.height;
  size
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::{Length, Spacing};
  use crate::node::{fixed, Node};

  fn block(children: Vec<Node>) -> Node {
    let mut node = Node::new().add_children(children);
    node.style.display = Display::Block;
    node
  }

  #[test]
  fn children_stack_vertically() {
    let mut root = block(vec![fixed(100.0, 30.0), fixed(80.0, 20.0)]);
    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_block(&mut root, Constraints::loose(400.0, 600.0), &ctx);

    assert_eq!(size, Size::new(400.0, 50.0));
    assert_eq!(root.children[0].rect.y, 0.0);
    assert_eq!(root.children[1].rect.y, 30.0);
  }

  #[test]
  fn margins_offset_without_collapsing() {
    let mut first = fixed(100.0, 30.0);
    first.style.margin = Spacing::new(10.0, 0.0, 10.0, 5.0);
    let mut second = fixed(100.0, 30.0);
    second.style.margin = Spacing::new(20.0, 0.0, 0.0, 0.0);

    let mut root = block(vec![first, second]);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout_block(&mut root, Constraints::loose(400.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.x, 5.0);
    assert_eq!(root.children[0].rect.y, 10.0);
    // 10 + 30 + 10 bottom, then 20 top: both margins count.
    assert_eq!(root.children[1].rect.y, 70.0);
  }

  #[test]
  fn auto_width_children_stretch() {
    let mut child = Node::new();
    child.style.display = Display::Block;
    child.style.height = Length::Px(10.0);
    let mut root = block(vec![child]);
    root.style.padding = Spacing::uniform(15.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_block(&mut root, Constraints::loose(400.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.width, 370.0);
    assert_eq!(root.children[0].rect.x, 15.0);
    assert_eq!(root.children[0].rect.y, 15.0);
  }

  #[test]
  fn aspect_ratio_completes_height_from_used_width() {
    let mut child = Node::new();
    child.style.display = Display::Block;
    child.style.aspect_ratio = 2.0;
    let mut root = block(vec![child]);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_block(&mut root, Constraints::loose(300.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.width, 300.0);
    assert_eq!(root.children[0].rect.height, 150.0);
  }

  #[test]
  fn text_leaf_height_comes_from_measurement() {
    let mut leaf = Node::new().with_text("aaaa bbbb");
    leaf.style.display = Display::Block;
    let measure = crate::measure::FixedGlyphMeasure::default();
    let ctx = LayoutContext::new(800.0, 600.0).with_measure(&measure);

    // 72px of text in a 40px column wraps to two 19.2px lines.
    let size = layout_block(&mut leaf, Constraints::loose(40.0, UNBOUNDED), &ctx);
    assert_eq!(size.width, 40.0);
    assert!((size.height - 38.4).abs() < 1e-9);
  }

  #[test]
  fn content_grows_past_explicit_height() {
    let mut root = block(vec![fixed(50.0, 200.0)]);
    root.style.height = Length::Px(100.0);
    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_block(&mut root, Constraints::loose(400.0, UNBOUNDED), &ctx);
    assert_eq!(size.height, 200.0);
  }
}
