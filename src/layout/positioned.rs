//! Positioned overlay resolution: relative, absolute, fixed and sticky.
//!
//! Runs as a post-pass over the in-flow result. The walk tracks absolute
//! coordinates so a deeply nested absolute box can resolve against its
//! nearest positioned ancestor's padding box while its rect stays in the
//! parent's coordinate space. In-flow layout skipped absolute/fixed
//! children entirely; this pass sizes and places them.

use super::{flow_layout, intrinsic, resolve_box, LayoutContext};
use crate::geometry::{Axis, Constraints, Rect, UNBOUNDED};
use crate::node::Node;
use crate::style::{Display, Position, Style};

/// Resolves every positioned descendant of `root`. The root's own border box
/// is the initial containing block; `viewport` anchors `fixed` boxes and
/// bounds `sticky` clamping.
pub(crate) fn resolve_positioned(root: &mut Node, viewport: Rect, ctx: &LayoutContext) {
  let cb = padding_box(&root.style, (0.0, 0.0), root.rect);
  walk(root, (0.0, 0.0), cb, viewport, ctx);
}

fn padding_box(style: &Style, origin: (f64, f64), rect: Rect) -> Rect {
  Rect::new(
    origin.0 + style.border.left,
    origin.1 + style.border.top,
    (rect.width - style.border.horizontal()).max(0.0),
    (rect.height - style.border.vertical()).max(0.0),
  )
}

fn walk(node: &mut Node, origin: (f64, f64), cb: Rect, viewport: Rect, ctx: &LayoutContext) {
  let content_origin = (
    origin.0 + node.style.border.left + node.style.padding.left,
    origin.1 + node.style.border.top + node.style.padding.top,
  );
  let content_size = (
    (node.rect.width - node.style.padding.horizontal() - node.style.border.horizontal()).max(0.0),
    (node.rect.height - node.style.padding.vertical() - node.style.border.vertical()).max(0.0),
  );

  for child in &mut node.children {
    if child.style.display == Display::None {
      continue;
    }
    match child.style.position {
      Position::Static => {}
      Position::Relative => {
        let (dx, dy) = inset_offset(&child.style, content_size, ctx);
        child.rect.x += dx;
        child.rect.y += dy;
      }
      Position::Sticky => {
        let (dx, dy) = inset_offset(&child.style, content_size, ctx);
        apply_sticky(child, origin, cb, viewport, (dx, dy));
      }
      Position::Absolute => {
        resolve_out_of_flow(child, cb, content_origin, origin, ctx);
      }
      Position::Fixed => {
        resolve_out_of_flow(child, viewport, content_origin, origin, ctx);
      }
    }

    let child_origin = (origin.0 + child.rect.x, origin.1 + child.rect.y);
    let child_cb = if child.style.position.is_positioned() {
      padding_box(&child.style, child_origin, child.rect)
    } else {
      cb
    };
    walk(child, child_origin, child_cb, viewport, ctx);
  }
}

/// Relative/sticky offset from the inset properties. When both edges of a
/// pair are set, the end edge (right/bottom) takes precedence.
fn inset_offset(style: &Style, content_size: (f64, f64), ctx: &LayoutContext) -> (f64, f64) {
  let fs = style.font_size;
  let rem = ctx.root_font_size;
  let dx = if let Some(right) = style.right.resolve(Some(content_size.0), fs, rem) {
    -right
  } else {
    style
      .left
      .resolve(Some(content_size.0), fs, rem)
      .unwrap_or(0.0)
  };
  let dy = if let Some(bottom) = style.bottom.resolve(Some(content_size.1), fs, rem) {
    -bottom
  } else {
    style
      .top
      .resolve(Some(content_size.1), fs, rem)
      .unwrap_or(0.0)
  };
  (dx, dy)
}

/// Sticky: the relative shift, clamped so the box stays within the visible
/// portion of its containing block. Only axes with an inset participate.
fn apply_sticky(
  child: &mut Node,
  parent_origin: (f64, f64),
  cb: Rect,
  viewport: Rect,
  shift: (f64, f64),
) {
  let bounds = intersect(cb, viewport).unwrap_or(cb);

  let has_x_inset = !child.style.left.is_auto() || !child.style.right.is_auto();
  let has_y_inset = !child.style.top.is_auto() || !child.style.bottom.is_auto();

  if has_x_inset {
    let abs_x = parent_origin.0 + child.rect.x + shift.0;
    let max_x = bounds.right() - child.rect.width;
    let clamped = abs_x.min(max_x).max(bounds.x.min(max_x));
    child.rect.x = clamped - parent_origin.0;
  }
  if has_y_inset {
    let abs_y = parent_origin.1 + child.rect.y + shift.1;
    let max_y = bounds.bottom() - child.rect.height;
    let clamped = abs_y.min(max_y).max(bounds.y.min(max_y));
    child.rect.y = clamped - parent_origin.1;
  }
}

fn intersect(a: Rect, b: Rect) -> Option<Rect> {
  let x = a.x.max(b.x);
  let y = a.y.max(b.y);
  let right = a.right().min(b.right());
  let bottom = a.bottom().min(b.bottom());
  (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
}

/// Absolute/fixed resolution against a containing block in absolute
/// coordinates. Sizes fall back to the inset gap when both edges are set,
/// else shrink to fit.
fn resolve_out_of_flow(
  child: &mut Node,
  cb: Rect,
  static_origin: (f64, f64),
  parent_origin: (f64, f64),
  ctx: &LayoutContext,
) {
  let fs = child.style.font_size;
  let rem = ctx.root_font_size;
  let cm = resolve_box(child, Some(cb.width), Some(cb.height), ctx);

  let left = child.style.left.resolve(Some(cb.width), fs, rem);
  let right = child.style.right.resolve(Some(cb.width), fs, rem);
  let top = child.style.top.resolve(Some(cb.height), fs, rem);
  let bottom = child.style.bottom.resolve(Some(cb.height), fs, rem);

  let width = match cm.width {
    Some(explicit) => cm.clamp_width(explicit),
    None => match (left, right) {
      (Some(l), Some(r)) => {
        cm.clamp_width((cb.width - l - r - cm.margin.horizontal()).max(0.0))
      }
      _ => {
        let available =
          (cb.width - left.unwrap_or(0.0) - right.unwrap_or(0.0) - cm.margin.horizontal())
            .max(0.0);
        cm.clamp_width(intrinsic::fit_content(child, Axis::Horizontal, available, ctx))
      }
    },
  };

  let height = match cm.height {
    Some(explicit) => Some(cm.clamp_height(explicit)),
    None => match (top, bottom) {
      (Some(t), Some(b)) => {
        Some(cm.clamp_height((cb.height - t - b - cm.margin.vertical()).max(0.0)))
      }
      _ => None,
    },
  };

  let size = match height {
    Some(h) => flow_layout(child, Constraints::tight(width, h), ctx),
    None => flow_layout(
      child,
      Constraints {
        min_width: width,
        max_width: width,
        min_height: 0.0,
        max_height: UNBOUNDED,
      },
      ctx,
    ),
  };

  let abs_x = if let Some(l) = left {
    cb.x + l + cm.margin.left
  } else if let Some(r) = right {
    cb.right() - r - size.width - cm.margin.right
  } else {
    static_origin.0 + cm.margin.left
  };
  let abs_y = if let Some(t) = top {
    cb.y + t + cm.margin.top
  } else if let Some(b) = bottom {
    cb.bottom() - b - size.height - cm.margin.bottom
  } else {
    static_origin.1 + cm.margin.top
  };

  child.rect.x = abs_x - parent_origin.0;
  child.rect.y = abs_y - parent_origin.1;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::{Length, Size, Spacing};
  use crate::layout::{layout, layout_with_positioning, LayoutContext};
  use crate::node::{fixed, vstack, Node};

  #[test]
  fn relative_shifts_by_insets() {
    let mut child = fixed(50.0, 50.0);
    child.style.position = Position::Relative;
    child.style.left = Length::Px(10.0);
    child.style.top = Length::Px(5.0);
    let mut root = vstack([child]).with_width(200.0).with_height(200.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.x, 10.0);
    assert_eq!(root.children[0].rect.y, 5.0);
  }

  #[test]
  fn relative_end_edges_take_precedence() {
    let mut child = fixed(50.0, 50.0);
    child.style.position = Position::Relative;
    child.style.left = Length::Px(10.0);
    child.style.right = Length::Px(4.0);
    let mut root = vstack([child]).with_width(200.0).with_height(200.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.x, -4.0);
  }

  #[test]
  fn absolute_resolves_against_positioned_ancestor() {
    let mut abs = fixed(40.0, 30.0);
    abs.style.position = Position::Absolute;
    abs.style.right = Length::Px(10.0);
    abs.style.bottom = Length::Px(10.0);

    let mut anchor = fixed(200.0, 100.0);
    anchor.style.position = Position::Relative;
    let anchor = anchor.add_child(abs);

    let mut root = vstack([fixed(50.0, 50.0), anchor])
      .with_width(400.0)
      .with_height(400.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    let anchor = &root.children[1];
    assert_eq!(anchor.rect.y, 50.0);
    // Bottom-right corner, relative to the anchor.
    assert_eq!(anchor.children[0].rect.x, 150.0);
    assert_eq!(anchor.children[0].rect.y, 60.0);
  }

  #[test]
  fn absolute_ignored_by_flow() {
    let mut abs = fixed(40.0, 30.0);
    abs.style.position = Position::Absolute;
    abs.style.left = Length::Px(0.0);
    abs.style.top = Length::Px(0.0);

    let mut root = vstack([abs, fixed(50.0, 50.0)])
      .with_width(200.0)
      .with_height(200.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // The in-flow child sits at the top; the absolute box does not advance
    // the flow cursor.
    assert_eq!(root.children[1].rect.y, 0.0);
    assert_eq!(root.children[0].rect.y, 0.0);
  }

  #[test]
  fn absolute_size_from_inset_gap() {
    let mut abs = Node::new();
    abs.style.position = Position::Absolute;
    abs.style.left = Length::Px(10.0);
    abs.style.right = Length::Px(10.0);
    abs.style.top = Length::Px(20.0);
    abs.style.bottom = Length::Px(20.0);

    let mut root = vstack([abs]).with_width(300.0).with_height(200.0);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect, Rect::new(10.0, 20.0, 280.0, 160.0));
  }

  #[test]
  fn fixed_resolves_against_viewport() {
    let mut pinned = fixed(50.0, 20.0);
    pinned.style.position = Position::Fixed;
    pinned.style.right = Length::Px(0.0);
    pinned.style.top = Length::Px(0.0);

    let inner = vstack([pinned]).with_width(100.0).with_height(100.0);
    let mut root = vstack([inner]).with_width(400.0).with_height(300.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_with_positioning(
      &mut root,
      Constraints::loose(400.0, 300.0),
      Rect::new(0.0, 0.0, 800.0, 600.0),
      &ctx,
    );
    assert_eq!(size, Size::new(400.0, 300.0));

    // 800 - 50 = 750 absolute, expressed relative to the inner parent.
    assert_eq!(root.children[0].children[0].rect.x, 750.0);
    assert_eq!(root.children[0].children[0].rect.y, 0.0);
  }

  #[test]
  fn sticky_clamps_into_container() {
    let mut sticky = fixed(50.0, 20.0);
    sticky.style.position = Position::Sticky;
    sticky.style.top = Length::Px(-30.0);

    let mut root = vstack([sticky]).with_width(200.0).with_height(100.0);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // The requested shift would escape the container; sticky pins it to the
    // top edge instead.
    assert_eq!(root.children[0].rect.y, 0.0);
  }

  #[test]
  fn margins_offset_absolute_boxes() {
    let mut abs = fixed(40.0, 30.0);
    abs.style.position = Position::Absolute;
    abs.style.left = Length::Px(10.0);
    abs.style.top = Length::Px(10.0);
    abs.style.margin = Spacing::uniform(5.0);

    let mut root = vstack([abs]).with_width(300.0).with_height(200.0);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.x, 15.0);
    assert_eq!(root.children[0].rect.y, 15.0);
  }
}
