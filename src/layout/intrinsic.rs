//! Intrinsic sizing: min-content and max-content measurement across
//! formatting contexts.
//!
//! All sizes returned here are border-box. Percentages have no basis during
//! intrinsic measurement and behave as auto; intrinsic keywords on min/max
//! bounds are ignored to keep measurement well-founded.

use super::{in_flow, main_axis, LayoutContext};
use crate::geometry::{sanitize, Axis, Length, Size, UNBOUNDED};
use crate::node::Node;
use crate::style::{Display, FlexWrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntrinsicKind {
  Min,
  Max,
}

/// The smallest border-box size of `node` along `axis` that avoids overflow.
pub fn min_content(node: &Node, axis: Axis, ctx: &LayoutContext) -> f64 {
  intrinsic_size(node, axis, IntrinsicKind::Min, ctx)
}

/// The border-box size of `node` along `axis` if content never wrapped.
pub fn max_content(node: &Node, axis: Axis, ctx: &LayoutContext) -> f64 {
  intrinsic_size(node, axis, IntrinsicKind::Max, ctx)
}

/// `fit-content(cap)`: the max-content size capped at `cap`, floored at the
/// min-content size.
pub fn fit_content(node: &Node, axis: Axis, cap: f64, ctx: &LayoutContext) -> f64 {
  let min = min_content(node, axis, ctx);
  let max = max_content(node, axis, ctx);
  min.max(cap.min(max))
}

pub(crate) fn intrinsic_size(
  node: &Node,
  axis: Axis,
  kind: IntrinsicKind,
  ctx: &LayoutContext,
) -> f64 {
  let style = &node.style;
  if style.display == Display::None {
    return 0.0;
  }

  let pb = match axis {
    Axis::Horizontal => style.padding.horizontal() + style.border.horizontal(),
    Axis::Vertical => style.padding.vertical() + style.border.vertical(),
  };

  let own_size = match axis {
    Axis::Horizontal => &style.width,
    Axis::Vertical => &style.height,
  };

  let value = match own_size {
    Length::MinContent => content_size(node, axis, IntrinsicKind::Min, ctx) + pb,
    Length::MaxContent => content_size(node, axis, IntrinsicKind::Max, ctx) + pb,
    Length::FitContent(cap) => {
      let min = content_size(node, axis, IntrinsicKind::Min, ctx) + pb;
      let max = content_size(node, axis, IntrinsicKind::Max, ctx) + pb;
      min.max(cap.min(max))
    }
    other => match other.resolve(None, style.font_size, ctx.root_font_size) {
      Some(resolved) => border_box(style, axis, sanitize(resolved), pb),
      None => content_size(node, axis, kind, ctx) + pb,
    },
  };

  // Clamp by definite min/max bounds; intrinsic keywords in bounds are
  // ignored here.
  let (min_bound, max_bound) = match axis {
    Axis::Horizontal => (&style.min_width, &style.max_width),
    Axis::Vertical => (&style.min_height, &style.max_height),
  };
  let min_bound = min_bound
    .resolve(None, style.font_size, ctx.root_font_size)
    .map(|v| border_box(style, axis, sanitize(v), pb))
    .unwrap_or(0.0);
  let max_bound = max_bound
    .resolve(None, style.font_size, ctx.root_font_size)
    .map(|v| border_box(style, axis, sanitize(v), pb))
    .unwrap_or(UNBOUNDED);

  value.clamp(min_bound, max_bound.max(min_bound))
}

fn border_box(style: &crate::style::Style, _axis: Axis, resolved: f64, pb: f64) -> f64 {
  match style.box_sizing {
    crate::style::BoxSizing::ContentBox => resolved + pb,
    crate::style::BoxSizing::BorderBox => resolved.max(pb),
  }
}

/// Content-box intrinsic size per formatting context.
fn content_size(node: &Node, axis: Axis, kind: IntrinsicKind, ctx: &LayoutContext) -> f64 {
  let from_text = node.text.as_deref().map(|text| {
    let limit = match kind {
      IntrinsicKind::Min => 0.0,
      IntrinsicKind::Max => UNBOUNDED,
    };
    let metrics = ctx.measure_text(text, &node.style, limit);
    Size::new(metrics.width, metrics.height).axis(axis)
  });

  let from_children = match node.style.display.resolve() {
    Display::None => 0.0,
    Display::Flex => flex_content(node, axis, kind, ctx),
    Display::Grid => super::grid::intrinsic_content(node, axis, kind, ctx),
    _ => block_content(node, axis, kind, ctx),
  };

  from_text.unwrap_or(0.0).max(from_children)
}

/// Outer (margin-box) contribution of a child along `axis`.
pub(crate) fn outer_contribution(
  child: &Node,
  axis: Axis,
  kind: IntrinsicKind,
  ctx: &LayoutContext,
) -> f64 {
  intrinsic_size(child, axis, kind, ctx) + child.style.margin.axis_sum(axis)
}

fn block_content(node: &Node, axis: Axis, kind: IntrinsicKind, ctx: &LayoutContext) -> f64 {
  let children = node.children.iter().filter(|c| in_flow(&c.style));
  match axis {
    // Inline axis: the widest child decides, for min and max alike.
    Axis::Horizontal => children
      .map(|child| outer_contribution(child, axis, kind, ctx))
      .fold(0.0, f64::max),
    // Block axis: children stack, so contributions sum.
    Axis::Vertical => children
      .map(|child| outer_contribution(child, axis, kind, ctx))
      .sum(),
  }
}

fn flex_content(node: &Node, axis: Axis, kind: IntrinsicKind, ctx: &LayoutContext) -> f64 {
  let main = main_axis(&node.style);
  let children: Vec<&Node> = node.children.iter().filter(|c| in_flow(&c.style)).collect();

  if axis == main {
    let contributions = children.iter().map(|child| {
      let basis = flex_basis_contribution(child, main, kind, ctx);
      basis + child.style.margin.axis_sum(axis)
    });
    let wraps = node.style.flex_wrap != FlexWrap::NoWrap;
    if wraps && kind == IntrinsicKind::Min {
      contributions.fold(0.0, f64::max)
    } else {
      contributions.sum()
    }
  } else {
    children
      .iter()
      .map(|child| outer_contribution(child, axis, kind, ctx))
      .fold(0.0, f64::max)
  }
}

/// A flex item's basis for intrinsic purposes: `flex_basis`, else its main
/// size, else its content size of the matching kind, clamped by the item's
/// own bounds.
fn flex_basis_contribution(
  child: &Node,
  main: Axis,
  kind: IntrinsicKind,
  ctx: &LayoutContext,
) -> f64 {
  let style = &child.style;
  let from_basis = style
    .flex_basis
    .resolve(None, style.font_size, ctx.root_font_size);
  let basis = match from_basis {
    Some(resolved) => {
      // flex-basis names the content size; clamp through the item's bounds
      // the same way its width would be.
      let pb = match main {
        Axis::Horizontal => style.padding.horizontal() + style.border.horizontal(),
        Axis::Vertical => style.padding.vertical() + style.border.vertical(),
      };
      border_box(style, main, sanitize(resolved), pb)
    }
    None => intrinsic_size(child, main, kind, ctx),
  };
  let min = intrinsic_bound(child, main, false, ctx);
  let max = intrinsic_bound(child, main, true, ctx);
  basis.clamp(min, max.max(min))
}

fn intrinsic_bound(child: &Node, axis: Axis, upper: bool, ctx: &LayoutContext) -> f64 {
  let style = &child.style;
  let bound = match (axis, upper) {
    (Axis::Horizontal, false) => &style.min_width,
    (Axis::Horizontal, true) => &style.max_width,
    (Axis::Vertical, false) => &style.min_height,
    (Axis::Vertical, true) => &style.max_height,
  };
  let pb = match axis {
    Axis::Horizontal => style.padding.horizontal() + style.border.horizontal(),
    Axis::Vertical => style.padding.vertical() + style.border.vertical(),
  };
  bound
    .resolve(None, style.font_size, ctx.root_font_size)
    .map(|v| border_box(style, axis, sanitize(v), pb))
    .unwrap_or(if upper { UNBOUNDED } else { 0.0 })
}
