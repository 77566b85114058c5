//! The layout engine: driver, context and shared box resolution.
//!
//! [`layout`] is the primary entry point. It dispatches on `display` into
//! the block, flexbox or grid algorithms, which recursively re-enter the
//! driver for their children, then runs the positioned-overlay pass over the
//! in-flow result. Layout only ever writes the `rect` field of the nodes it
//! is handed; running it twice on the same inputs yields identical rects.

mod block;
mod flex;
mod grid;
mod intrinsic;
mod positioned;

pub use block::layout_block;
pub use flex::layout_flexbox;
pub use grid::layout_grid;
pub use intrinsic::{fit_content, max_content, min_content};

use crate::geometry::{sanitize, Axis, Constraints, Rect, Size, Spacing, UNBOUNDED};
use crate::measure::{Measure, TextMetrics, NOOP_MEASURE};
use crate::node::Node;
use crate::style::{BoxSizing, Display, Style};

/// Immutable per-run layout context: viewport geometry, the root font size
/// (the `rem` basis) and the text measure callback.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
  pub viewport_width: f64,
  pub viewport_height: f64,
  pub root_font_size: f64,
  measure: &'a dyn Measure,
}

impl<'a> LayoutContext<'a> {
  pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
    Self {
      viewport_width,
      viewport_height,
      root_font_size: 16.0,
      measure: &NOOP_MEASURE,
    }
  }

  pub fn with_root_font_size(mut self, root_font_size: f64) -> Self {
    self.root_font_size = root_font_size;
    self
  }

  /// Installs a measure callback for text leaves.
  pub fn with_measure(mut self, measure: &'a dyn Measure) -> Self {
    self.measure = measure;
    self
  }

  /// The viewport as a rectangle at the origin.
  pub fn viewport(&self) -> Rect {
    Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
  }

  /// Measures text through the callback, sanitizing non-finite metrics.
  pub(crate) fn measure_text(&self, text: &str, style: &Style, available_width: f64) -> TextMetrics {
    let raw = self.measure.measure(text, style, available_width);
    let mut metrics = TextMetrics {
      width: sanitize(raw.width),
      height: sanitize(raw.height),
      baseline: sanitize(raw.baseline),
      lines: raw.lines,
    };
    if metrics != raw {
      crate::diag::report(
        crate::diag::DiagnosticKind::NonFiniteMeasure,
        format!("measure callback returned degenerate metrics for {text:?}; clamped"),
      );
    }
    // UNBOUNDED is a constraint sentinel, not a text width.
    if metrics.width >= UNBOUNDED {
      metrics.width = 0.0;
    }
    if metrics.height >= UNBOUNDED {
      metrics.height = 0.0;
    }
    metrics
  }
}

/// Lays out the subtree rooted at `node` within `constraints` and returns
/// the node's border-box size.
///
/// Rects are written on every node of the subtree: sizes by each node's own
/// layout, positions by the parent placing it. Positioned descendants
/// (absolute/fixed/relative/sticky) are resolved in a post-pass against the
/// context's viewport; use [`layout_with_positioning`] to supply a different
/// viewport rectangle.
pub fn layout(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
  layout_with_positioning(node, constraints, ctx.viewport(), ctx)
}

/// [`layout`] with an explicit viewport for the positioned-overlay pass.
pub fn layout_with_positioning(
  node: &mut Node,
  constraints: Constraints,
  viewport: Rect,
  ctx: &LayoutContext,
) -> Size {
  let size = flow_layout(node, constraints, ctx);
  positioned::resolve_positioned(node, viewport, ctx);
  size
}

/// In-flow layout dispatch. Does not run the positioned pass.
pub(crate) fn flow_layout(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
  let constraints = constraints.normalized();
  tracing::trace!(display = ?node.style.display.resolve(), "layout node");
  match node.style.display {
    Display::None => {
      zero_subtree(node);
      Size::ZERO
    }
    Display::Flex => flex::layout_flexbox(node, constraints, ctx),
    Display::Grid => grid::layout_grid(node, constraints, ctx),
    Display::Unset | Display::Block => block::layout_block(node, constraints, ctx),
  }
}

/// Writes zero rects over a whole subtree (`display: none`).
pub(crate) fn zero_subtree(node: &mut Node) {
  node.rect = Rect::default();
  for child in &mut node.children {
    zero_subtree(child);
  }
}

/// True for children that participate in normal flow.
pub(crate) fn in_flow(style: &Style) -> bool {
  style.display != Display::None && !style.position.is_out_of_flow()
}

/// A node's style lengths resolved to pixels: spacing, preferred border-box
/// size per axis (when definite), and border-box min/max bounds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoxMetrics {
  pub margin: Spacing,
  pub padding: Spacing,
  pub border: Spacing,
  pub width: Option<f64>,
  pub height: Option<f64>,
  pub min_width: f64,
  pub max_width: f64,
  pub min_height: f64,
  pub max_height: f64,
}

impl BoxMetrics {
  pub fn padding_border_horizontal(&self) -> f64 {
    self.padding.horizontal() + self.border.horizontal()
  }

  pub fn padding_border_vertical(&self) -> f64 {
    self.padding.vertical() + self.border.vertical()
  }

  pub fn padding_border_axis(&self, axis: Axis) -> f64 {
    match axis {
      Axis::Horizontal => self.padding_border_horizontal(),
      Axis::Vertical => self.padding_border_vertical(),
    }
  }

  /// Offset of the content box from the border-box origin.
  pub fn content_origin(&self) -> (f64, f64) {
    (
      self.border.left + self.padding.left,
      self.border.top + self.padding.top,
    )
  }

  pub fn clamp_width(&self, width: f64) -> f64 {
    sanitize(width).clamp(self.min_width, self.max_width)
  }

  pub fn clamp_height(&self, height: f64) -> f64 {
    sanitize(height).clamp(self.min_height, self.max_height)
  }

  pub fn clamp_axis(&self, axis: Axis, value: f64) -> f64 {
    match axis {
      Axis::Horizontal => self.clamp_width(value),
      Axis::Vertical => self.clamp_height(value),
    }
  }

  pub fn size_axis(&self, axis: Axis) -> Option<f64> {
    match axis {
      Axis::Horizontal => self.width,
      Axis::Vertical => self.height,
    }
  }
}

/// Resolves a node's sizing fields against the given percentage bases.
///
/// Returned sizes are border-box per the node's `box_sizing`; intrinsic
/// sizing keywords on `width`/`height` are resolved through the intrinsic
/// measurement pass. Min/max default to `0`/[`UNBOUNDED`] and aspect ratio
/// completes a missing axis before anything is measured.
pub(crate) fn resolve_box(
  node: &Node,
  basis_width: Option<f64>,
  basis_height: Option<f64>,
  ctx: &LayoutContext,
) -> BoxMetrics {
  use crate::geometry::Length;

  let style = &node.style;
  let font_size = style.font_size;
  let rem = ctx.root_font_size;

  let padding = style.padding;
  let border = style.border;
  let pb_h = padding.horizontal() + border.horizontal();
  let pb_v = padding.vertical() + border.vertical();

  let border_box_w = |resolved: f64| match style.box_sizing {
    BoxSizing::ContentBox => resolved.max(0.0) + pb_h,
    BoxSizing::BorderBox => resolved.max(pb_h),
  };
  let border_box_h = |resolved: f64| match style.box_sizing {
    BoxSizing::ContentBox => resolved.max(0.0) + pb_v,
    BoxSizing::BorderBox => resolved.max(pb_v),
  };

  let resolve_w = |length: &Length| -> Option<f64> {
    match *length {
      Length::MinContent => Some(intrinsic::min_content(node, Axis::Horizontal, ctx)),
      Length::MaxContent => Some(intrinsic::max_content(node, Axis::Horizontal, ctx)),
      Length::FitContent(cap) => Some(intrinsic::fit_content(node, Axis::Horizontal, cap, ctx)),
      _ => length
        .resolve(basis_width, font_size, rem)
        .map(|v| border_box_w(sanitize(v))),
    }
  };
  let resolve_h = |length: &Length| -> Option<f64> {
    match *length {
      Length::MinContent => Some(intrinsic::min_content(node, Axis::Vertical, ctx)),
      Length::MaxContent => Some(intrinsic::max_content(node, Axis::Vertical, ctx)),
      Length::FitContent(cap) => Some(intrinsic::fit_content(node, Axis::Vertical, cap, ctx)),
      _ => length
        .resolve(basis_height, font_size, rem)
        .map(|v| border_box_h(sanitize(v))),
    }
  };

  let mut width = resolve_w(&style.width);
  let mut height = resolve_h(&style.height);

  if style.aspect_ratio > 0.0 {
    match (width, height) {
      (Some(w), None) => height = Some(border_box_h((w - pb_h).max(0.0) / style.aspect_ratio)),
      (None, Some(h)) => width = Some(border_box_w((h - pb_v).max(0.0) * style.aspect_ratio)),
      _ => {}
    }
  }

  BoxMetrics {
    margin: style.margin,
    padding,
    border,
    width,
    height,
    min_width: resolve_w(&style.min_width).unwrap_or(0.0),
    max_width: resolve_w(&style.max_width).unwrap_or(UNBOUNDED),
    min_height: resolve_h(&style.min_height).unwrap_or(0.0),
    max_height: resolve_h(&style.max_height).unwrap_or(UNBOUNDED),
  }
}

/// Main axis of a flex container's direction.
pub(crate) fn main_axis(style: &Style) -> Axis {
  if style.flex_direction.is_row() {
    Axis::Horizontal
  } else {
    Axis::Vertical
  }
}

pub(crate) fn cross_axis(axis: Axis) -> Axis {
  match axis {
    Axis::Horizontal => Axis::Vertical,
    Axis::Vertical => Axis::Horizontal,
  }
}
