//! # boxflow
//!
//! CSS-compatible box layout engine: given a tree of styled nodes and outer
//! size constraints, boxflow computes the position and size of every box.
//!
//! ## Features
//!
//! - **Three formatting contexts**: block flow, flexbox (wrapping, grow/
//!   shrink resolution, baseline alignment) and grid (track templates with
//!   `fr`/`auto`/`min-content`/`max-content`/`fit-content`, `repeat()` with
//!   `auto-fill`/`auto-fit`, spanning, gutters).
//! - **Box model**: margin/border/padding with `content-box`/`border-box`
//!   sizing, min/max constraints and aspect ratio.
//! - **Positioned overlays**: relative, absolute, fixed and sticky boxes
//!   resolved against their containing block in a post-pass.
//! - **Intrinsic sizing**: min-content/max-content queries across contexts,
//!   with text behind a pluggable measure callback.
//! - **Utilities**: 2D affine transforms, post-layout alignment and grid
//!   snapping, JSON/YAML tree serialization.
//!
//! ## Quick start
//!
//! ```rust
//! use boxflow::prelude::*;
//!
//! let mut root = hstack([
//!     fixed(100.0, 50.0),
//!     fixed(100.0, 50.0).with_flex_grow(1.0),
//! ])
//! .with_width(400.0)
//! .with_height(100.0);
//!
//! let ctx = LayoutContext::new(800.0, 600.0);
//! let size = layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);
//!
//! assert_eq!(size.width, 400.0);
//! assert_eq!(root.children[1].rect.width, 300.0);
//! ```
//!
//! ## Contract
//!
//! Layout is synchronous, deterministic and idempotent: it mutates only the
//! `rect` field of the nodes it is handed, and identical inputs produce
//! identical rects. Geometric degeneracies never panic; they are repaired
//! (clamped) and reported through [`diag`]. Errors surface only from the
//! serialization layer.

pub mod align;
pub mod diag;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod measure;
pub mod node;
pub mod serialize;
pub mod style;
pub mod transform;

pub use align::{align_nodes, distribute_nodes, snap_nodes, snap_to_grid, AlignMode};
pub use error::{LayoutError, Result};
pub use geometry::{Axis, Constraints, Length, Rect, Size, Spacing, UNBOUNDED};
pub use layout::{
  fit_content, layout, layout_block, layout_flexbox, layout_grid, layout_with_positioning,
  max_content, min_content, LayoutContext,
};
pub use measure::{FixedGlyphMeasure, Measure, NoopMeasure, TextMetrics};
pub use node::{fixed, grid, hstack, vstack, Cursor, Node};
pub use style::{
  parse_template, AlignContent, AlignItems, BoxSizing, Display, FlexDirection, FlexWrap,
  GridTrack, JustifyContent, JustifyItems, Position, RepeatCount, RepeatTrack, Style,
  TrackListComponent,
};
pub use transform::Transform2D;

/// Commonly used types and entry points.
pub mod prelude {
  pub use crate::align::{align_nodes, distribute_nodes, snap_nodes, snap_to_grid, AlignMode};
  pub use crate::error::Result;
  pub use crate::geometry::{Axis, Constraints, Length, Rect, Size, Spacing};
  pub use crate::layout::{
    layout, layout_with_positioning, max_content, min_content, LayoutContext,
  };
  pub use crate::measure::{FixedGlyphMeasure, Measure, NoopMeasure, TextMetrics};
  pub use crate::node::{fixed, grid, hstack, vstack, Node};
  pub use crate::style::{
    AlignContent, AlignItems, Display, FlexDirection, FlexWrap, GridTrack, JustifyContent,
    Position, Style,
  };
  pub use crate::transform::Transform2D;
}
