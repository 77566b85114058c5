//! The styled node tree.
//!
//! A [`Node`] owns its children exclusively (strict tree, no cycles) and
//! carries an output [`Rect`] written by layout; everything else on the node
//! is input. Trees are built with the fluent `with_*`/`add_*` methods or the
//! [`hstack`]/[`vstack`]/[`fixed`]/[`grid`] constructors.

mod cursor;
mod query;

pub use cursor::Cursor;

use crate::geometry::{Length, Rect, Spacing};
use crate::style::{Display, FlexDirection, GridTrack, Style, TrackListComponent};
use serde::{Deserialize, Serialize};

/// A styled box in the layout tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
  #[serde(skip_serializing_if = "Style::is_default")]
  pub style: Style,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<Node>,
  /// Computed geometry in the parent's coordinate space. Written by layout;
  /// zero until the first layout call.
  #[serde(skip_serializing_if = "Rect::is_zero")]
  pub rect: Rect,
}

impl Node {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn with_width(mut self, width: impl Into<Length>) -> Self {
    self.style.width = width.into();
    self
  }

  pub fn with_height(mut self, height: impl Into<Length>) -> Self {
    self.style.height = height.into();
    self
  }

  pub fn with_padding(mut self, padding: Spacing) -> Self {
    self.style.padding = padding;
    self
  }

  pub fn with_margin(mut self, margin: Spacing) -> Self {
    self.style.margin = margin;
    self
  }

  pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn with_flex_grow(mut self, grow: f64) -> Self {
    self.style.flex_grow = grow;
    self
  }

  pub fn with_display(mut self, display: Display) -> Self {
    self.style.display = display;
    self
  }

  pub fn add_child(mut self, child: Node) -> Self {
    self.children.push(child);
    self
  }

  pub fn add_children<I>(mut self, children: I) -> Self
  where
    I: IntoIterator<Item = Node>,
  {
    self.children.extend(children);
    self
  }

  /// A cursor over this tree rooted at `self`, for parent navigation.
  pub fn cursor(&self) -> Cursor<'_> {
    Cursor::new(self)
  }
}

/// A flex row container holding `children`.
pub fn hstack<I>(children: I) -> Node
where
  I: IntoIterator<Item = Node>,
{
  Node {
    style: Style {
      display: Display::Flex,
      flex_direction: FlexDirection::Row,
      ..Default::default()
    },
    ..Default::default()
  }
  .add_children(children)
}

/// A flex column container holding `children`.
pub fn vstack<I>(children: I) -> Node
where
  I: IntoIterator<Item = Node>,
{
  Node {
    style: Style {
      display: Display::Flex,
      flex_direction: FlexDirection::Column,
      ..Default::default()
    },
    ..Default::default()
  }
  .add_children(children)
}

/// A block node with a fixed pixel size.
pub fn fixed(width: f64, height: f64) -> Node {
  Node {
    style: Style {
      display: Display::Block,
      width: Length::Px(width),
      height: Length::Px(height),
      ..Default::default()
    },
    ..Default::default()
  }
}

/// A grid container with `rows x cols` uniform tracks.
pub fn grid(rows: usize, cols: usize, row_size: GridTrack, col_size: GridTrack) -> Node {
  Node {
    style: Style {
      display: Display::Grid,
      grid_template_rows: vec![TrackListComponent::Track(row_size); rows],
      grid_template_columns: vec![TrackListComponent::Track(col_size); cols],
      ..Default::default()
    },
    ..Default::default()
  }
}
