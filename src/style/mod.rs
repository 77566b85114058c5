//! Style model: the property bundle attached to every node.
//!
//! Enum properties carry an explicit default variant instead of aliasing the
//! zero value (`Display::Unset` resolves to block in the driver). On the
//! wire, enums use their CSS spellings and default-valued fields are
//! omitted.

mod grid;

pub use grid::{parse_template, GridTrack, RepeatCount, RepeatTrack, TrackListComponent};

use crate::geometry::{Length, Spacing};
use crate::transform::Transform2D;
use serde::{Deserialize, Serialize};

/// The formatting context a node establishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
  /// Not set; the driver resolves this to [`Display::Block`].
  #[default]
  Unset,
  Block,
  Flex,
  Grid,
  /// The node and its subtree produce no boxes.
  None,
}

impl Display {
  /// Resolves [`Display::Unset`] to the block default.
  pub fn resolve(&self) -> Display {
    match self {
      Display::Unset => Display::Block,
      other => *other,
    }
  }
}

/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
  #[default]
  Row,
  RowReverse,
  Column,
  ColumnReverse,
}

impl FlexDirection {
  pub fn is_row(&self) -> bool {
    matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
  }

  pub fn is_reverse(&self) -> bool {
    matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
  #[default]
  #[serde(rename = "nowrap")]
  NoWrap,
  Wrap,
  WrapReverse,
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
  #[default]
  FlexStart,
  FlexEnd,
  Center,
  SpaceBetween,
  SpaceAround,
  SpaceEvenly,
}

/// Cross-axis alignment of items within a flex line or a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
  #[default]
  Stretch,
  FlexStart,
  FlexEnd,
  Center,
  Baseline,
}

/// Cross-axis distribution of flex lines. Same table as
/// [`JustifyContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
  #[default]
  FlexStart,
  FlexEnd,
  Center,
  SpaceBetween,
  SpaceAround,
  SpaceEvenly,
}

/// Inline-axis alignment of a grid item within its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyItems {
  #[default]
  Stretch,
  Start,
  End,
  Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
  /// `width`/`height` name the content box.
  #[default]
  ContentBox,
  /// `width`/`height` include padding and border.
  BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
  #[default]
  Static,
  Relative,
  Absolute,
  Fixed,
  Sticky,
}

impl Position {
  /// True for positions removed from normal flow.
  pub fn is_out_of_flow(&self) -> bool {
    matches!(self, Position::Absolute | Position::Fixed)
  }

  /// True for positions that establish a containing block for absolutely
  /// positioned descendants.
  pub fn is_positioned(&self) -> bool {
    !matches!(self, Position::Static)
  }
}

/// The full style bundle of a node.
///
/// Grid placement fields (`grid_row_start` and friends) are 1-based grid
/// lines with 0 meaning auto placement; end lines are exclusive, so a span
/// of one track is `end = start + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
  #[serde(skip_serializing_if = "is_default_display")]
  pub display: Display,

  // Flex container properties
  #[serde(skip_serializing_if = "is_default")]
  pub flex_direction: FlexDirection,
  #[serde(skip_serializing_if = "is_default")]
  pub flex_wrap: FlexWrap,
  #[serde(skip_serializing_if = "is_default")]
  pub justify_content: JustifyContent,
  #[serde(skip_serializing_if = "is_default")]
  pub align_items: AlignItems,
  #[serde(skip_serializing_if = "is_default")]
  pub align_content: AlignContent,

  // Flex item properties
  #[serde(skip_serializing_if = "is_zero")]
  pub flex_grow: f64,
  #[serde(skip_serializing_if = "is_one")]
  pub flex_shrink: f64,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub flex_basis: Length,

  // Grid container properties
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub grid_template_rows: Vec<TrackListComponent>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub grid_template_columns: Vec<TrackListComponent>,
  #[serde(skip_serializing_if = "is_auto_track")]
  pub grid_auto_rows: GridTrack,
  #[serde(skip_serializing_if = "is_auto_track")]
  pub grid_auto_columns: GridTrack,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub grid_row_gap: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub grid_column_gap: Option<f64>,
  #[serde(skip_serializing_if = "is_zero")]
  pub grid_gap: f64,
  #[serde(skip_serializing_if = "is_default")]
  pub justify_items: JustifyItems,

  // Grid item placement (1-based lines, 0 = auto)
  #[serde(skip_serializing_if = "is_zero_i32")]
  pub grid_row_start: i32,
  #[serde(skip_serializing_if = "is_zero_i32")]
  pub grid_row_end: i32,
  #[serde(skip_serializing_if = "is_zero_i32")]
  pub grid_column_start: i32,
  #[serde(skip_serializing_if = "is_zero_i32")]
  pub grid_column_end: i32,

  // Sizing
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub width: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub height: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub min_width: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub min_height: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub max_width: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub max_height: Length,
  /// Width / height ratio; 0 means none.
  #[serde(skip_serializing_if = "is_zero")]
  pub aspect_ratio: f64,

  // Box model
  #[serde(skip_serializing_if = "Spacing::is_zero")]
  pub margin: Spacing,
  #[serde(skip_serializing_if = "Spacing::is_zero")]
  pub padding: Spacing,
  #[serde(skip_serializing_if = "Spacing::is_zero")]
  pub border: Spacing,
  #[serde(skip_serializing_if = "is_default")]
  pub box_sizing: BoxSizing,

  // Positioning
  #[serde(skip_serializing_if = "is_default")]
  pub position: Position,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub top: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub right: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub bottom: Length,
  #[serde(skip_serializing_if = "Length::is_auto")]
  pub left: Length,
  #[serde(skip_serializing_if = "is_zero_i32")]
  pub z_index: i32,

  /// Paint-time transform; never feeds back into layout.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub transform: Option<Transform2D>,

  /// The em basis, also handed to the measure callback.
  #[serde(skip_serializing_if = "is_default_font_size")]
  pub font_size: f64,
}

impl Default for Style {
  fn default() -> Self {
    Self {
      display: Display::Unset,
      flex_direction: FlexDirection::default(),
      flex_wrap: FlexWrap::default(),
      justify_content: JustifyContent::default(),
      align_items: AlignItems::default(),
      align_content: AlignContent::default(),
      flex_grow: 0.0,
      flex_shrink: 1.0,
      flex_basis: Length::Auto,
      grid_template_rows: Vec::new(),
      grid_template_columns: Vec::new(),
      grid_auto_rows: GridTrack::Auto,
      grid_auto_columns: GridTrack::Auto,
      grid_row_gap: None,
      grid_column_gap: None,
      grid_gap: 0.0,
      justify_items: JustifyItems::default(),
      grid_row_start: 0,
      grid_row_end: 0,
      grid_column_start: 0,
      grid_column_end: 0,
      width: Length::Auto,
      height: Length::Auto,
      min_width: Length::Auto,
      min_height: Length::Auto,
      max_width: Length::Auto,
      max_height: Length::Auto,
      aspect_ratio: 0.0,
      margin: Spacing::default(),
      padding: Spacing::default(),
      border: Spacing::default(),
      box_sizing: BoxSizing::default(),
      position: Position::default(),
      top: Length::Auto,
      right: Length::Auto,
      bottom: Length::Auto,
      left: Length::Auto,
      z_index: 0,
      transform: None,
      font_size: 16.0,
    }
  }
}

impl Style {
  /// Effective row gutter: `grid_row_gap` with `grid_gap` as fallback.
  pub fn row_gap(&self) -> f64 {
    self.grid_row_gap.unwrap_or(self.grid_gap).max(0.0)
  }

  /// Effective column gutter: `grid_column_gap` with `grid_gap` as fallback.
  pub fn column_gap(&self) -> f64 {
    self.grid_column_gap.unwrap_or(self.grid_gap).max(0.0)
  }

  pub fn is_default(&self) -> bool {
    *self == Style::default()
  }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
  *value == T::default()
}

fn is_default_display(display: &Display) -> bool {
  matches!(display, Display::Unset)
}

fn is_auto_track(track: &GridTrack) -> bool {
  matches!(track, GridTrack::Auto)
}

fn is_zero(value: &f64) -> bool {
  *value == 0.0
}

fn is_one(value: &f64) -> bool {
  *value == 1.0
}

fn is_zero_i32(value: &i32) -> bool {
  *value == 0
}

fn is_default_font_size(value: &f64) -> bool {
  *value == 16.0
}
