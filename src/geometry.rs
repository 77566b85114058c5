//! Value and constraint primitives: lengths, rectangles, spacing and
//! constraint boxes.
//!
//! Everything here is plain data in CSS pixels (`f64`). Lengths resolve
//! against a percentage basis plus font sizes; constraint boxes carry the
//! `min <= max` invariant and repair violations instead of failing.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sentinel for an unbounded constraint. A large finite value so arithmetic
/// on constraint boxes stays finite.
pub const UNBOUNDED: f64 = f64::MAX;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
  Horizontal,
  Vertical,
}

/// A CSS length value.
///
/// `Px` is an absolute pixel value; `Percent` resolves against a caller
/// supplied basis; `Em`/`Rem` resolve against the current and root font
/// sizes. `Auto` and the intrinsic sentinels (`MinContent`, `MaxContent`,
/// `FitContent`) do not resolve to pixels directly - callers handle them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
  Px(f64),
  /// Percentage, stored as 0-100.
  Percent(f64),
  Em(f64),
  Rem(f64),
  Auto,
  MinContent,
  MaxContent,
  /// `fit-content(cap)` with the cap in pixels.
  FitContent(f64),
}

impl Default for Length {
  fn default() -> Self {
    Length::Auto
  }
}

impl Length {
  /// Resolves the length to pixels.
  ///
  /// `basis` is the percentage reference in the same axis; `None` when the
  /// reference is itself indefinite, in which case percentages behave as
  /// `auto`. Returns `None` for `Auto` and the intrinsic sentinels.
  pub fn resolve(&self, basis: Option<f64>, font_size: f64, root_font_size: f64) -> Option<f64> {
    match *self {
      Length::Px(px) => Some(px),
      Length::Percent(pct) => basis.map(|b| b * pct / 100.0),
      Length::Em(em) => Some(em * font_size),
      Length::Rem(rem) => Some(rem * root_font_size),
      Length::Auto | Length::MinContent | Length::MaxContent | Length::FitContent(_) => None,
    }
  }

  pub fn is_auto(&self) -> bool {
    matches!(self, Length::Auto)
  }

  /// True for lengths that resolve to pixels given a definite basis.
  pub fn is_definite(&self) -> bool {
    matches!(
      self,
      Length::Px(_) | Length::Percent(_) | Length::Em(_) | Length::Rem(_)
    )
  }

  /// True for the content-dependent sentinels.
  pub fn is_intrinsic(&self) -> bool {
    matches!(
      self,
      Length::MinContent | Length::MaxContent | Length::FitContent(_)
    )
  }
}

impl From<f64> for Length {
  fn from(px: f64) -> Self {
    Length::Px(px)
  }
}

impl fmt::Display for Length {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Length::Px(px) => write!(f, "{px}px"),
      Length::Percent(pct) => write!(f, "{pct}%"),
      Length::Em(em) => write!(f, "{em}em"),
      Length::Rem(rem) => write!(f, "{rem}rem"),
      Length::Auto => write!(f, "auto"),
      Length::MinContent => write!(f, "min-content"),
      Length::MaxContent => write!(f, "max-content"),
      Length::FitContent(cap) => write!(f, "fit-content({cap}px)"),
    }
  }
}

impl FromStr for Length {
  type Err = String;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    let input = input.trim();
    match input {
      "auto" => return Ok(Length::Auto),
      "min-content" => return Ok(Length::MinContent),
      "max-content" => return Ok(Length::MaxContent),
      _ => {}
    }
    if let Some(inner) = input
      .strip_prefix("fit-content(")
      .and_then(|rest| rest.strip_suffix(')'))
    {
      let cap = inner.trim().trim_end_matches("px").trim();
      return cap
        .parse::<f64>()
        .map(Length::FitContent)
        .map_err(|_| format!("invalid fit-content cap: {inner}"));
    }
    if let Some(value) = input.strip_suffix('%') {
      return value
        .parse::<f64>()
        .map(Length::Percent)
        .map_err(|_| format!("invalid percentage: {input}"));
    }
    if let Some(value) = input.strip_suffix("rem") {
      return value
        .parse::<f64>()
        .map(Length::Rem)
        .map_err(|_| format!("invalid rem length: {input}"));
    }
    if let Some(value) = input.strip_suffix("em") {
      return value
        .parse::<f64>()
        .map(Length::Em)
        .map_err(|_| format!("invalid em length: {input}"));
    }
    let value = input.strip_suffix("px").unwrap_or(input);
    value
      .parse::<f64>()
      .map(|px| if px == -1.0 { Length::Auto } else { Length::Px(px) })
      .map_err(|_| format!("invalid length: {input}"))
  }
}

// Wire format: pixel lengths are bare numbers, `auto` is the -1 sentinel,
// everything else keeps its CSS spelling.
impl Serialize for Length {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match *self {
      Length::Px(px) => serializer.serialize_f64(px),
      Length::Auto => serializer.serialize_f64(-1.0),
      other => serializer.collect_str(&other),
    }
  }
}

impl<'de> Deserialize<'de> for Length {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct LengthVisitor;

    impl Visitor<'_> for LengthVisitor {
      type Value = Length;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number (pixels, -1 for auto) or a CSS length string")
      }

      fn visit_f64<E: de::Error>(self, value: f64) -> Result<Length, E> {
        if value == -1.0 {
          Ok(Length::Auto)
        } else {
          Ok(Length::Px(value))
        }
      }

      fn visit_i64<E: de::Error>(self, value: i64) -> Result<Length, E> {
        self.visit_f64(value as f64)
      }

      fn visit_u64<E: de::Error>(self, value: u64) -> Result<Length, E> {
        self.visit_f64(value as f64)
      }

      fn visit_str<E: de::Error>(self, value: &str) -> Result<Length, E> {
        value.parse().map_err(de::Error::custom)
      }
    }

    deserializer.deserialize_any(LengthVisitor)
  }
}

/// Final computed geometry of a box, in its parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

impl Rect {
  pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub fn from_size(size: Size) -> Self {
    Self::new(0.0, 0.0, size.width, size.height)
  }

  /// Right edge (`x + width`).
  pub fn right(&self) -> f64 {
    self.x + self.width
  }

  /// Bottom edge (`y + height`).
  pub fn bottom(&self) -> f64 {
    self.y + self.height
  }

  pub fn size(&self) -> Size {
    Size::new(self.width, self.height)
  }

  pub fn contains_point(&self, x: f64, y: f64) -> bool {
    x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
  }

  pub fn intersects(&self, other: &Rect) -> bool {
    self.x < other.right()
      && self.right() > other.x
      && self.y < other.bottom()
      && self.bottom() > other.y
  }

  pub fn is_zero(&self) -> bool {
    self.x == 0.0 && self.y == 0.0 && self.width == 0.0 && self.height == 0.0
  }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
  pub width: f64,
  pub height: f64,
}

impl Size {
  pub const ZERO: Size = Size {
    width: 0.0,
    height: 0.0,
  };

  pub fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }

  /// Component along `axis`.
  pub fn axis(&self, axis: Axis) -> f64 {
    match axis {
      Axis::Horizontal => self.width,
      Axis::Vertical => self.height,
    }
  }
}

/// Edge sizes: margins, padding, borders. Margins do not collapse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spacing {
  pub top: f64,
  pub right: f64,
  pub bottom: f64,
  pub left: f64,
}

impl Spacing {
  pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// All four edges set to the same value.
  pub fn uniform(value: f64) -> Self {
    Self::new(value, value, value, value)
  }

  /// Sum of the left and right edges.
  pub fn horizontal(&self) -> f64 {
    self.left + self.right
  }

  /// Sum of the top and bottom edges.
  pub fn vertical(&self) -> f64 {
    self.top + self.bottom
  }

  /// Leading edge along `axis` (left or top).
  pub fn start(&self, axis: Axis) -> f64 {
    match axis {
      Axis::Horizontal => self.left,
      Axis::Vertical => self.top,
    }
  }

  /// Sum of both edges along `axis`.
  pub fn axis_sum(&self, axis: Axis) -> f64 {
    match axis {
      Axis::Horizontal => self.horizontal(),
      Axis::Vertical => self.vertical(),
    }
  }

  pub fn is_zero(&self) -> bool {
    self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
  }
}

/// A constraint box: per-axis minimum and maximum sizes.
///
/// Layout always returns a size within these bounds. `min > max` is repaired
/// by `max := min` (with a diagnostic) rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
  pub min_width: f64,
  pub max_width: f64,
  pub min_height: f64,
  pub max_height: f64,
}

impl Default for Constraints {
  fn default() -> Self {
    Self::loose(UNBOUNDED, UNBOUNDED)
  }
}

impl Constraints {
  /// All four bounds equal the argument: the result must be exactly `w x h`.
  pub fn tight(width: f64, height: f64) -> Self {
    let width = width.max(0.0);
    let height = height.max(0.0);
    Self {
      min_width: width,
      max_width: width,
      min_height: height,
      max_height: height,
    }
  }

  /// Zero minimums with the given maximums.
  pub fn loose(max_width: f64, max_height: f64) -> Self {
    Self {
      min_width: 0.0,
      max_width: max_width.max(0.0),
      min_height: 0.0,
      max_height: max_height.max(0.0),
    }
  }

  /// Tight in width, loose in height. The common shape handed to block-level
  /// children.
  pub fn tight_width(width: f64) -> Self {
    let width = width.max(0.0);
    Self {
      min_width: width,
      max_width: width,
      min_height: 0.0,
      max_height: UNBOUNDED,
    }
  }

  /// Repairs `min > max` by clamping `max` up to `min`.
  pub fn normalized(mut self) -> Self {
    if self.min_width > self.max_width {
      crate::diag::report(
        crate::diag::DiagnosticKind::DegenerateConstraints,
        format!(
          "min_width {} exceeds max_width {}; clamping",
          self.min_width, self.max_width
        ),
      );
      self.max_width = self.min_width;
    }
    if self.min_height > self.max_height {
      crate::diag::report(
        crate::diag::DiagnosticKind::DegenerateConstraints,
        format!(
          "min_height {} exceeds max_height {}; clamping",
          self.min_height, self.max_height
        ),
      );
      self.max_height = self.min_height;
    }
    self
  }

  /// Clamps `size` into the constraint box.
  pub fn constrain(&self, size: Size) -> Size {
    Size {
      width: size.width.clamp(self.min_width, self.max_width),
      height: size.height.clamp(self.min_height, self.max_height),
    }
  }

  /// The maximum width, if bounded.
  pub fn bounded_width(&self) -> Option<f64> {
    (self.max_width < UNBOUNDED).then_some(self.max_width)
  }

  /// The maximum height, if bounded.
  pub fn bounded_height(&self) -> Option<f64> {
    (self.max_height < UNBOUNDED).then_some(self.max_height)
  }

  /// The maximum along `axis`, if bounded.
  pub fn bounded_axis(&self, axis: Axis) -> Option<f64> {
    match axis {
      Axis::Horizontal => self.bounded_width(),
      Axis::Vertical => self.bounded_height(),
    }
  }

  pub fn contains(&self, size: Size) -> bool {
    size.width >= self.min_width
      && size.width <= self.max_width
      && size.height >= self.min_height
      && size.height <= self.max_height
  }
}

/// Clamps a possibly non-finite value into non-negative finite space.
/// NaN and negative infinities collapse to zero.
pub(crate) fn sanitize(value: f64) -> f64 {
  if value.is_nan() {
    return 0.0;
  }
  if value == f64::INFINITY {
    return UNBOUNDED;
  }
  value.max(0.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn length_resolution() {
    assert_eq!(Length::Px(10.0).resolve(None, 16.0, 16.0), Some(10.0));
    assert_eq!(
      Length::Percent(50.0).resolve(Some(200.0), 16.0, 16.0),
      Some(100.0)
    );
    assert_eq!(Length::Percent(50.0).resolve(None, 16.0, 16.0), None);
    assert_eq!(Length::Em(2.0).resolve(None, 20.0, 16.0), Some(40.0));
    assert_eq!(Length::Rem(2.0).resolve(None, 20.0, 16.0), Some(32.0));
    assert_eq!(Length::Auto.resolve(Some(100.0), 16.0, 16.0), None);
    assert_eq!(Length::MinContent.resolve(Some(100.0), 16.0, 16.0), None);
  }

  #[test]
  fn length_parsing() {
    assert_eq!("100px".parse::<Length>().unwrap(), Length::Px(100.0));
    assert_eq!("100".parse::<Length>().unwrap(), Length::Px(100.0));
    assert_eq!("-1".parse::<Length>().unwrap(), Length::Auto);
    assert_eq!("50%".parse::<Length>().unwrap(), Length::Percent(50.0));
    assert_eq!("1.5em".parse::<Length>().unwrap(), Length::Em(1.5));
    assert_eq!("2rem".parse::<Length>().unwrap(), Length::Rem(2.0));
    assert_eq!("auto".parse::<Length>().unwrap(), Length::Auto);
    assert_eq!(
      "fit-content(240px)".parse::<Length>().unwrap(),
      Length::FitContent(240.0)
    );
    assert!("12parsecs".parse::<Length>().is_err());
  }

  #[test]
  fn length_wire_format() {
    assert_eq!(serde_json::to_string(&Length::Px(12.0)).unwrap(), "12.0");
    assert_eq!(serde_json::to_string(&Length::Auto).unwrap(), "-1.0");
    assert_eq!(
      serde_json::to_string(&Length::Percent(25.0)).unwrap(),
      "\"25%\""
    );
    let round: Length = serde_json::from_str("\"min-content\"").unwrap();
    assert_eq!(round, Length::MinContent);
    let auto: Length = serde_json::from_str("-1").unwrap();
    assert_eq!(auto, Length::Auto);
  }

  #[test]
  fn constraints_constructors() {
    let tight = Constraints::tight(100.0, 50.0);
    assert_eq!(tight.min_width, 100.0);
    assert_eq!(tight.max_width, 100.0);
    let loose = Constraints::loose(100.0, 50.0);
    assert_eq!(loose.min_width, 0.0);
    assert_eq!(loose.max_height, 50.0);
  }

  #[test]
  fn degenerate_constraints_repair() {
    let fixed = Constraints {
      min_width: 100.0,
      max_width: 50.0,
      min_height: 0.0,
      max_height: 10.0,
    }
    .normalized();
    assert_eq!(fixed.max_width, 100.0);
    assert!(fixed.contains(fixed.constrain(Size::new(500.0, 500.0))));
  }

  #[test]
  fn spacing_sums() {
    let spacing = Spacing::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(spacing.horizontal(), 6.0);
    assert_eq!(spacing.vertical(), 4.0);
    assert_eq!(Spacing::uniform(2.0).horizontal(), 4.0);
  }

  #[test]
  fn sanitize_non_finite() {
    assert_eq!(sanitize(f64::NAN), 0.0);
    assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
    assert_eq!(sanitize(f64::INFINITY), UNBOUNDED);
    assert_eq!(sanitize(-5.0), 0.0);
    assert_eq!(sanitize(5.0), 5.0);
  }
}
