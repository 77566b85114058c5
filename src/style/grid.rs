//! Grid track definitions and the CSS-like track template grammar.
//!
//! A template is a sequence of tracks and `repeat(...)` groups:
//! `"100px 1fr repeat(2, 50px auto)"`, `"repeat(auto-fill, 100px)"`.
//! `auto-fill`/`auto-fit` patterns may contain only fixed-size tracks;
//! the layout phase drops violating repeats with a diagnostic.

use crate::error::{LayoutError, Result};
use crate::geometry::UNBOUNDED;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single grid track (row or column) definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridTrack {
  /// Fixed size in pixels.
  Fixed(f64),
  /// Fractional unit (`fr`): a share of the leftover space.
  Flex(f64),
  /// Content-sized, growing to fill leftover space up to its max-content.
  Auto,
  /// Sized to the smallest content size that avoids overflow.
  MinContent,
  /// Sized as if content never wrapped.
  MaxContent,
  /// Content-sized, capped at the given pixel value.
  FitContent(f64),
}

impl Default for GridTrack {
  fn default() -> Self {
    GridTrack::Auto
  }
}

impl GridTrack {
  /// Parses a track from its CSS spelling (`"1fr"`, `"100px"`, `"auto"`,
  /// `"min-content"`, `"fit-content(200px)"`, bare numbers are pixels).
  pub fn parse(input: &str) -> Option<Self> {
    let input = input.trim();

    match input {
      "auto" => return Some(GridTrack::Auto),
      "min-content" => return Some(GridTrack::MinContent),
      "max-content" => return Some(GridTrack::MaxContent),
      _ => {}
    }

    if let Some(inner) = input
      .strip_prefix("fit-content(")
      .and_then(|rest| rest.strip_suffix(')'))
    {
      let cap = inner.trim().trim_end_matches("px").trim();
      return cap.parse::<f64>().ok().map(GridTrack::FitContent);
    }

    if let Some(value) = input.strip_suffix("fr") {
      return value.parse::<f64>().ok().map(GridTrack::Flex);
    }

    let value = input.strip_suffix("px").unwrap_or(input);
    value.parse::<f64>().ok().map(GridTrack::Fixed)
  }

  /// The minimum size of the track in the `{min_size, max_size, fraction}`
  /// encoding: the fixed size, or 0 for everything content- or
  /// fraction-based.
  pub fn min_size(&self) -> f64 {
    match *self {
      GridTrack::Fixed(size) => size,
      _ => 0.0,
    }
  }

  /// The maximum size in the encoding: the fixed size, the fit-content cap,
  /// or [`UNBOUNDED`].
  pub fn max_size(&self) -> f64 {
    match *self {
      GridTrack::Fixed(size) => size,
      GridTrack::FitContent(cap) => cap,
      _ => UNBOUNDED,
    }
  }

  /// The `fr` value, or 0 for non-flexible tracks.
  pub fn fraction(&self) -> f64 {
    match *self {
      GridTrack::Flex(fraction) => fraction,
      _ => 0.0,
    }
  }

  pub fn is_fixed(&self) -> bool {
    matches!(self, GridTrack::Fixed(_))
  }

  pub fn is_flexible(&self) -> bool {
    matches!(self, GridTrack::Flex(_))
  }

  /// True for tracks whose size depends on the content placed in them.
  pub fn is_content_sized(&self) -> bool {
    matches!(
      self,
      GridTrack::Auto | GridTrack::MinContent | GridTrack::MaxContent | GridTrack::FitContent(_)
    )
  }
}

impl fmt::Display for GridTrack {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      GridTrack::Fixed(size) => write!(f, "{size}px"),
      GridTrack::Flex(fraction) => write!(f, "{fraction}fr"),
      GridTrack::Auto => write!(f, "auto"),
      GridTrack::MinContent => write!(f, "min-content"),
      GridTrack::MaxContent => write!(f, "max-content"),
      GridTrack::FitContent(cap) => write!(f, "fit-content({cap}px)"),
    }
  }
}

// Wire format: `{minSize, maxSize, fraction}` per the track encoding, with a
// `kind` discriminator for the content-sized variants the three numbers
// cannot distinguish on their own.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GridTrackRepr {
  min_size: f64,
  max_size: f64,
  fraction: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  kind: Option<String>,
}

impl Serialize for GridTrack {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let kind = match self {
      GridTrack::Fixed(_) | GridTrack::Flex(_) => None,
      GridTrack::Auto => Some("auto"),
      GridTrack::MinContent => Some("min-content"),
      GridTrack::MaxContent => Some("max-content"),
      GridTrack::FitContent(_) => Some("fit-content"),
    };
    GridTrackRepr {
      min_size: self.min_size(),
      max_size: self.max_size(),
      fraction: self.fraction(),
      kind: kind.map(str::to_string),
    }
    .serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for GridTrack {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let repr = GridTrackRepr::deserialize(deserializer)?;
    let track = match repr.kind.as_deref() {
      Some("auto") => GridTrack::Auto,
      Some("min-content") => GridTrack::MinContent,
      Some("max-content") => GridTrack::MaxContent,
      Some("fit-content") => GridTrack::FitContent(repr.max_size),
      Some(other) => {
        return Err(serde::de::Error::custom(format!(
          "unknown track kind: {other}"
        )))
      }
      None if repr.fraction > 0.0 => GridTrack::Flex(repr.fraction),
      None if repr.max_size >= UNBOUNDED => GridTrack::Auto,
      None => GridTrack::Fixed(repr.min_size),
    };
    Ok(track)
  }
}

/// Repeat count for a `repeat(...)` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
  /// Fixed positive repetition count.
  Count(usize),
  /// As many repetitions as fit; empty tracks are kept.
  AutoFill,
  /// As many repetitions as fit; empty tracks collapse to zero.
  AutoFit,
}

impl Serialize for RepeatCount {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match *self {
      RepeatCount::Count(count) => serializer.serialize_u64(count as u64),
      RepeatCount::AutoFill => serializer.serialize_str("auto-fill"),
      RepeatCount::AutoFit => serializer.serialize_str("auto-fit"),
    }
  }
}

impl<'de> Deserialize<'de> for RepeatCount {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    struct CountVisitor;

    impl serde::de::Visitor<'_> for CountVisitor {
      type Value = RepeatCount;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a repetition count, \"auto-fill\" or \"auto-fit\"")
      }

      fn visit_u64<E: serde::de::Error>(self, value: u64) -> std::result::Result<RepeatCount, E> {
        Ok(RepeatCount::Count(value as usize))
      }

      fn visit_i64<E: serde::de::Error>(self, value: i64) -> std::result::Result<RepeatCount, E> {
        Ok(RepeatCount::Count(value.max(0) as usize))
      }

      fn visit_str<E: serde::de::Error>(self, value: &str) -> std::result::Result<RepeatCount, E> {
        match value {
          "auto-fill" => Ok(RepeatCount::AutoFill),
          "auto-fit" => Ok(RepeatCount::AutoFit),
          other => Err(serde::de::Error::custom(format!(
            "unknown repeat count: {other}"
          ))),
        }
      }
    }

    deserializer.deserialize_any(CountVisitor)
  }
}

/// A `repeat(count, tracks...)` group in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepeatTrack {
  pub count: RepeatCount,
  pub tracks: Vec<GridTrack>,
}

impl RepeatTrack {
  pub fn new(count: RepeatCount, tracks: Vec<GridTrack>) -> Self {
    Self { count, tracks }
  }

  /// Auto-fill/auto-fit patterns may contain only fixed-size tracks.
  pub fn is_valid(&self) -> bool {
    match self.count {
      RepeatCount::Count(_) => true,
      RepeatCount::AutoFill | RepeatCount::AutoFit => {
        self.tracks.iter().all(GridTrack::is_fixed)
      }
    }
  }
}

/// One entry of a track template: a plain track or a repeat group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackListComponent {
  Repeat(RepeatTrack),
  Track(GridTrack),
}

impl From<GridTrack> for TrackListComponent {
  fn from(track: GridTrack) -> Self {
    TrackListComponent::Track(track)
  }
}

impl From<RepeatTrack> for TrackListComponent {
  fn from(repeat: RepeatTrack) -> Self {
    TrackListComponent::Repeat(repeat)
  }
}

/// Parses a template string like `"1fr 100px repeat(3, 1fr)"`.
pub fn parse_template(template: &str) -> Result<Vec<TrackListComponent>> {
  let mut components = Vec::new();
  for token in split_template(template)? {
    if let Some(inner) = token
      .strip_prefix("repeat(")
      .and_then(|rest| rest.strip_suffix(')'))
    {
      components.push(TrackListComponent::Repeat(parse_repeat(inner)?));
    } else {
      let track = GridTrack::parse(&token)
        .ok_or_else(|| LayoutError::template(format!("unrecognized track: {token}")))?;
      components.push(TrackListComponent::Track(track));
    }
  }
  Ok(components)
}

fn parse_repeat(inner: &str) -> Result<RepeatTrack> {
  let (count_str, pattern) = inner
    .split_once(',')
    .ok_or_else(|| LayoutError::template(format!("repeat() needs a count and tracks: {inner}")))?;

  let count = match count_str.trim() {
    "auto-fill" => RepeatCount::AutoFill,
    "auto-fit" => RepeatCount::AutoFit,
    n => RepeatCount::Count(
      n.parse::<usize>()
        .map_err(|_| LayoutError::template(format!("invalid repeat count: {n}")))?,
    ),
  };

  let mut tracks = Vec::new();
  for token in split_template(pattern)? {
    let track = GridTrack::parse(&token)
      .ok_or_else(|| LayoutError::template(format!("unrecognized track: {token}")))?;
    tracks.push(track);
  }

  Ok(RepeatTrack::new(count, tracks))
}

/// Splits on top-level whitespace, keeping parenthesized groups together.
fn split_template(template: &str) -> Result<Vec<String>> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut depth = 0usize;

  for ch in template.chars() {
    match ch {
      '(' => {
        depth += 1;
        current.push(ch);
      }
      ')' => {
        depth = depth
          .checked_sub(1)
          .ok_or_else(|| LayoutError::template(format!("unbalanced parentheses: {template}")))?;
        current.push(ch);
      }
      c if c.is_whitespace() && depth == 0 => {
        if !current.is_empty() {
          tokens.push(std::mem::take(&mut current));
        }
      }
      c => current.push(c),
    }
  }

  if depth != 0 {
    return Err(LayoutError::template(format!(
      "unbalanced parentheses: {template}"
    )));
  }
  if !current.is_empty() {
    tokens.push(current);
  }
  Ok(tokens)
}
