//! Text measurement callback.
//!
//! The engine never inspects text itself. Leaf nodes carrying text are
//! measured through the [`Measure`] trait supplied on the
//! [`LayoutContext`](crate::layout::LayoutContext); the engine treats the
//! callback as a black box and sanitizes non-finite metrics it returns.

use crate::geometry::UNBOUNDED;
use crate::style::Style;

/// Metrics returned by a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
  pub width: f64,
  pub height: f64,
  /// Distance from the top of the text box to the first baseline.
  pub baseline: f64,
  pub lines: u32,
}

/// Measures a run of text under a width limit.
///
/// `available_width` is the wrapping limit; pass [`UNBOUNDED`] for
/// max-content measurement and `0.0` for min-content.
pub trait Measure {
  fn measure(&self, text: &str, style: &Style, available_width: f64) -> TextMetrics;
}

/// Stub measurer returning all zeros. The default when a context carries no
/// text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMeasure;

impl Measure for NoopMeasure {
  fn measure(&self, _text: &str, _style: &Style, _available_width: f64) -> TextMetrics {
    TextMetrics::default()
  }
}

pub(crate) static NOOP_MEASURE: NoopMeasure = NoopMeasure;

/// Monospace approximation: every glyph advances by a fixed fraction of the
/// font size. Good enough for tests and demos; real consumers plug in a font
/// shaper.
#[derive(Debug, Clone, Copy)]
pub struct FixedGlyphMeasure {
  /// Glyph advance as a fraction of the font size.
  pub advance_ratio: f64,
  /// Line height as a fraction of the font size.
  pub line_height_ratio: f64,
  /// Baseline position as a fraction of the line height.
  pub ascent_ratio: f64,
}

impl Default for FixedGlyphMeasure {
  fn default() -> Self {
    Self {
      advance_ratio: 0.5,
      line_height_ratio: 1.2,
      ascent_ratio: 0.8,
    }
  }
}

impl Measure for FixedGlyphMeasure {
  fn measure(&self, text: &str, style: &Style, available_width: f64) -> TextMetrics {
    if text.is_empty() {
      return TextMetrics::default();
    }

    let glyph = self.advance_ratio * style.font_size;
    let line_height = self.line_height_ratio * style.font_size;
    let word_width = |word: &str| word.chars().count() as f64 * glyph;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
      return TextMetrics::default();
    }

    // Min-content: the widest word. An available width of zero (or anything
    // narrower than every word) degenerates to one word per line.
    let limit = if available_width.is_finite() && available_width > 0.0 {
      available_width
    } else if available_width <= 0.0 {
      0.0
    } else {
      UNBOUNDED
    };

    let mut lines = 1u32;
    let mut current = 0.0;
    let mut widest = 0.0f64;
    for word in &words {
      let width = word_width(word);
      let with_word = if current == 0.0 {
        width
      } else {
        current + glyph + width
      };
      if with_word > limit && current > 0.0 {
        widest = widest.max(current);
        lines += 1;
        current = width;
      } else {
        current = with_word;
      }
    }
    widest = widest.max(current);

    TextMetrics {
      width: widest,
      height: lines as f64 * line_height,
      baseline: self.ascent_ratio * line_height,
      lines,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn noop_returns_zeros() {
    let metrics = NoopMeasure.measure("hello", &Style::default(), 100.0);
    assert_eq!(metrics, TextMetrics::default());
  }

  #[test]
  fn fixed_glyph_single_line() {
    let measure = FixedGlyphMeasure::default();
    let style = Style::default(); // font_size 16 -> 8px glyphs
    let metrics = measure.measure("abcd", &style, UNBOUNDED);
    assert_eq!(metrics.width, 32.0);
    assert_eq!(metrics.lines, 1);
    assert!((metrics.height - 19.2).abs() < 1e-9);
  }

  #[test]
  fn fixed_glyph_wraps_words() {
    let measure = FixedGlyphMeasure::default();
    let style = Style::default();
    // "aaaa bbbb" at 8px glyphs: each word 32px, joined 72px.
    let unwrapped = measure.measure("aaaa bbbb", &style, UNBOUNDED);
    assert_eq!(unwrapped.lines, 1);
    assert_eq!(unwrapped.width, 72.0);

    let wrapped = measure.measure("aaaa bbbb", &style, 40.0);
    assert_eq!(wrapped.lines, 2);
    assert_eq!(wrapped.width, 32.0);

    // Min-content: the widest word.
    let min = measure.measure("aaaa bbbb", &style, 0.0);
    assert_eq!(min.width, 32.0);
    assert_eq!(min.lines, 2);
  }
}
