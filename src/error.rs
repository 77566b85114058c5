//! # Error Handling
//!
//! Error types for the fallible surfaces of the crate.
//!
//! Layout itself never fails: geometric degeneracies (negative sizes,
//! inverted constraints, non-finite measurements) are repaired in place and
//! reported through the [diagnostic sink](crate::diag). [`LayoutError`] covers
//! the surfaces that can genuinely reject input: the JSON/YAML tree codec and
//! the track template parser.
//!
//! ## Examples
//!
//! ```rust
//! use boxflow::error::Result;
//!
//! fn parse_columns(template: &str) -> Result<()> {
//!     boxflow::style::parse_template(template)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Type alias for `Result<T, LayoutError>` used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors produced by the serialization layer and template parsing.
///
/// The layout entry points themselves are infallible; see the crate-level
/// documentation for the repair policy applied to degenerate geometry.
#[derive(Error, Debug)]
pub enum LayoutError {
  /// Malformed JSON while encoding or decoding a node tree.
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  /// Malformed YAML while encoding or decoding a node tree.
  #[error("YAML error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  /// A grid track template string that could not be parsed.
  ///
  /// Produced by [`parse_template`](crate::style::parse_template) for inputs
  /// like an unclosed `repeat(` or an unrecognized track keyword.
  #[error("invalid track template: {0}")]
  InvalidTemplate(String),

  /// File system failures when reading or writing serialized trees.
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl LayoutError {
  /// Creates a new template error with the provided message.
  pub fn template<S: Into<String>>(msg: S) -> Self {
    Self::InvalidTemplate(msg.into())
  }
}
