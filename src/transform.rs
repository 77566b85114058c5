//! 2D affine transforms.
//!
//! Transforms compose as 2x3 matrices in the column-major `{a, b, c, d, e, f}`
//! convention:
//!
//! ```text
//! | a c e |   | x |
//! | b d f | * | y |
//! | 0 0 1 |   | 1 |
//! ```
//!
//! They affect rendering only: layout rects used for flow are never altered
//! by a transform.

use serde::{Deserialize, Serialize};

/// A 2D affine transform. Identity is `{1, 0, 0, 1, 0, 0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
  pub a: f64,
  pub b: f64,
  pub c: f64,
  pub d: f64,
  pub e: f64,
  pub f: f64,
}

impl Default for Transform2D {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl Transform2D {
  pub const IDENTITY: Transform2D = Transform2D {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
    Self { a, b, c, d, e, f }
  }

  pub fn translate(x: f64, y: f64) -> Self {
    Self::new(1.0, 0.0, 0.0, 1.0, x, y)
  }

  pub fn scale(sx: f64, sy: f64) -> Self {
    Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
  }

  /// Rotation by `angle` radians, counter-clockwise.
  pub fn rotate(angle: f64) -> Self {
    let (sin, cos) = angle.sin_cos();
    Self::new(cos, sin, -sin, cos, 0.0, 0.0)
  }

  /// Matrix product `self * other`: `other` applies first, then `self`.
  pub fn multiply(&self, other: &Transform2D) -> Self {
    Self {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      e: self.a * other.e + self.c * other.f + self.e,
      f: self.b * other.e + self.d * other.f + self.f,
    }
  }

  /// Applies the transform to a point.
  pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
    (
      self.a * x + self.c * y + self.e,
      self.b * x + self.d * y + self.f,
    )
  }

  pub fn is_identity(&self) -> bool {
    *self == Self::IDENTITY
  }
}
