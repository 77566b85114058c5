//! Diagnostic channel for repaired input.
//!
//! The engine never raises for geometric conditions; when it repairs
//! something (an invalid repeat pattern, inverted constraints, a non-finite
//! measurement) it reports the repair here. The default sink forwards to
//! `tracing`; tests and embedders can install their own sink to capture the
//! events.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

/// Category of a repaired-input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// An `auto-fill`/`auto-fit` repeat pattern containing non-fixed tracks.
  InvalidRepeat,
  /// A constraint box with `min > max` on some axis.
  DegenerateConstraints,
  /// A measure callback returned a non-finite or negative metric.
  NonFiniteMeasure,
  /// A grid placement that had to be repaired (negative or inverted lines).
  InvalidPlacement,
}

/// A single repaired-input event.
#[derive(Debug, Clone)]
pub struct Diagnostic {
  pub kind: DiagnosticKind,
  pub message: String,
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink: Send + Sync {
  fn report(&self, diagnostic: &Diagnostic);
}

static SINK: Lazy<RwLock<Option<Arc<dyn DiagnosticSink>>>> = Lazy::new(|| RwLock::new(None));

/// Installs a sink for diagnostic events, replacing any previous one.
///
/// Passing `None` restores the default behavior (forwarding to `tracing`).
pub fn set_sink(sink: Option<Arc<dyn DiagnosticSink>>) {
  if let Ok(mut slot) = SINK.write() {
    *slot = sink;
  }
}

pub(crate) fn report(kind: DiagnosticKind, message: impl Into<String>) {
  let diagnostic = Diagnostic {
    kind,
    message: message.into(),
  };
  if let Ok(slot) = SINK.read() {
    if let Some(sink) = slot.as_ref() {
      sink.report(&diagnostic);
      return;
    }
  }
  tracing::warn!(kind = ?diagnostic.kind, "{}", diagnostic.message);
}
