//! Grid layout.
//!
//! Phases: template expansion (repeat splicing, auto-fill/auto-fit counts),
//! row-major auto-placement over an occupancy map with implicit track
//! growth, per-axis track sizing (columns first), gutter accounting, then
//! cell alignment and item layout. Auto-fit tracks holding no items collapse
//! to zero together with their surrounding gaps.

use super::intrinsic::{self, IntrinsicKind};
use super::{flow_layout, in_flow, resolve_box, zero_subtree, LayoutContext};
use crate::diag::{self, DiagnosticKind};
use crate::geometry::{Axis, Constraints, Size, UNBOUNDED};
use crate::node::Node;
use crate::style::{AlignItems, Display, GridTrack, JustifyItems, RepeatCount, TrackListComponent};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
struct TrackDef {
  track: GridTrack,
  from_auto_fit: bool,
}

#[derive(Debug, Clone, Copy)]
struct TrackState {
  def: GridTrack,
  from_auto_fit: bool,
  collapsed: bool,
  /// Base size: the track's current size.
  base: f64,
  /// Growth limit used by track maximization. Content-based (finite) for
  /// intrinsic tracks, the cap for fit-content, zero for flex tracks (they
  /// are expanded separately).
  limit: f64,
}

impl TrackState {
  fn new(def: TrackDef) -> Self {
    let (base, limit) = match def.track {
      GridTrack::Fixed(size) => (size.max(0.0), size.max(0.0)),
      _ => (0.0, 0.0),
    };
    Self {
      def: def.track,
      from_auto_fit: def.from_auto_fit,
      collapsed: false,
      base,
      limit,
    }
  }

  /// The track's max-content size for intrinsic queries.
  fn max_size(&self) -> f64 {
    self.base.max(self.limit)
  }
}

#[derive(Debug, Clone, Copy)]
struct GridItem {
  index: usize,
  col_start: usize,
  col_end: usize,
  row_start: usize,
  row_end: usize,
}

impl GridItem {
  fn span(&self, axis: Axis) -> (usize, usize) {
    match axis {
      Axis::Horizontal => (self.col_start, self.col_end),
      Axis::Vertical => (self.row_start, self.row_end),
    }
  }
}

/// Lays out `node` as a grid container. Returns the border-box size.
pub fn layout_grid(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
  let constraints = constraints.normalized();
  let metrics = resolve_box(
    node,
    constraints.bounded_width(),
    constraints.bounded_height(),
    ctx,
  );

  let definite_width = metrics
    .width
    .or_else(|| {
      (constraints.min_width == constraints.max_width && constraints.max_width < UNBOUNDED)
        .then_some(constraints.max_width)
    })
    .or_else(|| constraints.bounded_width())
    .map(|w| metrics.clamp_width(w));
  let definite_height = metrics
    .height
    .or_else(|| {
      (constraints.min_height == constraints.max_height && constraints.max_height < UNBOUNDED)
        .then_some(constraints.max_height)
    })
    .map(|h| metrics.clamp_height(h));

  let avail_w = definite_width.map(|w| (w - metrics.padding_border_horizontal()).max(0.0));
  let avail_h = definite_height.map(|h| (h - metrics.padding_border_vertical()).max(0.0));

  let column_gap = node.style.column_gap();
  let row_gap = node.style.row_gap();

  for child in &mut node.children {
    if child.style.display == Display::None {
      zero_subtree(child);
    }
  }

  // Phase 1: template expansion.
  let column_defs = expand_template(&node.style.grid_template_columns, avail_w, column_gap);
  let row_defs = expand_template(&node.style.grid_template_rows, avail_h, row_gap);

  // Phase 2: item placement with implicit track growth.
  let (items, n_cols, n_rows) = place_items(node, column_defs.len(), row_defs.len());

  let mut columns = build_tracks(&column_defs, n_cols, node.style.grid_auto_columns);
  let mut rows = build_tracks(&row_defs, n_rows, node.style.grid_auto_rows);

  collapse_empty_auto_fit(&mut columns, &items, Axis::Horizontal);
  collapse_empty_auto_fit(&mut rows, &items, Axis::Vertical);

  // Phase 3: track sizing, columns first.
  size_tracks(&mut columns, &items, node, Axis::Horizontal, avail_w, column_gap, ctx);
  size_tracks(&mut rows, &items, node, Axis::Vertical, avail_h, row_gap, ctx);

  // Phase 4: gutter accounting.
  let (col_offsets, content_width) = track_offsets(&columns, column_gap);
  let (row_offsets, content_height) = track_offsets(&rows, row_gap);

  // Phase 5: item placement and sizing inside cells.
  let (origin_x, origin_y) = metrics.content_origin();
  let justify_items = node.style.justify_items;
  let align_items = node.style.align_items;
  for item in &items {
    let cell_x = col_offsets[item.col_start];
    let cell_w = span_size(&columns, &col_offsets, item.col_start, item.col_end);
    let cell_y = row_offsets[item.row_start];
    let cell_h = span_size(&rows, &row_offsets, item.row_start, item.row_end);

    let child = &node.children[item.index];
    let cm = resolve_box(child, Some(cell_w), Some(cell_h), ctx);
    let inner_w = (cell_w - cm.margin.horizontal()).max(0.0);
    let inner_h = (cell_h - cm.margin.vertical()).max(0.0);

    let width = match (justify_items, cm.width) {
      (_, Some(explicit)) => cm.clamp_width(explicit),
      (JustifyItems::Stretch, None) => cm.clamp_width(inner_w),
      (_, None) => {
        cm.clamp_width(intrinsic::max_content(child, Axis::Horizontal, ctx).min(inner_w))
      }
    };
    let height = match (align_items, cm.height) {
      (_, Some(explicit)) => cm.clamp_height(explicit),
      (AlignItems::Stretch, None) => cm.clamp_height(inner_h),
      (_, None) => {
        cm.clamp_height(intrinsic::max_content(child, Axis::Vertical, ctx).min(inner_h))
      }
    };

    let offset_x = match justify_items {
      JustifyItems::Stretch | JustifyItems::Start => 0.0,
      JustifyItems::Center => (inner_w - width) / 2.0,
      JustifyItems::End => inner_w - width,
    };
    let offset_y = match align_items {
      AlignItems::Stretch | AlignItems::FlexStart | AlignItems::Baseline => 0.0,
      AlignItems::Center => (inner_h - height) / 2.0,
      AlignItems::FlexEnd => inner_h - height,
    };

    let child = &mut node.children[item.index];
    flow_layout(child, Constraints::tight(width, height), ctx);
    child.rect.x = origin_x + cell_x + cm.margin.left + offset_x;
    child.rect.y = origin_y + cell_y + cm.margin.top + offset_y;
  }

  // Container sizing: explicit wins, else the track sum.
  let width = definite_width.unwrap_or(content_width + metrics.padding_border_horizontal());
  let height = definite_height.unwrap_or(content_height + metrics.padding_border_vertical());
  let size = constraints.constrain(Size::new(
    metrics.clamp_width(width),
    metrics.clamp_height(height),
  ));
  node.rect.width = size.width;
  node.rect.height = size.height;
  size
}

/// Track base/limit sums for intrinsic container queries.
pub(crate) fn intrinsic_content(
  node: &Node,
  axis: Axis,
  kind: IntrinsicKind,
  ctx: &LayoutContext,
) -> f64 {
  let (gap, template, auto_track) = match axis {
    Axis::Horizontal => (
      node.style.column_gap(),
      &node.style.grid_template_columns,
      node.style.grid_auto_columns,
    ),
    Axis::Vertical => (
      node.style.row_gap(),
      &node.style.grid_template_rows,
      node.style.grid_auto_rows,
    ),
  };

  let defs = expand_template(template, None, gap);
  let column_count = match axis {
    Axis::Horizontal => defs.len(),
    Axis::Vertical => expand_template(&node.style.grid_template_columns, None, node.style.column_gap()).len(),
  };
  let row_count = match axis {
    Axis::Horizontal => expand_template(&node.style.grid_template_rows, None, node.style.row_gap()).len(),
    Axis::Vertical => defs.len(),
  };
  let (items, n_cols, n_rows) = place_items(node, column_count, row_count);
  let count = match axis {
    Axis::Horizontal => n_cols,
    Axis::Vertical => n_rows,
  };

  let mut tracks = build_tracks(&defs, count, auto_track);
  collapse_empty_auto_fit(&mut tracks, &items, axis);
  size_tracks(&mut tracks, &items, node, axis, None, gap, ctx);

  let visible = tracks.iter().filter(|t| !t.collapsed).count();
  let gaps = gap * visible.saturating_sub(1) as f64;
  let sum: f64 = tracks
    .iter()
    .map(|t| match kind {
      IntrinsicKind::Min => t.base,
      IntrinsicKind::Max => t.max_size(),
    })
    .sum();
  sum + gaps
}

/// Expands a template into a flat track list, splicing `repeat(...)` groups.
fn expand_template(
  template: &[TrackListComponent],
  available: Option<f64>,
  gap: f64,
) -> Vec<TrackDef> {
  let mut tracks = Vec::new();
  for component in template {
    match component {
      TrackListComponent::Track(track) => tracks.push(TrackDef {
        track: *track,
        from_auto_fit: false,
      }),
      TrackListComponent::Repeat(repeat) => {
        if !repeat.is_valid() {
          diag::report(
            DiagnosticKind::InvalidRepeat,
            "auto repeat pattern with non-fixed tracks; repeat dropped",
          );
          continue;
        }
        match repeat.count {
          RepeatCount::Count(count) => {
            for _ in 0..count {
              for track in &repeat.tracks {
                tracks.push(TrackDef {
                  track: *track,
                  from_auto_fit: false,
                });
              }
            }
          }
          RepeatCount::AutoFill | RepeatCount::AutoFit => {
            if repeat.tracks.is_empty() {
              continue;
            }
            let pattern_size: f64 = repeat.tracks.iter().map(GridTrack::min_size).sum::<f64>()
              + gap * (repeat.tracks.len() - 1) as f64;
            let count = match available {
              Some(avail) if pattern_size + gap > 0.0 => {
                (((avail + gap) / (pattern_size + gap)).floor() as usize).max(1)
              }
              _ => 1,
            };
            let from_auto_fit = repeat.count == RepeatCount::AutoFit;
            for _ in 0..count {
              for track in &repeat.tracks {
                tracks.push(TrackDef {
                  track: *track,
                  from_auto_fit,
                });
              }
            }
          }
        }
      }
    }
  }
  tracks
}

/// Resolves one axis of placement lines into `(start, span)`.
/// Lines are 1-based with 0 meaning auto; end lines are exclusive.
fn lines_to_span(start: i32, end: i32) -> (Option<usize>, usize) {
  if start < 0 || end < 0 {
    diag::report(
      DiagnosticKind::InvalidPlacement,
      format!("negative grid line ({start}/{end}); treating as auto"),
    );
    return (None, 1);
  }
  if start > 0 {
    let span = if end > start { (end - start) as usize } else { 1 };
    if end > 0 && end <= start {
      diag::report(
        DiagnosticKind::InvalidPlacement,
        format!("grid end line {end} not after start {start}; span forced to 1"),
      );
    }
    (Some((start - 1) as usize), span)
  } else if end > 1 {
    // End-only: span one track finishing just before the end line.
    (Some((end - 2) as usize), 1)
  } else {
    (None, 1)
  }
}

/// Phase 2: row-major auto-placement into the first available cell, growing
/// implicit tracks as needed. Explicitly placed items may overlap; placement
/// never fails.
fn place_items(node: &Node, explicit_cols: usize, explicit_rows: usize) -> (Vec<GridItem>, usize, usize) {
  let flow_columns = explicit_cols.max(1);
  let mut occupied: HashSet<(usize, usize)> = HashSet::new();
  let mut items = Vec::new();
  let mut cursor_row = 0usize;
  let mut cursor_col = 0usize;
  let mut n_cols = explicit_cols;
  let mut n_rows = explicit_rows;

  for (index, child) in node.children.iter().enumerate() {
    if !in_flow(&child.style) {
      continue;
    }
    let style = &child.style;
    let (col_start, col_span) = lines_to_span(style.grid_column_start, style.grid_column_end);
    let (row_start, row_span) = lines_to_span(style.grid_row_start, style.grid_row_end);

    let (col, row) = match (col_start, row_start) {
      (Some(col), Some(row)) => (col, row),
      (Some(col), None) => {
        let row = first_free_row(&occupied, col, col_span, row_span);
        (col, row)
      }
      (None, Some(row)) => {
        let col = first_free_col(&occupied, row, row_span, col_span);
        (col, row)
      }
      (None, None) => {
        let (col, row) = next_auto_cell(
          &occupied,
          cursor_row,
          cursor_col,
          col_span,
          row_span,
          flow_columns,
        );
        cursor_col = col + col_span;
        cursor_row = row;
        if cursor_col >= flow_columns {
          cursor_col = 0;
          cursor_row = row + 1;
        }
        (col, row)
      }
    };

    let item = GridItem {
      index,
      col_start: col,
      col_end: col + col_span,
      row_start: row,
      row_end: row + row_span,
    };
    for r in item.row_start..item.row_end {
      for c in item.col_start..item.col_end {
        occupied.insert((c, r));
      }
    }
    n_cols = n_cols.max(item.col_end);
    n_rows = n_rows.max(item.row_end);
    items.push(item);
  }

  (items, n_cols, n_rows)
}

fn area_free(
  occupied: &HashSet<(usize, usize)>,
  col: usize,
  row: usize,
  col_span: usize,
  row_span: usize,
) -> bool {
  (row..row + row_span).all(|r| (col..col + col_span).all(|c| !occupied.contains(&(c, r))))
}

fn first_free_row(
  occupied: &HashSet<(usize, usize)>,
  col: usize,
  col_span: usize,
  row_span: usize,
) -> usize {
  (0..)
    .find(|&row| area_free(occupied, col, row, col_span, row_span))
    .unwrap_or(0)
}

fn first_free_col(
  occupied: &HashSet<(usize, usize)>,
  row: usize,
  row_span: usize,
  col_span: usize,
) -> usize {
  (0..)
    .find(|&col| area_free(occupied, col, row, col_span, row_span))
    .unwrap_or(0)
}

fn next_auto_cell(
  occupied: &HashSet<(usize, usize)>,
  start_row: usize,
  start_col: usize,
  col_span: usize,
  row_span: usize,
  columns: usize,
) -> (usize, usize) {
  let mut row = start_row;
  let mut col = start_col;
  loop {
    // Wide items that cannot fit in the explicit columns overflow to the
    // right on their own row.
    let fits_row = col + col_span <= columns || col_span > columns;
    if fits_row && area_free(occupied, col, row, col_span, row_span) {
      return (col, row);
    }
    col += 1;
    if col + col_span > columns {
      col = 0;
      row += 1;
    }
  }
}

fn build_tracks(defs: &[TrackDef], count: usize, auto_track: GridTrack) -> Vec<TrackState> {
  let mut tracks: Vec<TrackState> = defs.iter().map(|def| TrackState::new(*def)).collect();
  while tracks.len() < count {
    tracks.push(TrackState::new(TrackDef {
      track: auto_track,
      from_auto_fit: false,
    }));
  }
  tracks
}

/// Phase 3f: auto-fit tracks intersecting no item collapse to zero.
fn collapse_empty_auto_fit(tracks: &mut [TrackState], items: &[GridItem], axis: Axis) {
  for (index, track) in tracks.iter_mut().enumerate() {
    if !track.from_auto_fit {
      continue;
    }
    let occupied = items.iter().any(|item| {
      let (start, end) = item.span(axis);
      index >= start && index < end
    });
    if !occupied {
      track.collapsed = true;
      track.base = 0.0;
      track.limit = 0.0;
    }
  }
}

/// Phase 3: the track sizing algorithm for one axis.
fn size_tracks(
  tracks: &mut [TrackState],
  items: &[GridItem],
  node: &Node,
  axis: Axis,
  available: Option<f64>,
  gap: f64,
  ctx: &LayoutContext,
) {
  if tracks.is_empty() {
    return;
  }

  // Steps a-c: content contributions into bases and growth limits.
  // Single-track items first, then spanning items in span order; within a
  // round, earlier tracks receive any rounding leftover first.
  let mut spanning: Vec<&GridItem> = Vec::new();
  for item in items {
    let (start, end) = item.span(axis);
    if end - start <= 1 {
      let track = &mut tracks[start.min(tracks.len() - 1)];
      if track.collapsed || !track.def.is_content_sized() && !track.def.is_flexible() {
        continue;
      }
      let child = &node.children[item.index];
      let min = intrinsic::outer_contribution(child, axis, IntrinsicKind::Min, ctx);
      let max = intrinsic::outer_contribution(child, axis, IntrinsicKind::Max, ctx);
      apply_contribution(track, min, max);
    } else {
      spanning.push(item);
    }
  }

  spanning.sort_by_key(|item| {
    let (start, end) = item.span(axis);
    end - start
  });
  for item in spanning {
    let (start, end) = item.span(axis);
    let end = end.min(tracks.len());
    if start >= end {
      continue;
    }
    // Items spanning a flexible track do not size content tracks.
    if tracks[start..end].iter().any(|t| t.def.is_flexible()) {
      continue;
    }
    let child = &node.children[item.index];
    let min = intrinsic::outer_contribution(child, axis, IntrinsicKind::Min, ctx);
    let max = intrinsic::outer_contribution(child, axis, IntrinsicKind::Max, ctx);

    let interior_gaps = gap
      * tracks[start..end]
        .iter()
        .filter(|t| !t.collapsed)
        .count()
        .saturating_sub(1) as f64;
    let fixed_sum: f64 = tracks[start..end]
      .iter()
      .filter(|t| !t.def.is_content_sized())
      .map(|t| t.base)
      .sum();
    let content_indexes: Vec<usize> = (start..end)
      .filter(|&i| tracks[i].def.is_content_sized() && !tracks[i].collapsed)
      .collect();
    if content_indexes.is_empty() {
      continue;
    }

    distribute_span(
      tracks,
      &content_indexes,
      (min - interior_gaps - fixed_sum).max(0.0),
      false,
    );
    distribute_span(
      tracks,
      &content_indexes,
      (max - interior_gaps - fixed_sum).max(0.0),
      true,
    );
  }

  // Keep limits consistent: a track never shrinks below its base.
  for track in tracks.iter_mut() {
    if !track.def.is_flexible() {
      track.limit = track.limit.max(track.base);
    }
  }

  let Some(avail) = available else {
    return;
  };

  let visible = tracks.iter().filter(|t| !t.collapsed).count();
  let total_gaps = gap * visible.saturating_sub(1) as f64;

  // Step d: grow bases up to growth limits.
  let mut free = avail
    - total_gaps
    - tracks
      .iter()
      .filter(|t| !t.collapsed)
      .map(|t| t.base)
      .sum::<f64>();
  while free > 1e-9 {
    let growable: Vec<usize> = (0..tracks.len())
      .filter(|&i| {
        let t = &tracks[i];
        !t.collapsed && !t.def.is_flexible() && t.base < t.limit
      })
      .collect();
    if growable.is_empty() {
      break;
    }
    let step = free / growable.len() as f64;
    let mut consumed = 0.0;
    for &i in &growable {
      let delta = (tracks[i].limit - tracks[i].base).min(step);
      tracks[i].base += delta;
      consumed += delta;
    }
    free -= consumed;
    if consumed <= 1e-9 {
      break;
    }
  }

  // Step e: expand flexible tracks from the remaining space.
  let non_flex_sum: f64 = tracks
    .iter()
    .filter(|t| !t.collapsed && !t.def.is_flexible())
    .map(|t| t.base)
    .sum();
  let mut flex_space = (avail - total_gaps - non_flex_sum).max(0.0);
  let mut active: Vec<usize> = (0..tracks.len())
    .filter(|&i| tracks[i].def.is_flexible() && !tracks[i].collapsed)
    .collect();
  loop {
    let fraction_sum: f64 = active.iter().map(|&i| tracks[i].def.fraction()).sum();
    if fraction_sum <= 0.0 || active.is_empty() {
      break;
    }
    let unit = flex_space / fraction_sum;
    // Hypothetical minimum guard: tracks whose content floor exceeds their
    // share keep the floor and leave the pool.
    let over: Vec<usize> = active
      .iter()
      .copied()
      .filter(|&i| tracks[i].base > unit * tracks[i].def.fraction() + 1e-9)
      .collect();
    if over.is_empty() {
      for &i in &active {
        tracks[i].base = unit * tracks[i].def.fraction();
      }
      break;
    }
    for &i in &over {
      flex_space = (flex_space - tracks[i].base).max(0.0);
      active.retain(|&a| a != i);
    }
  }
}

fn apply_contribution(track: &mut TrackState, min: f64, max: f64) {
  match track.def {
    GridTrack::Auto => {
      track.base = track.base.max(min);
      track.limit = track.limit.max(max);
    }
    GridTrack::MinContent => {
      track.base = track.base.max(min);
      track.limit = track.limit.max(min);
    }
    GridTrack::MaxContent => {
      track.base = track.base.max(max);
      track.limit = track.limit.max(max);
    }
    GridTrack::FitContent(cap) => {
      track.base = track.base.max(min);
      track.limit = track.limit.max(max.min(cap));
    }
    // Content floors for the flexible-track guard.
    GridTrack::Flex(_) => {
      track.base = track.base.max(min);
    }
    GridTrack::Fixed(_) => {}
  }
}

/// Distributes a spanning item's contribution evenly across the spanned
/// content tracks. Capped tracks (fit-content) absorb up to their cap and
/// release the remainder; on equal eligibility the earlier track grows.
fn distribute_span(tracks: &mut [TrackState], indexes: &[usize], amount: f64, into_limits: bool) {
  if indexes.is_empty() || amount <= 0.0 {
    return;
  }
  let mut remaining: Vec<usize> = indexes.to_vec();
  let mut pool = amount;
  while !remaining.is_empty() && pool > 1e-9 {
    let share = pool / remaining.len() as f64;
    let capped: Vec<usize> = remaining
      .iter()
      .copied()
      .filter(|&i| {
        if let GridTrack::FitContent(cap) = tracks[i].def {
          share > cap
        } else {
          false
        }
      })
      .collect();
    if capped.is_empty() {
      for &i in &remaining {
        if into_limits {
          let raised = tracks[i].limit.max(share);
          tracks[i].limit = match tracks[i].def {
            GridTrack::FitContent(cap) => raised.min(cap),
            _ => raised,
          };
        } else {
          tracks[i].base = tracks[i].base.max(share);
        }
      }
      break;
    }
    for &i in &capped {
      let cap = match tracks[i].def {
        GridTrack::FitContent(cap) => cap,
        _ => 0.0,
      };
      if into_limits {
        tracks[i].limit = tracks[i].limit.max(cap);
      } else {
        tracks[i].base = tracks[i].base.max(cap);
      }
      pool -= cap;
      remaining.retain(|&r| r != i);
    }
    pool = pool.max(0.0);
  }
}

/// Phase 4: cumulative track offsets. Gaps appear only between non-collapsed
/// tracks, so collapsed auto-fit tracks swallow their gutters too.
fn track_offsets(tracks: &[TrackState], gap: f64) -> (Vec<f64>, f64) {
  let mut offsets = Vec::with_capacity(tracks.len());
  let mut position = 0.0f64;
  let mut seen_visible = false;
  for track in tracks {
    if !track.collapsed && seen_visible {
      position += gap;
    }
    offsets.push(position);
    position += track.base;
    if !track.collapsed {
      seen_visible = true;
    }
  }
  (offsets, position)
}

/// Size of a span `[start, end)`: track sizes plus interior gutters, counted
/// once.
fn span_size(tracks: &[TrackState], offsets: &[f64], start: usize, end: usize) -> f64 {
  if start >= tracks.len() || end == 0 || start >= end {
    return 0.0;
  }
  let end = end.min(tracks.len());
  offsets[end - 1] + tracks[end - 1].base - offsets[start]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::{fixed, Node};
  use crate::style::RepeatTrack;

  fn grid_node(columns: Vec<TrackListComponent>, rows: Vec<TrackListComponent>) -> Node {
    let mut node = Node::new();
    node.style.display = Display::Grid;
    node.style.grid_template_columns = columns;
    node.style.grid_template_rows = rows;
    node
  }

  fn tracks(template: &str) -> Vec<TrackListComponent> {
    crate::style::parse_template(template).unwrap()
  }

  #[test]
  fn fr_tracks_split_available_space() {
    let mut root = grid_node(tracks("1fr 1fr 1fr"), tracks("100px"))
      .add_children([fixed(0.0, 0.0), fixed(0.0, 0.0), fixed(0.0, 0.0)]);
    for child in &mut root.children {
      child.style.width = crate::geometry::Length::Auto;
      child.style.height = crate::geometry::Length::Auto;
    }
    root.style.grid_gap = 10.0;
    root.style.width = crate::geometry::Length::Px(320.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.x, 0.0);
    assert_eq!(root.children[1].rect.x, 110.0);
    assert_eq!(root.children[2].rect.x, 220.0);
    for child in &root.children {
      assert_eq!(child.rect.width, 100.0);
      assert_eq!(child.rect.height, 100.0);
    }
  }

  #[test]
  fn auto_placement_wraps_rows() {
    let mut root = grid_node(tracks("100px 100px"), vec![])
      .add_children([fixed(10.0, 10.0), fixed(10.0, 10.0), fixed(10.0, 10.0)]);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.y, root.children[1].rect.y);
    assert!(root.children[2].rect.y > root.children[0].rect.y);
    assert_eq!(root.children[2].rect.x, root.children[0].rect.x);
  }

  #[test]
  fn explicit_placement_and_span_sum() {
    let mut spanner = fixed(0.0, 20.0);
    spanner.style.width = crate::geometry::Length::Auto;
    spanner.style.grid_column_start = 1;
    spanner.style.grid_column_end = 3;
    let mut root = grid_node(tracks("100px 60px"), tracks("auto")).add_child(spanner);
    root.style.grid_column_gap = Some(8.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // Spanning width = 100 + 60 + one 8px gutter.
    assert_eq!(root.children[0].rect.width, 168.0);
  }

  #[test]
  fn auto_fit_collapses_empty_tracks() {
    let repeat = RepeatTrack::new(RepeatCount::AutoFit, vec![GridTrack::Fixed(100.0)]);
    let mut a = fixed(0.0, 0.0);
    a.style.width = crate::geometry::Length::Auto;
    a.style.height = crate::geometry::Length::Auto;
    a.style.grid_column_start = 1;
    a.style.grid_column_end = 2;
    let mut b = a.clone();
    b.style.grid_column_start = 3;
    b.style.grid_column_end = 4;

    let mut root = grid_node(vec![repeat.into()], tracks("50px")).add_children([a, b]);
    root.style.grid_gap = 10.0;
    root.style.width = crate::geometry::Length::Px(450.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // repeat count 4; tracks 1 and 3 are empty and collapse with their gaps.
    assert_eq!(root.children[0].rect.x, 0.0);
    assert_eq!(root.children[1].rect.x, 110.0);
  }

  #[test]
  fn invalid_auto_repeat_is_dropped() {
    let repeat = RepeatTrack::new(RepeatCount::AutoFill, vec![GridTrack::Flex(1.0)]);
    let defs = expand_template(&[repeat.into()], Some(400.0), 0.0);
    assert!(defs.is_empty());
  }

  #[test]
  fn spanning_item_raises_auto_rows_evenly() {
    let mut tall = Node::new();
    tall.style.min_height = crate::geometry::Length::Px(300.0);
    tall.style.grid_row_start = 1;
    tall.style.grid_row_end = 4;
    tall.style.grid_column_start = 1;
    tall.style.grid_column_end = 2;

    let mut short = Node::new();
    short.style.min_height = crate::geometry::Length::Px(150.0);
    short.style.grid_row_start = 1;
    short.style.grid_row_end = 2;
    short.style.grid_column_start = 2;
    short.style.grid_column_end = 3;

    let mut root = grid_node(tracks("100px 100px"), tracks("auto auto auto"))
      .add_children([tall, short]);
    let ctx = LayoutContext::new(800.0, 600.0);
    layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.height, 350.0);
    assert_eq!(root.children[1].rect.height, 150.0);
    assert_eq!(root.children[0].rect.y, 0.0);
    assert_eq!(root.children[1].rect.y, 0.0);
  }

  #[test]
  fn implicit_tracks_use_grid_auto_rows() {
    let mut root = grid_node(tracks("50px"), tracks("40px"))
      .add_children([fixed(10.0, 10.0), fixed(10.0, 10.0)]);
    root.style.grid_auto_rows = GridTrack::Fixed(25.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_grid(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[1].rect.y, 40.0);
    assert_eq!(size.height, 65.0);
  }

  #[test]
  fn fit_content_track_caps_growth() {
    let mut item = fixed(180.0, 10.0);
    item.style.grid_column_start = 1;
    item.style.grid_column_end = 2;
    let mut root = grid_node(
      vec![TrackListComponent::Track(GridTrack::FitContent(120.0))],
      tracks("auto"),
    )
    .add_child(item);

    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_grid(&mut root, Constraints::loose(UNBOUNDED, UNBOUNDED), &ctx);
    // Base holds the min-content floor (180); the cap limits growth, not
    // the floor.
    assert_eq!(size.width, 180.0);
  }

  #[test]
  fn lines_to_span_rules() {
    assert_eq!(lines_to_span(0, 0), (None, 1));
    assert_eq!(lines_to_span(1, 4), (Some(0), 3));
    assert_eq!(lines_to_span(2, 0), (Some(1), 1));
    assert_eq!(lines_to_span(0, 3), (Some(1), 1));
    assert_eq!(lines_to_span(3, 2), (Some(2), 1));
  }
}
