//! Flexbox layout.
//!
//! The algorithm follows the classic phase order: resolve hypothetical main
//! sizes (flex basis), gather items into lines, distribute free space along
//! the main axis with a clamp/redistribute fixed point, size the cross axis
//! (with baseline groups), then place items per `justify-content` /
//! `align-items` / `align-content`. Reverse directions mirror the final
//! positions; slack distribution itself is direction-agnostic.

use super::{
  cross_axis, flow_layout, in_flow, intrinsic, main_axis, resolve_box, zero_subtree, LayoutContext,
};
use crate::geometry::{sanitize, Axis, Constraints, Size, UNBOUNDED};
use crate::node::Node;
use crate::style::{AlignContent, AlignItems, BoxSizing, Display, FlexWrap, JustifyContent};

struct FlexItem {
  index: usize,
  margin_main: (f64, f64),
  margin_cross: (f64, f64),
  min_main: f64,
  max_main: f64,
  min_cross: f64,
  max_cross: f64,
  grow: f64,
  shrink: f64,
  /// Flex base size (border-box, unclamped). Free space distributes from
  /// here; min/max apply through the freeze loop.
  basis: f64,
  /// The base size clamped by the item's bounds; used for line packing and
  /// for inflexible items.
  hypothetical: f64,
  /// Definite cross size from style, when present.
  cross_style: Option<f64>,
  /// Whether the style cross size is auto (eligible for stretch).
  cross_auto: bool,
  main: f64,
  cross: f64,
  /// Hypothetical outer cross size before stretching.
  outer_cross_hyp: f64,
  /// Outer ascent (cross-start margin + inner baseline) for baseline groups.
  ascent: f64,
  /// Border-box start offsets, relative to the container's content origin.
  main_start: f64,
  cross_start: f64,
}

impl FlexItem {
  fn outer_main(&self, main: f64) -> f64 {
    main + self.margin_main.0 + self.margin_main.1
  }

  fn clamp_main(&self, value: f64) -> f64 {
    sanitize(value).clamp(self.min_main, self.max_main.max(self.min_main))
  }

  fn clamp_cross(&self, value: f64) -> f64 {
    sanitize(value).clamp(self.min_cross, self.max_cross.max(self.min_cross))
  }
}

/// Lays out `node` as a flex container. Returns the border-box size.
pub fn layout_flexbox(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
  let constraints = constraints.normalized();
  let direction = node.style.flex_direction;
  let wrap = node.style.flex_wrap;
  let justify = node.style.justify_content;
  let align_items = node.style.align_items;
  let align_content = node.style.align_content;

  let main = main_axis(&node.style);
  let cross = cross_axis(main);
  let is_row = main == Axis::Horizontal;

  let metrics = resolve_box(
    node,
    constraints.bounded_width(),
    constraints.bounded_height(),
    ctx,
  );

  // Definite border-box sizes. Width stretches into bounded loose
  // constraints (flex containers are block-level); height only follows an
  // explicit size or a tight constraint.
  let definite_width = metrics
    .width
    .or_else(|| tight_axis(&constraints, Axis::Horizontal))
    .or_else(|| constraints.bounded_width())
    .map(|w| metrics.clamp_width(w));
  let definite_height = metrics
    .height
    .or_else(|| tight_axis(&constraints, Axis::Vertical))
    .map(|h| metrics.clamp_height(h));

  let pb_main = metrics.padding_border_axis(main);
  let pb_cross = metrics.padding_border_axis(cross);
  let (definite_main, definite_cross) = if is_row {
    (definite_width, definite_height)
  } else {
    (definite_height, definite_width)
  };
  let main_inner = definite_main.map(|v| (v - pb_main).max(0.0));
  let cross_inner = definite_cross.map(|v| (v - pb_cross).max(0.0));

  let content_w_basis = definite_width.map(|w| (w - metrics.padding_border_horizontal()).max(0.0));
  let content_h_basis = definite_height.map(|h| (h - metrics.padding_border_vertical()).max(0.0));

  for child in &mut node.children {
    if child.style.display == Display::None {
      zero_subtree(child);
    }
  }

  // Step 1: hypothetical main sizes.
  let mut items: Vec<FlexItem> = Vec::new();
  for (index, child) in node.children.iter().enumerate() {
    if !in_flow(&child.style) {
      continue;
    }
    let cm = resolve_box(child, content_w_basis, content_h_basis, ctx);
    let pb_child_main = cm.padding_border_axis(main);

    let basis_style = child
      .style
      .flex_basis
      .resolve(main_inner, child.style.font_size, ctx.root_font_size)
      .map(|v| match child.style.box_sizing {
        BoxSizing::ContentBox => sanitize(v) + pb_child_main,
        BoxSizing::BorderBox => sanitize(v).max(pb_child_main),
      });
    let basis = basis_style
      .or_else(|| cm.size_axis(main))
      .unwrap_or_else(|| intrinsic::max_content(child, main, ctx));

    let (min_main, max_main, min_cross, max_cross) = if is_row {
      (cm.min_width, cm.max_width, cm.min_height, cm.max_height)
    } else {
      (cm.min_height, cm.max_height, cm.min_width, cm.max_width)
    };
    let margin_main = if is_row {
      (cm.margin.left, cm.margin.right)
    } else {
      (cm.margin.top, cm.margin.bottom)
    };
    let margin_cross = if is_row {
      (cm.margin.top, cm.margin.bottom)
    } else {
      (cm.margin.left, cm.margin.right)
    };

    let cross_style = cm.size_axis(cross);
    let cross_length = if is_row {
      &child.style.height
    } else {
      &child.style.width
    };

    let mut item = FlexItem {
      index,
      margin_main,
      margin_cross,
      min_main,
      max_main,
      min_cross,
      max_cross,
      grow: child.style.flex_grow.max(0.0),
      shrink: child.style.flex_shrink.max(0.0),
      basis: 0.0,
      hypothetical: 0.0,
      cross_style,
      cross_auto: cross_length.is_auto(),
      main: 0.0,
      cross: 0.0,
      outer_cross_hyp: 0.0,
      ascent: 0.0,
      main_start: 0.0,
      cross_start: 0.0,
    };
    item.basis = sanitize(basis);
    item.hypothetical = item.clamp_main(basis);
    items.push(item);
  }

  // Step 2: gather into lines.
  let lines = gather_lines(&items, wrap, main_inner);

  // Step 3: resolve main sizes per line.
  for line in &lines {
    match main_inner {
      Some(available) => resolve_flexible_lengths(&mut items, line, available),
      None => {
        for &pos in line {
          items[pos].main = items[pos].hypothetical;
        }
      }
    }
  }

  // Step 4: hypothetical cross sizes and baselines.
  for item in &mut items {
    let child = &mut node.children[item.index];
    let hyp = match item.cross_style {
      Some(size) => item.clamp_cross(size),
      None => {
        let (w, h) = if is_row {
          (item.main, cross_inner.unwrap_or(UNBOUNDED))
        } else {
          (cross_inner.unwrap_or(UNBOUNDED), item.main)
        };
        let child_constraints = if is_row {
          Constraints {
            min_width: w,
            max_width: w,
            min_height: 0.0,
            max_height: h,
          }
        } else {
          Constraints {
            min_width: 0.0,
            max_width: w,
            min_height: h,
            max_height: h,
          }
        };
        let measured = flow_layout(child, child_constraints, ctx);
        item.clamp_cross(if is_row {
          measured.height
        } else {
          measured.width
        })
      }
    };
    item.cross = hyp;
    item.outer_cross_hyp = hyp + item.margin_cross.0 + item.margin_cross.1;

    // Text leaves report a real baseline; every other box contributes its
    // bottom edge.
    let inner_ascent = match &child.text {
      Some(text) if is_row => {
        let pb_h = child.style.padding.horizontal() + child.style.border.horizontal();
        let available = (item.main - pb_h).max(0.0);
        let text_metrics = ctx.measure_text(text, &child.style, available);
        child.style.border.top + child.style.padding.top + text_metrics.baseline
      }
      _ => hyp,
    };
    item.ascent = item.margin_cross.0 + inner_ascent;
  }

  // Line cross sizes. A single line in a container with a definite cross
  // size spans the whole container.
  let baseline_active = is_row && align_items == AlignItems::Baseline;
  let mut line_crosses: Vec<f64> = Vec::with_capacity(lines.len());
  let mut line_ascents: Vec<f64> = Vec::with_capacity(lines.len());
  for line in &lines {
    let max_ascent = if baseline_active {
      line.iter().map(|&p| items[p].ascent).fold(0.0, f64::max)
    } else {
      0.0
    };
    let cross_size = if lines.len() == 1 && cross_inner.is_some() {
      cross_inner.unwrap_or(0.0)
    } else if baseline_active {
      let max_descent = line
        .iter()
        .map(|&p| items[p].outer_cross_hyp - items[p].ascent)
        .fold(0.0, f64::max);
      max_ascent + max_descent
    } else {
      line
        .iter()
        .map(|&p| items[p].outer_cross_hyp)
        .fold(0.0, f64::max)
    };
    line_crosses.push(cross_size);
    line_ascents.push(max_ascent);
  }

  // Final cross sizes: stretch auto-cross items to their line.
  for (line, &line_cross) in lines.iter().zip(&line_crosses) {
    for &pos in line {
      let item = &mut items[pos];
      if align_items == AlignItems::Stretch && item.cross_auto {
        let stretched = line_cross - item.margin_cross.0 - item.margin_cross.1;
        item.cross = item.clamp_cross(stretched);
      }
    }
  }

  // Container content sizes.
  let line_totals: Vec<f64> = lines
    .iter()
    .map(|line| {
      line
        .iter()
        .map(|&p| items[p].outer_main(items[p].main))
        .sum::<f64>()
    })
    .collect();
  let content_main = main_inner.unwrap_or_else(|| line_totals.iter().fold(0.0, |a, &b| a.max(b)));
  let total_line_cross: f64 = line_crosses.iter().sum();
  let content_cross = cross_inner.unwrap_or(total_line_cross);

  // Step 5/6: placement.
  let mut ordered: Vec<usize> = (0..lines.len()).collect();
  if wrap == FlexWrap::WrapReverse {
    ordered.reverse();
  }
  let cross_slack = content_cross - total_line_cross;
  let (line_leading, line_between) =
    align_content_offsets(align_content, cross_slack, lines.len());

  let mut line_cursor = line_leading;
  for &line_index in &ordered {
    let line = &lines[line_index];
    let line_cross = line_crosses[line_index];
    let max_ascent = line_ascents[line_index];

    let slack = content_main - line_totals[line_index];
    let (leading, between) = justify_offsets(justify, slack, line.len());

    let mut main_cursor = leading;
    for &pos in line {
      let item = &mut items[pos];
      let outer = item.outer_main(item.main);

      let mut outer_start = main_cursor;
      if direction.is_reverse() {
        outer_start = content_main - outer_start - outer;
      }
      item.main_start = outer_start + item.margin_main.0;

      let outer_cross = item.cross + item.margin_cross.0 + item.margin_cross.1;
      let cross_offset = match align_items {
        AlignItems::Stretch | AlignItems::FlexStart => 0.0,
        AlignItems::FlexEnd => line_cross - outer_cross,
        AlignItems::Center => (line_cross - outer_cross) / 2.0,
        AlignItems::Baseline => {
          if baseline_active {
            max_ascent - item.ascent
          } else {
            0.0
          }
        }
      };
      item.cross_start = line_cursor + cross_offset + item.margin_cross.0;

      main_cursor += outer + between;
    }
    line_cursor += line_cross + line_between;
  }

  // Final pass: lay out each item at its resolved size and write positions.
  let (origin_x, origin_y) = metrics.content_origin();
  for item in &items {
    let child = &mut node.children[item.index];
    let (w, h) = if is_row {
      (item.main, item.cross)
    } else {
      (item.cross, item.main)
    };
    flow_layout(child, Constraints::tight(w, h), ctx);
    if is_row {
      child.rect.x = origin_x + item.main_start;
      child.rect.y = origin_y + item.cross_start;
    } else {
      child.rect.x = origin_x + item.cross_start;
      child.rect.y = origin_y + item.main_start;
    }
  }

  // Step 7: container sizing.
  let (content_w, content_h) = if is_row {
    (content_main, content_cross)
  } else {
    (content_cross, content_main)
  };
  let width = definite_width
    .unwrap_or(content_w + metrics.padding_border_horizontal());
  let height = definite_height
    .unwrap_or(content_h + metrics.padding_border_vertical());
  let size = constraints.constrain(Size::new(
    metrics.clamp_width(width),
    metrics.clamp_height(height),
  ));
  node.rect.width = size.width;
  node.rect.height = size.height;
  size
}

fn tight_axis(constraints: &Constraints, axis: Axis) -> Option<f64> {
  let (min, max) = match axis {
    Axis::Horizontal => (constraints.min_width, constraints.max_width),
    Axis::Vertical => (constraints.min_height, constraints.max_height),
  };
  (min == max && max < UNBOUNDED).then_some(max)
}

/// Greedy line packing: a child starts a new line iff it would push the
/// line's hypothetical total past the container's main inner size.
fn gather_lines(items: &[FlexItem], wrap: FlexWrap, main_inner: Option<f64>) -> Vec<Vec<usize>> {
  if items.is_empty() {
    return Vec::new();
  }
  if wrap == FlexWrap::NoWrap {
    return vec![(0..items.len()).collect()];
  }

  let limit = main_inner.unwrap_or(UNBOUNDED);
  let mut lines: Vec<Vec<usize>> = Vec::new();
  let mut current: Vec<usize> = Vec::new();
  let mut current_total = 0.0f64;

  for (pos, item) in items.iter().enumerate() {
    let outer = item.outer_main(item.hypothetical);
    if !current.is_empty() && current_total + outer > limit {
      lines.push(std::mem::take(&mut current));
      current_total = 0.0;
    }
    current.push(pos);
    current_total += outer;
  }
  if !current.is_empty() {
    lines.push(current);
  }
  lines
}

/// Distributes free space along the main axis: grow when positive, shrink
/// (scaled by basis) when negative, clamping each item by its min/max and
/// redistributing among the unclamped until a fixed point.
fn resolve_flexible_lengths(items: &mut [FlexItem], line: &[usize], available: f64) {
  let initial_free: f64 = available
    - line
      .iter()
      .map(|&p| items[p].outer_main(items[p].hypothetical))
      .sum::<f64>();
  let growing = initial_free > 0.0;
  let shrinking = initial_free < 0.0;

  let mut frozen: Vec<bool> = line
    .iter()
    .map(|&p| {
      let item = &items[p];
      (growing && item.grow == 0.0) || (shrinking && item.shrink == 0.0) || (!growing && !shrinking)
    })
    .collect();
  for (slot, &p) in line.iter().enumerate() {
    if frozen[slot] {
      items[p].main = items[p].hypothetical;
    }
  }

  loop {
    let unfrozen: Vec<usize> = (0..line.len()).filter(|&s| !frozen[s]).collect();
    if unfrozen.is_empty() {
      break;
    }

    let used: f64 = line
      .iter()
      .enumerate()
      .map(|(slot, &p)| {
        let item = &items[p];
        if frozen[slot] {
          item.outer_main(item.main)
        } else {
          item.outer_main(item.basis)
        }
      })
      .sum();
    let free = available - used;

    let grow_sum: f64 = unfrozen.iter().map(|&s| items[line[s]].grow).sum();
    let scaled_shrink_sum: f64 = unfrozen
      .iter()
      .map(|&s| {
        let item = &items[line[s]];
        item.shrink * item.basis
      })
      .sum();

    let mut any_clamped = false;
    let mut targets: Vec<(usize, f64)> = Vec::with_capacity(unfrozen.len());
    for &slot in &unfrozen {
      let item = &items[line[slot]];
      let target = if growing && grow_sum > 0.0 {
        item.basis + free * item.grow / grow_sum
      } else if shrinking && scaled_shrink_sum > 0.0 {
        item.basis + free * (item.shrink * item.basis) / scaled_shrink_sum
      } else {
        item.basis
      };
      targets.push((slot, target));
    }

    for &(slot, target) in &targets {
      let item = &items[line[slot]];
      let clamped = item.clamp_main(target);
      if (clamped - target).abs() > 1e-9 {
        items[line[slot]].main = clamped;
        frozen[slot] = true;
        any_clamped = true;
      }
    }
    if !any_clamped {
      for &(slot, target) in &targets {
        items[line[slot]].main = items[line[slot]].clamp_main(target);
        frozen[slot] = true;
      }
      break;
    }
  }
}

/// Leading and between offsets for `justify-content` given the slack on a
/// line of `count` items. Negative slack degrades the space-* values to
/// flex-start.
fn justify_offsets(justify: JustifyContent, slack: f64, count: usize) -> (f64, f64) {
  let n = count as f64;
  match justify {
    JustifyContent::FlexStart => (0.0, 0.0),
    JustifyContent::FlexEnd => (slack, 0.0),
    JustifyContent::Center => (slack / 2.0, 0.0),
    JustifyContent::SpaceBetween => {
      if count <= 1 || slack < 0.0 {
        (0.0, 0.0)
      } else {
        (0.0, slack / (n - 1.0))
      }
    }
    JustifyContent::SpaceAround => {
      if count == 0 || slack < 0.0 {
        (0.0, 0.0)
      } else {
        (slack / (2.0 * n), slack / n)
      }
    }
    JustifyContent::SpaceEvenly => {
      if count == 0 || slack < 0.0 {
        (0.0, 0.0)
      } else {
        (slack / (n + 1.0), slack / (n + 1.0))
      }
    }
  }
}

fn align_content_offsets(align: AlignContent, slack: f64, count: usize) -> (f64, f64) {
  let justify = match align {
    AlignContent::FlexStart => JustifyContent::FlexStart,
    AlignContent::FlexEnd => JustifyContent::FlexEnd,
    AlignContent::Center => JustifyContent::Center,
    AlignContent::SpaceBetween => JustifyContent::SpaceBetween,
    AlignContent::SpaceAround => JustifyContent::SpaceAround,
    AlignContent::SpaceEvenly => JustifyContent::SpaceEvenly,
  };
  justify_offsets(justify, slack, count)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Length;
  use crate::node::{fixed, hstack, vstack};

  #[test]
  fn grow_distributes_free_space() {
    let mut root = hstack([
      fixed(50.0, 20.0).with_flex_grow(1.0),
      fixed(50.0, 20.0).with_flex_grow(3.0),
    ])
    .with_width(300.0)
    .with_height(20.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // 200 free: +50 and +150.
    assert_eq!(root.children[0].rect.width, 100.0);
    assert_eq!(root.children[1].rect.width, 200.0);
    assert_eq!(root.children[1].rect.x, 100.0);
  }

  #[test]
  fn shrink_scales_with_basis() {
    let mut root = hstack([fixed(300.0, 20.0), fixed(100.0, 20.0)])
      .with_width(200.0)
      .with_height(20.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // Deficit 200 split 3:1 by shrink x basis.
    assert_eq!(root.children[0].rect.width, 150.0);
    assert_eq!(root.children[1].rect.width, 50.0);
  }

  #[test]
  fn clamped_item_redistributes_remainder() {
    let mut capped = fixed(50.0, 20.0).with_flex_grow(1.0);
    capped.style.max_width = Length::Px(60.0);
    let mut root = hstack([capped, fixed(50.0, 20.0).with_flex_grow(1.0)])
      .with_width(300.0)
      .with_height(20.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // First freezes at 60; the remaining 140 of slack all flows to the second.
    assert_eq!(root.children[0].rect.width, 60.0);
    assert_eq!(root.children[1].rect.width, 240.0);
  }

  #[test]
  fn wrap_packs_greedily_and_stacks_lines() {
    let mut root = hstack([
      fixed(100.0, 20.0),
      fixed(100.0, 20.0),
      fixed(100.0, 30.0),
    ])
    .with_width(250.0);
    root.style.flex_wrap = FlexWrap::Wrap;

    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.y, 0.0);
    assert_eq!(root.children[1].rect.y, 0.0);
    assert_eq!(root.children[2].rect.y, 20.0);
    assert_eq!(size.height, 50.0);
  }

  #[test]
  fn wrap_reverse_flips_line_order() {
    let mut root = hstack([
      fixed(100.0, 20.0),
      fixed(100.0, 20.0),
      fixed(100.0, 30.0),
    ])
    .with_width(250.0);
    root.style.flex_wrap = FlexWrap::WrapReverse;

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // The second line (30 tall) now sits on top.
    assert_eq!(root.children[2].rect.y, 0.0);
    assert_eq!(root.children[0].rect.y, 30.0);
  }

  #[test]
  fn row_reverse_mirrors_positions() {
    let mut root = hstack([fixed(100.0, 20.0), fixed(50.0, 20.0)])
      .with_width(300.0)
      .with_height(20.0);
    root.style.flex_direction = crate::style::FlexDirection::RowReverse;

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    // First child is flush right, second to its left.
    assert_eq!(root.children[0].rect.x, 200.0);
    assert_eq!(root.children[1].rect.x, 150.0);
  }

  #[test]
  fn stretch_fills_line_cross() {
    let mut auto_height = fixed(100.0, 0.0);
    auto_height.style.height = Length::Auto;
    let mut root = hstack([auto_height]).with_width(300.0).with_height(80.0);
    root.style.align_items = AlignItems::Stretch;

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.height, 80.0);
  }

  #[test]
  fn column_direction_swaps_axes() {
    let mut root = vstack([
      fixed(50.0, 100.0).with_flex_grow(1.0),
      fixed(50.0, 100.0),
    ])
    .with_width(200.0)
    .with_height(400.0);

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[0].rect.height, 300.0);
    assert_eq!(root.children[1].rect.y, 300.0);
  }

  #[test]
  fn space_between_single_item_behaves_as_start() {
    let mut root = hstack([fixed(100.0, 20.0)])
      .with_width(300.0)
      .with_height(20.0);
    root.style.justify_content = JustifyContent::SpaceBetween;

    let ctx = LayoutContext::new(800.0, 600.0);
    layout_flexbox(&mut root, Constraints::loose(800.0, 600.0), &ctx);
    assert_eq!(root.children[0].rect.x, 0.0);
  }

  #[test]
  fn container_sizes_to_content_without_explicit_main() {
    let mut root = hstack([fixed(100.0, 20.0), fixed(60.0, 40.0)]);
    let ctx = LayoutContext::new(800.0, 600.0);
    let size = layout_flexbox(&mut root, Constraints::loose(UNBOUNDED, UNBOUNDED), &ctx);
    assert_eq!(size, Size::new(160.0, 40.0));
  }
}
