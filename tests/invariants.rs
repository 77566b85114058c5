//! Universal engine invariants checked over a family of representative
//! trees: non-negative rects, constraint containment, idempotence,
//! determinism, grid non-overlap and spanning sums, flex conservation.

use boxflow::prelude::*;
use boxflow::style::{FlexWrap, JustifyContent, Position};
use boxflow::{parse_template, FixedGlyphMeasure};

fn sample_trees() -> Vec<Node> {
  let flex_row = {
    let mut root = hstack([
      fixed(100.0, 40.0).with_flex_grow(1.0),
      fixed(50.0, 60.0),
      Node::new().with_text("some wrapped text content"),
    ])
    .with_width(400.0)
    .with_height(120.0);
    root.style.justify_content = JustifyContent::SpaceAround;
    root
  };

  let wrapping = {
    let mut root = hstack((0..6).map(|_| fixed(120.0, 30.0))).with_width(300.0);
    root.style.flex_wrap = FlexWrap::Wrap;
    root
  };

  let grid = {
    let mut spanner = Node::new();
    spanner.style.grid_column_start = 1;
    spanner.style.grid_column_end = 3;
    let mut root = Node::new()
      .add_children([spanner, fixed(20.0, 20.0), fixed(20.0, 20.0), fixed(20.0, 20.0)]);
    root.style.display = Display::Grid;
    root.style.grid_template_columns = parse_template("1fr 100px 1fr").unwrap();
    root.style.grid_template_rows = parse_template("auto auto").unwrap();
    root.style.grid_gap = 6.0;
    root.style.width = Length::Px(360.0);
    root
  };

  let positioned = {
    let mut overlay = fixed(40.0, 40.0);
    overlay.style.position = Position::Absolute;
    overlay.style.right = Length::Px(5.0);
    overlay.style.top = Length::Px(5.0);
    let mut anchor = fixed(200.0, 100.0);
    anchor.style.position = Position::Relative;
    vstack([anchor.add_child(overlay), fixed(120.0, 40.0)])
      .with_width(320.0)
      .with_height(240.0)
  };

  let nested = vstack([
    hstack([fixed(30.0, 30.0), fixed(30.0, 30.0)]),
    grid.clone(),
    fixed(10.0, 10.0),
  ])
  .with_width(500.0);

  vec![flex_row, wrapping, grid, positioned, nested]
}

fn all_rects(node: &Node) -> Vec<Rect> {
  node.fold(Vec::new(), |mut acc, n| {
    acc.push(n.rect);
    acc
  })
}

#[test]
fn rects_are_non_negative_and_size_in_constraints() {
  let measure = FixedGlyphMeasure::default();
  let ctx = LayoutContext::new(800.0, 600.0).with_measure(&measure);
  let constraints = Constraints::loose(800.0, 600.0);

  for mut tree in sample_trees() {
    let size = layout(&mut tree, constraints, &ctx);
    assert!(constraints.contains(size), "size {size:?} escapes constraints");
    for rect in all_rects(&tree) {
      assert!(rect.width >= 0.0 && rect.height >= 0.0, "negative rect {rect:?}");
    }
  }
}

#[test]
fn tight_constraints_force_the_returned_size() {
  let ctx = LayoutContext::new(800.0, 600.0);
  for mut tree in sample_trees() {
    let size = layout(&mut tree, Constraints::tight(333.0, 222.0), &ctx);
    assert_eq!((size.width, size.height), (333.0, 222.0));
  }
}

#[test]
fn layout_is_idempotent() {
  let measure = FixedGlyphMeasure::default();
  let ctx = LayoutContext::new(800.0, 600.0).with_measure(&measure);
  let constraints = Constraints::loose(800.0, 600.0);

  for mut tree in sample_trees() {
    layout(&mut tree, constraints, &ctx);
    let first = all_rects(&tree);
    layout(&mut tree, constraints, &ctx);
    let second = all_rects(&tree);
    assert_eq!(first, second);
  }
}

#[test]
fn layout_is_deterministic_across_fresh_trees() {
  let measure = FixedGlyphMeasure::default();
  let ctx = LayoutContext::new(800.0, 600.0).with_measure(&measure);
  let constraints = Constraints::loose(800.0, 600.0);

  let rects: Vec<Vec<Rect>> = (0..2)
    .map(|_| {
      sample_trees()
        .into_iter()
        .map(|mut tree| {
          layout(&mut tree, constraints, &ctx);
          all_rects(&tree)
        })
        .collect::<Vec<_>>()
        .concat()
    })
    .collect();
  assert_eq!(rects[0], rects[1]);
}

#[test]
fn grid_cells_do_not_overlap() {
  let mut root = Node::new().add_children((0..6).map(|_| fixed(0.0, 0.0)).map(|mut n| {
    n.style.width = Length::Auto;
    n.style.height = Length::Auto;
    n
  }));
  root.style.display = Display::Grid;
  root.style.grid_template_columns = parse_template("1fr 1fr 1fr").unwrap();
  root.style.grid_template_rows = parse_template("50px 50px").unwrap();
  root.style.grid_gap = 4.0;
  root.style.width = Length::Px(400.0);

  let ctx = LayoutContext::new(800.0, 600.0);
  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

  for (i, a) in root.children.iter().enumerate() {
    for b in root.children.iter().skip(i + 1) {
      assert!(
        !a.rect.intersects(&b.rect),
        "cells overlap: {:?} vs {:?}",
        a.rect,
        b.rect
      );
    }
  }
}

#[test]
fn spanning_item_width_is_track_sum_plus_interior_gaps() {
  let gap = 12.0;
  let mut spanner = Node::new();
  spanner.style.grid_column_start = 1;
  spanner.style.grid_column_end = 4;
  let mut root = Node::new().add_child(spanner);
  root.style.display = Display::Grid;
  root.style.grid_template_columns = parse_template("80px 120px 40px").unwrap();
  root.style.grid_template_rows = parse_template("30px").unwrap();
  root.style.grid_column_gap = Some(gap);

  let ctx = LayoutContext::new(800.0, 600.0);
  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

  assert_eq!(root.children[0].rect.width, 80.0 + 120.0 + 40.0 + 2.0 * gap);
}

#[test]
fn flex_conservation_on_a_line() {
  // With space-between, the items' outer main sizes plus distributed slack
  // exactly tile the container.
  let mut root = hstack([
    fixed(100.0, 20.0),
    fixed(60.0, 20.0),
    fixed(90.0, 20.0),
  ])
  .with_width(500.0)
  .with_height(20.0);
  root.style.justify_content = JustifyContent::SpaceBetween;

  let ctx = LayoutContext::new(800.0, 600.0);
  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

  let total_items: f64 = root.children.iter().map(|c| c.rect.width).sum();
  let slack = 500.0 - total_items;
  let gap01 = root.children[1].rect.x - root.children[0].rect.right();
  let gap12 = root.children[2].rect.x - root.children[1].rect.right();
  assert!((gap01 - slack / 2.0).abs() < 1e-9);
  assert!((gap12 - slack / 2.0).abs() < 1e-9);
  assert_eq!(root.children[2].rect.right(), 500.0);
}

#[test]
fn display_none_zeroes_the_subtree() {
  let mut hidden = fixed(50.0, 50.0).add_child(fixed(10.0, 10.0));
  hidden.style.display = Display::None;
  let mut root = vstack([hidden, fixed(40.0, 40.0)]).with_width(200.0);

  let ctx = LayoutContext::new(800.0, 600.0);
  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

  assert!(root.children[0].rect.is_zero());
  assert!(root.children[0].children[0].rect.is_zero());
  // The visible sibling takes the top slot.
  assert_eq!(root.children[1].rect.y, 0.0);
}

#[test]
fn degenerate_constraints_are_repaired() {
  let mut root = fixed(100.0, 100.0);
  let ctx = LayoutContext::new(800.0, 600.0);
  let size = layout(
    &mut root,
    Constraints {
      min_width: 200.0,
      max_width: 50.0,
      min_height: 0.0,
      max_height: 600.0,
    },
    &ctx,
  );
  // max repaired up to min.
  assert_eq!(size.width, 200.0);
}
