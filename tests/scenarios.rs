//! End-to-end layout scenarios with literal expected geometry.

use boxflow::prelude::*;
use boxflow::style::{JustifyContent, RepeatCount, RepeatTrack, TrackListComponent};
use boxflow::{parse_template, snap_nodes};

fn ctx() -> LayoutContext<'static> {
  LayoutContext::new(800.0, 600.0)
}

fn rect_of(node: &Node) -> (f64, f64, f64, f64) {
  (node.rect.x, node.rect.y, node.rect.width, node.rect.height)
}

#[test]
fn flex_row_space_between_center() {
  let mut root = hstack([
    fixed(100.0, 50.0),
    fixed(100.0, 50.0),
    fixed(100.0, 50.0),
  ])
  .with_width(600.0)
  .with_height(100.0);
  root.style.justify_content = JustifyContent::SpaceBetween;
  root.style.align_items = AlignItems::Center;

  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx());

  assert_eq!(rect_of(&root.children[0]), (0.0, 25.0, 100.0, 50.0));
  assert_eq!(rect_of(&root.children[1]), (250.0, 25.0, 100.0, 50.0));
  assert_eq!(rect_of(&root.children[2]), (500.0, 25.0, 100.0, 50.0));
}

#[test]
fn grid_three_equal_fractions() {
  let mut root = Node::new().add_children([Node::new(), Node::new(), Node::new()]);
  root.style.display = Display::Grid;
  root.style.grid_template_columns = parse_template("1fr 1fr 1fr").unwrap();
  root.style.grid_template_rows = parse_template("100px").unwrap();
  root.style.grid_gap = 10.0;
  root.style.width = Length::Px(320.0);

  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx());

  assert_eq!(rect_of(&root.children[0]), (0.0, 0.0, 100.0, 100.0));
  assert_eq!(rect_of(&root.children[1]), (110.0, 0.0, 100.0, 100.0));
  assert_eq!(rect_of(&root.children[2]), (220.0, 0.0, 100.0, 100.0));
}

#[test]
fn grid_spanning_auto_rows_with_min_height() {
  let mut tall = Node::new();
  tall.style.min_height = Length::Px(300.0);
  tall.style.grid_row_start = 1;
  tall.style.grid_row_end = 4;
  tall.style.grid_column_start = 1;
  tall.style.grid_column_end = 2;

  let mut short = Node::new();
  short.style.min_height = Length::Px(150.0);
  short.style.grid_row_start = 1;
  short.style.grid_row_end = 2;
  short.style.grid_column_start = 2;
  short.style.grid_column_end = 3;

  let mut root = Node::new().add_children([tall, short]);
  root.style.display = Display::Grid;
  root.style.grid_template_rows = parse_template("auto auto auto").unwrap();
  root.style.grid_template_columns = parse_template("100px 100px").unwrap();

  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx());

  // Row heights resolve to (150, 100, 100).
  assert_eq!(root.children[0].rect.height, 350.0);
  assert_eq!(root.children[1].rect.height, 150.0);
  assert_eq!(root.children[0].rect.y, 0.0);
  assert_eq!(root.children[1].rect.y, 0.0);
}

#[test]
fn flex_column_with_grow_and_padding() {
  let mut children = Vec::new();
  for grow in [1.0, 2.0, 1.0] {
    let mut child = Node::new().with_flex_grow(grow);
    child.style.min_height = Length::Px(50.0);
    children.push(child);
  }
  let mut root = vstack(children).with_height(600.0);
  root.style.padding = Spacing::uniform(20.0);

  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx());

  assert_eq!(root.children[0].rect.height, 140.0);
  assert_eq!(root.children[1].rect.height, 280.0);
  assert_eq!(root.children[2].rect.height, 140.0);
  assert_eq!(root.children[0].rect.y, 20.0);
  assert_eq!(root.children[1].rect.y, 160.0);
  assert_eq!(root.children[2].rect.y, 440.0);
}

#[test]
fn auto_fit_collapses_empty_tracks() {
  let mut first = Node::new();
  first.style.grid_column_start = 1;
  first.style.grid_column_end = 2;
  let mut third = Node::new();
  third.style.grid_column_start = 3;
  third.style.grid_column_end = 4;

  let mut root = Node::new().add_children([first, third]);
  root.style.display = Display::Grid;
  root.style.grid_template_columns = vec![TrackListComponent::Repeat(RepeatTrack::new(
    RepeatCount::AutoFit,
    vec![GridTrack::Fixed(100.0)],
  ))];
  root.style.grid_template_rows = parse_template("40px").unwrap();
  root.style.grid_gap = 10.0;
  root.style.width = Length::Px(450.0);

  layout(&mut root, Constraints::loose(800.0, 600.0), &ctx());

  // Four tracks fit; the two empty ones collapse together with their gaps.
  assert_eq!(root.children[0].rect.x, 0.0);
  assert_eq!(root.children[1].rect.x, 110.0);
}

#[test]
fn snap_on_ten_grid_rounds_half_up() {
  let mut nodes: Vec<Node> = [12.3, 14.9, 15.0, 15.1]
    .iter()
    .map(|&x| {
      let mut node = fixed(1.0, 1.0);
      node.rect = Rect::new(x, 0.0, 1.0, 1.0);
      node
    })
    .collect();

  snap_nodes(&mut nodes, 10.0);

  let xs: Vec<f64> = nodes.iter().map(|n| n.rect.x).collect();
  assert_eq!(xs, vec![10.0, 10.0, 20.0, 20.0]);
}
