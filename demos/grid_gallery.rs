//! Grid demo: a responsive card gallery using `repeat(auto-fit, ...)` and a
//! dashboard with a spanning header.
//!
//! Run with `cargo run --example grid_gallery`.

use anyhow::Result;
use boxflow::prelude::*;
use boxflow::{parse_template, serialize};

fn main() -> Result<()> {
  let ctx = LayoutContext::new(800.0, 600.0);

  // Cards reflow as the container narrows; auto-fit collapses unused
  // tracks.
  for width in [460.0, 340.0, 220.0] {
    let mut gallery = Node::new().add_children((0..4).map(|i| {
      let mut card = Node::new().with_text(format!("card {i}"));
      card.style.height = Length::Px(60.0);
      card
    }));
    gallery.style.display = Display::Grid;
    gallery.style.grid_template_columns = parse_template("repeat(auto-fill, 100px)")?;
    gallery.style.grid_gap = 10.0;
    gallery.style.width = Length::Px(width);

    layout(&mut gallery, Constraints::loose(800.0, 600.0), &ctx);
    let columns = gallery
      .children
      .iter()
      .filter(|c| c.rect.y == gallery.children[0].rect.y)
      .count();
    println!("gallery at {width}px: {columns} columns");
  }

  // Dashboard: header spans both columns, sidebar is fixed, content flexes.
  let mut header = Node::new().with_text("header");
  header.style.grid_column_start = 1;
  header.style.grid_column_end = 3;
  header.style.grid_row_start = 1;
  header.style.grid_row_end = 2;

  let mut dashboard = Node::new().add_children([
    header,
    Node::new().with_text("sidebar"),
    Node::new().with_text("content"),
  ]);
  dashboard.style.display = Display::Grid;
  dashboard.style.grid_template_columns = parse_template("150px 1fr")?;
  dashboard.style.grid_template_rows = parse_template("50px 1fr")?;
  dashboard.style.grid_gap = 8.0;
  dashboard.style.width = Length::Px(600.0);
  dashboard.style.height = Length::Px(400.0);

  layout(&mut dashboard, Constraints::loose(800.0, 600.0), &ctx);
  for child in &dashboard.children {
    let r = child.rect;
    println!(
      "{:<8} x={:<6.1} y={:<6.1} w={:<6.1} h={:.1}",
      child.text.as_deref().unwrap_or("?"),
      r.x,
      r.y,
      r.width,
      r.height
    );
  }

  println!("\nserialized dashboard:\n{}", serialize::to_json_pretty(&dashboard)?);
  Ok(())
}
