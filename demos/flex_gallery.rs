//! Flexbox demo: builds a toolbar-like row and a sidebar column, lays them
//! out and prints the computed rects.
//!
//! Run with `cargo run --example flex_gallery`.

use anyhow::Result;
use boxflow::prelude::*;
use boxflow::style::JustifyContent;

fn dump(label: &str, node: &Node) {
  println!("{label}");
  node.fold_with_depth((), |_, n, depth| {
    let indent = "  ".repeat(depth + 1);
    let r = n.rect;
    println!(
      "{indent}{:<10} x={:<7.1} y={:<7.1} w={:<7.1} h={:.1}",
      n.text.as_deref().unwrap_or("box"),
      r.x,
      r.y,
      r.width,
      r.height
    );
  });
}

fn main() -> Result<()> {
  let ctx = LayoutContext::new(800.0, 600.0);

  let mut toolbar = hstack([
    fixed(80.0, 32.0).with_text("logo"),
    Node::new().with_flex_grow(1.0).with_text("spacer"),
    fixed(64.0, 32.0).with_text("search"),
    fixed(64.0, 32.0).with_text("profile"),
  ])
  .with_width(640.0)
  .with_height(48.0);
  toolbar.style.align_items = AlignItems::Center;
  layout(&mut toolbar, Constraints::loose(800.0, 600.0), &ctx);
  dump("toolbar (row, center, spacer grows):", &toolbar);

  let mut nav = vstack([
    fixed(180.0, 40.0).with_text("inbox"),
    fixed(180.0, 40.0).with_text("drafts"),
    fixed(180.0, 40.0).with_text("archive"),
  ])
  .with_width(200.0)
  .with_height(400.0);
  nav.style.justify_content = JustifyContent::SpaceBetween;
  layout(&mut nav, Constraints::loose(800.0, 600.0), &ctx);
  dump("sidebar (column, space-between):", &nav);

  Ok(())
}
