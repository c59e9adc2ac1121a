use redblack_tree::prelude::*;

const STEP: usize = 4;

const RED_PAINT: &str = "\x1b[1;31m";
const BLACK_PAINT: &str = "\x1b[1;30m";
const RESET_PAINT: &str = "\x1b[0m";

/// Prints the tree rotated a quarter turn: rightmost key on the first line,
/// one indent step per level, color spelled out next to each key.
pub fn print_tree(tree: &RbTree) {
  if tree.is_empty() {
    println!("(empty tree)");
    return;
  }

  println!();
  println!("Tree structure:");
  tree.walk(|visit| println!("{}", line_for(visit)));
  println!();
}

fn line_for(visit: Visit) -> String {
  let (paint, label) = match visit.color {
    Color::Red => (RED_PAINT, "RED"),
    Color::Black => (BLACK_PAINT, "BLACK"),
  };
  format!(
    "{:indent$}{}({paint}{label}{RESET_PAINT})",
    "",
    visit.key,
    indent = visit.depth * STEP
  )
}
