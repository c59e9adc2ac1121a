use std::io::{
  self,
  Write,
};

use log::{
  LevelFilter,
  debug,
  warn,
};
use redblack_tree::prelude::*;

mod menu;
mod render;

use menu::Choice;

fn init_logging() {
  use simplelog::{
    ColorChoice,
    Config,
    TermLogger,
    TerminalMode,
  };

  let _ = TermLogger::init(
    LevelFilter::Info,
    Config::default(),
    TerminalMode::Mixed,
    ColorChoice::Auto,
  );
}

fn read_line(stdin: &io::Stdin) -> Option<String> {
  let mut buf = String::new();
  match stdin.read_line(&mut buf) {
    Ok(0) => None,
    Ok(_) => Some(buf),
    Err(err) => {
      warn!("stdin read failed: {err}");
      None
    }
  }
}

fn prompt_key(stdin: &io::Stdin) -> Option<Key> {
  print!("Enter the key: ");
  let _ = io::stdout().flush();

  let line = read_line(stdin)?;
  match line.trim().parse::<Key>() {
    Ok(key) => Some(key),
    Err(_) => {
      warn!("rejected non-numeric key {:?}", line.trim());
      println!("That is not an integer key.");
      None
    }
  }
}

fn run_insert(tree: &mut RbTree, stdin: &io::Stdin) {
  let Some(key) = prompt_key(stdin) else {
    return;
  };
  match tree.insert(key) {
    Ok(()) => {
      debug!("inserted {key}");
      println!("Inserted {key}.");
    }
    Err(RbError::Duplicate) => println!("Key {key} is already present."),
    Err(err) => {
      warn!("insert {key} failed: {err:?}");
      println!("Insertion failed: {err:?}.");
    }
  }
}

fn run_search(tree: &RbTree, stdin: &io::Stdin) {
  let Some(key) = prompt_key(stdin) else {
    return;
  };
  if tree.contains(key) {
    println!("Key {key} found.");
  } else {
    println!("Key {key} not found.");
  }
}

fn run_remove(tree: &mut RbTree, stdin: &io::Stdin) {
  let Some(key) = prompt_key(stdin) else {
    return;
  };
  match tree.remove(key) {
    Ok(()) => {
      debug!("removed {key}");
      println!("Removed {key}.");
    }
    Err(RbError::NotFound) => println!("Key {key} not found."),
    Err(err) => {
      warn!("remove {key} failed: {err:?}");
      println!("Removal failed: {err:?}.");
    }
  }
}

fn main() {
  init_logging();

  let mut tree = RbTree::new();
  let stdin = io::stdin();

  loop {
    menu::banner();
    let Some(line) = read_line(&stdin) else {
      // Closed stdin means nobody is driving the menu anymore.
      break;
    };

    match Choice::parse(line.trim()) {
      Some(Choice::Insert) => run_insert(&mut tree, &stdin),
      Some(Choice::Search) => run_search(&tree, &stdin),
      Some(Choice::Remove) => run_remove(&mut tree, &stdin),
      Some(Choice::Destroy) => {
        tree.clear();
        println!("Deleted the entire tree.");
      }
      Some(Choice::Display) => render::print_tree(&tree),
      Some(Choice::Exit) => break,
      None => println!("Invalid choice, pick 1-6."),
    }
  }

  debug!("exiting with {} keys still stored", tree.len());
  println!("Goodbye.");
}
