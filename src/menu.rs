use std::io::{
  self,
  Write,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Choice {
  Insert,
  Search,
  Remove,
  Destroy,
  Display,
  Exit,
}

impl Choice {
  pub fn parse(input: &str) -> Option<Self> {
    match input {
      "1" => Some(Self::Insert),
      "2" => Some(Self::Search),
      "3" => Some(Self::Remove),
      "4" => Some(Self::Destroy),
      "5" => Some(Self::Display),
      "6" => Some(Self::Exit),
      _ => None,
    }
  }
}

pub fn banner() {
  println!();
  println!("==========================================");
  println!("          red-black tree workbench");
  println!("==========================================");
  println!("1. Insert a key");
  println!("2. Search for a key");
  println!("3. Remove a key");
  println!("4. Delete the entire tree");
  println!("5. Display the tree");
  println!("6. Exit");
  println!("------------------------------------------");
  print!("Enter your choice: ");
  let _ = io::stdout().flush();
}
