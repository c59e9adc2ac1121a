use super::prelude::*;

use rand::seq::SliceRandom;

fn build(keys: &[Key]) -> RbTree {
  let mut tree = RbTree::new();
  for &key in keys {
    tree.insert(key).unwrap();
  }
  tree
}

fn visits(tree: &RbTree) -> Vec<Visit> {
  let mut out = Vec::new();
  tree.walk(|visit| out.push(visit));
  out
}

fn v(key: Key, color: Color, depth: usize) -> Visit {
  Visit { key, color, depth }
}

#[test]
fn test_empty_tree() {
  let mut tree = RbTree::new();

  assert_eq!(tree.len(), 0);
  assert!(tree.is_empty());
  assert!(!tree.contains(7));
  assert_eq!(tree.remove(7), Err(RbError::NotFound));

  let stats = tree.check().unwrap();
  assert_eq!(stats.nodes(), 0);
  assert_eq!(stats.height(), 0);
  assert_eq!(stats.black_height(), 0);

  assert!(visits(&tree).is_empty());
}

#[test]
fn test_first_insert_is_black_root() {
  let tree = build(&[10]);

  assert_eq!(visits(&tree), vec![v(10, Color::Black, 0)]);

  let stats = tree.check().unwrap();
  assert_eq!(stats.nodes(), 1);
  assert_eq!(stats.height(), 1);
  assert_eq!(stats.black_height(), 1);
}

#[test]
fn test_insert_rotates_into_balance() {
  // Ascending run forces the zig-zig rotation on the third key.
  let tree = build(&[10, 20, 30]);

  assert_eq!(
    visits(&tree),
    vec![
      v(30, Color::Red, 1),
      v(20, Color::Black, 0),
      v(10, Color::Red, 1),
    ]
  );
  tree.check().unwrap();
}

#[test]
fn test_insert_recolors_on_red_uncle() {
  let tree = build(&[10, 20, 30, 5]);

  assert_eq!(
    visits(&tree),
    vec![
      v(30, Color::Black, 1),
      v(20, Color::Black, 0),
      v(10, Color::Black, 1),
      v(5, Color::Red, 2),
    ]
  );
  tree.check().unwrap();
}

#[test]
fn test_duplicate_insert_leaves_tree_untouched() {
  let mut tree = build(&[10, 20, 30, 5]);
  let before = visits(&tree);
  let stats_before = tree.check().unwrap();

  assert_eq!(tree.insert(10), Err(RbError::Duplicate));
  assert_eq!(tree.insert(5), Err(RbError::Duplicate));

  assert_eq!(tree.len(), 4);
  assert_eq!(visits(&tree), before);
  assert_eq!(tree.check().unwrap(), stats_before);
}

#[test]
fn test_contains_hits_and_misses() {
  let tree = build(&[8, 3, 13, 1, 6, 11, 17]);

  for key in [8, 3, 13, 1, 6, 11, 17] {
    assert!(tree.contains(key));
  }
  for key in [0, 2, 7, 9, 18, -5] {
    assert!(!tree.contains(key));
  }
}

#[test]
fn test_remove_red_leaf() {
  let mut tree = build(&[10, 20, 30]);

  tree.remove(10).unwrap();

  assert_eq!(
    visits(&tree),
    vec![v(30, Color::Red, 1), v(20, Color::Black, 0)]
  );
  tree.check().unwrap();
}

#[test]
fn test_remove_node_with_single_child() {
  let mut tree = build(&[10, 20, 30, 40]);

  // 30 is black with a lone red child; the child is spliced in and
  // blackened.
  tree.remove(30).unwrap();

  assert_eq!(
    visits(&tree),
    vec![
      v(40, Color::Black, 1),
      v(20, Color::Black, 0),
      v(10, Color::Black, 1),
    ]
  );
  assert!(!tree.contains(30));
  tree.check().unwrap();
}

#[test]
fn test_remove_root_swaps_in_successor() {
  let mut tree = build(&[10, 20, 30, 5]);

  // The root has two children, so its in-order successor 30 takes over the
  // slot and the physical unlink happens at a black leaf.
  tree.remove(20).unwrap();

  assert!(!tree.contains(20));
  assert!(tree.contains(30));
  assert_eq!(tree.len(), 3);
  assert_eq!(
    visits(&tree),
    vec![
      v(30, Color::Black, 1),
      v(10, Color::Black, 0),
      v(5, Color::Black, 1),
    ]
  );
  tree.check().unwrap();
}

#[test]
fn test_remove_black_leaf_recolors_sibling() {
  let mut tree = build(&[10, 20, 30, 5]);
  tree.remove(5).unwrap();

  // Both children of the root are black leaves now; taking one forces the
  // sibling to turn red.
  tree.remove(10).unwrap();

  assert_eq!(
    visits(&tree),
    vec![v(30, Color::Red, 1), v(20, Color::Black, 0)]
  );
  tree.check().unwrap();
}

#[test]
fn test_remove_with_red_sibling() {
  let mut tree = build(&[10, 20, 30, 25, 35, 40]);

  // 10 is a black leaf whose sibling subtree is red; the fixup first
  // rotates the sibling up, then resolves against the new black sibling.
  tree.remove(10).unwrap();

  assert_eq!(
    visits(&tree),
    vec![
      v(40, Color::Red, 2),
      v(35, Color::Black, 1),
      v(30, Color::Black, 0),
      v(25, Color::Red, 2),
      v(20, Color::Black, 1),
    ]
  );
  assert_eq!(tree.len(), 5);
  tree.check().unwrap();
}

#[test]
fn test_remove_missing_key() {
  let mut tree = build(&[10, 20, 30]);
  let before = visits(&tree);

  assert_eq!(tree.remove(15), Err(RbError::NotFound));
  assert_eq!(tree.remove(-3), Err(RbError::NotFound));

  assert_eq!(tree.len(), 3);
  assert_eq!(visits(&tree), before);
}

#[test]
fn test_remove_then_absent_in_bulk() {
  let keys: Vec<Key> = (1..=64).collect();
  let mut tree = build(&keys);

  for key in (2..=64).step_by(2) {
    tree.remove(key).unwrap();
    tree.check().unwrap();
  }

  assert_eq!(tree.len(), 32);
  for key in (1..=64).step_by(2) {
    assert!(tree.contains(key));
  }
  for key in (2..=64).step_by(2) {
    assert!(!tree.contains(key));
  }
}

#[test]
fn test_clear_empties_and_rebuilds() {
  let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);

  tree.clear();
  assert!(tree.is_empty());
  assert_eq!(tree.check().unwrap().nodes(), 0);

  // Clearing an empty tree is a no-op, not an error.
  tree.clear();
  assert!(tree.is_empty());

  tree.insert(42).unwrap();
  assert!(tree.contains(42));
  assert_eq!(tree.len(), 1);
  tree.check().unwrap();
}

#[test]
fn test_height_stays_logarithmic() {
  let keys: Vec<Key> = (1..=1000).collect();
  let tree = build(&keys);

  let stats = tree.check().unwrap();
  assert_eq!(stats.nodes(), 1000);

  let bound = 2.0 * 1001f64.log2();
  assert!(
    (stats.height() as f64) <= bound,
    "height {} exceeds {bound}",
    stats.height()
  );
}

#[test]
fn test_randomized_churn_preserves_invariants() {
  let mut rng = rand::rng();
  let mut keys: Vec<Key> = (0..400).collect();
  keys.shuffle(&mut rng);

  let mut tree = RbTree::new();
  for (index, &key) in keys.iter().enumerate() {
    tree.insert(key).unwrap();
    if index % 100 == 99 {
      tree.check().unwrap();
    }
  }
  assert_eq!(tree.len(), 400);

  let (gone, kept) = keys.split_at(200);
  let mut gone = gone.to_vec();
  gone.shuffle(&mut rng);
  for (index, &key) in gone.iter().enumerate() {
    tree.remove(key).unwrap();
    if index % 50 == 49 {
      tree.check().unwrap();
    }
  }
  tree.check().unwrap();
  assert_eq!(tree.len(), 200);

  for &key in &gone {
    assert!(!tree.contains(key));
  }
  for &key in kept {
    assert!(tree.contains(key));
  }
}

#[test]
fn test_shared_tree_across_threads() {
  let shared = SharedTree::new();

  std::thread::scope(|scope| {
    for worker in 0..4i64 {
      let shared = &shared;
      scope.spawn(move || {
        for key in (worker * 100)..(worker * 100 + 100) {
          shared.insert(key).unwrap();
        }
      });
    }
  });

  assert_eq!(shared.len(), 400);
  shared.check().unwrap();

  let mut seen = Vec::new();
  shared.walk(|visit| seen.push(visit.key));
  let descending: Vec<Key> = (0..400).rev().collect();
  assert_eq!(seen, descending);

  shared.remove(250).unwrap();
  assert!(!shared.contains(250));
  assert_eq!(shared.remove(250), Err(RbError::NotFound));

  shared.clear();
  assert!(shared.is_empty());
}
