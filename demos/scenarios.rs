//! Runs a handful of fixed scenarios against `VebTree` and prints the results.
//!
//! `RUST_LOG=debug cargo run --example scenarios` also shows the library's log
//! output.

use veb_rs::{Result, VebTree};

fn show(v: Option<i64>) -> String {
    v.map_or_else(|| "empty".to_string(), |x| x.to_string())
}

fn empty_tree() -> Result<()> {
    let tree = VebTree::new(16)?;
    println!("member 5: {}", tree.contains(5));
    println!("successor of 5: {}", show(tree.successor(5)));
    println!("predecessor of 5: {}", show(tree.predecessor(5)));
    Ok(())
}

fn universe_two() -> Result<()> {
    let mut tree = VebTree::new(2)?;
    tree.insert(0)?;
    println!("member 0: {}, member 1: {}", tree.contains(0), tree.contains(1));
    tree.insert(1)?;
    println!("successor of 0: {}", show(tree.successor(0)));
    println!("predecessor of 1: {}", show(tree.predecessor(1)));
    tree.remove(1)?;
    println!("member 1 after delete: {}", tree.contains(1));
    tree.remove(0)?;
    println!("min: {}, max: {}", show(tree.min()), show(tree.max()));
    Ok(())
}

fn min_max_deletion() -> Result<()> {
    let mut tree = VebTree::new(16)?;
    for k in [1, 5, 10, 15] {
        tree.insert(k)?;
    }
    println!("min: {}, max: {}", show(tree.min()), show(tree.max()));
    for k in [1, 15, 10, 5] {
        tree.remove(k)?;
        println!(
            "after deleting {k}: min: {}, max: {}",
            show(tree.min()),
            show(tree.max())
        );
    }
    Ok(())
}

fn full_tree() -> Result<()> {
    let mut tree = VebTree::new(16)?;
    for k in 0..16 {
        tree.insert(k)?;
    }
    println!("min: {}, max: {}", show(tree.min()), show(tree.max()));
    for k in 0..15 {
        println!(
            "successor of {k}: {}, predecessor of {}: {}",
            show(tree.successor(k)),
            k + 1,
            show(tree.predecessor(k + 1))
        );
    }
    Ok(())
}

fn large_universe() -> Result<()> {
    let mut tree = VebTree::new(1024)?;
    for k in [100, 500, 900] {
        tree.insert(k)?;
    }
    println!("elements: {tree:?} ({} nodes)", tree.node_count());
    println!("successor of 100: {}", show(tree.successor(100)));
    println!("predecessor of 500: {}", show(tree.predecessor(500)));
    Ok(())
}

fn invalid_input() -> Result<()> {
    for universe in [1, 6] {
        match VebTree::new(universe) {
            Ok(_) => println!("universe {universe}: created"),
            Err(err) => println!("universe {universe}: {err}"),
        }
    }
    let mut tree = VebTree::new(16)?;
    for k in [16, -1] {
        if let Err(err) = tree.insert(k) {
            println!("insert {k}: {err}");
        }
    }
    println!("min: {}, max: {}", show(tree.min()), show(tree.max()));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let scenarios: [(&str, fn() -> Result<()>); 6] = [
        ("empty tree", empty_tree),
        ("universe 2", universe_two),
        ("min/max deletion", min_max_deletion),
        ("full tree", full_tree),
        ("large universe", large_universe),
        ("invalid input", invalid_input),
    ];
    for (name, run) in scenarios {
        println!("\n======== {name} ========\n");
        run()?;
    }
    Ok(())
}
