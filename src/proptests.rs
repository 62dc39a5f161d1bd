use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

/// Checks every structural invariant below `id` and returns the keys stored
/// there (relative to that node's universe). Unallocated clusters count as
/// empty.
fn validate_node(t: &VebTree, id: NodeId) -> BTreeSet<u64> {
    let node = t.nodes[id];
    let mut keys = BTreeSet::new();
    let summary_id = t.nodes.summary(id);
    let clusters = || {
        (0..node.upper_sqrt()).map(move |high| {
            let cluster = t.nodes.cluster(id, high).map(|c| validate_node(t, c));
            (high, cluster.unwrap_or_default())
        })
    };

    let (min, max) = match (node.min(), node.max()) {
        (None, None) => {
            if let Some(summary) = summary_id {
                assert!(
                    validate_node(t, summary).is_empty(),
                    "empty node must have an empty summary"
                );
                for (high, cluster) in clusters() {
                    assert!(cluster.is_empty(), "empty node must have empty cluster {high}");
                }
            }
            return keys;
        }
        (Some(min), Some(max)) => (min, max),
        other => panic!("min and max must be empty together, got {other:?}"),
    };
    assert!(min <= max, "min {min} > max {max}");
    assert!(max < node.universe(), "max {max} outside 2^{}", node.bits);

    keys.insert(min);
    keys.insert(max);
    if node.is_leaf() {
        assert!(summary_id.is_none(), "base case must not have children");
        return keys;
    }
    let Some(summary_id) = summary_id else {
        assert_eq!(min, max, "a node holding two keys must have a summary");
        return keys;
    };

    let summary = validate_node(t, summary_id);
    let mut clustered = BTreeSet::new();
    for (high, cluster) in clusters() {
        assert_eq!(
            summary.contains(&high),
            !cluster.is_empty(),
            "summary must index exactly the non-empty clusters (cluster {high})"
        );
        for low in cluster {
            let x = node.join(high, low);
            assert_eq!(node.split(x), (high, low));
            assert_ne!(x, min, "cached min must not be stored in a cluster");
            clustered.insert(x);
        }
    }
    if min == max {
        assert!(clustered.is_empty(), "single-key node must have empty clusters");
    } else {
        assert_eq!(clustered.last(), Some(&max), "max must be stored in a cluster");
        assert!(clustered.first().is_some_and(|&first| first > min));
    }

    keys.extend(clustered);
    keys
}

fn validate_tree(t: &VebTree) -> Vec<i64> {
    let keys: Vec<i64> = validate_node(t, t.root)
        .into_iter()
        .map(|x| x as i64)
        .collect();
    assert_eq!(keys.len(), t.len(), "reachable keys must match VebTree::len");
    assert_eq!(t.min(), keys.first().copied());
    assert_eq!(t.max(), keys.last().copied());
    keys
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 8)]
    Insert(u16),
    #[proptest(weight = 5)]
    Remove(u16),
    #[proptest(weight = 2)]
    Contains(u16),
    #[proptest(weight = 2)]
    Successor(u16),
    #[proptest(weight = 2)]
    Predecessor(u16),
    Clear,
}

/// Maps a raw key into `[-4, universe + 4)` so a few keys fall outside.
fn key(raw: u16, universe: i64) -> i64 {
    i64::from(raw) % (universe + 8) - 4
}

fn lazy_config() -> Config {
    Config {
        allocation: Allocation::Lazy,
        ..Config::default()
    }
}

fn universe_strategy() -> impl Strategy<Value = i64> {
    (1u32..=10).prop_map(|bits| 1i64 << bits)
}

fn config_strategy() -> impl Strategy<Value = Config> {
    prop_oneof![Just(Allocation::Eager), Just(Allocation::Lazy)]
        .prop_map(|allocation| Config {
            allocation,
            ..Config::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(
        universe in universe_strategy(),
        config in config_strategy(),
        ops in prop::collection::vec(any::<Op>(), 0..=400),
    ) {
        let mut t = VebTree::with_config(universe, config).unwrap();
        let mut m: BTreeSet<i64> = BTreeSet::new();
        let in_range = |k: i64| (0..universe).contains(&k);

        for op in ops {
            match op {
                Op::Insert(raw) => {
                    let k = key(raw, universe);
                    if in_range(k) {
                        prop_assert_eq!(t.insert(k), Ok(m.insert(k)));
                    } else {
                        prop_assert_eq!(t.insert(k), Err(VebError::OutOfRange { key: k, universe }));
                    }
                }
                Op::Remove(raw) => {
                    let k = key(raw, universe);
                    if in_range(k) {
                        prop_assert_eq!(t.remove(k), Ok(m.remove(&k)));
                    } else {
                        prop_assert_eq!(t.remove(k), Err(VebError::OutOfRange { key: k, universe }));
                    }
                }
                Op::Contains(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(t.contains(k), m.contains(&k));
                }
                Op::Successor(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(t.successor(k), m.range(k + 1..).next().copied());
                }
                Op::Predecessor(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(t.predecessor(k), m.range(..k).next_back().copied());
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.min(), m.first().copied());
            prop_assert_eq!(t.max(), m.last().copied());
        }

        let keys = validate_tree(&t);
        let expected: Vec<i64> = m.iter().copied().collect();
        prop_assert_eq!(&keys, &expected);
        prop_assert_eq!(t.iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(t.iter().rev().collect::<Vec<_>>(), expected.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn prop_membership_round_trip(
        universe in universe_strategy(),
        config in config_strategy(),
        raw in prop::collection::vec(any::<u16>(), 0..=200),
    ) {
        let keys: BTreeSet<i64> = raw.into_iter().map(|r| i64::from(r) % universe).collect();
        let mut t = VebTree::with_config(universe, config).unwrap();
        for &k in &keys {
            t.insert(k).unwrap();
        }

        let present: BTreeSet<i64> = (0..universe).filter(|&k| t.contains(k)).collect();
        prop_assert_eq!(&present, &keys);

        // Successor/predecessor walk the sorted set in both directions.
        let sorted: Vec<i64> = keys.iter().copied().collect();
        for pair in sorted.windows(2) {
            prop_assert_eq!(t.successor(pair[0]), Some(pair[1]));
            prop_assert_eq!(t.predecessor(pair[1]), Some(pair[0]));
        }
        if let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) {
            prop_assert_eq!(t.predecessor(first), None);
            prop_assert_eq!(t.successor(last), None);
        }
    }

    #[test]
    fn prop_lazy_matches_eager(
        universe in universe_strategy(),
        ops in prop::collection::vec(any::<Op>(), 0..=200),
    ) {
        let mut eager = VebTree::new(universe).unwrap();
        let mut lazy = VebTree::with_config(universe, lazy_config()).unwrap();

        for op in ops {
            match op {
                Op::Insert(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(eager.insert(k), lazy.insert(k));
                }
                Op::Remove(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(eager.remove(k), lazy.remove(k));
                }
                Op::Contains(raw) | Op::Successor(raw) | Op::Predecessor(raw) => {
                    let k = key(raw, universe);
                    prop_assert_eq!(eager.contains(k), lazy.contains(k));
                    prop_assert_eq!(eager.successor(k), lazy.successor(k));
                    prop_assert_eq!(eager.predecessor(k), lazy.predecessor(k));
                }
                Op::Clear => {
                    eager.clear();
                    lazy.clear();
                }
            }
        }

        prop_assert_eq!(validate_tree(&eager), validate_tree(&lazy));
        prop_assert!(lazy.node_count() <= eager.node_count());
    }
}

#[test]
fn exhaustive_insert_remove_order_universe_8() {
    let keys: Vec<i64> = (0..8).collect();

    // Heap's algorithm: each step swaps one pair, visiting all 8! orders.
    let mut order = keys.clone();
    let mut counters = [0usize; 8];
    let mut i = 1;
    let mut visited = 0;
    loop {
        for config in [Config::default(), lazy_config()] {
            let mut t = VebTree::with_config(8, config).unwrap();
            for &k in &order {
                assert_eq!(t.insert(k), Ok(true));
            }
            assert_eq!(validate_tree(&t), keys, "order {order:?}");

            // Remove in the same order the keys went in.
            let mut m: BTreeSet<i64> = keys.iter().copied().collect();
            for &k in &order {
                assert_eq!(t.remove(k), Ok(true));
                m.remove(&k);
                assert_eq!(validate_tree(&t), m.iter().copied().collect::<Vec<_>>());
            }
            assert!(t.is_empty());
        }
        visited += 1;

        while i < order.len() && counters[i] >= i {
            counters[i] = 0;
            i += 1;
        }
        if i == order.len() {
            break;
        }
        order.swap(if i % 2 == 0 { 0 } else { counters[i] }, i);
        counters[i] += 1;
        i = 1;
    }
    assert_eq!(visited, 40_320);
}

#[test]
fn exhaustive_subsets_universe_16() {
    for mask in 0u32..(1 << 16) {
        let expected: Vec<i64> = (0..16).filter(|k| mask & (1 << k) != 0).collect();
        for config in [Config::default(), lazy_config()] {
            let mut t = VebTree::with_config(16, config).unwrap();
            for &k in &expected {
                t.insert(k).unwrap();
            }
            assert_eq!(validate_tree(&t), expected, "mask {mask:#06x}");

            for k in 0..16 {
                assert_eq!(
                    t.successor(k),
                    expected.iter().copied().find(|&e| e > k),
                    "successor({k}) mask {mask:#06x}"
                );
                assert_eq!(
                    t.predecessor(k),
                    expected.iter().rev().copied().find(|&e| e < k),
                    "predecessor({k}) mask {mask:#06x}"
                );
            }
        }
    }
}
