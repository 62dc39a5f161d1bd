//! # veb-rs
//!
//! An ordered set of integers drawn from a bounded universe `[0, U)`, backed
//! by a van Emde Boas tree.
//!
//! Membership, insertion, deletion, successor and predecessor all run in
//! `O(log log U)`. The minimum and maximum are cached at the root and read in
//! `O(1)`.
//!
//! ## Example
//!
//! ```rust
//! use veb_rs::VebTree;
//!
//! let mut tree = VebTree::new(16)?;
//! tree.insert(3)?;
//! tree.insert(11)?;
//!
//! assert!(tree.contains(3));
//! assert_eq!(tree.successor(3), Some(11));
//! assert_eq!(tree.predecessor(3), None);
//! assert_eq!((tree.min(), tree.max()), (Some(3), Some(11)));
//! # Ok::<(), veb_rs::VebError>(())
//! ```
//!
//! ## Allocation
//!
//! By default every summary and cluster is built up front, which costs
//! `O(U)` nodes regardless of occupancy. Sparse universes should use
//! [`Allocation::Lazy`], which allocates a summary or cluster only when a key
//! is first inserted into it:
//!
//! ```rust
//! use veb_rs::{Allocation, Config, VebTree};
//!
//! let config = Config {
//!     allocation: Allocation::Lazy,
//!     ..Config::default()
//! };
//! let mut tree = VebTree::with_config(1 << 62, config)?;
//! tree.insert(0)?;
//! tree.insert(1 << 39)?;
//! tree.insert((1 << 62) - 1)?;
//! assert_eq!(tree.predecessor(i64::MAX), Some((1 << 62) - 1));
//! assert_eq!(tree.successor(0), Some(1 << 39));
//! # Ok::<(), veb_rs::VebError>(())
//! ```

#![forbid(unsafe_code)]

mod error;

pub use error::{Result, VebError};

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

// =============================================================================
// Configuration
// =============================================================================

/// How a tree obtains its summary and cluster nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Allocation {
    /// Build every node down to the base cases when the tree is created.
    #[default]
    Eager,
    /// Allocate a summary or cluster on the first insertion into it.
    Lazy,
}

/// Configuration for a [`VebTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Node allocation strategy.
    pub allocation: Allocation,
    /// Upper bound on the number of allocated nodes. Creation (eager) or
    /// insertion (lazy) that would exceed it fails with
    /// [`VebError::AllocationFailure`]. `None` leaves only the handle space
    /// (`u32::MAX - 1` nodes) as a limit.
    pub max_nodes: Option<u64>,
}

// =============================================================================
// Universe arithmetic (high/low split)
// =============================================================================
//
// A universe of size `2^bits` splits into `upper_sqrt = 2^ceil(bits/2)`
// clusters of `lower_sqrt = 2^floor(bits/2)` keys each. Both are powers of two,
// so `high`/`low` are a shift and a mask.

/// Validates a universe size and returns its base-2 logarithm.
fn universe_bits(universe: i64) -> Result<u8> {
    if universe < 2 || universe & (universe - 1) != 0 {
        return Err(VebError::InvalidUniverse { universe });
    }
    Ok(universe.trailing_zeros() as u8)
}

#[inline]
fn lower_bits(bits: u8) -> u8 {
    bits / 2
}

#[inline]
fn upper_bits(bits: u8) -> u8 {
    bits - bits / 2
}

/// Nodes in a fully built subtree over `2^bits` keys, `None` on overflow.
fn full_node_count(bits: u8) -> Option<u64> {
    if bits <= 1 {
        return Some(1);
    }
    let summary = full_node_count(upper_bits(bits))?;
    let cluster = full_node_count(lower_bits(bits))?;
    (1u64 << upper_bits(bits))
        .checked_mul(cluster)?
        .checked_add(summary)?
        .checked_add(1)
}

// =============================================================================
// Node handles
// =============================================================================

/// Index of a node in the [`NodeArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct NodeId(u32);

impl NodeId {
    const NULL: Self = Self(u32::MAX);

    #[inline]
    fn is_null(self) -> bool {
        self == Self::NULL
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Live handles stay below `NodeId::NULL`.
const MAX_NODES: u64 = NodeId::NULL.0 as u64;

// =============================================================================
// Nodes
// =============================================================================

/// `min`/`max` value of an empty node. Keys are below `2^62`, so it never
/// collides with a stored key.
const EMPTY: u64 = u64::MAX;

#[derive(Clone, Copy, Debug)]
struct Node {
    min: u64,
    max: u64,
    /// Summary handle, or `NULL` while unallocated. In eager mode the clusters
    /// follow it contiguously.
    children: NodeId,
    /// Universe size is `2^bits`.
    bits: u8,
}

impl Node {
    #[inline]
    fn new(bits: u8) -> Self {
        Self {
            min: EMPTY,
            max: EMPTY,
            children: NodeId::NULL,
            bits,
        }
    }

    #[inline]
    fn min(&self) -> Option<u64> {
        (self.min != EMPTY).then_some(self.min)
    }

    #[inline]
    fn max(&self) -> Option<u64> {
        (self.max != EMPTY).then_some(self.max)
    }

    /// Universe of size 2: no children, elements live in `min`/`max` only.
    #[inline]
    fn is_leaf(&self) -> bool {
        self.bits <= 1
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.min == EMPTY
    }

    #[inline]
    fn universe(&self) -> u64 {
        1 << self.bits
    }

    #[inline]
    fn upper_sqrt(&self) -> u64 {
        1 << upper_bits(self.bits)
    }

    #[inline]
    fn set_single(&mut self, x: u64) {
        self.min = x;
        self.max = x;
    }

    #[inline]
    fn clear(&mut self) {
        self.min = EMPTY;
        self.max = EMPTY;
    }

    /// `(x / lower_sqrt, x % lower_sqrt)`.
    #[inline]
    fn split(&self, x: u64) -> (u64, u64) {
        let low_bits = lower_bits(self.bits);
        (x >> low_bits, x & ((1 << low_bits) - 1))
    }

    /// `high * lower_sqrt + low`, the inverse of [`Node::split`].
    #[inline]
    fn join(&self, high: u64, low: u64) -> u64 {
        (high << lower_bits(self.bits)) | low
    }
}

// =============================================================================
// Node Arena
// =============================================================================

/// Nodes still to be allocated by a lazy insertion.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
struct Pending {
    nodes: u64,
    clusters: usize,
}

/// Owns every node of a tree. Nodes are only ever appended; the whole arena is
/// released at once when the tree is dropped.
#[derive(Clone)]
struct NodeArena {
    nodes: Vec<Node>,
    /// Lazy mode only: cluster handles keyed by `(parent, high)`.
    clusters: HashMap<(NodeId, u64), NodeId>,
    allocation: Allocation,
    /// Upper bound on `nodes.len()`.
    limit: u64,
    /// `push` may append up to this length; set by `try_reserve`.
    reserved: usize,
}

impl NodeArena {
    fn new(config: Config) -> Self {
        Self {
            nodes: Vec::new(),
            clusters: HashMap::new(),
            allocation: config.allocation,
            limit: config.max_nodes.map_or(MAX_NODES, |max| max.min(MAX_NODES)),
            reserved: 0,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.clusters.capacity() * std::mem::size_of::<((NodeId, u64), NodeId)>()
    }

    fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        self.clusters.shrink_to_fit();
    }

    /// Reserves room for `pending` new nodes. On failure no node is added.
    fn try_reserve(&mut self, pending: Pending) -> Result<()> {
        let failure = || VebError::AllocationFailure {
            requested: pending.nodes,
        };
        let total = (self.nodes.len() as u64)
            .checked_add(pending.nodes)
            .filter(|&total| total <= self.limit)
            .ok_or_else(failure)?;
        let additional = usize::try_from(pending.nodes).map_err(|_| failure())?;
        self.nodes.try_reserve(additional).map_err(|_| failure())?;
        self.clusters
            .try_reserve(pending.clusters)
            .map_err(|_| failure())?;
        self.reserved = total as usize;
        Ok(())
    }

    /// Appends a node into reserved room.
    #[inline]
    fn push(&mut self, node: Node) -> NodeId {
        debug_assert!(
            self.nodes.len() < self.reserved,
            "node allocation exceeds reservation"
        );
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    fn summary(&self, id: NodeId) -> Option<NodeId> {
        let summary = self[id].children;
        (!summary.is_null()).then_some(summary)
    }

    /// Cluster `high` of `id`, `None` if it has not been allocated.
    #[inline]
    fn cluster(&self, id: NodeId, high: u64) -> Option<NodeId> {
        debug_assert!(high < self[id].upper_sqrt());
        match self.allocation {
            Allocation::Eager => self.summary(id).map(|s| NodeId(s.0 + 1 + high as u32)),
            Allocation::Lazy => self.clusters.get(&(id, high)).copied(),
        }
    }

    fn ensure_summary(&mut self, id: NodeId) -> NodeId {
        if let Some(summary) = self.summary(id) {
            return summary;
        }
        let summary = self.push(Node::new(upper_bits(self[id].bits)));
        self[id].children = summary;
        log::trace!("allocated summary {} of node {}", summary.0, id.0);
        summary
    }

    fn ensure_cluster(&mut self, id: NodeId, high: u64) -> NodeId {
        if let Some(cluster) = self.cluster(id, high) {
            return cluster;
        }
        debug_assert_eq!(self.allocation, Allocation::Lazy);
        let cluster = self.push(Node::new(lower_bits(self[id].bits)));
        self.clusters.insert((id, high), cluster);
        log::trace!("allocated cluster {high} of node {} as {}", id.0, cluster.0);
        cluster
    }

    /// Eager mode: materializes the full subtree below `id` as contiguous
    /// runs of summary plus clusters.
    fn build_subtree(&mut self, id: NodeId) {
        let node = self[id];
        if node.is_leaf() {
            return;
        }
        let summary = self.push(Node::new(upper_bits(node.bits)));
        for _ in 0..node.upper_sqrt() {
            self.push(Node::new(lower_bits(node.bits)));
        }
        self[id].children = summary;

        self.build_subtree(summary);
        for high in 0..node.upper_sqrt() {
            self.build_subtree(NodeId(summary.0 + 1 + high as u32));
        }
    }

    /// Empties every node. Lazy arenas drop everything but the root.
    fn reset(&mut self, root: NodeId) {
        match self.allocation {
            Allocation::Eager => {
                for node in &mut self.nodes {
                    node.clear();
                }
            }
            Allocation::Lazy => {
                self.nodes.truncate(root.index() + 1);
                self.clusters.clear();
                self.reserved = self.nodes.len();
                let bits = self[root].bits;
                self[root] = Node::new(bits);
            }
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

// =============================================================================
// VebTree
// =============================================================================

/// An ordered set over the integer universe `[0, U)`, `U` a power of two.
///
/// Dropping the tree releases every node.
#[derive(Clone)]
pub struct VebTree {
    nodes: NodeArena,
    root: NodeId,
    bits: u8,
    len: usize,
    config: Config,
}

impl VebTree {
    /// Creates an empty, eagerly allocated tree over `[0, universe)`.
    ///
    /// Fails with [`VebError::InvalidUniverse`] unless `universe` is a power of
    /// two of at least 2, and with [`VebError::AllocationFailure`] if the nodes
    /// cannot be allocated.
    pub fn new(universe: i64) -> Result<Self> {
        Self::with_config(universe, Config::default())
    }

    /// Creates an empty tree over `[0, universe)` with the given configuration.
    pub fn with_config(universe: i64, config: Config) -> Result<Self> {
        let bits = universe_bits(universe).inspect_err(|err| log::debug!("{err}"))?;

        let nodes = match config.allocation {
            Allocation::Eager => full_node_count(bits).unwrap_or(u64::MAX),
            Allocation::Lazy => 1,
        };
        let mut arena = NodeArena::new(config);
        arena
            .try_reserve(Pending { nodes, clusters: 0 })
            .inspect_err(|err| log::debug!("creating tree over [0, {universe}): {err}"))?;

        let root = arena.push(Node::new(bits));
        if config.allocation == Allocation::Eager {
            arena.build_subtree(root);
        }
        log::debug!(
            "created vEB tree: universe={universe}, allocation={:?}, nodes={}",
            config.allocation,
            arena.len()
        );

        Ok(Self {
            nodes: arena,
            root,
            bits,
            len: 0,
            config,
        })
    }

    /// Size `U` of the key universe.
    #[inline]
    pub fn universe(&self) -> i64 {
        1 << self.bits
    }

    #[inline]
    pub fn config(&self) -> Config {
        self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smallest element, `O(1)`.
    #[inline]
    pub fn min(&self) -> Option<i64> {
        self.nodes[self.root].min().map(|x| x as i64)
    }

    /// Largest element, `O(1)`.
    #[inline]
    pub fn max(&self) -> Option<i64> {
        self.nodes[self.root].max().map(|x| x as i64)
    }

    /// Number of nodes currently allocated.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bytes held by the node arena.
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Removes every element. In lazy mode all nodes below the root are
    /// discarded; call [`VebTree::shrink_to_fit`] to return their memory.
    pub fn clear(&mut self) {
        self.nodes.reset(self.root);
        self.len = 0;
    }

    fn check_key(&self, key: i64) -> Result<u64> {
        if (0..self.universe()).contains(&key) {
            Ok(key as u64)
        } else {
            let err = VebError::OutOfRange {
                key,
                universe: self.universe(),
            };
            log::debug!("{err}");
            Err(err)
        }
    }

    /// Cluster that the summary of `id` lists as non-empty.
    fn indexed_cluster(&self, id: NodeId, high: u64) -> NodeId {
        self.nodes
            .cluster(id, high)
            .expect("summary only indexes allocated clusters")
    }

    // -------------------------------------------------------------------------
    // Member
    // -------------------------------------------------------------------------

    /// Returns `true` if `key` is in the set. Keys outside the universe are
    /// never members.
    pub fn contains(&self, key: i64) -> bool {
        (0..self.universe()).contains(&key) && self.member(self.root, key as u64)
    }

    fn member(&self, mut id: NodeId, mut x: u64) -> bool {
        loop {
            let node = &self.nodes[id];
            if node.min == x || node.max == x {
                return true;
            }
            if node.is_leaf() {
                return false;
            }
            let (high, low) = node.split(x);
            match self.nodes.cluster(id, high) {
                Some(cluster) => {
                    id = cluster;
                    x = low;
                }
                None => return false,
            }
        }
    }

    // -------------------------------------------------------------------------
    // Insert
    // -------------------------------------------------------------------------

    /// Adds `key` to the set.
    ///
    /// Returns `Ok(true)` if the key was newly inserted and `Ok(false)` if it
    /// was already present. Keys outside the universe fail with
    /// [`VebError::OutOfRange`]. In lazy mode, [`VebError::AllocationFailure`]
    /// is returned if the nodes the insertion needs cannot be reserved. On
    /// error the tree is unchanged.
    pub fn insert(&mut self, key: i64) -> Result<bool> {
        let x = self.check_key(key)?;
        if self.member(self.root, x) {
            return Ok(false);
        }

        if self.config.allocation == Allocation::Lazy {
            let pending = self.pending_allocation(self.root, x);
            if pending.nodes > 0 {
                self.nodes
                    .try_reserve(pending)
                    .inspect_err(|err| log::debug!("inserting {key}: {err}"))?;
            }
        }

        self.insert_at(self.root, x);
        self.len += 1;
        Ok(true)
    }

    /// Nodes that inserting the absent key `x` below `id` will allocate.
    ///
    /// Follows the same descent as [`VebTree::insert_at`]. Each level adds at
    /// most a missing summary and the missing cluster; both start empty, so a
    /// missing summary ends the descent.
    fn pending_allocation(&self, mut id: NodeId, mut x: u64) -> Pending {
        let mut pending = Pending::default();
        loop {
            let node = &self.nodes[id];
            let Some(min) = node.min() else {
                return pending;
            };
            if node.is_leaf() {
                return pending;
            }
            let (high, low) = node.split(x.max(min));
            let Some(summary) = self.nodes.summary(id) else {
                pending.nodes += 2;
                pending.clusters += 1;
                return pending;
            };
            match self.nodes.cluster(id, high) {
                None => {
                    pending.nodes += 1;
                    pending.clusters += 1;
                    id = summary;
                    x = high;
                }
                Some(cluster) if self.nodes[cluster].is_empty() => {
                    id = summary;
                    x = high;
                }
                Some(cluster) => {
                    id = cluster;
                    x = low;
                }
            }
        }
    }

    /// Inserts `x`, which must not already be present below `id`.
    fn insert_at(&mut self, id: NodeId, mut x: u64) {
        debug_assert!(x < self.nodes[id].universe());
        let Some(min) = self.nodes[id].min() else {
            self.nodes[id].set_single(x);
            return;
        };

        // The new key takes over the cached minimum; the old minimum is the
        // one stored below.
        if x < min {
            self.nodes[id].min = x;
            x = min;
        }

        if !self.nodes[id].is_leaf() {
            let (high, low) = self.nodes[id].split(x);
            let summary = self.nodes.ensure_summary(id);
            let cluster = self.nodes.ensure_cluster(id, high);
            if self.nodes[cluster].is_empty() {
                self.insert_at(summary, high);
                self.nodes[cluster].set_single(low);
            } else {
                self.insert_at(cluster, low);
            }
        }

        // Non-empty here, so `max` is a real key.
        let node = &mut self.nodes[id];
        if x > node.max {
            node.max = x;
        }
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Removes `key` from the set.
    ///
    /// Returns `Ok(true)` if the key was present and `Ok(false)` otherwise;
    /// removing an absent key never touches the structure. Keys outside the
    /// universe fail with [`VebError::OutOfRange`].
    pub fn remove(&mut self, key: i64) -> Result<bool> {
        let x = self.check_key(key)?;
        if !self.member(self.root, x) {
            return Ok(false);
        }
        self.delete_at(self.root, x);
        self.len -= 1;
        Ok(true)
    }

    /// Deletes `x`, which must be present below `id`.
    fn delete_at(&mut self, id: NodeId, mut x: u64) {
        let node = self.nodes[id];
        if node.min == node.max {
            self.nodes[id].clear();
            return;
        }
        if node.is_leaf() {
            // Both 0 and 1 are present; keep the other one.
            self.nodes[id].set_single(1 - x);
            return;
        }
        let summary = self
            .nodes
            .summary(id)
            .expect("node holding two keys has a summary");

        // Promote the second-smallest element to the cached minimum, then
        // remove it from its cluster instead.
        if node.min == x {
            let first = self.nodes[summary].min;
            x = node.join(first, self.nodes[self.indexed_cluster(id, first)].min);
            self.nodes[id].min = x;
        }

        let (high, low) = node.split(x);
        let cluster = self.indexed_cluster(id, high);
        self.delete_at(cluster, low);

        if self.nodes[cluster].is_empty() {
            self.delete_at(summary, high);
            if node.max == x {
                let max = match self.nodes[summary].max() {
                    None => self.nodes[id].min,
                    Some(last) => node.join(last, self.nodes[self.indexed_cluster(id, last)].max),
                };
                self.nodes[id].max = max;
            }
        } else if node.max == x {
            let max = node.join(high, self.nodes[cluster].max);
            self.nodes[id].max = max;
        }
    }

    // -------------------------------------------------------------------------
    // Successor / Predecessor
    // -------------------------------------------------------------------------

    /// Smallest element strictly greater than `key`. `key` need not be a
    /// member or even inside the universe.
    pub fn successor(&self, key: i64) -> Option<i64> {
        if key < 0 {
            return self.min();
        }
        if key >= self.universe() - 1 {
            return None;
        }
        self.successor_at(self.root, key as u64).map(|x| x as i64)
    }

    /// Largest element strictly less than `key`. `key` need not be a member or
    /// even inside the universe.
    pub fn predecessor(&self, key: i64) -> Option<i64> {
        if key <= 0 {
            return None;
        }
        if key >= self.universe() {
            return self.max();
        }
        self.predecessor_at(self.root, key as u64).map(|x| x as i64)
    }

    fn successor_at(&self, id: NodeId, x: u64) -> Option<u64> {
        let node = &self.nodes[id];
        if node.is_leaf() {
            return (x == 0 && node.max == 1).then_some(1);
        }

        let min = node.min()?;
        if x < min {
            return Some(min);
        }
        let summary = self.nodes.summary(id)?;

        let (high, low) = node.split(x);
        if let Some(cluster) = self.nodes.cluster(id, high) {
            if self.nodes[cluster].max().is_some_and(|max| low < max) {
                return self
                    .successor_at(cluster, low)
                    .map(|offset| node.join(high, offset));
            }
        }

        let next = self.successor_at(summary, high)?;
        Some(node.join(next, self.nodes[self.indexed_cluster(id, next)].min))
    }

    fn predecessor_at(&self, id: NodeId, x: u64) -> Option<u64> {
        let node = &self.nodes[id];
        if node.is_leaf() {
            return (x == 1 && node.min == 0).then_some(0);
        }

        let (min, max) = (node.min()?, node.max()?);
        if x > max {
            return Some(max);
        }
        // The cached minimum is not stored in any cluster.
        let own_min = (min < x).then_some(min);
        let Some(summary) = self.nodes.summary(id) else {
            return own_min;
        };

        let (high, low) = node.split(x);
        if let Some(cluster) = self.nodes.cluster(id, high) {
            if self.nodes[cluster].min().is_some_and(|min| low > min) {
                return self
                    .predecessor_at(cluster, low)
                    .map(|offset| node.join(high, offset));
            }
        }

        match self.predecessor_at(summary, high) {
            None => own_min,
            Some(prev) => Some(node.join(prev, self.nodes[self.indexed_cluster(id, prev)].max)),
        }
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let root = &self.nodes[self.root];
        Iter {
            tree: self,
            front: root.min(),
            back: root.max(),
            remaining: self.len,
        }
    }
}

impl fmt::Debug for VebTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a VebTree {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over a [`VebTree`], created by [`VebTree::iter`].
#[derive(Clone)]
pub struct Iter<'a> {
    tree: &'a VebTree,
    front: Option<u64>,
    back: Option<u64>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front?;
        self.remaining -= 1;
        self.front = if self.remaining > 0 {
            self.tree.successor_at(self.tree.root, x)
        } else {
            None
        };
        Some(x as i64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back?;
        self.remaining -= 1;
        self.back = if self.remaining > 0 {
            self.tree.predecessor_at(self.tree.root, x)
        } else {
            None
        };
        Some(x as i64)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}


#[cfg(test)]
mod proptests;
