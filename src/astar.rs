//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which hands the parent of the expanded node to the successor function, so that move costs may
//! depend on the direction a node was entered from.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

const NO_PARENT: usize = usize::MAX;

/// A node as discovered by the search. Nodes live in an append-only arena and refer to their
/// parent by index; a cheaper route to the same node appends a new entry instead of rewriting
/// the old one.
struct SearchNode<N, C> {
    node: N,
    parent: usize,
    cost: C,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of the deepest node first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

fn reverse_path<N: Clone, C>(arena: &[SearchNode<N, C>], goal: usize) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(arena.get(goal), |n| arena.get(n.parent))
        .map(|n| n.node.clone())
        .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` holds for an expanded node, returning the path from
/// `start` to that node together with its accumulated cost. The successor function receives the
/// parent of the node being expanded, if any. At most `max_expansions` nodes are expanded when a
/// limit is given; running out counts as failure.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_expansions: Option<usize>,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(Option<&N>, &N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut arena = vec![SearchNode {
        node: start.clone(),
        parent: NO_PARENT,
        cost: C::zero(),
    }];
    let mut best: FxIndexMap<N, usize> = FxIndexMap::default();
    best.insert(start.clone(), 0);
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut expansions = 0;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let current = &arena[index];
            // The node may have been queued several times if a cheaper route to it was found
            // later on. Only the entry recorded in the best-cost table is expanded.
            if best.get(&current.node) != Some(&index) {
                continue;
            }
            if success(&current.node) {
                trace!(
                    "Goal reached after {} expansions, {} nodes discovered",
                    expansions,
                    best.len()
                );
                return Some((reverse_path(&arena, index), cost));
            }
            if max_expansions.is_some_and(|limit| expansions >= limit) {
                debug!("Search aborted after {} expansions", expansions);
                return None;
            }
            expansions += 1;
            let parent = arena.get(current.parent).map(|p| &p.node);
            successors(parent, &current.node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n = arena.len(); // index for successor
            match best.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    arena.push(SearchNode {
                        node: e.key().clone(),
                        parent: index,
                        cost: new_cost,
                    });
                    e.insert(n);
                }
                Occupied(mut e) => {
                    if arena[*e.get()].cost > new_cost {
                        h = heuristic(e.key());
                        arena.push(SearchNode {
                            node: e.key().clone(),
                            parent: index,
                            cost: new_cost,
                        });
                        e.insert(n);
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    trace!("Frontier exhausted after {} expansions", expansions);
    None
}
