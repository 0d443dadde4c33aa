//! Fully dynamic connectivity by the level scheme of Holm, de Lichtenberg
//! and Thorup. Level 0 carries a spanning forest of the whole graph; every
//! edge lives at exactly one level, and deleting a tree edge hunts for a
//! replacement from the top level down, promoting the edges it inspects.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::euler_tour_forest::{EulerTourForest, TourAgg};
use crate::lists::splay::Splays;
use crate::lists::Lists;

/// Symmetric adjacency map, doubling as a vertex registry: a vertex with no
/// incident edges still owns an (empty) neighbor set.
#[derive(Debug, Clone)]
struct EdgeSet<V> {
    adj: HashMap<V, HashSet<V>>,
}

impl<V: Clone + Eq + Hash> EdgeSet<V> {
    fn new() -> Self {
        Self {
            adj: HashMap::new(),
        }
    }

    fn add_vertex(&mut self, v: V) -> bool {
        use std::collections::hash_map::Entry;
        match self.adj.entry(v) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                e.insert(HashSet::new());
                true
            }
        }
    }

    fn has_vertex(&self, v: &V) -> bool {
        self.adj.contains_key(v)
    }

    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn remove_vertex(&mut self, v: &V) -> bool {
        match self.adj.remove(v) {
            None => false,
            Some(ns) => {
                for n in ns {
                    if let Some(s) = self.adj.get_mut(&n) {
                        s.remove(v);
                    }
                }
                true
            }
        }
    }

    fn insert(&mut self, u: &V, v: &V) -> bool {
        let added = self.adj.entry(u.clone()).or_default().insert(v.clone());
        self.adj.entry(v.clone()).or_default().insert(u.clone());
        added
    }

    fn remove(&mut self, u: &V, v: &V) -> bool {
        let ru = self.adj.get_mut(u).map_or(false, |s| s.remove(v));
        let rv = self.adj.get_mut(v).map_or(false, |s| s.remove(u));
        debug_assert_eq!(ru, rv);
        ru && rv
    }

    fn contains(&self, u: &V, v: &V) -> bool {
        self.adj.get(u).map_or(false, |s| s.contains(v))
    }

    fn neighbors(&self, v: &V) -> Vec<V> {
        self.adj
            .get(v)
            .map_or_else(Vec::new, |s| s.iter().cloned().collect())
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adj.keys()
    }
}

#[derive(Debug)]
struct Level<V, L> {
    forest: EulerTourForest<V, L>,
    /// Edges on the forest whose level is exactly this one.
    tree_edges: EdgeSet<V>,
    /// Off-forest edges whose level is exactly this one.
    non_tree_edges: EdgeSet<V>,
}

/// An undirected graph under edge and vertex insertions and deletions, with
/// poly-logarithmic connectivity queries.
///
/// Generic over the sequence flavor backing the Euler tour forests; the
/// default is the splay tree.
#[derive(Debug)]
pub struct Graph<V, L = Splays<TourAgg<V>>> {
    num_edges: usize,
    all_edges: EdgeSet<V>,
    levels: Vec<Level<V, L>>,
}

/// Levels required for a graph of this many edges.
fn levels_for(num_edges: usize) -> usize {
    if num_edges == 0 {
        0
    } else {
        num_edges.ilog2() as usize + 1
    }
}

impl<V, L> Graph<V, L>
where
    V: Clone + Eq + Hash + Debug,
    L: Lists<TourAgg<V>>,
{
    pub fn new() -> Self {
        Self {
            num_edges: 0,
            all_edges: EdgeSet::new(),
            levels: Vec::new(),
        }
    }

    pub fn from_vertices(vs: impl IntoIterator<Item = V>) -> Self {
        let mut g = Self::new();
        for v in vs {
            g.insert_vertex(v);
        }
        g
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_vertices(&self) -> usize {
        self.all_edges.num_vertices()
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.all_edges.has_vertex(v)
    }

    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.all_edges.contains(u, v)
    }

    /// Whether u and v are connected by some path. None if either vertex is
    /// unknown, which is distinct from a definite no.
    pub fn connected(&mut self, u: &V, v: &V) -> Option<bool> {
        if !self.all_edges.has_vertex(u) || !self.all_edges.has_vertex(v) {
            return None;
        }
        if u == v {
            return Some(true);
        }
        match self.levels.first_mut() {
            None => Some(false),
            Some(level) => level.forest.connected(u, v),
        }
    }

    /// Number of vertices in v's connected component, 0 for an unknown
    /// vertex.
    pub fn component_size(&mut self, v: &V) -> usize {
        match self.levels.first_mut() {
            None => usize::from(self.all_edges.has_vertex(v)),
            Some(level) => level.forest.component_size(v),
        }
    }

    /// Vertex sets of the spanning trees at the given level. Diagnostics
    /// only; panics if the level does not exist.
    pub fn level_trees(&mut self, level: usize) -> Vec<Vec<V>> {
        self.levels[level].forest.components()
    }

    /// No-op on a known vertex.
    pub fn insert_vertex(&mut self, v: V) -> bool {
        if !self.all_edges.add_vertex(v.clone()) {
            return false;
        }
        for level in &mut self.levels {
            level.forest.insert_vertex(v.clone());
        }
        true
    }

    /// Deletes every edge incident to v, then v itself. No-op on an unknown
    /// vertex.
    pub fn delete_vertex(&mut self, v: &V) -> bool {
        if !self.all_edges.has_vertex(v) {
            return false;
        }
        for y in self.all_edges.neighbors(v) {
            self.delete_edge(v, &y);
        }
        for level in &mut self.levels {
            level.forest.delete_vertex(v);
            level.tree_edges.remove_vertex(v);
            level.non_tree_edges.remove_vertex(v);
        }
        self.all_edges.remove_vertex(v);
        true
    }

    /// Inserts the edge {u, v} at level 0, as a tree edge iff it joins two
    /// components. No-op on a self-loop, a duplicate edge, or an unknown
    /// endpoint.
    pub fn insert_edge(&mut self, u: &V, v: &V) -> bool {
        if u == v || self.all_edges.contains(u, v) {
            return false;
        }
        if !self.all_edges.has_vertex(u) || !self.all_edges.has_vertex(v) {
            return false;
        }
        log::trace!("insert edge {u:?}-{v:?}");
        let wanted = levels_for(self.num_edges + 1);
        if self.levels.len() < wanted {
            let vs: Vec<V> = self.all_edges.vertices().cloned().collect();
            while self.levels.len() < wanted {
                log::debug!("growing to {} levels", self.levels.len() + 1);
                self.levels.push(Level {
                    forest: EulerTourForest::discrete_forest(vs.iter().cloned()),
                    tree_edges: EdgeSet::new(),
                    non_tree_edges: EdgeSet::new(),
                });
            }
        }
        let level = &mut self.levels[0];
        if level.forest.insert_edge(u, v) {
            level.tree_edges.insert(u, v);
        } else {
            level.non_tree_edges.insert(u, v);
        }
        self.all_edges.insert(u, v);
        self.num_edges += 1;
        true
    }

    /// Deletes the edge {u, v}. A deleted tree edge triggers the hunt for a
    /// replacement, scanning levels from the top down: at each level the
    /// smaller side of the broken tree has its tree edges promoted one level
    /// up, and its non-tree edges are either promoted (both endpoints
    /// inside) or found to reconnect the cut. No-op on an absent edge.
    pub fn delete_edge(&mut self, u: &V, v: &V) -> bool {
        if u == v || !self.all_edges.remove(u, v) {
            return false;
        }
        log::trace!("delete edge {u:?}-{v:?}");
        self.num_edges -= 1;
        let top = self.levels.len();
        for i in (0..top).rev() {
            if !self.levels[i].forest.delete_edge(u, v) {
                // The edge sits off-forest at exactly one level; elsewhere
                // this is a no-op.
                self.levels[i].non_tree_edges.remove(u, v);
                continue;
            }
            // The level-i tree split in two; work on the smaller side.
            self.levels[i].tree_edges.remove(u, v);
            let side_u = self.levels[i].forest.component_size(u);
            let side_v = self.levels[i].forest.component_size(v);
            let anchor = if side_u <= side_v { u } else { v };
            let small: Vec<V> = self.levels[i]
                .forest
                .tour(anchor)
                .expect("Algorithm error: endpoint missing from its level forest")
                .into_iter()
                .filter(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect();
            let small_set: HashSet<V> = small.iter().cloned().collect();
            if i + 1 < top {
                for x in &small {
                    for y in self.levels[i].tree_edges.neighbors(x) {
                        log::debug!("promote tree edge {x:?}-{y:?} to level {}", i + 1);
                        self.levels[i].tree_edges.remove(x, &y);
                        self.levels[i + 1].tree_edges.insert(x, &y);
                        let linked = self.levels[i + 1].forest.insert_edge(x, &y);
                        assert!(
                            linked,
                            "Algorithm error: promoted edge already connected one level up"
                        );
                    }
                }
            }
            let mut replacement = None;
            'hunt: for x in &small {
                for y in self.levels[i].non_tree_edges.neighbors(x) {
                    if small_set.contains(&y) {
                        // Both endpoints inside: cannot reconnect, punish it
                        // one level up (when a level up exists).
                        if i + 1 < top {
                            log::debug!("promote non-tree edge {x:?}-{y:?} to level {}", i + 1);
                            self.levels[i].non_tree_edges.remove(x, &y);
                            self.levels[i + 1].non_tree_edges.insert(x, &y);
                        }
                    } else {
                        replacement = Some((x.clone(), y));
                        break 'hunt;
                    }
                }
            }
            if let Some((c, d)) = replacement {
                log::debug!("replace {u:?}-{v:?} with {c:?}-{d:?} at level {i}");
                self.levels[i].non_tree_edges.remove(&c, &d);
                self.levels[i].tree_edges.insert(&c, &d);
                let linked = self.levels[i].forest.insert_edge(&c, &d);
                assert!(
                    linked,
                    "Algorithm error: replacement does not reconnect its level"
                );
                for level in &mut self.levels[..i] {
                    let cut = level.forest.delete_edge(u, v);
                    assert!(cut, "Algorithm error: tree edge missing from a lower level");
                    let linked = level.forest.insert_edge(&c, &d);
                    assert!(
                        linked,
                        "Algorithm error: replacement already connected at a lower level"
                    );
                }
                return true;
            }
        }
        true
    }
}

impl<V, L> Default for Graph<V, L>
where
    V: Clone + Eq + Hash + Debug,
    L: Lists<TourAgg<V>>,
{
    fn default() -> Self {
        Self::new()
    }
}
