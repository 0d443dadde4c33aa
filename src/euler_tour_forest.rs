//! Forests of unrooted trees represented by Euler tours over an annotated
//! sequence. Every tree is one list whose elements are directed edges: the
//! self-loop `(v, v)` marks vertex `v`, and each tree edge `{u, v}` appears
//! once per direction. Link, cut, reroot, connectivity and component size
//! all reduce to list operations.

use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::lists::{AggregatedData, Idx, Lists};

/// Counts self-loops, so the aggregate of a tour is its vertex count.
pub struct TourAgg<V> {
    vertices: usize,
    _vertex: PhantomData<V>,
}

impl<V> TourAgg<V> {
    fn of(vertices: usize) -> Self {
        Self {
            vertices,
            _vertex: PhantomData,
        }
    }

    /// Number of self-loops aggregated, i.e. vertices in range.
    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl<V> Default for TourAgg<V> {
    fn default() -> Self {
        Self::of(0)
    }
}

impl<V> Clone for TourAgg<V> {
    fn clone(&self) -> Self {
        Self::of(self.vertices)
    }
}

impl<V> Debug for TourAgg<V> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "TourAgg({})", self.vertices)
    }
}

impl<V: Debug + Clone + PartialEq> AggregatedData for TourAgg<V> {
    type Data = (V, V);

    fn from(data: &(V, V)) -> Self {
        Self::of((data.0 == data.1) as usize)
    }

    fn merge(self, right: Self) -> Self {
        Self::of(self.vertices + right.vertices)
    }
}

/// Rose tree input for [EulerTourForest::from_tree].
#[derive(Debug, Clone)]
pub struct RootedTree<V> {
    pub label: V,
    pub children: Vec<RootedTree<V>>,
}

impl<V> RootedTree<V> {
    pub fn leaf(label: V) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    pub fn node(label: V, children: Vec<RootedTree<V>>) -> Self {
        Self { label, children }
    }
}

/// A forest of trees over vertices of type V, as a directory from directed
/// edges into one [Lists] arena.
pub struct EulerTourForest<V, L> {
    lists: L,
    nodes: HashMap<(V, V), Idx>,
}

impl<V, L> Debug for EulerTourForest<V, L> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("EulerTourForest")
            .field("labels", &self.nodes.len())
            .finish()
    }
}

impl<V, L> EulerTourForest<V, L>
where
    V: Clone + Eq + Hash + Debug,
    L: Lists<TourAgg<V>>,
{
    pub fn new() -> Self {
        Self {
            lists: L::new(0),
            nodes: HashMap::new(),
        }
    }

    /// A forest of singleton trees, one per given vertex.
    pub fn discrete_forest(vs: impl IntoIterator<Item = V>) -> Self {
        let mut forest = Self::new();
        for v in vs {
            forest.insert_vertex(v);
        }
        forest
    }

    /// The forest of a single rooted tree, toured depth-first.
    pub fn from_tree(tree: &RootedTree<V>) -> Self {
        let mut forest = Self::new();
        forest.build_tour(tree);
        forest
    }

    fn build_tour(&mut self, tree: &RootedTree<V>) -> Idx {
        let root = &tree.label;
        let mut seq = self.create_node(root.clone(), root.clone());
        for child in &tree.children {
            let down = self.create_node(root.clone(), child.label.clone());
            let sub = self.build_tour(child);
            let up = self.create_node(child.label.clone(), root.clone());
            seq = self.lists.concat_all([seq, down, sub, up]);
        }
        seq
    }

    fn create_node(&mut self, a: V, b: V) -> Idx {
        let node = self.lists.create((a.clone(), b.clone()));
        let prev = self.nodes.insert((a, b), node);
        assert!(prev.is_none(), "Algorithm error: duplicate tour label");
        node
    }

    fn self_loop(&self, v: &V) -> Option<Idx> {
        self.nodes.get(&(v.clone(), v.clone())).copied()
    }

    /// Whether v is represented in the forest.
    pub fn contains(&self, v: &V) -> bool {
        self.self_loop(v).is_some()
    }

    /// Adds v as a new singleton tree. No-op on a known vertex.
    pub fn insert_vertex(&mut self, v: V) -> bool {
        if self.contains(&v) {
            return false;
        }
        self.create_node(v.clone(), v);
        true
    }

    /// Removes a vertex whose tree is a singleton. No-op on an unknown
    /// vertex; panics if the vertex still has incident tree edges.
    pub fn delete_vertex(&mut self, v: &V) -> bool {
        let Some(node) = self.self_loop(v) else {
            return false;
        };
        assert_eq!(
            self.lists.len(node),
            1,
            "Algorithm error: deleted vertex still has tree edges"
        );
        self.nodes.remove(&(v.clone(), v.clone()));
        self.lists.release(node);
        true
    }

    /// Root of v's list, None for an unknown vertex. Only stable until the
    /// next operation.
    pub fn find_root(&mut self, v: &V) -> Option<Idx> {
        let n = self.self_loop(v)?;
        Some(self.lists.root(n))
    }

    /// None if either vertex is unknown.
    pub fn connected(&mut self, u: &V, v: &V) -> Option<bool> {
        let nu = self.self_loop(u)?;
        let nv = self.self_loop(v)?;
        Some(self.lists.on_same_list(nu, nv))
    }

    /// Whether {u, v} is a tree edge of the forest.
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.nodes.contains_key(&(u.clone(), v.clone()))
    }

    /// Number of vertices in v's tree, 0 for an unknown vertex.
    pub fn component_size(&mut self, v: &V) -> usize {
        match self.self_loop(v) {
            None => 0,
            Some(n) => self.lists.total_agg(n).vertices(),
        }
    }

    /// Rotates v's tour so it starts at v's self-loop. The tour stays the
    /// same up to rotation.
    pub fn reroot(&mut self, v: &V) -> bool {
        match self.self_loop(v) {
            None => false,
            Some(n) => {
                self.reroot_node(n);
                true
            }
        }
    }

    fn reroot_node(&mut self, n: Idx) {
        let (left, right) = self.lists.split_before(n);
        if left != L::EMPTY {
            self.lists.concat(right, left);
        }
    }

    /// Links the trees of u and v with a new edge. Returns false, changing
    /// nothing, on a self-loop, an unknown endpoint, or endpoints already in
    /// the same tree.
    pub fn insert_edge(&mut self, u: &V, v: &V) -> bool {
        if u == v {
            return false;
        }
        let (Some(nu), Some(nv)) = (self.self_loop(u), self.self_loop(v)) else {
            return false;
        };
        if self.lists.on_same_list(nu, nv) {
            return false;
        }
        log::trace!("link {u:?} {v:?}");
        self.reroot_node(nv);
        self.reroot_node(nu);
        let down = self.create_node(u.clone(), v.clone());
        let up = self.create_node(v.clone(), u.clone());
        let (_, rest) = self.lists.split_after(nu);
        self.lists.concat_all([nu, down, nv, up, rest]);
        true
    }

    /// Cuts the edge {u, v}, leaving two independent trees. Returns false,
    /// changing nothing, if the edge is not in the forest.
    pub fn delete_edge(&mut self, u: &V, v: &V) -> bool {
        if u == v {
            return false;
        }
        let Some(&e1) = self.nodes.get(&(u.clone(), v.clone())) else {
            return false;
        };
        let Some(&e2) = self.nodes.get(&(v.clone(), u.clone())) else {
            return false;
        };
        log::trace!("cut {u:?} {v:?}");
        self.nodes.remove(&(u.clone(), v.clone()));
        self.nodes.remove(&(v.clone(), u.clone()));
        // The tour visits the edge twice; the part strictly between the two
        // occurrences is the subtree hanging off the far endpoint.
        let (a, _) = self.lists.split_before(e1);
        let e2_earlier = a != L::EMPTY && self.lists.on_same_list(e2, a);
        if e2_earlier {
            let (outer_left, _) = self.lists.split_before(e2);
            self.lists.split_after(e2);
            let (_, rest) = self.lists.split_after(e1);
            self.lists.concat(outer_left, rest);
        } else {
            self.lists.split_after(e1);
            self.lists.split_before(e2);
            let (_, rest) = self.lists.split_after(e2);
            self.lists.concat(a, rest);
        }
        self.lists.release(e1);
        self.lists.release(e2);
        true
    }

    /// In-order labels of v's tour, None for an unknown vertex.
    pub fn tour(&mut self, v: &V) -> Option<Vec<(V, V)>> {
        let n = self.self_loop(v)?;
        Some(self.lists.to_vec(n))
    }

    /// Every tree of the forest as its in-order tour. Diagnostics only; the
    /// order of trees is not specified.
    pub fn tours(&mut self) -> Vec<Vec<(V, V)>> {
        let loops: Vec<V> = self
            .nodes
            .keys()
            .filter(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect();
        let mut seen: HashSet<V> = HashSet::new();
        let mut out = Vec::new();
        for v in loops {
            if seen.contains(&v) {
                continue;
            }
            let tour = self.tour(&v).expect("self-loop without a node");
            for (a, b) in &tour {
                if a == b {
                    seen.insert(a.clone());
                }
            }
            out.push(tour);
        }
        out
    }

    /// The vertex set of every tree of the forest.
    pub fn components(&mut self) -> Vec<Vec<V>> {
        self.tours()
            .into_iter()
            .map(|tour| {
                tour.into_iter()
                    .filter(|(a, b)| a == b)
                    .map(|(a, _)| a)
                    .collect()
            })
            .collect()
    }
}

impl<V, L> Default for EulerTourForest<V, L>
where
    V: Clone + Eq + Hash + Debug,
    L: Lists<TourAgg<V>>,
{
    fn default() -> Self {
        Self::new()
    }
}
