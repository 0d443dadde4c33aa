use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;
use derivative::Derivative;
use rand::{rngs, Rng, SeedableRng};

use super::{AggregatedData, Idx, Lists};

const EMPTY: Idx = usize::MAX;

fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == EMPTY {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}
fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Node<Ag: AggregatedData> {
    #[derivative(Debug(format_with = "node_fmt"))]
    parent: Idx,
    #[derivative(Debug(format_with = "node2_fmt"))]
    /// Left and right child
    child: [Idx; 2],
    /// Data for this node
    data: Ag::Data,
    /// Aggregated data for this node's subtree
    agg: Ag,
    #[derivative(Debug = "ignore")]
    priority: u32,
    #[derivative(Debug = "ignore")]
    size: usize,
}

/// Treaps (Cartesian trees) keyed by sequence position, a randomized
/// drop-in for [super::splay::Splays]. The generator is owned and seeded
/// by a constant, so runs are reproducible.
pub struct Treaps<Ag: AggregatedData = ()> {
    nodes: Vec<Node<Ag>>,
    free: Vec<Idx>,
    rng: rngs::StdRng,
}

impl<Ag: AggregatedData> Debug for Treaps<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut builder = TreeBuilder::new();
        let _b = builder.add_branch("Treaps");
        for u in 0..self.nodes.len() {
            if self.nodes[u].parent == EMPTY && self.nodes[u].size > 0 {
                self.tree_dbg(u, &mut builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: AggregatedData> Treaps<Ag> {
    fn tree_dbg(&self, u: Idx, tree: &mut TreeBuilder) {
        let n = &self.nodes[u];
        let _b = tree.add_branch(&format!("{n:?}"));
        if n.child == [EMPTY, EMPTY] {
            return;
        }
        for c in n.child {
            if c != EMPTY {
                self.tree_dbg(c, tree);
            } else {
                tree.add_leaf("<no edge>");
            }
        }
    }

    fn size(&self, u: Idx) -> usize {
        if u == EMPTY {
            0
        } else {
            self.nodes[u].size
        }
    }

    fn agg_of(&self, u: Idx) -> Ag {
        if u == EMPTY {
            Ag::default()
        } else {
            self.nodes[u].agg.clone()
        }
    }

    // Call when children are changed. Panics if u is empty.
    fn set_child(&mut self, u: Idx, side: usize, c: Idx) {
        let old = self.nodes[u].child[side];
        if old != EMPTY {
            self.nodes[old].parent = EMPTY;
        }
        self.nodes[u].child[side] = c;
        if c != EMPTY {
            self.nodes[c].parent = u;
        }
        self.recalc(u);
    }

    fn recalc(&mut self, u: Idx) {
        let [l, r] = self.nodes[u].child;
        self.nodes[u].size = self.size(l) + 1 + self.size(r);
        let agg = self
            .agg_of(l)
            .merge(Ag::from(&self.nodes[u].data))
            .merge(self.agg_of(r));
        self.nodes[u].agg = agg;
    }

    /// Merges two roots, keeping u's elements before v's. Larger priority
    /// wins the root.
    fn concat_inner(&mut self, u: Idx, v: Idx) -> Idx {
        if u == EMPTY {
            return v;
        }
        if v == EMPTY {
            return u;
        }
        if self.nodes[u].priority > self.nodes[v].priority {
            let r = self.nodes[u].child[1];
            let new_r = self.concat_inner(r, v);
            self.set_child(u, 1, new_r);
            u
        } else {
            let l = self.nodes[v].child[0];
            let new_l = self.concat_inner(u, l);
            self.set_child(v, 0, new_l);
            v
        }
    }

    /// (First k, rest). u must be a root.
    fn split_k(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        if u == EMPTY {
            return (EMPTY, EMPTY);
        }
        if k == 0 {
            return (EMPTY, u);
        }
        let [l, r] = self.nodes[u].child;
        let sl = self.size(l);
        if k <= sl {
            self.set_child(u, 0, EMPTY);
            let (ll, lr) = self.split_k(l, k);
            self.set_child(u, 0, lr);
            (ll, u)
        } else {
            self.set_child(u, 1, EMPTY);
            let (rl, rr) = self.split_k(r, k - sl - 1);
            self.set_child(u, 1, rl);
            (u, rr)
        }
    }
}

impl<Ag: AggregatedData> Lists<Ag> for Treaps<Ag> {
    fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            rng: rngs::StdRng::seed_from_u64(1457),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let node = Node {
            parent: EMPTY,
            child: [EMPTY, EMPTY],
            size: 1,
            agg: Ag::from(&data),
            data,
            priority: self.rng.gen(),
        };
        match self.free.pop() {
            Some(u) => {
                self.nodes[u] = node;
                u
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, u: Idx) {
        assert!(
            self.nodes[u].parent == EMPTY && self.nodes[u].child == [EMPTY, EMPTY],
            "released node must form a one-element list"
        );
        self.nodes[u].size = 0;
        self.free.push(u);
    }

    fn total_size(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn root(&mut self, u: Idx) -> Idx {
        if u == EMPTY {
            return EMPTY;
        }
        let mut u = u;
        while self.nodes[u].parent != EMPTY {
            u = self.nodes[u].parent;
        }
        u
    }

    fn on_same_list(&mut self, u: Idx, v: Idx) -> bool {
        if u == v {
            return true;
        }
        if u == EMPTY || v == EMPTY {
            return false;
        }
        self.root(u) == self.root(v)
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        &self.nodes[u].data
    }

    fn order(&mut self, u: Idx) -> usize {
        let mut ord = self.size(self.nodes[u].child[0]);
        let mut u = u;
        while self.nodes[u].parent != EMPTY {
            let p = self.nodes[u].parent;
            if self.nodes[p].child[1] == u {
                ord += self.size(self.nodes[p].child[0]) + 1;
            }
            u = p;
        }
        ord
    }

    fn find_kth(&mut self, u: Idx, mut k: usize) -> Idx {
        let mut u = self.root(u);
        while u != EMPTY {
            let [l, r] = self.nodes[u].child;
            let sl = self.size(l);
            if sl > k {
                u = l;
            } else if sl == k {
                return u;
            } else {
                k -= sl + 1;
                u = r;
            }
        }
        EMPTY
    }

    fn len(&mut self, u: Idx) -> usize {
        if u == EMPTY {
            return 0;
        }
        let r = self.root(u);
        self.nodes[r].size
    }

    fn total_agg(&mut self, u: Idx) -> Ag {
        let r = self.root(u);
        self.agg_of(r)
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        log::trace!("concat {u} {v}");
        let (u, v) = (self.root(u), self.root(v));
        self.concat_inner(u, v)
    }

    fn split_before(&mut self, u: Idx) -> (Idx, Idx) {
        let k = self.order(u);
        let r = self.root(u);
        self.split_k(r, k)
    }

    fn split_after(&mut self, u: Idx) -> (Idx, Idx) {
        let k = self.order(u);
        let r = self.root(u);
        self.split_k(r, k + 1)
    }
}
