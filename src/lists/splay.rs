use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;

use super::{AggregatedData, Idx, Lists};

const EMPTY: Idx = usize::MAX;

struct Node<Ag: AggregatedData> {
    parent: Idx,
    /// Left and right child
    child: [Idx; 2],
    /// 0 marks a released slot awaiting reuse.
    size: usize,
    data: Ag::Data,
    /// Aggregated data for this node's subtree
    agg: Ag,
}

/// Splay trees keyed by sequence position. Every access splays the touched
/// node to the root of its tree, which is what makes the amortized bounds
/// hold, so even queries take `&mut self`.
pub struct Splays<Ag: AggregatedData = ()> {
    nodes: Vec<Node<Ag>>,
    free: Vec<Idx>,
}

impl<Ag: AggregatedData> Debug for Splays<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut builder = TreeBuilder::new();
        let _b = builder.add_branch("Splays");
        for u in 0..self.nodes.len() {
            if self.nodes[u].parent == EMPTY && self.nodes[u].size > 0 {
                self.tree_dbg(u, &mut builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: AggregatedData> Splays<Ag> {
    fn tree_dbg(&self, u: Idx, tree: &mut TreeBuilder) {
        let n = &self.nodes[u];
        let _b = tree.add_branch(&format!("{u}: {:?}", n.data));
        if n.child == [EMPTY, EMPTY] {
            return;
        }
        for c in n.child {
            if c != EMPTY {
                self.tree_dbg(c, tree);
            } else {
                tree.add_leaf("∅");
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

    // Call when children change.
    fn recalc(&mut self, u: Idx) {
        let [l, r] = self.nodes[u].child;
        self.nodes[u].size = self.size(l) + 1 + self.size(r);
        let agg = self
            .agg_of(l)
            .merge(Ag::from(&self.nodes[u].data))
            .merge(self.agg_of(r));
        self.nodes[u].agg = agg;
    }

    /// Rotates u above its parent, keeping in-order positions. Panics if u
    /// is a root.
    fn rotate(&mut self, u: Idx) {
        let p = self.nodes[u].parent;
        let g = self.nodes[p].parent;
        let side = (self.nodes[p].child[1] == u) as usize;
        let inner = self.nodes[u].child[side ^ 1];
        self.nodes[p].child[side] = inner;
        if inner != EMPTY {
            self.nodes[inner].parent = p;
        }
        self.nodes[u].child[side ^ 1] = p;
        self.nodes[p].parent = u;
        self.nodes[u].parent = g;
        if g != EMPTY {
            let pside = (self.nodes[g].child[1] == p) as usize;
            self.nodes[g].child[pside] = u;
        }
        self.recalc(p);
        self.recalc(u);
    }

    /// Brings u to the root of its tree with zig / zig-zig / zig-zag steps.
    fn splay(&mut self, u: Idx) {
        debug_assert_ne!(u, EMPTY);
        loop {
            let p = self.nodes[u].parent;
            if p == EMPTY {
                return;
            }
            let g = self.nodes[p].parent;
            if g == EMPTY {
                self.rotate(u);
            } else if (self.nodes[p].child[1] == u) == (self.nodes[g].child[1] == p) {
                self.rotate(p);
                self.rotate(u);
            } else {
                self.rotate(u);
                self.rotate(u);
            }
        }
    }
}

impl<Ag: AggregatedData> Lists<Ag> for Splays<Ag> {
    fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let node = Node {
            parent: EMPTY,
            child: [EMPTY, EMPTY],
            size: 1,
            agg: Ag::from(&data),
            data,
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
        self.splay(u);
        u
    }

    fn on_same_list(&mut self, u: Idx, v: Idx) -> bool {
        if u == v {
            return true;
        }
        if u == EMPTY || v == EMPTY {
            return false;
        }
        self.splay(u);
        self.splay(v);
        // v is now the root; u ended up below it iff they share a tree.
        self.nodes[u].parent != EMPTY
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        &self.nodes[u].data
    }

    fn order(&mut self, u: Idx) -> usize {
        self.splay(u);
        self.size(self.nodes[u].child[0])
    }

    fn find_kth(&mut self, u: Idx, mut k: usize) -> Idx {
        if u == EMPTY {
            return EMPTY;
        }
        self.splay(u);
        if k >= self.nodes[u].size {
            return EMPTY;
        }
        let mut cur = u;
        loop {
            let [l, r] = self.nodes[cur].child;
            let sl = self.size(l);
            if k < sl {
                cur = l;
            } else if k == sl {
                break;
            } else {
                k -= sl + 1;
                cur = r;
            }
        }
        self.splay(cur);
        cur
    }

    fn len(&mut self, u: Idx) -> usize {
        if u == EMPTY {
            return 0;
        }
        self.splay(u);
        self.nodes[u].size
    }

    fn total_agg(&mut self, u: Idx) -> Ag {
        if u == EMPTY {
            return Ag::default();
        }
        self.splay(u);
        self.nodes[u].agg.clone()
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        if u == EMPTY {
            return self.root(v);
        }
        if v == EMPTY {
            return self.root(u);
        }
        let n = self.len(u);
        let last = self.find_kth(u, n - 1);
        // last is the root and has no right child.
        self.splay(v);
        self.nodes[last].child[1] = v;
        self.nodes[v].parent = last;
        self.recalc(last);
        last
    }

    fn split_before(&mut self, u: Idx) -> (Idx, Idx) {
        self.splay(u);
        let l = self.nodes[u].child[0];
        if l != EMPTY {
            self.nodes[l].parent = EMPTY;
            self.nodes[u].child[0] = EMPTY;
            self.recalc(u);
        }
        (l, u)
    }

    fn split_after(&mut self, u: Idx) -> (Idx, Idx) {
        self.splay(u);
        let r = self.nodes[u].child[1];
        if r != EMPTY {
            self.nodes[r].parent = EMPTY;
            self.nodes[u].child[1] = EMPTY;
            self.recalc(u);
        }
        (u, r)
    }
}
