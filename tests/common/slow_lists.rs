use std::fmt::Debug;

use dynamic_connectivity::lists::{AggregatedData, Idx, Lists};

const EMPTY: Idx = usize::MAX;

/// Dummy implementation, most of the operations take linear time.
#[derive(Clone)]
pub struct SlowLists<Ag: AggregatedData> {
    lists: Vec<Vec<Entry<Ag>>>,
    /// Node index to position in `lists`; EMPTY for released nodes.
    u_to_list: Vec<usize>,
    free: Vec<Idx>,
}

impl<Ag: AggregatedData> Debug for SlowLists<Ag> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlowLists:")?;
        for l in &self.lists {
            if l.len() > 1 {
                write!(f, " [")?;
                for e in l {
                    write!(f, "{}({:?}) ", e.idx, e.data)?;
                }
                writeln!(f, "]")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct Entry<Ag: AggregatedData> {
    idx: Idx,
    data: Ag::Data,
}

impl<Ag: AggregatedData> SlowLists<Ag> {
    fn list(&self, u: Idx) -> &Vec<Entry<Ag>> {
        &self.lists[self.u_to_list[u]]
    }

    /// All current lists, as node indices.
    #[allow(dead_code)]
    pub fn lists(&self) -> Vec<Vec<Idx>> {
        self.lists
            .iter()
            .filter_map(|v| {
                if v.is_empty() {
                    None
                } else {
                    Some(v.iter().map(|e| e.idx).collect())
                }
            })
            .collect()
    }

    /// Moves the given entries into a fresh list, returning a handle to it.
    fn adopt(&mut self, entries: Vec<Entry<Ag>>) -> Idx {
        let head = entries.first().map_or(EMPTY, |e| e.idx);
        if head != EMPTY {
            let li = self.lists.len();
            for e in &entries {
                self.u_to_list[e.idx] = li;
            }
            self.lists.push(entries);
        }
        head
    }
}

impl<Ag: AggregatedData> Lists<Ag> for SlowLists<Ag> {
    fn new(capacity: usize) -> Self {
        Self {
            lists: Vec::with_capacity(capacity),
            u_to_list: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.u_to_list.push(EMPTY);
                self.u_to_list.len() - 1
            }
        };
        self.u_to_list[idx] = self.lists.len();
        self.lists.push(vec![Entry { idx, data }]);
        idx
    }

    fn release(&mut self, u: Idx) {
        let li = self.u_to_list[u];
        assert_eq!(
            self.lists[li].len(),
            1,
            "released node must form a one-element list"
        );
        self.lists[li].clear();
        self.u_to_list[u] = EMPTY;
        self.free.push(u);
    }

    fn total_size(&self) -> usize {
        self.u_to_list.len() - self.free.len()
    }

    fn root(&mut self, u: Idx) -> Idx {
        if u == EMPTY {
            return EMPTY;
        }
        self.list(u)[0].idx
    }

    fn on_same_list(&mut self, u: Idx, v: Idx) -> bool {
        if u == v {
            return true;
        }
        if u == EMPTY || v == EMPTY {
            return false;
        }
        self.u_to_list[u] == self.u_to_list[v]
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        let e = self.list(u).iter().find(|e| e.idx == u).unwrap();
        &e.data
    }

    fn order(&mut self, u: Idx) -> usize {
        self.list(u).iter().position(|e| e.idx == u).unwrap()
    }

    fn find_kth(&mut self, u: Idx, k: usize) -> Idx {
        if u == EMPTY {
            return EMPTY;
        }
        self.list(u).get(k).map_or(EMPTY, |e| e.idx)
    }

    fn len(&mut self, u: Idx) -> usize {
        if u == EMPTY {
            return 0;
        }
        self.list(u).len()
    }

    fn total_agg(&mut self, u: Idx) -> Ag {
        if u == EMPTY {
            return Ag::default();
        }
        self.list(u)
            .iter()
            .fold(Ag::default(), |agg, e| agg.merge(Ag::from(&e.data)))
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        if v == EMPTY || self.on_same_list(u, v) {
            return self.root(u);
        }
        if u == EMPTY {
            return self.root(v);
        }
        let lu = self.u_to_list[u];
        let lv = self.u_to_list[v];
        for e in &self.lists[lv] {
            self.u_to_list[e.idx] = lu;
        }
        let mut moved = std::mem::take(&mut self.lists[lv]);
        self.lists[lu].append(&mut moved);
        self.lists[lu][0].idx
    }

    fn split_before(&mut self, u: Idx) -> (Idx, Idx) {
        let lu = self.u_to_list[u];
        let pos = self.order(u);
        let right = self.lists[lu].split_off(pos);
        let left = std::mem::take(&mut self.lists[lu]);
        (self.adopt(left), self.adopt(right))
    }

    fn split_after(&mut self, u: Idx) -> (Idx, Idx) {
        let lu = self.u_to_list[u];
        let pos = self.order(u) + 1;
        let right = self.lists[lu].split_off(pos);
        let left = std::mem::take(&mut self.lists[lu]);
        (self.adopt(left), self.adopt(right))
    }
}
