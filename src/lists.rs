use std::fmt::Debug;

pub mod splay;
pub mod treap;

/// Monoid annotation maintained per subtree by a [Lists] implementation.
pub trait AggregatedData: Debug + Sized + Clone + Default {
    type Data: Debug + Sized + Clone;
    /// Create aggregated data from a single data item.
    fn from(data: &Self::Data) -> Self;
    /// Merge with the aggregated data of items to the right.
    fn merge(self, right: Self) -> Self;
}

/// No annotation at all.
impl AggregatedData for () {
    type Data = ();
    fn from(_: &()) -> Self {}
    fn merge(self, _: Self) -> Self {}
}

pub type Idx = usize;

/// This stores multiple ordered lists of values, each node addressed by a
/// stable [Idx] handle that survives splits and concatenations.
///
/// Operations that locate a node may restructure the tree (self-adjusting
/// implementations splay on access), so most queries take `&mut self`.
/// They panic if the node doesn't exist.
pub trait Lists<Ag = ()>
where
    Ag: AggregatedData,
    Self: Sized + Debug,
{
    /// Returned when the node doesn't exist.
    const EMPTY: Idx = usize::MAX;
    /// New Lists with given capacity.
    fn new(capacity: usize) -> Self;
    /// New Lists with given items already in a single list.
    fn from_iter(data: impl IntoIterator<Item = Ag::Data>) -> Self {
        let data = data.into_iter();
        let mut lists = Self::new(data.size_hint().0);
        let mut prev = Self::EMPTY;
        for data in data {
            let u = lists.create(data);
            if prev != Self::EMPTY {
                lists.concat(prev, u);
            }
            prev = u;
        }
        lists
    }
    /// Create a new one-element list with given data. Returns its index.
    fn create(&mut self, data: Ag::Data) -> Idx;
    /// Free a node that forms a one-element list. Its index may be reused
    /// by a later [Lists::create]. Panics if the node still has neighbors.
    fn release(&mut self, u: Idx);
    /// Number of live nodes in all lists.
    fn total_size(&self) -> usize;

    /// Current root of the list containing u. Self-adjusting implementations
    /// move nodes around, so the root is only meaningful until the next
    /// operation; use [Lists::on_same_list] to compare lists.
    fn root(&mut self, u: Idx) -> Idx;
    /// Are the two nodes on the same list?
    fn on_same_list(&mut self, u: Idx, v: Idx) -> bool;
    /// Data associated with u.
    fn data(&self, u: Idx) -> &Ag::Data;
    /// Position of u in its list, 0-indexed.
    fn order(&mut self, u: Idx) -> usize;
    /// K-th element in the list containing u (0-indexed), EMPTY if out of range.
    fn find_kth(&mut self, u: Idx, k: usize) -> Idx;
    /// First element in the list containing u.
    fn first(&mut self, u: Idx) -> Idx {
        self.find_kth(u, 0)
    }
    /// Next node after u in its list, EMPTY if u is last.
    fn next(&mut self, u: Idx) -> Idx {
        let k = self.order(u);
        self.find_kth(u, k + 1)
    }
    fn is_first(&mut self, u: Idx) -> bool {
        self.order(u) == 0
    }
    /// Size of the list containing u.
    fn len(&mut self, u: Idx) -> usize;
    /// Aggregated data of the whole list containing u.
    fn total_agg(&mut self, u: Idx) -> Ag;

    /// Concats the lists containing u and v. Returns the new root.
    /// The lists must be distinct; EMPTY is an identity.
    fn concat(&mut self, u: Idx, v: Idx) -> Idx;
    /// Concats all given lists in order. Returns the new root.
    fn concat_all(&mut self, items: impl IntoIterator<Item = Idx>) -> Idx {
        items
            .into_iter()
            .fold(Self::EMPTY, |acc, u| self.concat(acc, u))
    }
    /// Splits the list containing u just before u. Returns (left, right)
    /// where right starts with u and left may be EMPTY.
    fn split_before(&mut self, u: Idx) -> (Idx, Idx);
    /// Splits the list containing u just after u. Returns (left, right)
    /// where left ends with u and right may be EMPTY.
    fn split_after(&mut self, u: Idx) -> (Idx, Idx);

    /// In-order data of the list containing u.
    fn to_vec(&mut self, u: Idx) -> Vec<Ag::Data> {
        let mut out = Vec::new();
        let mut cur = self.first(u);
        while cur != Self::EMPTY {
            out.push(self.data(cur).clone());
            cur = self.next(cur);
        }
        out
    }
}
