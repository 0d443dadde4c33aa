//! Fully dynamic connectivity for undirected graphs: edges and vertices can
//! be inserted and deleted online, and [Graph::connected] answers in
//! poly-logarithmic amortized time using the level-based scheme of Holm,
//! de Lichtenberg and Thorup over Euler tour forests.
//!
//! All operations take O(lg n) amortized time, except `delete_edge` which
//! takes O(lg² n).
//!
//! ## Usage
//!
//! Create a graph with [Graph::new] or [Graph::from_vertices] (the
//! [DynamicConnectivity] alias picks the default flavor) and use the methods
//! on [Graph] to add and remove vertices and edges and query connectivity.
//! [Graph::connected] answers `None` for vertices the graph has never seen,
//! which is distinct from a definite no.
//!
//! ```
//! use dynamic_connectivity::DynamicConnectivity;
//!
//! let mut g = DynamicConnectivity::from_vertices(1..=4);
//! g.insert_edge(&1, &2);
//! g.insert_edge(&2, &3);
//! g.insert_edge(&1, &3);
//! assert_eq!(g.connected(&1, &3), Some(true));
//! g.delete_edge(&1, &3);
//! // Still connected through 2.
//! assert_eq!(g.connected(&1, &3), Some(true));
//! assert_eq!(g.connected(&1, &4), Some(false));
//! assert_eq!(g.connected(&1, &99), None);
//! ```
//!
//! You can see example usage at `src/bin/example.rs` and run it with
//! `cargo run`.
//!
//! ## Implementation
//!
//! The [Graph] keeps a spanning forest per level, each an Euler tour forest
//! ([euler_tour_forest::EulerTourForest]) over a sequence structure keyed by
//! position ([lists::Lists]). Two sequence flavors are provided and are
//! drop-in replacements for each other: splay trees
//! ([lists::splay::Splays], the default) and treaps
//! ([lists::treap::Treaps]).
//!
//! ## Testing
//!
//! Run the tests using:
//!
//! ```skip
//! cargo test
//! ```
//!
//! Add `-- --ignored` to run the stress tests (which run indefinitely with
//! random data until they fail). And use `cargo bench` to see the
//! benchmarks.
pub mod euler_tour_forest;
pub mod graph;
pub mod lists;

pub use euler_tour_forest::{EulerTourForest, RootedTree, TourAgg};
pub use graph::Graph;
pub use lists::{AggregatedData, Lists};

/// Dynamic connectivity over splay-backed Euler tour forests, the flavor
/// with the proven amortized bounds.
pub type DynamicConnectivity<V> = Graph<V, lists::splay::Splays<TourAgg<V>>>;
