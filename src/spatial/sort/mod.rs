//! Key-Value Sorter
//!
//! Bitonic sort of (cell hash, particle index) pairs. The comparison network
//! depends only on the padded length, never on the keys, so every pass is a
//! fixed set of independent compare-exchanges.

mod network;
mod sorter;

pub use network::{BitonicNetwork, BitonicPass};
pub use sorter::{BitonicSorter, PAD_KEY};
