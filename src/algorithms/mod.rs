//! The five path-finding algorithm families plus the feedback contract
//! they share for node culling.

pub mod bfs;
pub mod dijkstra;
pub mod feedback;
pub mod shared_interactors;
pub mod shared_parents;
pub mod ssp;
pub mod subgraph;

pub use bfs::Bfs;
pub use dijkstra::Dijkstra;
pub use feedback::PathStream;
pub use ssp::ShortestSimplePaths;
