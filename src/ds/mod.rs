pub mod ghost_list;
pub mod node_arena;
pub mod recency_list;
pub mod shard;

pub use ghost_list::GhostList;
pub use node_arena::{NodeArena, NodeId};
pub use recency_list::RecencyList;
pub use shard::SliceSelector;
