//! # Pantry Store
//!
//! 文件庫存取介面、記憶體實作與備料服務

pub mod memory;
pub mod planner;
pub mod store;

// Re-export 主要類型
pub use memory::MemoryStore;
pub use planner::{KitchenPlanner, RecordOutcome};
pub use store::KitchenStore;
