pub mod classify;
pub mod engine;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod strategies;
pub mod types;

pub use engine::{repair_json, repair_lines, JsonRepairer};
pub use error::RepairError;
pub use normalize::RepairInput;
pub use types::{RepairOptions, RepairResult};
