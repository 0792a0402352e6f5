//! Representation and handling of NAND gate networks

mod error;
pub(crate) mod gate;
mod graph;
mod handle;
pub mod stats;

pub use error::NandError;
pub use gate::Source;
pub use graph::NandNetwork;
pub use handle::{GateId, SignalId};
