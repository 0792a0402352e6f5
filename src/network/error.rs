use thiserror::Error;

use crate::network::handle::{GateId, SignalId};

/// Errors reported by network operations and evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NandError {
    /// The id does not name a live gate
    #[error("gate {0} does not exist")]
    UnknownGate(GateId),
    /// The id does not name a registered signal
    #[error("signal {0} does not exist")]
    UnknownSignal(SignalId),
    /// The input index is not below the gate's arity
    #[error("input {index} out of range for gate {gate} with {arity} inputs")]
    InputOutOfRange {
        /// Gate whose input was addressed
        gate: GateId,
        /// Offending input index
        index: usize,
        /// Number of inputs of the gate
        arity: usize,
    },
    /// The fan-out index is not below the gate's fan-out count
    #[error("fan-out index {index} out of range for gate {gate} with fan-out {fan_out}")]
    FanOutOutOfRange {
        /// Gate whose fan-out was enumerated
        gate: GateId,
        /// Offending fan-out index
        index: usize,
        /// Current fan-out of the gate
        fan_out: usize,
    },
    /// Evaluation was requested with no root gates
    #[error("evaluation requires at least one root gate")]
    NoRoots,
    /// A wiring cycle or an unbound input is reachable from an evaluated root
    ///
    /// The two causes are deliberately not distinguished.
    #[error("wiring cycle or unbound input reachable from the evaluated gates")]
    Structural,
}
