//! NAND gate network representation and evaluation
//!
//! This crate models a network of fixed-arity boolean NAND gates wired into a
//! directed signal graph. The graph may be cyclic and may be only partially
//! connected: both are legal while building, and are only rejected when an
//! evaluation actually reaches them.
//!
//! Gates and signals are addressed by opaque ids handed out by
//! [`NandNetwork`]. Every input slot of a gate can be bound to an external
//! boolean signal or to the output of another gate (including itself), and
//! rebound or removed at any time; the network keeps each gate's fan-out list
//! consistent with the slots pointing at it through every mutation.
//!
//! [`evaluate`] computes the boolean output of a set of root gates together
//! with the critical path, the longest chain of gate-to-gate dependencies
//! feeding any root. Gates shared between roots are computed once per call.
//!
//! ```
//! use nandnet::{evaluate, NandNetwork};
//!
//! let mut net = NandNetwork::new();
//! let low = net.add_signal(false);
//!
//! // A one-input NAND is an inverter
//! let inv = net.add_gate(1);
//! let nand = net.add_gate(2);
//! net.connect_signal(low, inv, 0).unwrap();
//! net.connect_gate(inv, nand, 0).unwrap();
//! net.connect_gate(inv, nand, 1).unwrap();
//!
//! let result = evaluate(&net, &[nand]).unwrap();
//! assert_eq!(result.values, vec![false]);
//! assert_eq!(result.critical_path, 2);
//! ```

#![warn(missing_docs)]

pub mod eval;
pub mod network;

pub use eval::{evaluate, Evaluation};
pub use network::{GateId, NandError, NandNetwork, SignalId, Source};
