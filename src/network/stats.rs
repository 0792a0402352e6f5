//! Compute network statistics
//!
//! ```
//! # use nandnet::NandNetwork;
//! use nandnet::network::stats::stats;
//! let net = NandNetwork::new();
//! let stats = stats(&net);
//!
//! // Check that there is no gate
//! assert_eq!(stats.nb_gates, 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::network::gate::Source;
use crate::NandNetwork;

/// Number of gates, signals and connections in a network
#[derive(Clone, Debug, Default)]
pub struct NetworkStats {
    /// Number of gates
    pub nb_gates: usize,
    /// Number of registered signals
    pub nb_signals: usize,
    /// Number of input slots bound to a gate output
    pub nb_gate_edges: usize,
    /// Number of input slots bound to a signal
    pub nb_signal_edges: usize,
    /// Number of unbound input slots
    pub nb_dangling: usize,
    /// Number of gates per arity
    pub arity: Vec<usize>,
}

impl NetworkStats {
    /// Record a new gate
    fn add_gate(&mut self, arity: usize) {
        self.nb_gates += 1;
        while self.arity.len() <= arity {
            self.arity.push(0);
        }
        self.arity[arity] += 1;
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Gates: {}", self.nb_gates)?;
        writeln!(f, "  Signals: {}", self.nb_signals)?;
        writeln!(f, "  Gate edges: {}", self.nb_gate_edges)?;
        writeln!(f, "  Signal edges: {}", self.nb_signal_edges)?;
        writeln!(f, "  Dangling slots: {}", self.nb_dangling)?;
        for (sz, nb) in self.arity.iter().enumerate() {
            if *nb != 0 {
                writeln!(f, "  Nand{}: {}", sz, nb)?;
            }
        }
        Ok(())
    }
}

/// Compute the statistics of a network
pub fn stats(net: &NandNetwork) -> NetworkStats {
    let mut ret = NetworkStats {
        nb_signals: net.nb_signals(),
        ..NetworkStats::default()
    };
    for id in net.gate_ids() {
        let g = net.gate(id);
        ret.add_gate(g.arity());
        for source in g.inputs() {
            match source {
                Source::Unbound => ret.nb_dangling += 1,
                Source::Signal(_) => ret.nb_signal_edges += 1,
                Source::Gate(_) => ret.nb_gate_edges += 1,
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::NandNetwork;

    #[test]
    fn test_stats() {
        let mut net = NandNetwork::new();
        let s = net.add_signal(true);
        let a = net.add_gate(0);
        let b = net.add_gate(2);
        let c = net.add_gate(2);
        net.connect_gate(a, b, 0).unwrap();
        net.connect_signal(s, b, 1).unwrap();
        net.connect_signal(s, c, 0).unwrap();

        let st = stats(&net);
        assert_eq!(st.nb_gates, 3);
        assert_eq!(st.nb_signals, 1);
        assert_eq!(st.nb_gate_edges, 1);
        assert_eq!(st.nb_signal_edges, 2);
        assert_eq!(st.nb_dangling, 1);
        assert_eq!(st.arity, vec![1, 0, 2]);
    }
}
