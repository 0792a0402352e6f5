use std::fmt;
use std::mem;

use crate::network::handle::{GateId, SignalId};

/// Current binding of one input slot of a gate
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Source {
    /// Nothing connected
    Unbound,
    /// Driven by a boolean signal
    Signal(SignalId),
    /// Driven by the output of a gate
    Gate(GateId),
}

impl Source {
    /// Returns whether anything is connected to the slot
    pub fn is_bound(&self) -> bool {
        !matches!(self, Source::Unbound)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unbound => write!(f, "-"),
            Source::Signal(s) => write!(f, "{s}"),
            Source::Gate(g) => write!(f, "{g}"),
        }
    }
}

/// A single NAND gate: its input slots and the inputs consuming its output
///
/// The consumer list is the exact inverse of the slot bindings pointing at
/// this gate, kept in connection order. A gate may appear several times,
/// once per slot it occupies.
#[derive(Debug, Clone)]
pub(crate) struct Gate {
    inputs: Box<[Source]>,
    occupied: usize,
    consumers: Vec<(GateId, usize)>,
}

impl Gate {
    pub(crate) fn new(arity: usize) -> Gate {
        Gate {
            inputs: vec![Source::Unbound; arity].into_boxed_slice(),
            occupied: 0,
            consumers: Vec::new(),
        }
    }

    /// Number of input slots, fixed at creation
    pub(crate) fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// Number of slots with something connected
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    /// Returns whether every slot has something connected
    pub(crate) fn fully_connected(&self) -> bool {
        self.occupied == self.inputs.len()
    }

    pub(crate) fn input(&self, k: usize) -> Source {
        self.inputs[k]
    }

    pub(crate) fn inputs(&self) -> &[Source] {
        &self.inputs
    }

    pub(crate) fn consumers(&self) -> &[(GateId, usize)] {
        &self.consumers
    }

    /// Rebind slot `k`, returning the previous binding
    pub(crate) fn bind(&mut self, k: usize, source: Source) -> Source {
        debug_assert!(source.is_bound());
        let old = mem::replace(&mut self.inputs[k], source);
        if !old.is_bound() {
            self.occupied += 1;
        }
        old
    }

    /// Reset slot `k` to unbound
    pub(crate) fn clear(&mut self, k: usize) {
        if self.inputs[k].is_bound() {
            self.inputs[k] = Source::Unbound;
            self.occupied -= 1;
        }
    }

    /// Append a consumer at the end of the fan-out enumeration
    pub(crate) fn push_consumer(&mut self, consumer: GateId, k: usize) {
        self.consumers.push((consumer, k));
    }

    /// Drop the reverse edge for slot `k` of `consumer`
    ///
    /// The surviving entries keep their relative order.
    pub(crate) fn remove_consumer(&mut self, consumer: GateId, k: usize) {
        if let Some(pos) = self.consumers.iter().position(|&e| e == (consumer, k)) {
            self.consumers.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy() {
        let mut g = Gate::new(2);
        assert_eq!(g.arity(), 2);
        assert_eq!(g.occupied(), 0);
        assert!(!g.fully_connected());

        let old = g.bind(0, Source::Signal(SignalId(0)));
        assert_eq!(old, Source::Unbound);
        assert_eq!(g.occupied(), 1);

        // Rebinding a bound slot must not double-count
        let old = g.bind(0, Source::Gate(GateId(3)));
        assert_eq!(old, Source::Signal(SignalId(0)));
        assert_eq!(g.occupied(), 1);

        g.bind(1, Source::Signal(SignalId(1)));
        assert!(g.fully_connected());

        g.clear(0);
        g.clear(0);
        assert_eq!(g.occupied(), 1);
        assert_eq!(g.input(0), Source::Unbound);
    }

    #[test]
    fn test_consumer_order() {
        let mut g = Gate::new(0);
        let (a, b) = (GateId(1), GateId(2));
        g.push_consumer(a, 0);
        g.push_consumer(b, 0);
        g.push_consumer(a, 1);

        // Removal matches the exact (gate, slot) pair and keeps order
        g.remove_consumer(a, 0);
        assert_eq!(g.consumers(), &[(b, 0), (a, 1)]);
        g.remove_consumer(a, 0);
        assert_eq!(g.consumers(), &[(b, 0), (a, 1)]);
    }
}
