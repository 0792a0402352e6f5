use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::network::error::NandError;
use crate::network::gate::{Gate, Source};
use crate::network::handle::{GateId, SignalId};

/// A network of NAND gates and boolean signals, addressed by id
///
/// The network owns all gates and signals; wiring between them is kept as id
/// relations resolved by lookup, never as ownership. Each connection is
/// mirrored in both directions: a slot of gate A bound to gate B exists iff
/// B's fan-out list holds the matching `(A, slot)` entry. All mutating
/// operations preserve this symmetry, including gate removal and rebinding
/// of occupied slots.
///
/// Cycles and unbound slots are legal here and only rejected by
/// [`evaluate`](crate::evaluate) when reached.
#[derive(Debug, Clone, Default)]
pub struct NandNetwork {
    gates: FxHashMap<GateId, Gate>,
    signals: FxHashMap<SignalId, bool>,
    next_gate: u32,
    next_signal: u32,
}

impl NandNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of live gates
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Return the number of registered signals
    pub fn nb_signals(&self) -> usize {
        self.signals.len()
    }

    /// Returns whether the id names a live gate
    pub fn contains_gate(&self, gate: GateId) -> bool {
        self.gates.contains_key(&gate)
    }

    /// Create a gate with `arity` unbound input slots
    ///
    /// A zero-arity gate is legal; it always evaluates to `false`.
    pub fn add_gate(&mut self, arity: usize) -> GateId {
        let id = GateId(self.next_gate);
        self.next_gate += 1;
        self.gates.insert(id, Gate::new(arity));
        trace!(gate = %id, arity, "gate added");
        id
    }

    /// Register a boolean signal with an initial value
    pub fn add_signal(&mut self, value: bool) -> SignalId {
        let id = SignalId(self.next_signal);
        self.next_signal += 1;
        self.signals.insert(id, value);
        id
    }

    /// Update the value of a signal
    pub fn set_signal(&mut self, signal: SignalId, value: bool) -> Result<(), NandError> {
        match self.signals.get_mut(&signal) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(NandError::UnknownSignal(signal)),
        }
    }

    /// Return the current value of a signal
    pub fn signal(&self, signal: SignalId) -> Result<bool, NandError> {
        self.signals
            .get(&signal)
            .copied()
            .ok_or(NandError::UnknownSignal(signal))
    }

    /// Remove a gate, unlinking it from the rest of the network first
    ///
    /// Gates feeding one of its slots lose the matching fan-out entry; gates
    /// fed by its output get the corresponding slot reset to unbound with
    /// their occupancy decremented. An unknown id is ignored.
    pub fn remove_gate(&mut self, gate: GateId) {
        let Some(removed) = self.gates.remove(&gate) else {
            return;
        };
        for (k, source) in removed.inputs().iter().enumerate() {
            if let Source::Gate(producer) = source {
                // A self-loop producer is the removed gate itself; nothing to unlink
                if let Some(p) = self.gates.get_mut(producer) {
                    p.remove_consumer(gate, k);
                }
            }
        }
        for &(consumer, k) in removed.consumers() {
            if let Some(c) = self.gates.get_mut(&consumer) {
                c.clear(k);
            }
        }
        debug!(gate = %gate, "gate removed");
    }

    /// Bind input `index` of `consumer` to the output of `producer`
    ///
    /// Whatever was connected to the slot before is dropped; a previous gate
    /// binding has its reverse edge removed from the old producer. The new
    /// reverse edge goes to the end of the producer's fan-out enumeration,
    /// so rebinding a slot to its current producer moves it last.
    /// Self-connection is allowed.
    pub fn connect_gate(
        &mut self,
        producer: GateId,
        consumer: GateId,
        index: usize,
    ) -> Result<(), NandError> {
        if !self.gates.contains_key(&producer) {
            return Err(NandError::UnknownGate(producer));
        }
        let gate = self.try_gate_mut(consumer)?;
        if index >= gate.arity() {
            return Err(NandError::InputOutOfRange {
                gate: consumer,
                index,
                arity: gate.arity(),
            });
        }
        let old = gate.bind(index, Source::Gate(producer));
        if let Source::Gate(old_producer) = old {
            self.gate_mut(old_producer).remove_consumer(consumer, index);
        }
        self.gate_mut(producer).push_consumer(consumer, index);
        trace!(%producer, %consumer, index, "gate output connected");
        Ok(())
    }

    /// Bind input `index` of `consumer` to a registered signal
    ///
    /// Whatever was connected to the slot before is dropped; a previous gate
    /// binding has its reverse edge removed from the old producer.
    pub fn connect_signal(
        &mut self,
        signal: SignalId,
        consumer: GateId,
        index: usize,
    ) -> Result<(), NandError> {
        if !self.signals.contains_key(&signal) {
            return Err(NandError::UnknownSignal(signal));
        }
        let gate = self.try_gate_mut(consumer)?;
        if index >= gate.arity() {
            return Err(NandError::InputOutOfRange {
                gate: consumer,
                index,
                arity: gate.arity(),
            });
        }
        let old = gate.bind(index, Source::Signal(signal));
        if let Source::Gate(old_producer) = old {
            self.gate_mut(old_producer).remove_consumer(consumer, index);
        }
        trace!(%signal, %consumer, index, "signal connected");
        Ok(())
    }

    /// Return the number of input slots of a gate
    pub fn arity(&self, gate: GateId) -> Result<usize, NandError> {
        Ok(self.try_gate(gate)?.arity())
    }

    /// Return the number of bound input slots of a gate
    pub fn nb_connected(&self, gate: GateId) -> Result<usize, NandError> {
        Ok(self.try_gate(gate)?.occupied())
    }

    /// Return the number of gate inputs fed by this gate's output
    pub fn fan_out(&self, gate: GateId) -> Result<usize, NandError> {
        Ok(self.try_gate(gate)?.consumers().len())
    }

    /// Return the current binding of input `index` of a gate
    pub fn input(&self, gate: GateId, index: usize) -> Result<Source, NandError> {
        let g = self.try_gate(gate)?;
        if index >= g.arity() {
            return Err(NandError::InputOutOfRange {
                gate,
                index,
                arity: g.arity(),
            });
        }
        Ok(g.input(index))
    }

    /// Return the `index`-th gate consuming this gate's output
    ///
    /// The enumeration is in connection order and stays stable as long as no
    /// connection to this gate's output is added or removed.
    pub fn output(&self, gate: GateId, index: usize) -> Result<GateId, NandError> {
        let g = self.try_gate(gate)?;
        match g.consumers().get(index) {
            Some(&(consumer, _)) => Ok(consumer),
            None => Err(NandError::FanOutOutOfRange {
                gate,
                index,
                fan_out: g.consumers().len(),
            }),
        }
    }

    /// Iterate over live gate ids in creation order
    pub fn gate_ids(&self) -> impl Iterator<Item = GateId> {
        self.gates.keys().copied().sorted()
    }

    /// Get a gate that is known to be live
    pub(crate) fn gate(&self, gate: GateId) -> &Gate {
        &self.gates[&gate]
    }

    fn gate_mut(&mut self, gate: GateId) -> &mut Gate {
        self.gates
            .get_mut(&gate)
            .expect("slot binding references a dead gate")
    }

    pub(crate) fn try_gate(&self, gate: GateId) -> Result<&Gate, NandError> {
        self.gates.get(&gate).ok_or(NandError::UnknownGate(gate))
    }

    fn try_gate_mut(&mut self, gate: GateId) -> Result<&mut Gate, NandError> {
        self.gates
            .get_mut(&gate)
            .ok_or(NandError::UnknownGate(gate))
    }

    /// Return the current value of a signal that is known to be registered
    pub(crate) fn signal_value(&self, signal: SignalId) -> bool {
        self.signals[&signal]
    }

    /// Check consistency of the datastructure
    #[cfg(test)]
    pub(crate) fn check(&self) {
        for (&id, g) in self.gates.iter() {
            let bound = g.inputs().iter().filter(|s| s.is_bound()).count();
            assert_eq!(g.occupied(), bound, "occupancy mismatch for {id}");
            for (k, source) in g.inputs().iter().enumerate() {
                match source {
                    Source::Unbound => {}
                    Source::Signal(s) => assert!(self.signals.contains_key(s)),
                    Source::Gate(p) => {
                        let entries = self.gates[p]
                            .consumers()
                            .iter()
                            .filter(|&&e| e == (id, k))
                            .count();
                        assert_eq!(entries, 1, "missing reverse edge for {id} input {k}");
                    }
                }
            }
            for &(consumer, k) in g.consumers() {
                assert_eq!(self.gates[&consumer].input(k), Source::Gate(id));
            }
        }
    }
}

impl fmt::Display for NandNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} gates, {} signals:",
            self.nb_gates(),
            self.nb_signals()
        )?;
        for id in self.gate_ids() {
            let sources = self.gate(id).inputs().iter().join(", ");
            writeln!(f, "\t{id} = nand({sources})")?;
        }
        for id in self.signals.keys().copied().sorted() {
            writeln!(f, "\t{} = {}", id, self.signals[&id])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_gate() {
        let mut net = NandNetwork::new();
        for arity in 0..4 {
            let g = net.add_gate(arity);
            assert_eq!(net.arity(g), Ok(arity));
            assert_eq!(net.nb_connected(g), Ok(0));
            assert_eq!(net.fan_out(g), Ok(0));
            for k in 0..arity {
                assert_eq!(net.input(g, k), Ok(Source::Unbound));
            }
        }
        assert_eq!(net.nb_gates(), 4);
        net.check();
    }

    #[test]
    fn test_connect_symmetry() {
        let mut net = NandNetwork::new();
        let a = net.add_gate(1);
        let b = net.add_gate(2);
        net.connect_gate(a, b, 0).unwrap();
        net.connect_gate(a, b, 1).unwrap();

        assert_eq!(net.fan_out(a), Ok(2));
        assert_eq!(net.input(b, 0), Ok(Source::Gate(a)));
        assert_eq!(net.input(b, 1), Ok(Source::Gate(a)));
        assert_eq!(net.nb_connected(b), Ok(2));
        assert_eq!(net.output(a, 0), Ok(b));
        assert_eq!(net.output(a, 1), Ok(b));
        net.check();
    }

    #[test]
    fn test_rebind_occupancy() {
        let mut net = NandNetwork::new();
        let s = net.add_signal(true);
        let a = net.add_gate(1);
        let b = net.add_gate(1);
        let c = net.add_gate(1);

        net.connect_signal(s, c, 0).unwrap();
        assert_eq!(net.nb_connected(c), Ok(1));

        // signal -> gate, gate -> gate, gate -> signal: occupancy stays at 1
        net.connect_gate(a, c, 0).unwrap();
        assert_eq!(net.nb_connected(c), Ok(1));
        assert_eq!(net.fan_out(a), Ok(1));

        net.connect_gate(b, c, 0).unwrap();
        assert_eq!(net.nb_connected(c), Ok(1));
        assert_eq!(net.fan_out(a), Ok(0));
        assert_eq!(net.fan_out(b), Ok(1));

        net.connect_signal(s, c, 0).unwrap();
        assert_eq!(net.nb_connected(c), Ok(1));
        assert_eq!(net.fan_out(b), Ok(0));
        assert_eq!(net.input(c, 0), Ok(Source::Signal(s)));
        net.check();
    }

    #[test]
    fn test_output_enumeration() {
        let mut net = NandNetwork::new();
        let p = net.add_gate(0);
        let a = net.add_gate(2);
        let b = net.add_gate(1);
        net.connect_gate(p, a, 0).unwrap();
        net.connect_gate(p, b, 0).unwrap();
        net.connect_gate(p, a, 1).unwrap();
        assert_eq!(net.output(p, 0), Ok(a));
        assert_eq!(net.output(p, 1), Ok(b));
        assert_eq!(net.output(p, 2), Ok(a));

        // Earliest surviving connection first after a removal
        let s = net.add_signal(false);
        net.connect_signal(s, a, 0).unwrap();
        assert_eq!(net.fan_out(p), Ok(2));
        assert_eq!(net.output(p, 0), Ok(b));
        assert_eq!(net.output(p, 1), Ok(a));

        // Rebinding to the same producer moves the entry last
        net.connect_gate(p, b, 0).unwrap();
        assert_eq!(net.output(p, 0), Ok(a));
        assert_eq!(net.output(p, 1), Ok(b));
        net.check();
    }

    #[test]
    fn test_remove_gate() {
        let mut net = NandNetwork::new();
        let s = net.add_signal(true);
        let g = net.add_gate(2);
        let h = net.add_gate(2);
        net.connect_gate(g, h, 1).unwrap();
        net.connect_signal(s, h, 0).unwrap();
        net.connect_gate(h, g, 0).unwrap();

        net.remove_gate(g);
        assert!(!net.contains_gate(g));
        assert_eq!(net.input(h, 1), Ok(Source::Unbound));
        assert_eq!(net.nb_connected(h), Ok(1));
        assert_eq!(net.fan_out(h), Ok(0));
        net.check();

        // Removing an unknown or already removed id is a no-op
        net.remove_gate(g);
        assert_eq!(net.nb_gates(), 1);
    }

    #[test]
    fn test_remove_self_loop() {
        let mut net = NandNetwork::new();
        let g = net.add_gate(2);
        net.connect_gate(g, g, 0).unwrap();
        net.connect_gate(g, g, 1).unwrap();
        assert_eq!(net.fan_out(g), Ok(2));
        net.remove_gate(g);
        assert_eq!(net.nb_gates(), 0);
        net.check();
    }

    #[test]
    fn test_errors() {
        let mut net = NandNetwork::new();
        let g = net.add_gate(1);
        let s = net.add_signal(false);
        let dead = net.add_gate(1);
        net.remove_gate(dead);

        assert_eq!(net.connect_gate(dead, g, 0), Err(NandError::UnknownGate(dead)));
        assert_eq!(net.connect_gate(g, dead, 0), Err(NandError::UnknownGate(dead)));
        assert_eq!(
            net.connect_gate(g, g, 1),
            Err(NandError::InputOutOfRange {
                gate: g,
                index: 1,
                arity: 1
            })
        );
        assert_eq!(
            net.connect_signal(s, g, 1),
            Err(NandError::InputOutOfRange {
                gate: g,
                index: 1,
                arity: 1
            })
        );
        assert_eq!(net.fan_out(dead), Err(NandError::UnknownGate(dead)));
        assert_eq!(net.input(dead, 0), Err(NandError::UnknownGate(dead)));
        assert_eq!(
            net.output(g, 0),
            Err(NandError::FanOutOutOfRange {
                gate: g,
                index: 0,
                fan_out: 0
            })
        );
        assert_eq!(net.set_signal(SignalId(7), true), Err(NandError::UnknownSignal(SignalId(7))));

        // Failed calls leave no side effects
        assert_eq!(net.input(g, 0), Ok(Source::Unbound));
        assert_eq!(net.nb_connected(g), Ok(0));
        net.check();
    }

    #[test]
    fn test_display() {
        let mut net = NandNetwork::new();
        let s = net.add_signal(true);
        let a = net.add_gate(0);
        let b = net.add_gate(2);
        net.connect_gate(a, b, 0).unwrap();
        net.connect_signal(s, b, 1).unwrap();
        let shown = net.to_string();
        assert!(shown.contains("g1 = nand(g0, s0)"));
        assert!(shown.contains("s0 = true"));
    }
}
