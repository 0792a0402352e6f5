//! Evaluation of gate outputs and critical path
//!
//! [`evaluate`] runs a depth-first traversal from each requested root gate,
//! memoizing every gate it finishes so that subgraphs shared between roots
//! are computed once per call. All traversal state is scoped to the call and
//! gone when it returns, whether it succeeds or fails.

use fxhash::FxHashMap;
use tracing::debug;

use crate::network::gate::Source;
use crate::{GateId, NandError, NandNetwork};

/// Result of evaluating a set of root gates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Boolean output of each root, in root order
    pub values: Vec<bool>,
    /// Longest chain of gate-to-gate dependencies feeding any root, in gate hops
    pub critical_path: usize,
}

/// Per-gate progress within one evaluation call
#[derive(Debug, Clone, Copy)]
enum VisitState {
    /// The gate is on the active DFS stack
    InProgress,
    /// Output and critical path are memoized
    Done { output: bool, depth: usize },
}

/// One evaluation pass over a network
///
/// The state table doubles as the traversal record of the pass: it is
/// dropped with the evaluator on every exit path, so nothing leaks into
/// the next call.
struct Evaluator<'a> {
    net: &'a NandNetwork,
    states: FxHashMap<GateId, VisitState>,
}

impl<'a> Evaluator<'a> {
    fn new(net: &'a NandNetwork) -> Evaluator<'a> {
        Evaluator {
            net,
            states: FxHashMap::default(),
        }
    }

    /// Compute the output and critical path of one gate, memoized
    ///
    /// Recursion depth is bounded by the longest dependency chain reachable
    /// from the gate.
    fn visit(&mut self, id: GateId) -> Result<(bool, usize), NandError> {
        let net = self.net;
        let gate = net.try_gate(id)?;
        if !gate.fully_connected() {
            return Err(NandError::Structural);
        }
        match self.states.get(&id) {
            Some(VisitState::Done { output, depth }) => return Ok((*output, *depth)),
            // Still on the DFS stack: the gate is reachable from itself
            Some(VisitState::InProgress) => return Err(NandError::Structural),
            None => {}
        }
        self.states.insert(id, VisitState::InProgress);

        if gate.arity() == 0 {
            self.states.insert(
                id,
                VisitState::Done {
                    output: false,
                    depth: 0,
                },
            );
            return Ok((false, 0));
        }

        let mut found_false = false;
        let mut max_child = 0;
        for source in gate.inputs() {
            match *source {
                // Ruled out by the occupancy check above
                Source::Unbound => return Err(NandError::Structural),
                Source::Signal(s) => {
                    if !net.signal_value(s) {
                        found_false = true;
                    }
                }
                Source::Gate(child) => {
                    let (output, depth) = self.visit(child)?;
                    if !output {
                        found_false = true;
                    }
                    max_child = max_child.max(depth);
                }
            }
        }

        let depth = 1 + max_child;
        self.states.insert(
            id,
            VisitState::Done {
                output: found_false,
                depth,
            },
        );
        Ok((found_false, depth))
    }
}

/// Compute the boolean output of each root gate and the critical path
///
/// The output of a gate is `true` iff at least one of its inputs evaluates
/// to `false`; a zero-arity gate outputs `false`. The critical path of a
/// zero-arity gate is 0, and otherwise one more than the deepest gate
/// feeding one of its inputs, so a gate fed only by signals has critical
/// path 1. The returned length is the maximum over all roots.
///
/// Fails if the root list is empty or names an unknown gate, and fails with
/// [`NandError::Structural`] if a wiring cycle or a gate with an unbound
/// input is reachable from a root. Evaluation never mutates the network, so
/// a failed call leaves it ready for the next one.
pub fn evaluate(net: &NandNetwork, roots: &[GateId]) -> Result<Evaluation, NandError> {
    if roots.is_empty() {
        return Err(NandError::NoRoots);
    }
    let mut eval = Evaluator::new(net);
    let mut values = Vec::with_capacity(roots.len());
    let mut critical_path = 0;
    for &root in roots {
        let (output, depth) = eval.visit(root)?;
        values.push(output);
        critical_path = critical_path.max(depth);
    }
    debug!(nb_roots = roots.len(), critical_path, "evaluation done");
    Ok(Evaluation {
        values,
        critical_path,
    })
}
