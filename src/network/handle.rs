use std::fmt;

/// Identifier of a gate in a network
///
/// Ids are handed out sequentially and never reused, so an id left over
/// after its gate was removed stays invalid instead of silently resolving
/// to a newer gate.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct GateId(pub(crate) u32);

/// Identifier of a boolean signal registered in a network
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct SignalId(pub(crate) u32);

impl GateId {
    /// Return the internal index of the id
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl SignalId {
    /// Return the internal index of the id
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Debug for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
