//! Shared building blocks for Petri net playout: the net model, markings, token-game semantics and
//! the event log containers the generator writes into.

pub mod errors;
pub mod log;
pub mod logging;
pub mod marking;
pub mod net;
pub mod semantics;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use errors::NetError;
pub use log::{
    AttributeKeys,
    Event,
    EventLog,
    Trace,
};
pub use marking::Marking;
pub use net::{
    AcceptingNet,
    NetDefinition,
    PetriNet,
    Transition,
};
pub use semantics::{
    Semantics,
    TokenGame,
};

#[cfg(test)]
mod tests;
