//! Token-game semantics: which transitions are enabled in a marking, and what firing one does.
#[cfg(feature = "testutils")]
use mockall::automock;
use tracing::trace;

use crate::errors::NetError;
use crate::marking::Marking;
use crate::net::{
    PetriNet,
    Transition,
};

/// The execution semantics a playout consults; it never touches places or arcs itself.
///
/// Implementations must be pure functions of their arguments. `enabled_transitions` should return
/// transitions in a stable order so that a seeded random source reproduces the same playout.
#[cfg_attr(feature = "testutils", automock)]
pub trait Semantics {
    /// All transitions enabled in `marking`.
    fn enabled_transitions(&self, net: &PetriNet, marking: &Marking) -> Vec<Transition>;

    /// The marking reached by firing `transition` in `marking`.
    fn fire(&self, transition: &Transition, net: &PetriNet, marking: &Marking) -> Result<Marking, NetError>;
}

/// Classic place/transition semantics with weighted arcs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenGame;

impl TokenGame {
    /// Whether every input place of `transition` holds at least as many tokens as its arc weight.
    pub fn is_enabled(net: &PetriNet, transition: &Transition, marking: &Marking) -> Result<bool, NetError> {
        Ok(net
            .input_arcs(transition)?
            .into_iter()
            .all(|(place, weight)| marking.tokens(place) >= weight))
    }
}

impl Semantics for TokenGame {
    fn enabled_transitions(&self, net: &PetriNet, marking: &Marking) -> Vec<Transition> {
        net.transitions()
            .filter(|t| Self::is_enabled(net, t, marking).unwrap_or(false))
            .cloned()
            .collect()
    }

    fn fire(&self, transition: &Transition, net: &PetriNet, marking: &Marking) -> Result<Marking, NetError> {
        let mut next = marking.clone();
        for (place, weight) in net.input_arcs(transition)? {
            if !next.remove(place, weight) {
                return Err(NetError::NotEnabled(transition.name.clone()));
            }
        }
        for (place, weight) in net.output_arcs(transition)? {
            next.add(place, weight);
        }

        trace!(%transition, from = %marking, to = %next, "fired");
        Ok(next)
    }
}
