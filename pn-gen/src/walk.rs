//! Random walks over the reachability graph of a net.
//!
//! A walk never looks at places or arcs; it only asks a [`Semantics`] oracle which transitions are
//! enabled and what firing one of them yields.
use pn_core::{
    Marking,
    NetError,
    PetriNet,
    Semantics,
    Transition,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    instrument,
    warn,
};

/// One element of a walk: either a marking the walk passed through or a transition it fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visited {
    /// A marking snapshot.
    Marking(Marking),
    /// A fired transition.
    Transition(Transition),
}

/// Everything one walk visited, alternating markings and fired transitions.
///
/// A record always starts with the initial marking and ends with the marking the walk stopped in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalkRecord {
    /// Visited elements in order.
    pub steps: Vec<Visited>,
}

impl WalkRecord {
    /// Fired transitions, in firing order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.steps.iter().filter_map(|step| match step {
            Visited::Transition(t) => Some(t),
            Visited::Marking(_) => None,
        })
    }

    /// Fired transitions that carry a label, in firing order.
    pub fn visible_transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions().filter(|t| t.is_visible())
    }

    /// Marking snapshots, in the order they were reached.
    pub fn markings(&self) -> impl Iterator<Item = &Marking> {
        self.steps.iter().filter_map(|step| match step {
            Visited::Marking(m) => Some(m),
            Visited::Transition(_) => None,
        })
    }

    /// The marking the walk ended in.
    #[must_use]
    pub fn last_marking(&self) -> Option<&Marking> {
        self.markings().last()
    }

    /// Re-fire the recorded transitions from the recorded initial marking and check that every
    /// recorded marking is reproduced.
    pub fn replay<S: Semantics + ?Sized>(&self, semantics: &S, net: &PetriNet) -> Result<bool, NetError> {
        let mut steps = self.steps.iter();
        let Some(Visited::Marking(initial)) = steps.next() else {
            return Ok(self.steps.is_empty());
        };

        let mut current = initial.clone();
        for step in steps {
            match step {
                Visited::Transition(t) => current = semantics.fire(t, net, &current)?,
                Visited::Marking(m) if *m != current => return Ok(false),
                Visited::Marking(_) => (),
            }
        }
        Ok(true)
    }
}

/// Bounds on the length of a single walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkLimits {
    /// Maximum number of visible transitions; must be at least 1.
    pub max_trace_length: usize,
    /// Maximum number of fired transitions of any kind, so that cycles of silent transitions
    /// still terminate.
    pub max_total_steps: usize,
}

/// Play the token game from `initial_marking` until the net deadlocks, the walk decides to stop in
/// `final_marking`, or one of the `limits` is reached.
///
/// Every step picks uniformly among the enabled transitions. When the current marking equals
/// `final_marking`, "stop here" is one more equally likely option, so reaching the final marking
/// makes termination possible without forcing it.
#[instrument(level = "debug", skip_all, fields(initial = %initial_marking))]
pub fn walk<S, R>(
    semantics: &S,
    net: &PetriNet,
    initial_marking: &Marking,
    final_marking: Option<&Marking>,
    limits: WalkLimits,
    rng: &mut R,
) -> Result<WalkRecord, NetError>
where
    S: Semantics + ?Sized,
    R: Rng + ?Sized,
{
    let mut marking = initial_marking.clone();
    let mut steps = vec![Visited::Marking(marking.clone())];
    let mut visible = 0;
    let mut fired = 0;

    while visible < limits.max_trace_length && fired < limits.max_total_steps {
        let enabled = semantics.enabled_transitions(net, &marking);
        if enabled.is_empty() {
            debug!(%marking, "deadlock");
            break;
        }

        let choice = if final_marking == Some(&marking) {
            // index `enabled.len()` is the stop option
            enabled.get(rng.gen_range(0..=enabled.len()))
        } else {
            enabled.choose(rng)
        };
        let Some(transition) = choice else {
            debug!(%marking, "stopped in final marking");
            break;
        };

        marking = semantics.fire(transition, net, &marking)?;
        fired += 1;
        if transition.is_visible() {
            visible += 1;
        }
        steps.push(Visited::Transition(transition.clone()));
        steps.push(Visited::Marking(marking.clone()));
    }

    if fired >= limits.max_total_steps && visible < limits.max_trace_length {
        warn!(
            fired,
            visible,
            "walk hit the total step cap before reaching the maximum trace length; the net may contain a silent cycle"
        );
    }

    Ok(WalkRecord { steps })
}
