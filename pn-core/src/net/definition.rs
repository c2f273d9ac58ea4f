//! Serializable description of a net together with its initial and final markings.
use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    instrument,
};

use super::PetriNet;
use crate::errors::NetError;
use crate::marking::Marking;

/// A transition entry of a [`NetDefinition`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An arc entry of a [`NetDefinition`]; the weight defaults to 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcDefinition {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

const fn default_weight() -> u32 {
    1
}

/// On-disk format for a net, as read from JSON, YAML or `MessagePack`.
///
/// ```yaml
/// name: order-handling
/// places: [start, p1, end]
/// transitions:
///   - { name: t1, label: register }
///   - { name: tau }
/// arcs:
///   - { source: start, target: t1 }
///   - { source: t1, target: p1 }
///   - { source: p1, target: tau }
///   - { source: tau, target: end }
/// initial_marking: { start: 1 }
/// final_marking: { end: 1 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDefinition {
    #[serde(default)]
    pub name: String,
    pub places: Vec<String>,
    pub transitions: Vec<TransitionDefinition>,
    #[serde(default)]
    pub arcs: Vec<ArcDefinition>,
    #[serde(default)]
    pub initial_marking: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_marking: Option<BTreeMap<String, u32>>,
}

/// A net with the markings a playout starts from and (optionally) may stop at.
#[derive(Clone, Debug)]
pub struct AcceptingNet {
    pub net: PetriNet,
    pub initial_marking: Marking,
    pub final_marking: Option<Marking>,
}

impl TryFrom<NetDefinition> for AcceptingNet {
    type Error = NetError;

    #[instrument(skip_all, fields(name = %def.name, places = def.places.len(), transitions = def.transitions.len()))]
    fn try_from(def: NetDefinition) -> Result<Self, Self::Error> {
        let mut net = PetriNet::new(&def.name);
        for place in &def.places {
            net.add_place(place)?;
        }
        for transition in &def.transitions {
            net.add_transition(&transition.name, transition.label.as_deref())?;
        }
        for arc in &def.arcs {
            net.add_arc(&arc.source, &arc.target, arc.weight)?;
        }

        let initial_marking = marking_on(&net, def.initial_marking)?;
        let final_marking = def.final_marking.map(|m| marking_on(&net, m)).transpose()?;
        debug!(%initial_marking, "net loaded");

        Ok(Self { net, initial_marking, final_marking })
    }
}

fn marking_on(net: &PetriNet, tokens: BTreeMap<String, u32>) -> Result<Marking, NetError> {
    if let Some(unknown) = tokens.keys().find(|place| !net.has_place(place)) {
        return Err(NetError::UnknownPlace(unknown.clone()));
    }
    Ok(Marking::from(tokens))
}
