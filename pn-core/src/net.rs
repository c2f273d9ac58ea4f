//! Place/transition nets.
//!
//! A [`PetriNet`] is a bipartite directed graph stored in a [`petgraph::Graph`]: nodes are places
//! or transitions, edges are weighted arcs. Transitions optionally carry a label; unlabelled
//! transitions are silent and never show up in a generated log.
mod definition;

use std::collections::HashMap;
use std::fmt;

use petgraph::dot::Dot;
use petgraph::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

pub use self::definition::{
    AcceptingNet,
    ArcDefinition,
    NetDefinition,
    TransitionDefinition,
};
use crate::errors::NetError;

/// A place of the net; it only has a name, tokens live in a [`Marking`](crate::Marking).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
}

/// A transition of the net.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Unique name of the transition within its net.
    pub name: String,
    /// Activity label; `None` or an empty label marks a silent transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Transition {
    #[must_use]
    pub fn new(name: &str, label: Option<&str>) -> Self {
        Self { name: name.to_owned(), label: label.map(str::to_owned) }
    }

    /// Visible transitions are the ones that produce events.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self.label.as_deref(), Some(label) if !label.is_empty())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "({}, '{label}')", self.name),
            None => write!(f, "({}, None)", self.name),
        }
    }
}

/// Node payload stored in the net graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetNode {
    Place(Place),
    Transition(Transition),
}

impl NetNode {
    fn name(&self) -> &str {
        match self {
            Self::Place(p) => &p.name,
            Self::Transition(t) => &t.name,
        }
    }
}

/// A place/transition net with weighted arcs.
#[derive(Clone, Debug, Default)]
pub struct PetriNet {
    name: String,
    graph: DiGraph<NetNode, u32>,
    node_to_index: HashMap<String, NodeIndex>,
}

impl PetriNet {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), ..Default::default() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_place(&mut self, name: &str) -> Result<(), NetError> {
        self.add_node(NetNode::Place(Place { name: name.to_owned() }))
    }

    pub fn add_transition(&mut self, name: &str, label: Option<&str>) -> Result<(), NetError> {
        self.add_node(NetNode::Transition(Transition::new(name, label)))
    }

    /// Connect a place to a transition or a transition to a place. Adding an arc that already
    /// exists increases its weight.
    pub fn add_arc(&mut self, from: &str, to: &str, weight: u32) -> Result<(), NetError> {
        if weight == 0 {
            return Err(NetError::ZeroWeight { from: from.to_owned(), to: to.to_owned() });
        }

        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        match (&self.graph[from_idx], &self.graph[to_idx]) {
            (NetNode::Place(_), NetNode::Transition(_)) | (NetNode::Transition(_), NetNode::Place(_)) => (),
            _ => return Err(NetError::InvalidArc { from: from.to_owned(), to: to.to_owned() }),
        }

        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge) => self.graph[edge] += weight,
            None => {
                self.graph.add_edge(from_idx, to_idx, weight);
            },
        }
        Ok(())
    }

    /// Places in insertion order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.graph.node_weights().filter_map(|n| match n {
            NetNode::Place(p) => Some(p),
            NetNode::Transition(_) => None,
        })
    }

    /// Transitions in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.graph.node_weights().filter_map(|n| match n {
            NetNode::Transition(t) => Some(t),
            NetNode::Place(_) => None,
        })
    }

    #[must_use]
    pub fn has_place(&self, name: &str) -> bool {
        matches!(self.node_to_index.get(name).map(|idx| &self.graph[*idx]), Some(NetNode::Place(_)))
    }

    #[must_use]
    pub fn transition(&self, name: &str) -> Option<&Transition> {
        match self.node_to_index.get(name).map(|idx| &self.graph[*idx]) {
            Some(NetNode::Transition(t)) => Some(t),
            _ => None,
        }
    }

    /// Places consumed from when `transition` fires, with the arc weights.
    pub fn input_arcs(&self, transition: &Transition) -> Result<Vec<(&str, u32)>, NetError> {
        self.arcs(transition, Direction::Incoming)
    }

    /// Places produced into when `transition` fires, with the arc weights.
    pub fn output_arcs(&self, transition: &Transition) -> Result<Vec<(&str, u32)>, NetError> {
        self.arcs(transition, Direction::Outgoing)
    }

    /// Render the net in Graphviz DOT format.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let graphable = self.graph.map(
            |_, n| match n {
                NetNode::Place(p) => format!("place {}", p.name),
                NetNode::Transition(t) => format!("transition {t}"),
            },
            |_, weight| weight.to_string(),
        );
        let dot = Dot::new(&graphable);
        format!("{dot}")
    }

    fn add_node(&mut self, node: NetNode) -> Result<(), NetError> {
        let name = node.name().to_owned();
        if self.node_to_index.contains_key(&name) {
            return Err(NetError::DuplicateNode(name));
        }
        let idx = self.graph.add_node(node);
        self.node_to_index.insert(name, idx);
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex, NetError> {
        self.node_to_index
            .get(name)
            .copied()
            .ok_or_else(|| NetError::UnknownNode(name.to_owned()))
    }

    fn arcs(&self, transition: &Transition, direction: Direction) -> Result<Vec<(&str, u32)>, NetError> {
        let idx = match self.node_to_index.get(&transition.name) {
            Some(idx) if matches!(self.graph[*idx], NetNode::Transition(_)) => *idx,
            _ => return Err(NetError::UnknownTransition(transition.name.clone())),
        };

        Ok(self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let place = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                (self.graph[place].name(), *edge.weight())
            })
            .collect())
    }
}
