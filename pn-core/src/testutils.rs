//! Small nets shared by unit tests across the workspace.
use std::collections::BTreeMap;

use rstest::fixture;

use crate::net::{
    AcceptingNet,
    ArcDefinition,
    NetDefinition,
    TransitionDefinition,
};
#[cfg(feature = "testutils")]
pub use crate::semantics::MockSemantics;

fn arc(source: &str, target: &str) -> ArcDefinition {
    ArcDefinition { source: source.into(), target: target.into(), weight: 1 }
}

fn transition(name: &str, label: Option<&str>) -> TransitionDefinition {
    TransitionDefinition { name: name.into(), label: label.map(Into::into) }
}

fn tokens(places: &[&str]) -> BTreeMap<String, u32> {
    places.iter().map(|p| ((*p).to_string(), 1)).collect()
}

fn build(def: NetDefinition) -> AcceptingNet {
    AcceptingNet::try_from(def).expect("test net should be valid")
}

/// `p0 -[A]-> p1`, then deadlock.
#[fixture]
pub fn single_activity_net() -> AcceptingNet {
    build(NetDefinition {
        name: "single".into(),
        places: vec!["p0".into(), "p1".into()],
        transitions: vec![transition("t_a", Some("A"))],
        arcs: vec![arc("p0", "t_a"), arc("t_a", "p1")],
        initial_marking: tokens(&["p0"]),
        final_marking: None,
    })
}

/// One place with a silent self-loop that is always enabled.
#[fixture]
pub fn silent_loop_net() -> AcceptingNet {
    build(NetDefinition {
        name: "silent-loop".into(),
        places: vec!["p0".into()],
        transitions: vec![transition("tau", None)],
        arcs: vec![arc("p0", "tau"), arc("tau", "p0")],
        initial_marking: tokens(&["p0"]),
        final_marking: None,
    })
}

/// `start -[A]-> p1 -[tau]-> p2 -[B]-> end`, with `end` as final marking.
#[fixture]
pub fn sequence_net() -> AcceptingNet {
    build(NetDefinition {
        name: "sequence".into(),
        places: vec!["start".into(), "p1".into(), "p2".into(), "end".into()],
        transitions: vec![transition("t_a", Some("A")), transition("tau", None), transition("t_b", Some("B"))],
        arcs: vec![
            arc("start", "t_a"),
            arc("t_a", "p1"),
            arc("p1", "tau"),
            arc("tau", "p2"),
            arc("p2", "t_b"),
            arc("t_b", "end"),
        ],
        initial_marking: tokens(&["start"]),
        final_marking: Some(tokens(&["end"])),
    })
}

/// `A` loops forever on `p0`; the final marking is the initial one, so the walk may stop whenever
/// it is back there.
#[fixture]
pub fn visible_loop_net() -> AcceptingNet {
    build(NetDefinition {
        name: "visible-loop".into(),
        places: vec!["p0".into()],
        transitions: vec![transition("t_a", Some("A"))],
        arcs: vec![arc("p0", "t_a"), arc("t_a", "p0")],
        initial_marking: tokens(&["p0"]),
        final_marking: Some(tokens(&["p0"])),
    })
}

/// `start -[A]-> (p1 | p2)`, `B` on the p1 branch, `C` on the p2 branch, `D` joins both.
#[fixture]
pub fn parallel_net() -> AcceptingNet {
    build(NetDefinition {
        name: "parallel".into(),
        places: ["start", "p1", "p2", "p3", "p4", "end"].into_iter().map(Into::into).collect(),
        transitions: vec![
            transition("t_a", Some("A")),
            transition("t_b", Some("B")),
            transition("t_c", Some("C")),
            transition("t_d", Some("D")),
        ],
        arcs: vec![
            arc("start", "t_a"),
            arc("t_a", "p1"),
            arc("t_a", "p2"),
            arc("p1", "t_b"),
            arc("t_b", "p3"),
            arc("p2", "t_c"),
            arc("t_c", "p4"),
            arc("p3", "t_d"),
            arc("p4", "t_d"),
            arc("t_d", "end"),
        ],
        initial_marking: tokens(&["start"]),
        final_marking: Some(tokens(&["end"])),
    })
}
