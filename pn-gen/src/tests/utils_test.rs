use std::path::PathBuf;

use pn_core::net::ArcDefinition;

use super::*;
use crate::utils::*;

const NET_YAML: &str = r"
name: order
places: [start, end]
transitions:
  - { name: t_a, label: A }
arcs:
  - { source: start, target: t_a }
  - { source: t_a, target: end }
initial_marking: { start: 1 }
final_marking: { end: 1 }
";

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pn-gen-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn definition() -> NetDefinition {
    serde_yaml::from_str(NET_YAML).unwrap()
}

fn check(accepting: &AcceptingNet) {
    assert_eq!(accepting.net.name(), "order");
    assert_eq!(accepting.initial_marking.tokens("start"), 1);
    assert_eq!(accepting.final_marking.as_ref().unwrap().tokens("end"), 1);
    assert_some!(accepting.net.transition("t_a"));
}

#[rstest]
fn test_load_net_yaml() {
    let path = scratch_file("net.yaml", NET_YAML.as_bytes());
    check(&load_net(&path).unwrap());
}

#[rstest]
fn test_load_net_json() {
    let path = scratch_file("net.json", &serde_json::to_vec(&definition()).unwrap());
    check(&load_net(&path).unwrap());
}

#[rstest]
fn test_load_net_msgpack_without_extension() {
    let path = scratch_file("net.bin", &rmp_serde::to_vec_named(&definition()).unwrap());
    check(&load_net(&path).unwrap());
}

#[rstest]
fn test_load_net_invalid() {
    let mut def = definition();
    def.arcs.push(ArcDefinition { source: "start".into(), target: "end".into(), weight: 1 });
    let path = scratch_file("bad.json", &serde_json::to_vec(&def).unwrap());

    let err = load_net(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<NetError>(),
        Some(&NetError::InvalidArc { from: "start".into(), to: "end".into() })
    );
}

#[rstest]
fn test_load_net_missing_file() {
    assert_err!(load_net(&PathBuf::from("/definitely/not/here.yaml")));
}

#[rstest]
fn test_load_config() {
    let path = scratch_file("config.yaml", b"no_traces: 12\nmax_trace_length: 4\n");
    let config = load_config(&path).unwrap();
    assert_eq!(config.no_traces, 12);
    assert_eq!(config.max_trace_length, 4);
    assert_eq!(config.jitter, 0.0);
}
