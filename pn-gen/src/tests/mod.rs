mod timestamp_test;
mod utils_test;

use assertables::*;
use pn_core::testutils::*;
use pn_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::*;

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

fn labels(walk: &crate::WalkRecord) -> Vec<&str> {
    walk.visible_transitions().filter_map(|t| t.label.as_deref()).collect()
}
