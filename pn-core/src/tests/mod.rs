mod marking_test;

use assertables::*;
use rstest::*;

use crate::testutils::*;
use crate::*;

fn marking(tokens: &[(&str, u32)]) -> Marking {
    tokens.iter().map(|(place, count)| (*place, *count)).collect()
}
