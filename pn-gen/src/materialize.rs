//! Turning walk records into traces.
use pn_core::{
    Event,
    Trace,
};
use rand::Rng;
use tracing::instrument;

use crate::timestamp::{
    TimestampOverflow,
    TimestampSynthesizer,
};
use crate::walk::WalkRecord;

/// Build the trace for the `trace_index`-th walk of a batch.
///
/// Only visible transitions become events; silent transitions and markings are dropped. `counter`
/// is the fallback timestamp counter before this trace, and the returned counter is its value
/// after the last event of the trace.
///
/// # Errors
/// Propagates [`TimestampOverflow`] from the synthesizer.
#[instrument(level = "debug", skip(walk, synthesizer, rng), fields(steps = walk.steps.len()))]
pub fn materialize<R: Rng + ?Sized>(
    walk: &WalkRecord,
    trace_index: usize,
    synthesizer: &TimestampSynthesizer,
    mut counter: u64,
    rng: &mut R,
) -> Result<(Trace, u64), TimestampOverflow> {
    let mut trace = Trace::new(&trace_index.to_string());

    for transition in walk.visible_transitions() {
        let Some(activity) = transition.label.as_deref() else { continue };
        let timing = synthesizer.synthesize(activity, &trace, counter, rng)?;
        counter = timing.next_counter;
        trace.push(Event::new(activity, timing.start, timing.end));
    }

    Ok((trace, counter))
}
