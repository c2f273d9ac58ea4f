//! Start/end timestamps for generated events.
//!
//! Without timing knowledge every event simply gets `epoch + counter` seconds as its start, where
//! the counter is shared by the whole batch and advanced once per event. With a [`TimingProfile`],
//! an activity that has both a nominal duration and a set of antecedents starts when the latest of
//! its antecedents finished (within the same trace) and lasts its (optionally jittered) duration.
use std::collections::{
    BTreeSet,
    HashMap,
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc,
};
use pn_core::{
    Event,
    Trace,
};
use rand::Rng;
use rand_distr::{
    Distribution,
    Uniform,
};
use thiserror::Error;
use tracing::trace;

/// Seconds in one day; durations are configured in days.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Longest accepted nominal duration, in days (a bit under 2740 years).
pub const MAX_DURATION_DAYS: f64 = 1_000_000.0;

/// A synthesized end timestamp fell outside the range `DateTime<Utc>` can represent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("end timestamp of {activity} starting at {start} is out of range")]
pub struct TimestampOverflow {
    /// Activity whose end could not be computed.
    pub activity: String,
    /// Start timestamp the duration was added to.
    pub start: DateTime<Utc>,
}

/// Per-activity timing knowledge used for constraint-driven timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct TimingProfile {
    /// Nominal duration of each activity, in days.
    durations: HashMap<String, f64>,
    /// Activities whose completion an activity waits for.
    antecedents: HashMap<String, BTreeSet<String>>,
    /// Relative spread of actual durations around the nominal one, in `[0, 1)`.
    jitter: f64,
}

impl TimingProfile {
    /// Build a profile; constraint-driven timing needs both durations and antecedents, so this
    /// returns `None` if either is missing.
    #[must_use]
    pub fn from_parts(
        durations: Option<&HashMap<String, f64>>,
        antecedents: Option<&HashMap<String, BTreeSet<String>>>,
        jitter: f64,
    ) -> Option<Self> {
        Some(Self {
            durations: durations?.clone(),
            antecedents: antecedents?.clone(),
            jitter,
        })
    }

    /// Antecedents and nominal duration (in seconds) of `activity`, if it has both.
    fn constraint(&self, activity: &str) -> Option<(&BTreeSet<String>, f64)> {
        let antecedents = self.antecedents.get(activity)?;
        let days = self.durations.get(activity)?;
        Some((antecedents, days * SECONDS_PER_DAY))
    }
}

/// Timestamps assigned to one event, plus the fallback counter to use for the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// When the event started.
    pub start: DateTime<Utc>,
    /// When the event finished; only set for constraint-driven activities.
    pub end: Option<DateTime<Utc>>,
    /// Counter value for the next event of the batch.
    pub next_counter: u64,
}

/// Computes event timestamps, either from a [`TimingProfile`] or from the fallback counter.
#[derive(Clone, Debug, Default)]
pub struct TimestampSynthesizer {
    /// Timing knowledge; `None` means every event is timestamped from the counter.
    profile: Option<TimingProfile>,
}

impl TimestampSynthesizer {
    /// Create a synthesizer; pass `None` to always use fallback timestamps.
    #[must_use]
    pub const fn new(profile: Option<TimingProfile>) -> Self {
        Self { profile }
    }

    /// Whether any activity can get constraint-driven timestamps.
    #[must_use]
    pub const fn is_constraint_driven(&self) -> bool {
        self.profile.is_some()
    }

    /// Timestamps for the next `activity` of `trace`, which holds the events generated so far for
    /// the same case.
    ///
    /// # Errors
    /// [`TimestampOverflow`] if a chain of long durations pushes the end past the last
    /// representable timestamp.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        activity: &str,
        trace: &Trace,
        counter: u64,
        rng: &mut R,
    ) -> Result<Timing, TimestampOverflow> {
        let fallback = epoch_offset(counter);
        let next_counter = counter + 1;

        let Some((profile, (antecedents, nominal))) =
            self.profile.as_ref().and_then(|p| p.constraint(activity).map(|c| (p, c)))
        else {
            return Ok(Timing { start: fallback, end: None, next_counter });
        };

        let start = latest_antecedent_completion(trace, antecedents).unwrap_or(fallback);
        let duration = if profile.jitter > 0.0 {
            Uniform::new_inclusive(nominal * (1.0 - profile.jitter), nominal * (1.0 + profile.jitter)).sample(rng)
        } else {
            nominal
        };
        let end = start
            .checked_add_signed(seconds(duration))
            .ok_or_else(|| TimestampOverflow { activity: activity.to_owned(), start })?;
        trace!(activity, %start, %end, duration, "constraint-driven timestamp");

        Ok(Timing { start, end: Some(end), next_counter })
    }
}

/// Completion time of the antecedent event of `trace` that finished last.
#[must_use]
pub fn latest_antecedent_completion(trace: &Trace, antecedents: &BTreeSet<String>) -> Option<DateTime<Utc>> {
    trace
        .iter()
        .filter(|e| antecedents.contains(&e.activity))
        .map(Event::completion)
        .max()
}

/// The absolute timestamp `secs` seconds after the Unix epoch.
#[must_use]
pub fn epoch_offset(secs: u64) -> DateTime<Utc> {
    #[allow(clippy::cast_possible_wrap)]
    let delta = TimeDelta::seconds(secs as i64);
    DateTime::<Utc>::UNIX_EPOCH + delta
}

/// Convert fractional seconds to a `TimeDelta` with microsecond resolution.
///
/// Durations are bounded by [`MAX_DURATION_DAYS`], so the microsecond count fits an `i64`.
fn seconds(secs: f64) -> TimeDelta {
    #[allow(clippy::cast_possible_truncation)]
    let micros = (secs * 1_000_000.0).round() as i64;
    TimeDelta::microseconds(micros)
}
