//! Batch playout: many walks, materialized into one event log.
//!
//! The batch is one sequential unit. All walks are drawn first, then materialized in generation
//! order while a single fallback timestamp counter is threaded through every trace, so the same
//! random source and configuration always give the same log.
use std::collections::{
    BTreeSet,
    HashMap,
};

use pn_core::{
    AttributeKeys,
    EventLog,
    Marking,
    NetError,
    PetriNet,
    Semantics,
};
use rand::Rng;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use tracing::{
    debug,
    info,
    instrument,
};

use crate::materialize::materialize;
use crate::timestamp::{
    TimestampOverflow,
    TimestampSynthesizer,
    TimingProfile,
    MAX_DURATION_DAYS,
};
use crate::walk::{
    walk,
    WalkLimits,
    WalkRecord,
};

/// Default number of traces per batch.
pub const DEFAULT_NO_TRACES: usize = 1000;
/// Default maximum number of visible transitions per trace.
pub const DEFAULT_MAX_TRACE_LENGTH: usize = 1000;
/// Default cap on fired transitions (visible or silent) per walk.
pub const DEFAULT_MAX_TOTAL_STEPS: usize = 100_000;

/// Errors surfaced by [`play_out`].
#[derive(Debug, Error)]
pub enum PlayoutError {
    /// The configuration violates one of its documented ranges.
    #[error("invalid playout configuration: {0}")]
    InvalidConfig(String),

    /// The semantics oracle refused a step of a walk.
    #[error(transparent)]
    Semantics(#[from] NetError),

    /// Constraint-driven timestamps ran past the representable date range.
    #[error(transparent)]
    Timestamp(#[from] TimestampOverflow),
}

/// Options for one batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayoutConfig {
    /// Number of traces to generate.
    pub no_traces: usize,
    /// Maximum number of visible transitions per trace; must be at least 1.
    pub max_trace_length: usize,
    /// Cap on all fired transitions per walk; ends walks stuck in silent cycles.
    pub max_total_steps: usize,
    /// Attribute names used when the log is exported.
    pub keys: AttributeKeys,
    /// Nominal duration of activities, in days.
    pub time_constraints: Option<HashMap<String, f64>>,
    /// Antecedent activities of each activity.
    pub antecedents: Option<HashMap<String, BTreeSet<String>>>,
    /// Relative jitter on activity durations, in `[0, 1)`.
    pub jitter: f64,
    /// Return the raw walk records instead of an event log.
    pub return_visited_elements: bool,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            no_traces: DEFAULT_NO_TRACES,
            max_trace_length: DEFAULT_MAX_TRACE_LENGTH,
            max_total_steps: DEFAULT_MAX_TOTAL_STEPS,
            keys: AttributeKeys::default(),
            time_constraints: None,
            antecedents: None,
            jitter: 0.0,
            return_visited_elements: false,
        }
    }
}

impl PlayoutConfig {
    /// Check the documented ranges of every option.
    pub fn validate(&self) -> Result<(), PlayoutError> {
        if self.max_trace_length == 0 {
            return Err(PlayoutError::InvalidConfig("max_trace_length must be at least 1".into()));
        }
        if self.max_total_steps == 0 {
            return Err(PlayoutError::InvalidConfig("max_total_steps must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.jitter) {
            return Err(PlayoutError::InvalidConfig(format!("jitter must be in [0, 1), got {}", self.jitter)));
        }
        if let Some((activity, days)) = self
            .time_constraints
            .iter()
            .flatten()
            .find(|(_, days)| !(0.0..=MAX_DURATION_DAYS).contains(*days))
        {
            return Err(PlayoutError::InvalidConfig(format!(
                "duration of {activity} must be between 0 and {MAX_DURATION_DAYS} days, got {days}"
            )));
        }
        Ok(())
    }

    /// Length bounds for each walk.
    #[must_use]
    pub const fn limits(&self) -> WalkLimits {
        WalkLimits {
            max_trace_length: self.max_trace_length,
            max_total_steps: self.max_total_steps,
        }
    }

    /// Timing knowledge for constraint-driven timestamps, if both durations and antecedents are
    /// configured.
    #[must_use]
    pub fn timing_profile(&self) -> Option<TimingProfile> {
        TimingProfile::from_parts(self.time_constraints.as_ref(), self.antecedents.as_ref(), self.jitter)
    }
}

/// Result of a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayoutOutput {
    /// The materialized event log.
    Log(EventLog),
    /// The raw walks, when `return_visited_elements` is set.
    Walks(Vec<WalkRecord>),
}

impl PlayoutOutput {
    /// JSON rendering of either variant.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Log(log) => Ok(log.to_json()),
            Self::Walks(walks) => serde_json::to_value(walks),
        }
    }

    /// The event log, if this output is one.
    #[must_use]
    pub const fn as_log(&self) -> Option<&EventLog> {
        match self {
            Self::Log(log) => Some(log),
            Self::Walks(_) => None,
        }
    }

    /// The walk records, if this output holds them.
    #[must_use]
    pub fn as_walks(&self) -> Option<&[WalkRecord]> {
        match self {
            Self::Log(_) => None,
            Self::Walks(walks) => Some(walks),
        }
    }
}

/// Generate `config.no_traces` traces by random playout of `net`.
///
/// All random draws (transition choices, then duration jitter) come from `rng`; seed it to get a
/// reproducible batch.
#[instrument(skip_all, fields(net = net.name(), no_traces = config.no_traces))]
pub fn play_out<S, R>(
    semantics: &S,
    net: &PetriNet,
    initial_marking: &Marking,
    final_marking: Option<&Marking>,
    config: &PlayoutConfig,
    rng: &mut R,
) -> Result<PlayoutOutput, PlayoutError>
where
    S: Semantics + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;

    let limits = config.limits();
    let walks = (0..config.no_traces)
        .map(|_| walk(semantics, net, initial_marking, final_marking, limits, rng))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(walks = walks.len(), "walks complete");

    if config.return_visited_elements {
        return Ok(PlayoutOutput::Walks(walks));
    }

    let synthesizer = TimestampSynthesizer::new(config.timing_profile());
    if config.time_constraints.is_some() && !synthesizer.is_constraint_driven() {
        info!("time constraints given without antecedents; using sequential timestamps");
    }

    let mut log = EventLog::new(config.keys.clone());
    let mut counter = 0;
    for (index, record) in walks.iter().enumerate() {
        let (trace, next_counter) = materialize(record, index, &synthesizer, counter, rng)?;
        counter = next_counter;
        log.push(trace);
    }
    info!(traces = log.len(), events = log.event_count(), "playout complete");

    Ok(PlayoutOutput::Log(log))
}
