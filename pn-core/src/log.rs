//! Event log containers.
//!
//! Events are fixed records (activity, start, optional end) with an open map for any extra
//! attributes. The attribute *names* used when the log is exported are configured once through
//! [`AttributeKeys`], so callers can produce XES-style (`concept:name`, `time:timestamp`) or custom
//! column names from the same log.
use std::collections::{
    BTreeMap,
    HashMap,
};

use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// Default trace attribute for the case identifier.
pub const DEFAULT_TRACEID_KEY: &str = "concept:name";
/// Default event attribute for the activity name.
pub const DEFAULT_NAME_KEY: &str = "concept:name";
/// Default event attribute for the start timestamp.
pub const DEFAULT_TIMESTAMP_KEY: &str = "time:timestamp";
/// Default event attribute for the end timestamp.
pub const DEFAULT_END_TIMESTAMP_KEY: &str = "end_timestamp";

/// Attribute names written into exported traces and events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeKeys {
    /// Trace attribute holding the case identifier.
    pub case_id_key: String,
    /// Event attribute holding the activity name.
    pub activity_key: String,
    /// Event attribute holding the start timestamp.
    pub timestamp_key: String,
    /// Event attribute holding the end timestamp, when one was synthesized.
    pub end_timestamp_key: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            case_id_key: DEFAULT_TRACEID_KEY.into(),
            activity_key: DEFAULT_NAME_KEY.into(),
            timestamp_key: DEFAULT_TIMESTAMP_KEY.into(),
            end_timestamp_key: DEFAULT_END_TIMESTAMP_KEY.into(),
        }
    }
}

/// One occurrence of an activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Activity label of the transition that fired.
    pub activity: String,
    /// When the activity started.
    pub start: DateTime<Utc>,
    /// When the activity finished, if a duration was known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Any further attributes, exported as-is.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Event {
    /// An event without extra attributes.
    #[must_use]
    pub fn new(activity: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            activity: activity.to_owned(),
            start,
            end,
            attributes: BTreeMap::new(),
        }
    }

    /// When the activity finished: its end timestamp, or its start if it has no duration.
    #[must_use]
    pub fn completion(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }

    fn to_json(&self, keys: &AttributeKeys) -> Value {
        let mut map: Map<String, Value> =
            self.attributes.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        map.insert(keys.activity_key.clone(), Value::String(self.activity.clone()));
        map.insert(keys.timestamp_key.clone(), Value::String(rfc3339(&self.start)));
        if let Some(end) = &self.end {
            map.insert(keys.end_timestamp_key.clone(), Value::String(rfc3339(end)));
        }
        Value::Object(map)
    }
}

/// An ordered sequence of events belonging to one case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Case identifier, unique within its log.
    pub case_id: String,
    /// Events in generation order.
    pub events: Vec<Event>,
    /// Trace-level attributes besides the case identifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Trace {
    /// An empty trace for `case_id`.
    #[must_use]
    pub fn new(case_id: &str) -> Self {
        Self { case_id: case_id.to_owned(), ..Default::default() }
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn to_json(&self, keys: &AttributeKeys) -> Value {
        let mut attributes: Map<String, Value> =
            self.attributes.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        attributes.insert(keys.case_id_key.clone(), Value::String(self.case_id.clone()));

        let mut map = Map::new();
        map.insert("attributes".into(), Value::Object(attributes));
        map.insert("events".into(), Value::Array(self.events.iter().map(|e| e.to_json(keys)).collect()));
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type IntoIter = std::slice::Iter<'a, Event>;
    type Item = &'a Event;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Traces in the order they were generated, plus the attribute names used to export them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    /// Attribute names used by [`EventLog::to_json`].
    pub keys: AttributeKeys,
    /// Traces in generation order.
    pub traces: Vec<Trace>,
}

impl EventLog {
    /// An empty log exported with `keys`.
    #[must_use]
    pub fn new(keys: AttributeKeys) -> Self {
        Self { keys, traces: Vec::new() }
    }

    /// Append a trace.
    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Traces in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    /// Number of traces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the log has no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Total number of events over all traces.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.traces.iter().map(Trace::len).sum()
    }

    /// How many events each activity produced.
    #[must_use]
    pub fn activity_counts(&self) -> HashMap<&str, usize> {
        self.traces
            .iter()
            .flat_map(Trace::iter)
            .map(|e| e.activity.as_str())
            .counts()
    }

    /// Flat JSON rendering keyed by the configured attribute names.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("traces".into(), Value::Array(self.traces.iter().map(|t| t.to_json(&self.keys)).collect()));
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type IntoIter = std::slice::Iter<'a, Trace>;
    type Item = &'a Trace;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
