use std::collections::{
    BTreeSet,
    HashMap,
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc,
};

use super::*;
use crate::timestamp::*;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(secs)
}

fn durations(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|(a, d)| ((*a).to_string(), *d)).collect()
}

/// `(activity, antecedent)` pairs; an empty antecedent declares an activity with none.
fn antecedents(entries: &[(&str, &str)]) -> HashMap<String, BTreeSet<String>> {
    let mut map: HashMap<String, BTreeSet<String>> = HashMap::new();
    for (activity, prev) in entries {
        let set = map.entry((*activity).to_string()).or_default();
        if !prev.is_empty() {
            set.insert((*prev).to_string());
        }
    }
    map
}

fn synthesizer(jitter: f64) -> TimestampSynthesizer {
    let d = durations(&[("A", 1.0), ("B", 0.5), ("C", 2.0), ("D", 0.25)]);
    let a = antecedents(&[("A", ""), ("B", "A"), ("C", "A"), ("D", "B"), ("D", "C")]);
    TimestampSynthesizer::new(TimingProfile::from_parts(Some(&d), Some(&a), jitter))
}

#[rstest]
fn test_epoch_offset() {
    assert_eq!(epoch_offset(0), DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(epoch_offset(90), at(90));
}

#[rstest]
fn test_fallback_without_profile(mut rng: StdRng) {
    let synth = TimestampSynthesizer::new(None);
    let timing = synth.synthesize("A", &Trace::new("0"), 7, &mut rng).unwrap();

    assert_eq!(timing, Timing { start: at(7), end: None, next_counter: 8 });
}

#[rstest]
fn test_time_constraints_without_antecedents_fall_back(mut rng: StdRng) {
    let d = durations(&[("A", 1.0)]);
    let profile = TimingProfile::from_parts(Some(&d), None, 0.0);
    assert!(profile.is_none());

    let timing = TimestampSynthesizer::new(profile).synthesize("A", &Trace::new("0"), 0, &mut rng).unwrap();
    assert_eq!(timing.start, DateTime::<Utc>::UNIX_EPOCH);
    assert_none!(timing.end);
}

#[rstest]
fn test_activity_missing_from_profile_falls_back(mut rng: StdRng) {
    let timing = synthesizer(0.0).synthesize("Z", &Trace::new("0"), 3, &mut rng).unwrap();
    assert_eq!(timing, Timing { start: at(3), end: None, next_counter: 4 });
}

#[rstest]
fn test_no_antecedent_yet_starts_at_counter(mut rng: StdRng) {
    let timing = synthesizer(0.0).synthesize("A", &Trace::new("0"), 5, &mut rng).unwrap();

    assert_eq!(timing.start, at(5));
    assert_eq!(timing.end, Some(at(5 + 86_400)));
    assert_eq!(timing.next_counter, 6);
}

#[rstest]
fn test_exact_duration_without_jitter(mut rng: StdRng) {
    let synth = synthesizer(0.0);
    let mut trace = Trace::new("0");
    trace.push(Event::new("A", at(0), Some(at(86_400))));

    let timing = synth.synthesize("B", &trace, 1, &mut rng).unwrap();
    assert_eq!(timing.start, at(86_400));
    assert_eq!(timing.end.unwrap() - timing.start, TimeDelta::seconds(43_200));
}

#[rstest]
fn test_start_follows_latest_antecedent(mut rng: StdRng) {
    let synth = synthesizer(0.0);
    let mut trace = Trace::new("0");
    trace.push(Event::new("A", at(0), Some(at(100))));
    trace.push(Event::new("C", at(100), Some(at(500))));
    trace.push(Event::new("B", at(100), Some(at(300))));

    let timing = synth.synthesize("D", &trace, 3, &mut rng).unwrap();
    assert_eq!(timing.start, at(500));
    assert_eq!(timing.end, Some(at(500 + 21_600)));
}

#[rstest]
fn test_antecedent_without_end_uses_its_start(mut rng: StdRng) {
    let synth = synthesizer(0.0);
    let mut trace = Trace::new("0");
    trace.push(Event::new("A", at(42), None));

    let timing = synth.synthesize("B", &trace, 1, &mut rng).unwrap();
    assert_eq!(timing.start, at(42));
}

#[rstest]
fn test_end_past_representable_range_is_an_error(mut rng: StdRng) {
    let synth = synthesizer(0.0);
    let mut trace = Trace::new("0");
    trace.push(Event::new("A", at(0), Some(DateTime::<Utc>::MAX_UTC)));

    let err = synth.synthesize("B", &trace, 1, &mut rng).unwrap_err();
    assert_eq!(err.activity, "B");
    assert_eq!(err.start, DateTime::<Utc>::MAX_UTC);
}

#[rstest]
fn test_latest_antecedent_completion_ignores_other_activities() {
    let mut trace = Trace::new("0");
    trace.push(Event::new("A", at(0), Some(at(10))));
    trace.push(Event::new("X", at(0), Some(at(1000))));

    let prev: BTreeSet<String> = ["A".to_string()].into();
    assert_eq!(latest_antecedent_completion(&trace, &prev), Some(at(10)));
    assert_none!(latest_antecedent_completion(&Trace::new("1"), &prev));
}

#[rstest]
#[case(0.1)]
#[case(0.5)]
#[case(0.9)]
fn test_jitter_stays_in_range(mut rng: StdRng, #[case] jitter: f64) {
    let synth = synthesizer(jitter);
    let nominal = 2.0 * SECONDS_PER_DAY;
    let (lo, hi) = (nominal * (1.0 - jitter), nominal * (1.0 + jitter));

    let mut below = 0;
    let mut above = 0;
    for counter in 0..2000 {
        let timing = synth.synthesize("C", &Trace::new("0"), counter, &mut rng).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let secs = (timing.end.unwrap() - timing.start).num_microseconds().unwrap() as f64 / 1e6;
        assert_ge!(secs, lo - 1e-6);
        assert_le!(secs, hi + 1e-6);
        if secs < nominal {
            below += 1;
        } else {
            above += 1;
        }
    }

    // roughly symmetric around the nominal duration
    assert_ge!(below, 800);
    assert_ge!(above, 800);
}
