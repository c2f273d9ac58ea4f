#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix everything, and more to force us to add inline allows, which are even more needlessly verbose, but give us a mechanism to say "we think this is okay, but you might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # pn-gen – Synthetic event logs from Petri net playout
//!
//! pn-gen plays the token game on a Petri net many times over and records what happened as an
//! event log. It is meant for producing test and benchmark data when only a process model (and
//! perhaps some timing knowledge about its activities) is available.
//!
//! ## Pipeline overview
//! 1. Random walks ([`walk`](crate::walk::walk)) – Starting from the initial marking, repeatedly
//!    pick one enabled transition uniformly at random and fire it, until the net deadlocks, the
//!    walk chooses to stop in the final marking, or the length limits are hit.
//! 2. Materialization ([`materialize`](crate::materialize::materialize)) – Keep only the labelled
//!    (visible) transitions of each walk and turn them into the events of one trace.
//! 3. Timestamping ([`TimestampSynthesizer`](crate::timestamp::TimestampSynthesizer)) – Give each
//!    event a start, and an end when per-activity durations and antecedents are configured.
//!
//! The entry point [`playout::play_out`] runs the whole batch; the `pn-gen` binary wraps it with
//! net/config loading and writes the results into a timestamped directory under `runs/`.

pub mod materialize;
pub mod playout;
pub mod timestamp;
pub mod utils;
pub mod walk;

pub use playout::{
    play_out,
    PlayoutConfig,
    PlayoutError,
    PlayoutOutput,
};
pub use walk::{
    Visited,
    WalkLimits,
    WalkRecord,
};

#[cfg(test)]
mod tests;
