//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_drill_core::{Session, SessionFilter, Unit};

/// Start a session with a fixed shuffle.
pub fn seeded_session(units: &[Unit], seed: u64) -> Session {
    Session::start_with_rng(units, &SessionFilter::new(), &mut StdRng::seed_from_u64(seed))
        .expect("fixture catalog is not empty")
}

/// Names of the units in a bucket, in order.
pub fn names(units: &[Unit]) -> Vec<String> {
    units.iter().map(|u| u.name.clone()).collect()
}
