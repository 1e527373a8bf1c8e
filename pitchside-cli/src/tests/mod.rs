//! Shared test harness modules for the `pitchside` CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod count_unit;
mod helpers;
