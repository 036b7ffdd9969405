//! CLI integration tests that run full builds against fake tools.
//!
//! The installer and freezer are `/bin/sh` scripts, so these only run on Unix.

#![cfg(unix)]

mod build_tests;
mod common;
mod plan_tests;
