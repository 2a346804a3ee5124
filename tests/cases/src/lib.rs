//! # View service test cases
//!
//! This subproject provides integration tests for the view service: candidate servers
//! heartbeat a running service over the in-process communicator.

#[macro_use]
extern crate log;
mod steps;
