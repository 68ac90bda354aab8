//! quizclock-core — Question sets, the timed session engine, and scoring.
//!
//! This crate holds everything with behavioural contracts: loading and
//! shuffling questions, racing the answer loop against the countdown, and
//! turning a finished session into a score.

pub mod config;
pub mod deadline;
pub mod duration;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod report;
pub mod scripted;
pub mod terminal;
