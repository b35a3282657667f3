//! Logic Module - Agent Brain & Orchestration
//!
//! Scoring, selection and learning for discovered networks, plus the epoch
//! loop that drives scan → decide → attack → learn → report.

pub mod collab;
pub mod config;
pub mod ledger;
pub mod observation;
pub mod orchestrator;
pub mod patterns;
pub mod records;
pub mod scoring;
pub mod selection;
pub mod state;
