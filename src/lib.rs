//! BCF Import - Topic markup extraction and issue reconciliation
//!
//! This crate reads BCF archives (zip containers of topic folders holding
//! `markup.bcf`, viewpoint and snapshot files) and merges every topic into
//! an issue linked to a work item of a project-management system.
//!
//! Re-importing the same archive is idempotent: viewpoints and comments
//! are keyed by their uuid and never duplicated.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
