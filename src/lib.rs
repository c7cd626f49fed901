//! Sales Workflow Agent Library
//!
//! Core functionality for the sales workflow agent CLI: heuristic lead
//! extraction from free-form transcripts, external-source merging, scoring
//! and stage classification, action planning, follow-up email and report
//! generation, run tracking and CRM export.
//!
//! # Modules
//!
//! - `actions`: Prioritized next-action planning.
//! - `config`: Run configuration (weights, stage rules, export mapping).
//! - `crm_export`: Salesforce-style CRM payload projection.
//! - `db_storage`: SQLite run-tracking store.
//! - `errors`: Error handling types.
//! - `extractor`: Heuristic field extraction.
//! - `extractor_client`: Optional external structured-extraction provider client.
//! - `merge`: Defensive merge of external payloads over heuristic records.
//! - `models`: Core data models (LeadRecord, ScoreResult).
//! - `narrative`: Follow-up email and report rendering.
//! - `patterns`: Pattern library (ordered regexes + keyword vocabularies).
//! - `redact`: PII redaction and text hashing.
//! - `scoring`: Fit/intent scoring and stage resolution.
//! - `workflow`: End-to-end run orchestration.

pub mod actions;
pub mod config;
pub mod crm_export;
pub mod db_storage;
pub mod errors;
pub mod extractor;
pub mod extractor_client;
pub mod merge;
pub mod models;
pub mod narrative;
pub mod patterns;
pub mod redact;
pub mod scoring;
pub mod workflow;
