//! exograde-core: exercise content validation and scoring.
//!
//! Stored exercise records are normalized and validated into typed content
//! ([`schema`], [`model`]), learner submissions are read into structured
//! answers ([`answers`], [`zones`]) and scored into an immutable
//! [`report::ScoreResult`] ([`scoring`]). [`engine::Grader`] ties the steps
//! together.

pub mod answers;
pub mod blanks;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod traits;
pub mod zones;
