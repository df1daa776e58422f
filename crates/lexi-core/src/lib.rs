//! Core types for LexiGuard
//!
//! This crate defines the analysis result schema, its structural validator,
//! the error taxonomy shared by every analysis backend, the
//! `DocumentAnalyzer` trait, and the state machine that governs one
//! analysis attempt at a time.

pub mod analyzer;
pub mod error;
pub mod schema;
pub mod session;
pub mod types;


pub use analyzer::DocumentAnalyzer;
pub use error::{BoxError, Error, ErrorKind, Result};
pub use schema::{REQUIRED_FIELDS, parse_analysis, response_schema};
pub use session::{
    AnalysisController, AnalysisSession, AnalysisState, AnalysisStatus, AttemptTicket,
    LatestAnalysis,
};
pub use types::*;
