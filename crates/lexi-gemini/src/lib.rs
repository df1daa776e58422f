//! Gemini integration for LexiGuard
//!
//! This crate provides the Gemini implementation of the DocumentAnalyzer trait.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::{
    Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse,
    GenerateTransport, GenerationConfig, HttpTransport, Part, SYSTEM_INSTRUCTION,
    USER_PROMPT_PREFIX,
};
pub use config::GeminiConfig;

// Re-export core types for convenience
pub use lexi_core::{AnalysisResult, DocumentAnalyzer, Error, ErrorKind, Result};
