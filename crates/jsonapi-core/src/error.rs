//! Error types for jsonapi-core

use std::fmt;

use thiserror::Error;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Query,
    Name,
    WireName,
    Calldata,
    Transport,
    Response,
    Envelope,
    Format,
    Config,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Query => "query",
            Stage::Name => "name",
            Stage::WireName => "wire-name",
            Stage::Calldata => "calldata",
            Stage::Transport => "transport",
            Stage::Response => "response",
            Stage::Envelope => "envelope",
            Stage::Format => "format",
            Stage::Config => "config",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing {field} for {kind} query")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("Invalid token id {input:?}: expected a decimal integer")]
    InvalidTokenId { input: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Label too long: {len} bytes in {label:?} (max 255)")]
    LabelTooLong { label: String, len: usize },

    #[error("Empty response from resolver")]
    EmptyResponse,

    #[error("Truncated {stage} data: {field} needs {needed} bytes at offset {offset}, only {available} available")]
    TruncatedResponse {
        stage: Stage,
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unknown envelope ({len} bytes): {reason}")]
    UnknownEnvelope { reason: String, len: usize },

    #[error("Unsupported envelope size field at offset {offset}: varint wider than 2 bytes ({bytes})")]
    UnsupportedEnvelopeSize { offset: usize, bytes: String },

    #[error("No JSON found: missing '{marker}' after offset {offset}")]
    NoJsonFound { marker: char, offset: usize },

    #[error("Malformed JSON: {source}")]
    MalformedJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stage of the pipeline that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            Error::MissingField { .. } | Error::InvalidTokenId { .. } => Stage::Query,
            Error::InvalidAddress(_) | Error::Io(_) | Error::Json(_) => Stage::Config,
            Error::InvalidName { .. } => Stage::Name,
            Error::LabelTooLong { .. } => Stage::WireName,
            Error::TruncatedResponse { stage, .. } => *stage,
            Error::EmptyResponse => Stage::Response,
            Error::UnknownEnvelope { .. }
            | Error::UnsupportedEnvelopeSize { .. }
            | Error::NoJsonFound { .. } => Stage::Envelope,
            Error::MalformedJson { .. } => Stage::Format,
            Error::TransportFailure(_) => Stage::Transport,
        }
    }

    /// Unformatted text carried by `MalformedJson`, for best-effort display
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Error::MalformedJson { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// `stage: message`, as shown to CLI users
    pub fn diagnostic(&self) -> String {
        format!("{}: {}", self.stage(), self)
    }
}
