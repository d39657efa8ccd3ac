//! Shared Module
//!
//! This module contains the transport-agnostic types of the board service:
//! the board, column, card and comment documents, request payloads, the
//! pure position sequencing logic and configuration.
//!
//! # Overview
//!
//! Nothing in here performs I/O. The backend loads documents from the
//! store, hands them to these types and persists whatever changed.

/// Board and column documents
pub mod board;

/// Card and comment documents
pub mod card;

/// Public user representation
pub mod user;

/// Dense integer ordering for sibling groups
pub mod sequencer;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Nullable patch fields
pub mod nullable;

/// Re-export commonly used types for convenience
pub use board::{Board, Column};
pub use card::{Card, Comment, NewCard};
pub use user::{PublicUser, UserSummary};
pub use sequencer::{PositionChange, SequenceError, Sequenced};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
