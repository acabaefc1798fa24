//! Statement Engine Library
//! # Overview
//!
//! This library turns per-provider CSV exports of peer-to-peer lending
//! account activity into a normalized CSV for Portfolio Performance.
//! Provider differences are pure data, not code: a YAML configuration per
//! platform supplies the classification patterns and the field mapping,
//! and a single generic pipeline handles every platform.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (StatementEntry, Category, errors)
//! - [`cli`] - CLI argument parsing
//! - [`config`] - Per-platform YAML configuration (patterns + field map)
//! - [`core`] - Business logic components:
//!   - [`core::value`] - Locale-tolerant numeric value parsing
//!   - [`core::rules`] - Ordered pattern classification
//!   - [`core::normalizer`] - Raw row to statement entry conversion
//!   - [`core::aggregation`] - Transaction/daily/monthly aggregation
//!   - [`core::pipeline`] - Run orchestration
//! - [`io`] - CSV input/output handling
//!
//! # Categories
//!
//! Every statement row classifies into one of six categories:
//!
//! - **Interest**: interest and interest-like income
//! - **Deposit**: money transferred into the platform account
//! - **Withdrawal**: money transferred out of the platform account
//! - **Fee**: costs charged to the investor
//! - **Ignored**: configured as irrelevant, dropped on purpose
//! - **Unknown**: no pattern matched, dropped with a diagnostic trace
//!
//! Only the first four ever reach the output.
//!
//! # Aggregation Modes
//!
//! - **transaction**: one output entry per statement row
//! - **daily**: one summary entry per day and category
//! - **monthly**: one summary entry per month and category, dated at the
//!   last calendar day of the month

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use crate::config::{FieldMap, PlatformConfig, TypePatterns};
pub use crate::core::{AggregationMode, CategoryRules, RecordNormalizer, StatementPipeline};
pub use crate::io::{write_statements_csv, DecimalSeparator, StatementReader};
pub use crate::types::{Category, RawRecord, StatementEntry, StatementError};
