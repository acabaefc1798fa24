//! Core business logic module
//!
//! This module contains the statement processing components:
//! - `value` - Locale-tolerant numeric value parsing
//! - `rules` - Ordered pattern classification with sign disambiguation
//! - `normalizer` - Raw row to statement entry conversion
//! - `aggregation` - Transaction/daily/monthly aggregation dispatch
//! - `pipeline` - Run orchestration and the row-level error policy

pub mod aggregation;
pub mod normalizer;
pub mod pipeline;
pub mod rules;
pub mod value;

pub use aggregation::{create_aggregation, Aggregation, AggregationMode};
pub use normalizer::RecordNormalizer;
pub use pipeline::StatementPipeline;
pub use rules::CategoryRules;
