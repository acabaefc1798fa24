//! Per-platform configuration
//!
//! Provider differences are pure data: a YAML file per peer-to-peer lending
//! platform supplies the classification patterns and the mapping from
//! canonical field roles to the provider's CSV column names. The engine
//! itself is generic; adding a platform means adding a config file, not
//! code.
//!
//! # Schema
//!
//! ```yaml
//! type_patterns:
//!   interest: "^Interest income.*"
//!   deposit: "^Incoming client payment"
//!   withdraw: "^Withdraw application"
//!   special_entry: "^Loan .* - discount/premium"
//!   ignorable_entry: "^Loan .* - investment in loan"
//! field_map:
//!   booking_date: "Date"
//!   booking_date_format: "%Y-%m-%d %H:%M:%S"
//!   booking_details: "Details"
//!   booking_id: "Transaction ID"
//!   booking_type: "Details"
//!   booking_value: "Turnover"
//!   booking_currency: "Currency"
//! ```
//!
//! All pattern keys are optional; absent patterns simply never match.
//! `booking_currency` is optional; without it every entry is booked as EUR.
//! Missing required field-map keys surface as a configuration error at load
//! time, before any row is processed.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::StatementError;

/// Classification patterns for one platform
///
/// Each value is a regular expression tested start-anchored against the raw
/// booking type. Evaluation order is fixed by the rules engine (interest,
/// deposit, withdraw, fee, special entry, ignorable entry), not by the YAML
/// key order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypePatterns {
    /// Money moved into the platform account
    pub deposit: Option<String>,

    /// Money moved out of the platform account
    pub withdraw: Option<String>,

    /// Interest and interest-like income
    pub interest: Option<String>,

    /// Costs charged to the investor
    pub fee: Option<String>,

    /// Entries whose direction is encoded only in the value sign
    /// (secondary market discount/premium); resolved to interest or fee
    /// by the rules engine
    pub special_entry: Option<String>,

    /// Entries to drop on purpose (investment placements, currency
    /// exchanges and similar noise)
    pub ignorable_entry: Option<String>,
}

/// Mapping from canonical field roles to provider CSV column names
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMap {
    /// Column holding the booking date
    pub booking_date: String,

    /// strftime-style format of the booking date column
    pub booking_date_format: String,

    /// Column holding the human-readable booking details
    pub booking_details: String,

    /// Column holding the provider's transaction identifier
    pub booking_id: String,

    /// Column holding the text the classification patterns run against
    pub booking_type: String,

    /// Column holding the transaction value
    pub booking_value: String,

    /// Column holding the booking currency; EUR is assumed when absent
    #[serde(default)]
    pub booking_currency: Option<String>,
}

/// Complete configuration for one platform, immutable for the run
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Classification patterns; all optional
    #[serde(default)]
    pub type_patterns: TypePatterns,

    /// Field role to column name mapping; required
    pub field_map: FieldMap,
}

impl PlatformConfig {
    /// Parse a platform configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Config`] when the YAML is malformed or a
    /// required field-map key is missing.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StatementError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a platform configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Config`] when the file cannot be read or
    /// its content does not match the schema.
    pub fn load(path: &Path) -> Result<Self, StatementError> {
        let content = fs::read_to_string(path).map_err(|e| {
            StatementError::config(format!(
                "cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            StatementError::Config { message } => StatementError::config(format!(
                "in config file '{}': {}",
                path.display(),
                message
            )),
            other => other,
        })
    }
}
