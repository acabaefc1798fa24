//! Ordered pattern classification
//!
//! The category of a statement row is decided by running the configured
//! regular expressions against the raw booking type in a fixed priority
//! order and taking the first match. Patterns are start-anchored ("starts
//! with", not "contains"), matching the way providers prefix their booking
//! type texts.
//!
//! Priority order: interest, deposit, withdraw, fee, special entry,
//! ignorable entry. Patterns absent from the configuration are skipped.
//!
//! The special entry pattern marks instruments whose direction is only
//! encoded in the value sign (secondary market discount/premium bookings);
//! those resolve to interest for non-negative amounts and to fee otherwise.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TypePatterns;
use crate::types::{Category, StatementError};

/// Classification outcome a configured pattern maps to
#[derive(Debug, Clone, Copy)]
enum RuleTarget {
    /// Pattern decides the category on its own
    Fixed(Category),

    /// Pattern only selects the row; the value sign decides the category
    SignDependent,
}

/// One configured pattern with its precompiled, start-anchored regex
#[derive(Debug)]
struct CompiledRule {
    target: RuleTarget,
    pattern: Regex,
}

/// Ordered classification rules compiled from a platform configuration
#[derive(Debug)]
pub struct CategoryRules {
    rules: Vec<CompiledRule>,
}

impl CategoryRules {
    /// Compile the configured patterns into the fixed priority order
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Config`] when a pattern is not a valid
    /// regular expression.
    pub fn from_patterns(patterns: &TypePatterns) -> Result<Self, StatementError> {
        let bindings = [
            (&patterns.interest, RuleTarget::Fixed(Category::Interest)),
            (&patterns.deposit, RuleTarget::Fixed(Category::Deposit)),
            (&patterns.withdraw, RuleTarget::Fixed(Category::Withdrawal)),
            (&patterns.fee, RuleTarget::Fixed(Category::Fee)),
            (&patterns.special_entry, RuleTarget::SignDependent),
            (&patterns.ignorable_entry, RuleTarget::Fixed(Category::Ignored)),
        ];

        let mut rules = Vec::new();
        for (pattern, target) in bindings {
            if let Some(pattern) = pattern {
                rules.push(CompiledRule {
                    target,
                    pattern: compile_anchored(pattern)?,
                });
            }
        }

        Ok(CategoryRules { rules })
    }

    /// Classify a raw booking type string
    ///
    /// The first matching pattern in priority order wins. Rows matching the
    /// sign-dependent pattern resolve through [`resolve_by_sign`]. Rows
    /// matching nothing classify as [`Category::Unknown`] and are traced at
    /// debug level so new provider booking types stay visible without
    /// breaking the run.
    pub fn classify(&self, raw_type: &str, amount: Option<Decimal>) -> Category {
        for rule in &self.rules {
            if rule.pattern.is_match(raw_type) {
                return match rule.target {
                    RuleTarget::Fixed(category) => category,
                    RuleTarget::SignDependent => resolve_by_sign(amount),
                };
            }
        }

        debug!(raw_type, "no category pattern matched");
        Category::Unknown
    }
}

/// Resolve a sign-dependent entry into interest or fee
///
/// Non-negative amounts (zero included) are interest; negative amounts are
/// fees. A missing amount cannot be sign-checked and deliberately falls to
/// the fee branch so the outcome stays deterministic.
fn resolve_by_sign(amount: Option<Decimal>) -> Category {
    match amount {
        Some(value) if value >= Decimal::ZERO => Category::Interest,
        _ => Category::Fee,
    }
}

/// Compile a pattern anchored to the start of the booking type.
fn compile_anchored(pattern: &str) -> Result<Regex, StatementError> {
    Regex::new(&format!("^(?:{})", pattern))
        .map_err(|e| StatementError::config(format!("invalid pattern '{}': {}", pattern, e)))
}
