//! Pipeline orchestration
//!
//! The pipeline sequences one complete run: validate the aggregation mode
//! up front, compile the classification rules once, normalize each raw row
//! in file order, feed surviving entries into the aggregation, and flush
//! the final ordered sequence.
//!
//! Row-level failures (malformed CSV rows, bad values, bad dates) are
//! skipped with a warning by default so that one broken row cannot take
//! down a batch of independent rows; strict mode turns them into fatal
//! errors instead. Both policies are explicit, nothing is chosen silently.

use tracing::{info, warn};

use crate::config::PlatformConfig;
use crate::core::aggregation::{create_aggregation, AggregationMode};
use crate::core::normalizer::RecordNormalizer;
use crate::core::rules::CategoryRules;
use crate::types::{RawRecord, StatementEntry, StatementError};

/// One configured pipeline run over a sequence of raw records
///
/// The configuration is loaded once and immutable for the run; the pipeline
/// never reloads it per record.
#[derive(Debug)]
pub struct StatementPipeline {
    config: PlatformConfig,
    strict: bool,
}

impl StatementPipeline {
    /// Create a pipeline over a loaded platform configuration
    ///
    /// Row-level errors are skipped with a warning by default; see
    /// [`StatementPipeline::strict`].
    pub fn new(config: PlatformConfig) -> Self {
        StatementPipeline {
            config,
            strict: false,
        }
    }

    /// Switch between skip-and-continue (default) and abort-on-first-error
    /// handling of row-level failures
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run the pipeline with a mode keyword
    ///
    /// The mode string is validated before any input is consumed; an
    /// unsupported keyword fails fast with nothing partially emitted.
    ///
    /// # Errors
    ///
    /// [`StatementError::UnsupportedAggregation`] for an unknown mode,
    /// otherwise as [`StatementPipeline::run_with_mode`].
    pub fn run<I>(&self, records: I, mode: &str) -> Result<Vec<StatementEntry>, StatementError>
    where
        I: IntoIterator<Item = Result<RawRecord, StatementError>>,
    {
        let mode = mode.parse::<AggregationMode>()?;
        self.run_with_mode(records, mode)
    }

    /// Run the pipeline with an already validated mode
    ///
    /// Records are processed in input order. Order is what makes the
    /// "first seen" currency/note tie-break of the summary buckets
    /// deterministic, and it is preserved as-is for transaction mode.
    ///
    /// # Errors
    ///
    /// [`StatementError::Config`] when a configured pattern does not
    /// compile; row-level errors when strict mode is on; I/O errors from
    /// the underlying reader.
    pub fn run_with_mode<I>(
        &self,
        records: I,
        mode: AggregationMode,
    ) -> Result<Vec<StatementEntry>, StatementError>
    where
        I: IntoIterator<Item = Result<RawRecord, StatementError>>,
    {
        info!(%mode, "aggregating data");

        let rules = CategoryRules::from_patterns(&self.config.type_patterns)?;
        let normalizer = RecordNormalizer::new(&self.config.field_map, &rules);
        let mut aggregation = create_aggregation(mode);

        for result in records {
            let record = match result {
                Ok(record) => record,
                Err(error) => {
                    self.recover_or_fail(error, "skipping unreadable row")?;
                    continue;
                }
            };

            match normalizer.normalize(&record) {
                Ok(Some(entry)) => aggregation.push(entry),
                Ok(None) => {}
                Err(error) => self.recover_or_fail(error, "skipping row")?,
            }
        }

        Ok(aggregation.finish())
    }

    /// Apply the error policy to a row-level failure.
    fn recover_or_fail(
        &self,
        error: StatementError,
        context: &'static str,
    ) -> Result<(), StatementError> {
        if !self.strict && error.is_recoverable() {
            warn!(error = %error, "{}", context);
            Ok(())
        } else {
            Err(error)
        }
    }
}
