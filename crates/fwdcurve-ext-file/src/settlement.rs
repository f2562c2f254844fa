//! CSV settlement files.

use std::io;
use std::path::{Path, PathBuf};

use fwdcurve_config::IngestionConfig;
use fwdcurve_core::Date;
use fwdcurve_curves::{CurveError, CurveResult, Observation};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{IngestError, IngestResult};

// =============================================================================
// CSV RECORD
// =============================================================================

/// One row of a settlement file.
///
/// Columns are matched by header name; extra columns (e.g. `Underlying`) are
/// ignored and the optional ones may be absent.
#[derive(Debug, Deserialize)]
struct SettlementRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Exchange", default)]
    exchange: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "ProductType")]
    product_type: String,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
    #[serde(rename = "SettlementPrice")]
    settlement_price: String,
    #[serde(rename = "MaturityDate")]
    maturity_date: String,
}

impl SettlementRecord {
    fn into_observation(self) -> CurveResult<Observation> {
        let settlement_date = Date::parse_any(&self.date)?;
        let maturity_date = Date::parse_any(&self.maturity_date)?;
        let price = self.settlement_price.trim();
        let price: f64 = price
            .parse()
            .map_err(|_| CurveError::malformed(format!("invalid settlement price '{price}'")))?;

        let mut obs = Observation::new(settlement_date, maturity_date, self.product, price)?;
        if let Some(exchange) = self.exchange {
            obs = obs.with_exchange(exchange);
        }
        if let Some(currency) = self.currency {
            obs = obs.with_currency(currency);
        }
        if let Some(name) = self.name {
            obs = obs.with_instrument_id(name);
        }
        Ok(obs)
    }
}

// =============================================================================
// OPTIONS AND SUMMARY
// =============================================================================

/// Options for reading settlement files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Product types to keep, compared case-insensitively.
    pub product_types: Vec<String>,
    /// Log and skip malformed rows instead of failing.
    pub skip_malformed: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from(&IngestionConfig::default())
    }
}

impl From<&IngestionConfig> for IngestOptions {
    fn from(config: &IngestionConfig) -> Self {
        Self {
            product_types: config.product_types.clone(),
            skip_malformed: config.skip_malformed,
        }
    }
}

impl IngestOptions {
    fn accepts(&self, product_type: &str) -> bool {
        let product_type = product_type.trim();
        self.product_types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(product_type))
    }
}

/// Row counts of an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Files read.
    pub files: usize,
    /// Data rows read.
    pub rows: usize,
    /// Rows dropped by product type.
    pub filtered: usize,
    /// Malformed rows skipped.
    pub skipped: usize,
    /// Observations produced.
    pub observations: usize,
}

impl IngestSummary {
    fn merge(&mut self, other: IngestSummary) {
        self.files += other.files;
        self.rows += other.rows;
        self.filtered += other.filtered;
        self.skipped += other.skipped;
        self.observations += other.observations;
    }
}

/// Observations read from one or more settlement files.
#[derive(Debug, Clone, Default)]
pub struct IngestBatch {
    /// Validated observations, in file then row order.
    pub observations: Vec<Observation>,
    /// Row counts.
    pub summary: IngestSummary,
}

impl IngestBatch {
    fn extend(&mut self, other: IngestBatch) {
        self.observations.extend(other.observations);
        self.summary.merge(other.summary);
    }
}

// =============================================================================
// READER
// =============================================================================

/// Reads settlement CSV files into validated observations.
///
/// Expected header:
///
/// ```text
/// Date,Exchange,Name,Product,ProductType,Underlying,Currency,SettlementPrice,MaturityDate
/// ```
///
/// Dates are `YYYYMMDD` or ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct SettlementFileReader {
    options: IngestOptions,
}

impl SettlementFileReader {
    /// Creates a reader.
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Returns the reader options.
    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Reads one settlement file.
    pub fn read_file(&self, path: impl AsRef<Path>) -> IngestResult<IngestBatch> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
        self.read_reader(file, &path.display().to_string())
    }

    /// Reads settlement rows from any reader. `source_name` labels errors and logs.
    pub fn read_reader<R: io::Read>(&self, reader: R, source_name: &str) -> IngestResult<IngestBatch> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut batch = IngestBatch {
            observations: Vec::new(),
            summary: IngestSummary {
                files: 1,
                ..IngestSummary::default()
            },
        };

        for (index, result) in csv_reader.deserialize::<SettlementRecord>().enumerate() {
            let row = index + 1;
            batch.summary.rows += 1;

            let parsed = match result {
                Ok(record) => {
                    if !self.options.accepts(&record.product_type) {
                        batch.summary.filtered += 1;
                        continue;
                    }
                    record.into_observation()
                }
                Err(e) if e.is_io_error() => {
                    return Err(IngestError::Csv {
                        file: source_name.to_string(),
                        source: e,
                    });
                }
                Err(e) => Err(CurveError::malformed(e.to_string())),
            };

            match parsed {
                Ok(obs) => batch.observations.push(obs),
                Err(error) if self.options.skip_malformed => {
                    warn!(file = source_name, row, error = %error, "skipping malformed row");
                    batch.summary.skipped += 1;
                }
                Err(error) => return Err(IngestError::malformed(source_name, row, error)),
            }
        }

        batch.summary.observations = batch.observations.len();
        debug!(
            file = source_name,
            rows = batch.summary.rows,
            observations = batch.summary.observations,
            "read settlement file"
        );
        Ok(batch)
    }

    /// Reads every `*.csv` file of a directory, in file name order.
    pub fn read_dir(&self, dir: impl AsRef<Path>) -> IngestResult<IngestBatch> {
        let dir = dir.as_ref();
        let files = csv_files(dir)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), "no settlement files found");
        }

        let mut batch = IngestBatch::default();
        for file in files {
            batch.extend(self.read_file(&file)?);
        }
        log_summary(&batch.summary);
        Ok(batch)
    }

    /// Reads a mix of files and directories, in the order given.
    pub fn read_paths<P: AsRef<Path>>(&self, paths: &[P]) -> IngestResult<IngestBatch> {
        let mut batch = IngestBatch::default();
        for path in paths {
            let path = path.as_ref();
            let part = if path.is_dir() {
                let mut part = IngestBatch::default();
                for file in csv_files(path)? {
                    part.extend(self.read_file(&file)?);
                }
                part
            } else {
                self.read_file(path)?
            };
            batch.extend(part);
        }
        log_summary(&batch.summary);
        Ok(batch)
    }
}

fn csv_files(dir: &Path) -> IngestResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::io(dir, e))?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn log_summary(summary: &IngestSummary) {
    info!(
        files = summary.files,
        rows = summary.rows,
        filtered = summary.filtered,
        skipped = summary.skipped,
        observations = summary.observations,
        "ingested settlement files"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Date,Exchange,Name,Product,ProductType,Underlying,Currency,SettlementPrice,MaturityDate\n";

    fn read(body: &str, options: IngestOptions) -> IngestResult<IngestBatch> {
        let text = format!("{HEADER}{body}");
        SettlementFileReader::new(options).read_reader(text.as_bytes(), "test.csv")
    }

    #[test]
    fn test_reads_compact_dates() {
        let batch = read(
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70.00,20250401\n",
            IngestOptions::default(),
        )
        .unwrap();

        assert_eq!(batch.observations.len(), 1);
        let obs = &batch.observations[0];
        assert_eq!(obs.settlement_date(), Date::from_ymd(2025, 1, 1).unwrap());
        assert_eq!(obs.maturity_date(), Date::from_ymd(2025, 4, 1).unwrap());
        assert_eq!(obs.exchange(), Some("NYMEX"));
        assert_eq!(obs.currency(), Some("USD"));
        assert_eq!(obs.instrument_id(), "CLJ5");
        assert_eq!(obs.settlement_price(), 70.0);
    }

    #[test]
    fn test_reads_iso_dates_and_blank_optionals() {
        let batch = read(
            "2025-01-01,,,CL,FUT,,,70.5,2025-04-01\n",
            IngestOptions::default(),
        )
        .unwrap();
        let obs = &batch.observations[0];
        assert_eq!(obs.exchange(), None);
        assert_eq!(obs.instrument_id(), "CL:20250401");
    }

    #[test]
    fn test_filters_product_types() {
        let batch = read(
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20250401\n\
             20250101,NYMEX,CLJ5C70,CL,OPT,WTI,USD,2.5,20250401\n\
             20250101,NYMEX,CLM5,CL,fut,WTI,USD,72,20250701\n",
            IngestOptions::default(),
        )
        .unwrap();

        assert_eq!(batch.observations.len(), 2);
        assert_eq!(batch.summary.rows, 3);
        assert_eq!(batch.summary.filtered, 1);
    }

    #[test]
    fn test_malformed_row_reports_row_number() {
        let err = read(
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20250401\n\
             20250101,NYMEX,CLM5,CL,FUT,WTI,USD,-1,20250701\n",
            IngestOptions::default(),
        )
        .unwrap_err();

        match err {
            IngestError::Malformed { file, row, error } => {
                assert_eq!(file, "test.csv");
                assert_eq!(row, 2);
                assert!(matches!(error, CurveError::MalformedObservation { row: Some(2), .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_date_and_price_are_malformed() {
        for body in [
            "2025/01/01,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20250401\n",
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,abc,20250401\n",
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20241231\n",
        ] {
            let err = read(body, IngestOptions::default()).unwrap_err();
            assert!(matches!(err, IngestError::Malformed { row: 1, .. }), "{body}");
        }
    }

    #[test]
    fn test_skip_malformed() {
        let options = IngestOptions {
            skip_malformed: true,
            ..IngestOptions::default()
        };
        let batch = read(
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20250401\n\
             20250101,NYMEX,CLM5,CL,FUT,WTI,USD,NaN,20250701\n",
            options,
        )
        .unwrap();

        assert_eq!(batch.observations.len(), 1);
        assert_eq!(batch.summary.skipped, 1);
    }

    #[test]
    fn test_options_follow_ingestion_config() {
        assert_eq!(
            IngestOptions::default(),
            IngestOptions::from(&IngestionConfig::default())
        );

        let config = fwdcurve_config::EngineConfig::from_toml_str(
            "[ingestion]\nproduct_types = [\"opt\"]\nskip_malformed = true\n",
        )
        .unwrap();
        let options = IngestOptions::from(&config.ingestion);
        assert!(options.skip_malformed);

        let batch = read(
            "20250101,NYMEX,CLJ5,CL,FUT,WTI,USD,70,20250401\n\
             20250101,NYMEX,CLJ5C70,CL,OPT,WTI,USD,2.5,20250401\n",
            options,
        )
        .unwrap();
        assert_eq!(batch.observations.len(), 1);
        assert_eq!(batch.observations[0].instrument_id(), "CLJ5C70");
    }

    #[test]
    fn test_missing_required_column_is_malformed() {
        let text = "Date,Product,ProductType,MaturityDate\n20250101,CL,FUT,20250401\n";
        let err = SettlementFileReader::default()
            .read_reader(text.as_bytes(), "short.csv")
            .unwrap_err();
        assert!(matches!(err, IngestError::Malformed { row: 1, .. }));
    }
}
