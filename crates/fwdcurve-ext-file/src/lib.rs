//! # fwdcurve Ext File
//!
//! Settlement price files for the fwdcurve engine.
//!
//! Reads exchange settlement CSV files, drops rows whose product type is not
//! wanted (options, by default) and turns every remaining row into a
//! validated [`Observation`](fwdcurve_curves::Observation).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod settlement;

pub use error::{IngestError, IngestResult};
pub use settlement::{IngestBatch, IngestOptions, IngestSummary, SettlementFileReader};
