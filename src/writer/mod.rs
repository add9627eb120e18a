//! Report writer abstraction layer for glimpse
//!
//! Writers turn a [`DatasetReport`] into a formatted output string for a
//! consumer — today JSON for the client-side chart renderer; other formats
//! plug in through the same trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use glimpse::writer::{ReportWriter, JsonReportWriter};
//!
//! let writer = JsonReportWriter::pretty();
//! let json = writer.write(&report)?;
//! println!("{}", json);
//! ```

use crate::api::DatasetReport;
use crate::Result;

pub mod json;

pub use self::json::JsonReportWriter;

/// Trait for report output writers.
pub trait ReportWriter {
    /// Render a report into this writer's output format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GlimpseError::Writer`] when output generation
    /// fails.
    fn write(&self, report: &DatasetReport) -> Result<String>;
}
