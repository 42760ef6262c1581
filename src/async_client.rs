//! Async wrapper around [`CostReporter`] for use in async runtimes (Tokio, etc.).
//!
//! The pipeline itself is synchronous: pagination blocks on every page. This
//! wrapper moves each call onto tokio's blocking thread pool via
//! [`tokio::task::spawn_blocking`] so an async caller's event loop stays free.
//!
//! # Example
//!
//! ```no_run
//! use cost_report::{default_reports, AsyncCostReporter, CostReporter, HttpCostSource};
//!
//! # async fn example() -> cost_report::Result<()> {
//! let reporter = CostReporter::builder()
//!     .source(HttpCostSource::new("https://ce.us-east-1.amazonaws.com/"))
//!     .build()?;
//! let reporter = AsyncCostReporter::new(reporter);
//!
//! let path = reporter.run_all(default_reports()).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{CostReportError, Result};
use crate::report::{Report, ReportDefinition};
use crate::CostReporter;

/// Async wrapper around [`CostReporter`].
///
/// The reporter is behind a [`Mutex`], so concurrent calls are serialized and
/// reports are still built one at a time.
#[derive(Clone)]
pub struct AsyncCostReporter {
    inner: Arc<Mutex<CostReporter>>,
}

impl AsyncCostReporter {
    pub fn new(reporter: CostReporter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(reporter)),
        }
    }

    /// Run a sync reporter operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut CostReporter) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let reporter = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = reporter
                .lock()
                .map_err(|_| CostReportError::InvalidArgument("reporter lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| CostReportError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Build every definition asynchronously.
    pub async fn create_reports(&self, definitions: Vec<ReportDefinition>) -> Result<Vec<Report>> {
        self.run(move |r| r.create_reports(&definitions)).await
    }

    /// Build and export every definition asynchronously.
    pub async fn run_all(&self, definitions: Vec<ReportDefinition>) -> Result<PathBuf> {
        self.run(move |r| r.run(&definitions)).await
    }
}
