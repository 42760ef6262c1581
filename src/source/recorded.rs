//! Pages replayed from memory or from a recorded JSON file.

use std::collections::VecDeque;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::debug;

use super::CostSource;
use crate::error::{CostReportError, Result};
use crate::models::CostPage;
use crate::query::CostQuery;

/// Serves a fixed list of pages in order.
///
/// The continuation token passed with each call must match the
/// `NextPageToken` of the previously served page, so a caller that restarts
/// or skips pages gets an error instead of silently mixed data.
pub struct RecordedCostSource {
    pages: VecDeque<CostPage>,
    expected_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageFile {
    Many(Vec<CostPage>),
    One(CostPage),
}

impl RecordedCostSource {
    pub fn new(pages: Vec<CostPage>) -> Self {
        Self {
            pages: pages.into(),
            expected_token: None,
        }
    }

    /// Load pages from a `.json` or `.json.gz` file holding either one page
    /// object or an array of pages.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(path)?;
            let mut decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
            let mut contents = String::new();
            decoder.read_to_string(&mut contents)?;
            contents
        } else {
            fs::read_to_string(path)?
        };

        let pages = match serde_json::from_str::<PageFile>(&contents)? {
            PageFile::Many(pages) => pages,
            PageFile::One(page) => vec![page],
        };
        debug!(path = %path.display(), pages = pages.len(), "loaded recorded cost pages");
        Ok(Self::new(pages))
    }

    /// Number of pages not yet served.
    pub fn remaining(&self) -> usize {
        self.pages.len()
    }
}

impl CostSource for RecordedCostSource {
    fn fetch_page(&mut self, _query: &CostQuery, next_page_token: Option<&str>) -> Result<CostPage> {
        if next_page_token != self.expected_token.as_deref() {
            return Err(CostReportError::DataSource(format!(
                "unexpected continuation token {:?} (expected {:?})",
                next_page_token, self.expected_token
            )));
        }
        let page = self.pages.pop_front().ok_or_else(|| {
            CostReportError::DataSource("no more recorded pages".to_string())
        })?;
        self.expected_token = page.next_page_token.clone();
        Ok(page)
    }
}
