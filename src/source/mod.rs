//! Cost data sources and lazy pagination.
//!
//! A [`CostSource`] answers one page of a [`CostQuery`] per call. [`paginate`]
//! turns that into a lazy, finite, non-restartable sequence of pages that ends
//! after the first page without a continuation token, and [`records`] flattens
//! the pages into [`PeriodRecord`]s.

pub mod http;
pub mod recorded;

pub use http::HttpCostSource;
pub use recorded::RecordedCostSource;

use tracing::debug;

use crate::error::Result;
use crate::models::{CostPage, PeriodRecord};
use crate::query::CostQuery;

/// Anything that can answer a single page of a cost-and-usage query.
pub trait CostSource {
    /// Fetch the page following `next_page_token` (or the first page when `None`).
    fn fetch_page(&mut self, query: &CostQuery, next_page_token: Option<&str>) -> Result<CostPage>;
}

impl<S: CostSource + ?Sized> CostSource for Box<S> {
    fn fetch_page(&mut self, query: &CostQuery, next_page_token: Option<&str>) -> Result<CostPage> {
        (**self).fetch_page(query, next_page_token)
    }
}

impl<S: CostSource + ?Sized> CostSource for &mut S {
    fn fetch_page(&mut self, query: &CostQuery, next_page_token: Option<&str>) -> Result<CostPage> {
        (**self).fetch_page(query, next_page_token)
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Iterator over the pages of one query. Stops after the terminal page or the
/// first error.
pub struct Pages<'a, S: CostSource + ?Sized> {
    source: &'a mut S,
    query: &'a CostQuery,
    next_token: Option<String>,
    fetched: usize,
    done: bool,
}

impl<S: CostSource + ?Sized> Iterator for Pages<'_, S> {
    type Item = Result<CostPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self
            .source
            .fetch_page(self.query, self.next_token.as_deref());
        self.fetched += 1;

        match result {
            Ok(page) => {
                debug!(
                    page = self.fetched,
                    periods = page.results_by_time.len(),
                    terminal = page.is_terminal(),
                    "fetched cost page"
                );
                if page.is_terminal() {
                    self.done = true;
                    self.next_token = None;
                } else {
                    self.next_token = page.next_page_token.clone();
                }
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Lazily page through `query` against `source`.
pub fn paginate<'a, S: CostSource + ?Sized>(source: &'a mut S, query: &'a CostQuery) -> Pages<'a, S> {
    Pages {
        source,
        query,
        next_token: None,
        fetched: 0,
        done: false,
    }
}

/// Lazily page through `query` and convert every period into a [`PeriodRecord`].
pub fn records<'a, S: CostSource + ?Sized + 'a>(
    source: &'a mut S,
    query: &'a CostQuery,
) -> impl Iterator<Item = Result<PeriodRecord>> + 'a {
    let metric = query.metric.as_str();
    paginate(source, query).flat_map(move |page| -> Vec<Result<PeriodRecord>> {
        match page {
            Ok(page) => page
                .results_by_time
                .iter()
                .map(|result| PeriodRecord::from_result(result, metric))
                .collect(),
            Err(e) => vec![Err(e)],
        }
    })
}
