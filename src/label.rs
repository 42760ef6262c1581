//! Display-label formatting for raw group keys.
//!
//! A formatter must be a pure function of its input: the aggregator relies on
//! identical raw keys always producing identical labels.

/// Rewrites a raw group key into the label shown in a report.
pub trait LabelFormatter: Send + Sync {
    fn format(&self, raw: &str) -> String;
}

/// Leaves keys untouched. The default for every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl LabelFormatter for Identity {
    fn format(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Removes a fixed prefix once from the start of a key, e.g. the
/// `SubProduct$` namespace that tag groupings carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripPrefix(pub String);

impl StripPrefix {
    pub fn new(prefix: &str) -> Self {
        Self(prefix.to_string())
    }
}

impl LabelFormatter for StripPrefix {
    fn format(&self, raw: &str) -> String {
        raw.strip_prefix(self.0.as_str()).unwrap_or(raw).to_string()
    }
}

impl<F> LabelFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Shorthand for `StripPrefix::new(prefix)`.
pub fn strip_prefix(prefix: &str) -> StripPrefix {
    StripPrefix::new(prefix)
}
