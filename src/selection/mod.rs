use std::collections::BTreeSet;

use crate::extractors::Snippet;
use crate::timing::{ExcludeRange, TimeSeconds};
use crate::{Result, TranscriptError};

/// Which parts of a transcript to keep.
///
/// `only` and `from`/`to` are mutually exclusive; `exclude` applies on top of
/// either of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionRequest {
    pub from: Option<TimeSeconds>,
    pub to: Option<TimeSeconds>,
    pub only: BTreeSet<TimeSeconds>,
    pub exclude: Vec<ExcludeRange>,
}

impl SelectionRequest {
    /// Build a validated request
    pub fn new(
        from: Option<TimeSeconds>,
        to: Option<TimeSeconds>,
        only: impl IntoIterator<Item = TimeSeconds>,
        exclude: Vec<ExcludeRange>,
    ) -> Result<Self> {
        let request = Self {
            from,
            to,
            only: only.into_iter().collect(),
            exclude,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.only.is_empty() && (self.from.is_some() || self.to.is_some()) {
            return Err(TranscriptError::ConflictingSelection);
        }

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(TranscriptError::InvalidRangeOrder {
                    start: from,
                    end: to,
                });
            }
        }

        Ok(())
    }

    /// True when the request keeps every snippet
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.only.is_empty() && self.exclude.is_empty()
    }

    /// Time selections only make sense when start times are visible
    pub fn check_timestamps(&self, timestamps_visible: bool) -> Result<()> {
        if !self.is_empty() && !timestamps_visible {
            return Err(TranscriptError::TimestampsRequired);
        }
        Ok(())
    }

    fn keeps(&self, snippet: &Snippet) -> bool {
        let selected = if !self.only.is_empty() {
            self.only.contains(&(snippet.start.round() as TimeSeconds))
        } else if self.from.is_some() || self.to.is_some() {
            let lower = self.from.unwrap_or(0) as f64;
            let upper = self.to.map_or(f64::INFINITY, |to| to as f64);
            lower <= snippet.start && snippet.start <= upper
        } else {
            true
        };

        selected && !self.exclude.iter().any(|range| range.contains(snippet.start))
    }
}

/// Apply a selection, keeping the relative order of the surviving snippets
pub fn filter_snippets(snippets: &[Snippet], request: &SelectionRequest) -> Result<Vec<Snippet>> {
    request.validate()?;

    Ok(snippets
        .iter()
        .filter(|snippet| request.keeps(snippet))
        .cloned()
        .collect())
}
