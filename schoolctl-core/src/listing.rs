//! In-memory search and filtering over a fetched listing
//!
//! The listing is fetched once, unpaginated, newest first. Everything here
//! works on that slice without touching the server again.

use std::collections::BTreeSet;

use crate::school::School;

/// Search term plus optional exact state filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    search: String,
    state: Option<String>,
}

impl ListingFilter {
    /// Build a filter. An empty state is the same as no state filter.
    pub fn new(search: impl Into<String>, state: Option<String>) -> Self {
        Self {
            search: search.into().to_lowercase(),
            state: state.filter(|s| !s.is_empty()),
        }
    }

    /// True when neither a search term nor a state is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.state.is_none()
    }

    /// Case-insensitive substring match on name, city, or address,
    /// and case-sensitive equality on state.
    pub fn matches(&self, school: &School) -> bool {
        let matches_search = self.search.is_empty()
            || [&school.name, &school.city, &school.address]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search));

        let matches_state = match &self.state {
            Some(state) => school.state == *state,
            None => true,
        };

        matches_search && matches_state
    }

    /// Filter a listing, preserving its order.
    pub fn apply<'a>(&self, schools: &'a [School]) -> Vec<&'a School> {
        schools.iter().filter(|s| self.matches(s)).collect()
    }

    /// Filter a listing and keep the totals needed for the summary line.
    pub fn listing<'a>(&self, schools: &'a [School]) -> Listing<'a> {
        Listing {
            shown: self.apply(schools),
            total: schools.len(),
            filtered: !self.is_empty(),
        }
    }
}

/// Filtered view over a listing
#[derive(Debug)]
pub struct Listing<'a> {
    pub shown: Vec<&'a School>,
    pub total: usize,
    filtered: bool,
}

impl Listing<'_> {
    /// `"Showing N of M schools"`
    pub fn summary(&self) -> String {
        format!("Showing {} of {} schools", self.shown.len(), self.total)
    }

    /// Hint shown when nothing matched, or `None` if something did.
    pub fn empty_hint(&self) -> Option<&'static str> {
        if !self.shown.is_empty() {
            None
        } else if self.filtered {
            Some("Try adjusting your search criteria or filters.")
        } else {
            Some("No schools have been added yet.")
        }
    }
}

/// Distinct states present in a listing, sorted.
pub fn unique_states(schools: &[School]) -> Vec<String> {
    schools
        .iter()
        .map(|s| s.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
