//! Client-side filtering of the university catalog.

use std::fmt;
use std::str::FromStr;

use crate::context::ServiceContext;
use crate::error::StoreError;
use crate::model::{self, University};
use crate::ports::store::Query;

/// Yearly budget ranges offered as filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBand {
    /// Below 30,000.
    Under30k,
    /// 30,000 up to (not including) 50,000.
    From30kTo50k,
    /// 50,000 up to (not including) 70,000.
    From50kTo70k,
    /// 70,000 and above.
    Above70k,
}

impl BudgetBand {
    /// All bands, cheapest first.
    pub const ALL: [Self; 4] =
        [Self::Under30k, Self::From30kTo50k, Self::From50kTo70k, Self::Above70k];

    /// Whether `budget` falls in this band.
    #[must_use]
    pub fn contains(self, budget: f64) -> bool {
        match self {
            Self::Under30k => budget < 30_000.0,
            Self::From30kTo50k => (30_000.0..50_000.0).contains(&budget),
            Self::From50kTo70k => (50_000.0..70_000.0).contains(&budget),
            Self::Above70k => budget >= 70_000.0,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Under30k => "under-30k",
            Self::From30kTo50k => "30k-50k",
            Self::From50kTo70k => "50k-70k",
            Self::Above70k => "above-70k",
        }
    }
}

impl fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|band| band.as_str() == s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|band| band.as_str()).collect();
            format!("unknown budget band {s:?} (expected one of: {})", known.join(", "))
        })
    }
}

/// Search, location, and budget criteria; unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniversityFilter {
    /// Case-insensitive text matched against name and programs.
    pub search: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Budget band; a missing budget counts as 0.
    pub budget: Option<BudgetBand>,
}

impl UniversityFilter {
    /// Whether `university` meets every set criterion.
    #[must_use]
    pub fn matches(&self, university: &University) -> bool {
        let search_ok = self.search.as_deref().filter(|q| !q.is_empty()).is_none_or(|query| {
            let query = query.to_lowercase();
            [&university.university_name, &university.programs_offered]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&query))
        });
        let location_ok = self
            .location
            .as_deref()
            .is_none_or(|location| university.location.as_deref() == Some(location));
        let budget_ok = self
            .budget
            .is_none_or(|band| band.contains(university.estimated_budget.unwrap_or(0.0)));

        search_ok && location_ok && budget_ok
    }

    /// The universities meeting every criterion, in input order.
    #[must_use]
    pub fn apply<'a>(&self, universities: &'a [University]) -> Vec<&'a University> {
        universities.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Distinct non-empty locations in order of first appearance.
#[must_use]
pub fn unique_locations(universities: &[University]) -> Vec<&str> {
    let mut locations: Vec<&str> = Vec::new();
    for location in universities.iter().filter_map(|u| u.location.as_deref()) {
        if !location.is_empty() && !locations.contains(&location) {
            locations.push(location);
        }
    }
    locations
}

/// Reads the university catalog.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub async fn load(ctx: &ServiceContext, limit: usize) -> Result<Vec<University>, StoreError> {
    let page = ctx.store.get_all(model::UNIVERSITIES, &Query::limit(limit)).await?;
    Ok(model::decode_all(model::UNIVERSITIES, page.items))
}

/// Reads one university by id.
///
/// # Errors
///
/// Returns an error if the lookup fails or the record does not decode.
pub async fn find(ctx: &ServiceContext, id: &str) -> Result<Option<University>, StoreError> {
    match ctx.store.get_by_id(model::UNIVERSITIES, id).await {
        Ok(Some(record)) => serde_json::from_value(record)
            .map(Some)
            .map_err(|e| StoreError::Decode(format!("university {id}: {e}"))),
        Ok(None) => Ok(None),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
