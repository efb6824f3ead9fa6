use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Selection: which site and which payload interval the user picked
// ---------------------------------------------------------------------------

/// Site restriction. `All` is what the dropdown shows as `ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    pub const ALL_LABEL: &'static str = "ALL";

    /// Parse the dropdown value; `"ALL"` means no restriction.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_LABEL {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.site == *site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "{}", Self::ALL_LABEL),
            SiteFilter::Site(site) => write!(f, "{site}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms.
/// An inverted interval is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload_mass: f64) -> bool {
        self.low <= payload_mass && payload_mass <= self.high
    }
}

/// Current widget values. Replaced on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl Selection {
    /// `ALL` sites and the dataset's observed payload bounds.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        let (low, high) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        Selection {
            site: SiteFilter::All,
            payload: PayloadRange::new(low, high),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Records launched from the selected site, in input order.
/// An unknown site yields an empty result.
pub fn filter_by_site<'a, I>(records: I, site: &SiteFilter) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records.into_iter().filter(|r| site.matches(r)).collect()
}

/// Records whose payload lies in `range`, inclusive at both ends.
pub fn filter_by_payload<'a, I>(records: I, range: PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|r| range.contains(r.payload_mass))
        .collect()
}

/// Count records per outcome. Only outcomes that occur get an entry.
pub fn aggregate_outcome_counts<'a, I>(records: I) -> BTreeMap<Outcome, usize>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.outcome).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Composition used by both charts
// ---------------------------------------------------------------------------

/// Rows feeding the two charts for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySelection<'a> {
    /// Site filter only; the payload range does not narrow the pie.
    pub pie: Vec<&'a LaunchRecord>,
    /// Site filter, then payload range.
    pub scatter: Vec<&'a LaunchRecord>,
}

pub fn select_for_display<'a>(
    dataset: &'a LaunchDataset,
    selection: &Selection,
) -> DisplaySelection<'a> {
    let pie = filter_by_site(&dataset.records, &selection.site);
    let scatter = filter_by_payload(pie.iter().copied(), selection.payload);
    DisplaySelection { pie, scatter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use Outcome::{Failure, Success};

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 500.0, Success, "FT"),
            record("A", 1500.0, Failure, "v1.1"),
            record("B", 500.0, Success, "FT"),
            record("B", 9000.0, Success, "B5"),
        ])
    }

    fn refs<'a>(ds: &'a LaunchDataset, idx: &[usize]) -> Vec<&'a LaunchRecord> {
        idx.iter().map(|&i| &ds.records[i]).collect()
    }

    #[test]
    fn all_sites_is_identity() {
        let ds = scenario();
        assert_eq!(
            filter_by_site(&ds.records, &SiteFilter::All),
            refs(&ds, &[0, 1, 2, 3])
        );
    }

    #[test]
    fn site_filter_keeps_matching_records_in_order() {
        let ds = scenario();
        let out = filter_by_site(&ds.records, &SiteFilter::Site("B".into()));
        assert!(out.iter().all(|r| r.site == "B"));
        assert_eq!(out, refs(&ds, &[2, 3]));
    }

    #[test]
    fn unknown_site_is_empty() {
        let ds = scenario();
        let vafb = SiteFilter::Site("VAFB SLC-4E".into());
        assert!(filter_by_site(&ds.records, &vafb).is_empty());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = scenario();
        assert!(filter_by_payload(&ds.records, PayloadRange::new(5000.0, 100.0)).is_empty());
    }

    #[test]
    fn dataset_bounds_include_both_ends() {
        let ds = scenario();
        let (lo, hi) = ds.payload_bounds().unwrap();
        assert_eq!(
            filter_by_payload(&ds.records, PayloadRange::new(lo, hi)),
            refs(&ds, &[0, 1, 2, 3])
        );
        assert_eq!(
            filter_by_payload(&ds.records, PayloadRange::new(1500.0, 1500.0)),
            refs(&ds, &[1])
        );
    }

    #[test]
    fn outcome_counts() {
        let ds = scenario();
        assert!(aggregate_outcome_counts(&[] as &[LaunchRecord]).is_empty());

        let counts = aggregate_outcome_counts(&ds.records);
        assert_eq!(counts.get(&Success), Some(&3));
        assert_eq!(counts.get(&Failure), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), ds.len());

        let site_b = filter_by_site(&ds.records, &SiteFilter::Site("B".into()));
        let only_success = aggregate_outcome_counts(site_b);
        assert_eq!(only_success.len(), 1);
        assert!(!only_success.contains_key(&Failure));
    }

    #[test]
    fn single_site_selection() {
        let ds = scenario();
        let sel = Selection {
            site: SiteFilter::parse("A"),
            payload: PayloadRange::new(0.0, 2000.0),
        };
        let out = select_for_display(&ds, &sel);
        assert_eq!(out.scatter, refs(&ds, &[0, 1]));
        assert_eq!(out.pie, refs(&ds, &[0, 1]));

        let counts = aggregate_outcome_counts(out.pie);
        assert_eq!(counts.get(&Success), Some(&1));
        assert_eq!(counts.get(&Failure), Some(&1));
    }

    #[test]
    fn all_sites_selection_ignores_range_for_pie() {
        let ds = scenario();
        let sel = Selection {
            site: SiteFilter::parse("ALL"),
            payload: PayloadRange::new(1000.0, 10000.0),
        };
        let out = select_for_display(&ds, &sel);
        assert_eq!(out.scatter, refs(&ds, &[1, 3]));
        assert_eq!(out.pie, refs(&ds, &[0, 1, 2, 3]));

        let counts = aggregate_outcome_counts(out.pie.iter().copied());
        assert_eq!(counts.get(&Success), Some(&3));
        assert_eq!(counts.get(&Failure), Some(&1));
    }

    #[test]
    fn repeated_selection_is_identical() {
        let ds = scenario();
        let sel = Selection::for_dataset(&ds);
        assert_eq!(sel.payload, PayloadRange::new(500.0, 9000.0));
        assert_eq!(select_for_display(&ds, &sel), select_for_display(&ds, &sel));
    }

    #[test]
    fn site_filter_display_round_trips_sentinel() {
        assert_eq!(SiteFilter::parse("ALL"), SiteFilter::All);
        assert_eq!(SiteFilter::All.to_string(), "ALL");
        assert_eq!(SiteFilter::Site("KSC LC-39A".into()).to_string(), "KSC LC-39A");
    }
}
