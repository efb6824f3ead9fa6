use std::collections::BTreeMap;

use crate::data::filter::{aggregate_outcome_counts, select_for_display, Selection, SiteFilter};
use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome";

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

pub fn pie_title(site: &SiteFilter) -> String {
    match site {
        SiteFilter::All => "Total Success Launches".to_string(),
        SiteFilter::Site(s) => format!("Success vs. Failed Launches at {s}"),
    }
}

pub fn scatter_title(site: &SiteFilter) -> String {
    let base = "Scatter Plot of Payload Mass vs. Launch Outcome";
    match site {
        SiteFilter::All => base.to_string(),
        SiteFilter::Site(s) => format!("{base} at {s}"),
    }
}

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub outcome: Outcome,
    pub count: usize,
    /// Share of the total, in `0.0..=1.0`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    /// One slice per outcome present, ordered Failure then Success.
    /// Empty when no record matched.
    pub slices: Vec<PieSlice>,
    pub total: usize,
}

impl PieChart {
    pub fn from_records<'a, I>(site: &SiteFilter, records: I) -> Self
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        let counts = aggregate_outcome_counts(records);
        let total: usize = counts.values().sum();
        let slices = counts
            .into_iter()
            .map(|(outcome, count)| PieSlice {
                outcome,
                count,
                fraction: count as f64 / total as f64,
            })
            .collect();

        PieChart {
            title: pie_title(site),
            slices,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Points of one booster category: `[payload_mass, class]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub booster_category: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    /// Sorted by booster category.
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn from_records<'a, I>(site: &SiteFilter, records: I) -> Self
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for r in records {
            grouped
                .entry(r.booster_category.as_str())
                .or_default()
                .push([r.payload_mass, r.outcome.as_class() as f64]);
        }

        ScatterChart {
            title: scatter_title(site),
            series: grouped
                .into_iter()
                .map(|(cat, points)| ScatterSeries {
                    booster_category: cat.to_string(),
                    points,
                })
                .collect(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Both charts for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub pie: PieChart,
    pub scatter: ScatterChart,
}

impl DashboardCharts {
    pub fn build(dataset: &LaunchDataset, selection: &Selection) -> Self {
        let rows = select_for_display(dataset, selection);
        DashboardCharts {
            pie: PieChart::from_records(&selection.site, rows.pie),
            scatter: ScatterChart::from_records(&selection.site, rows.scatter),
        }
    }
}
