use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the launch records table
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_OUTCOME: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered `Failure < Success` so counts sort like the
/// `class` column (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map the numeric `class` value (0 or 1).
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The `class` value as plotted on the scatter y axis.
    pub fn as_class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kilograms, never negative.
    pub payload_mass: f64,
    pub outcome: Outcome,
    /// Only used to colour the scatter chart.
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All launches, in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    pub sites: Vec<String>,
    /// Distinct booster categories, sorted.
    pub booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build the site and booster indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            if !sites.iter().any(|s| *s == rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    /// Observed `(min, max)` payload mass, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.records.iter().map(|r| r.payload_mass);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    site: &str,
    payload_mass: f64,
    outcome: Outcome,
    booster: &str,
) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass,
        outcome,
        booster_category: booster.to_string(),
    }
}
