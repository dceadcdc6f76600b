use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary launch class
// ---------------------------------------------------------------------------

/// Launch outcome, parsed from the 0/1 `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map a raw class value to an outcome.  Anything but 0 or 1 is rejected
    /// at load time.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The raw class value (0 or 1) as stored in the dataset.
    pub fn class_value(&self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Label used in the per-site pie slices.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Failure => "Failed",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch record (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier, e.g. `CCAFS LC-40`.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Success (1) or failure (0).
    pub outcome: Outcome,
    /// Booster hardware generation, used as the scatter colour dimension.
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive payload bounds
// ---------------------------------------------------------------------------

/// Inclusive payload bounds in kilograms.
///
/// An inverted range (`min_kg > max_kg`) is not an error; it simply matches
/// nothing.  The slider widgets can transiently produce one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl PayloadRange {
    pub fn new(min_kg: f64, max_kg: f64) -> Self {
        PayloadRange { min_kg, max_kg }
    }

    /// Whether a payload mass falls inside the range (bounds included).
    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.min_kg && payload_kg <= self.max_kg
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
///
/// Built once at load time and never mutated afterwards; every chart is a
/// pure function of this value and the current selection.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records in file order.
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites.
    pub sites: Vec<String>,
    /// Sorted distinct booster version categories.
    pub booster_categories: Vec<String>,
    /// Observed `[min, max]` payload mass, `[0, 0]` for an empty dataset.
    pub payload_extent: PayloadRange,
}

impl LaunchDataset {
    /// Build the derived indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<String> = BTreeSet::new();
        let mut booster_categories: BTreeSet<String> = BTreeSet::new();
        let mut min_kg = f64::INFINITY;
        let mut max_kg = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.site.clone());
            booster_categories.insert(rec.booster_category.clone());
            min_kg = min_kg.min(rec.payload_mass_kg);
            max_kg = max_kg.max(rec.payload_mass_kg);
        }

        let payload_extent = if records.is_empty() {
            PayloadRange::new(0.0, 0.0)
        } else {
            PayloadRange::new(min_kg, max_kg)
        };

        LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            booster_categories: booster_categories.into_iter().collect(),
            payload_extent,
        }
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    #[test]
    fn derived_indices_are_sorted_and_distinct() {
        let ds = LaunchDataset::from_records(vec![
            rec("B", 800.0, 1, "v2"),
            rec("A", 500.0, 1, "v1"),
            rec("A", 1500.0, 0, "v1"),
        ]);
        assert_eq!(ds.sites, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ds.booster_categories, vec!["v1".to_string(), "v2".to_string()]);
        assert_eq!(ds.payload_extent, PayloadRange::new(500.0, 1500.0));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_zero_extent() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_extent, PayloadRange::new(0.0, 0.0));
        assert!(ds.sites.is_empty());
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = PayloadRange::new(2000.0, 1000.0);
        assert!(!range.contains(1500.0));
        assert!(!range.contains(2000.0));
        assert!(!range.contains(1000.0));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = PayloadRange::new(500.0, 1500.0);
        assert!(range.contains(500.0));
        assert!(range.contains(1500.0));
        assert!(!range.contains(499.9));
        assert!(!range.contains(1500.1));
    }

    #[test]
    fn class_values_round_trip() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::Success.class_value(), 1);
        assert_eq!(Outcome::Failure.label(), "Failed");
    }
}
