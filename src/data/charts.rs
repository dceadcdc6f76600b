use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchDataset, Outcome, PayloadRange};

// ---------------------------------------------------------------------------
// Selection: which site and payload range the widgets currently hold
// ---------------------------------------------------------------------------

/// Site chosen in the dropdown: every site, or one concrete site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    AllSites,
    Site(String),
}

impl SiteSelection {
    /// Whether a record from `site` passes the site filter.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::AllSites => f.write_str("All Sites"),
            SiteSelection::Site(name) => f.write_str(name),
        }
    }
}

/// Transient widget state: dropdown value plus slider range.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Selection {
    /// Initial selection: all sites, slider spanning the observed payload
    /// extent (so no record is filtered out).
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Selection {
            site: SiteSelection::AllSites,
            payload: dataset.payload_extent,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart-ready data handed to the renderer
// ---------------------------------------------------------------------------

/// One pie slice: a label and its launch count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

/// Pie chart data: title plus ordered slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// One scatter point: payload on x, outcome class on y, booster category as
/// the colour key.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Scatter chart data: title plus points in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Filter/aggregate engine
// ---------------------------------------------------------------------------

/// Pie data for the current site selection.
///
/// * All sites: one slice per distinct outcome class present in the dataset,
///   labelled with the raw class value and counted over every record.  The
///   grouping key is the class, not the site, matching the dashboard's
///   historical behaviour.
/// * One site: exactly two slices, `Success` then `Failed`, zeros included.
///   A site with no records yields two zero slices.
pub fn site_success_summary(dataset: &LaunchDataset, site: &SiteSelection) -> PieSpec {
    match site {
        SiteSelection::AllSites => {
            let mut order: Vec<u8> = Vec::new();
            let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
            for rec in &dataset.records {
                let class = rec.outcome.class_value();
                if !counts.contains_key(&class) {
                    // first-appearance order, as the source data presents it
                    order.push(class);
                }
                *counts.entry(class).or_insert(0) += 1;
            }
            PieSpec {
                title: "Total Success Launches by Site".to_string(),
                slices: order
                    .into_iter()
                    .map(|class| PieSlice {
                        label: class.to_string(),
                        value: counts[&class],
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(name) => {
            let mut success = 0u64;
            let mut failed = 0u64;
            for rec in dataset.records.iter().filter(|r| r.site == *name) {
                match rec.outcome {
                    Outcome::Success => success += 1,
                    Outcome::Failure => failed += 1,
                }
            }
            PieSpec {
                title: format!("Success vs Failed Launches for {name}"),
                slices: vec![
                    PieSlice {
                        label: Outcome::Success.label().to_string(),
                        value: success,
                    },
                    PieSlice {
                        label: Outcome::Failure.label().to_string(),
                        value: failed,
                    },
                ],
            }
        }
    }
}

/// Scatter data for the current site selection and payload range.
///
/// Site filter first (skipped for all sites), then the inclusive payload
/// range.  Point order is dataset order; an empty result is a valid empty
/// point list, including for an inverted range.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload: PayloadRange,
) -> ScatterSpec {
    let points = dataset
        .records
        .iter()
        .filter(|rec| site.matches(&rec.site))
        .filter(|rec| payload.contains(rec.payload_mass_kg))
        .map(|rec| ScatterPoint {
            payload_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
        })
        .collect();

    ScatterSpec {
        title: "Correlation between Payload and Launch Success".to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn rec(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    /// The three-record dataset used across the filter tests.
    fn small_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", 500.0, 1, "v1"),
            rec("A", 1500.0, 0, "v1"),
            rec("B", 800.0, 1, "v2"),
        ])
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn all_sites_pie_groups_by_class() {
        let spec = site_success_summary(&small_dataset(), &SiteSelection::AllSites);
        assert_eq!(spec.title, "Total Success Launches by Site");
        // first record is a success, so class 1 appears first
        assert_eq!(
            spec.slices,
            vec![
                PieSlice {
                    label: "1".to_string(),
                    value: 2
                },
                PieSlice {
                    label: "0".to_string(),
                    value: 1
                },
            ]
        );
        assert_eq!(spec.total(), 3);
    }

    #[test]
    fn all_sites_pie_counts_every_record() {
        let ds = small_dataset();
        let spec = site_success_summary(&ds, &SiteSelection::AllSites);
        assert_eq!(spec.total() as usize, ds.len());
    }

    #[test]
    fn single_site_pie_has_success_then_failed() {
        let spec = site_success_summary(&small_dataset(), &site("A"));
        assert_eq!(spec.title, "Success vs Failed Launches for A");
        assert_eq!(
            spec.slices,
            vec![
                PieSlice {
                    label: "Success".to_string(),
                    value: 1
                },
                PieSlice {
                    label: "Failed".to_string(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn single_site_counts_conserve_site_total() {
        let ds = small_dataset();
        for name in &ds.sites {
            let spec = site_success_summary(&ds, &site(name));
            assert_eq!(spec.slices.len(), 2);
            let site_total = ds.records.iter().filter(|r| r.site == *name).count();
            assert_eq!(spec.total() as usize, site_total);
        }
    }

    #[test]
    fn unknown_site_yields_two_zero_slices() {
        let spec = site_success_summary(&small_dataset(), &site("Nowhere"));
        assert_eq!(
            spec.slices,
            vec![
                PieSlice {
                    label: "Success".to_string(),
                    value: 0
                },
                PieSlice {
                    label: "Failed".to_string(),
                    value: 0
                },
            ]
        );
    }

    #[test]
    fn scatter_applies_both_filters() {
        let ds = small_dataset();

        let spec = payload_scatter(&ds, &SiteSelection::AllSites, PayloadRange::new(0.0, 1000.0));
        assert_eq!(spec.title, "Correlation between Payload and Launch Success");
        assert_eq!(spec.points.len(), 2);
        assert_eq!(spec.points[0].payload_kg, 500.0);
        assert_eq!(spec.points[0].outcome, Outcome::Success);
        assert_eq!(spec.points[0].booster_category, "v1");
        assert_eq!(spec.points[1].payload_kg, 800.0);
        assert_eq!(spec.points[1].booster_category, "v2");

        let spec = payload_scatter(&ds, &site("B"), PayloadRange::new(0.0, 10_000.0));
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.points[0].payload_kg, 800.0);
        assert_eq!(spec.points[0].outcome, Outcome::Success);
    }

    #[test]
    fn scatter_range_is_inclusive_on_both_bounds() {
        let ds = small_dataset();
        let spec = payload_scatter(&ds, &SiteSelection::AllSites, PayloadRange::new(500.0, 800.0));
        let payloads: Vec<f64> = spec.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(payloads, vec![500.0, 800.0]);
    }

    #[test]
    fn scatter_inverted_range_is_empty() {
        let ds = small_dataset();
        let spec = payload_scatter(&ds, &SiteSelection::AllSites, PayloadRange::new(1000.0, 0.0));
        assert!(spec.points.is_empty());
    }

    #[test]
    fn scatter_full_extent_keeps_every_record() {
        let ds = small_dataset();
        let spec = payload_scatter(&ds, &SiteSelection::AllSites, ds.payload_extent);
        assert_eq!(spec.points.len(), ds.len());
    }

    #[test]
    fn scatter_preserves_dataset_order() {
        let ds = LaunchDataset::from_records(vec![
            rec("A", 900.0, 1, "v1"),
            rec("A", 100.0, 0, "v1"),
            rec("A", 400.0, 1, "v2"),
        ]);
        let spec = payload_scatter(&ds, &SiteSelection::AllSites, ds.payload_extent);
        let payloads: Vec<f64> = spec.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(payloads, vec![900.0, 100.0, 400.0]);
    }

    #[test]
    fn operations_are_pure() {
        let ds = small_dataset();
        let selection = Selection::initial(&ds);

        let pie_a = site_success_summary(&ds, &selection.site);
        let pie_b = site_success_summary(&ds, &selection.site);
        assert_eq!(pie_a, pie_b);

        let scatter_a = payload_scatter(&ds, &selection.site, selection.payload);
        let scatter_b = payload_scatter(&ds, &selection.site, selection.payload);
        assert_eq!(scatter_a, scatter_b);
    }

    #[test]
    fn initial_selection_spans_the_extent() {
        let ds = small_dataset();
        let selection = Selection::initial(&ds);
        assert_eq!(selection.site, SiteSelection::AllSites);
        assert_eq!(selection.payload, PayloadRange::new(500.0, 1500.0));
    }

    #[test]
    fn empty_dataset_yields_empty_charts() {
        let ds = LaunchDataset::from_records(Vec::new());
        let pie = site_success_summary(&ds, &SiteSelection::AllSites);
        assert!(pie.slices.is_empty());
        let scatter = payload_scatter(&ds, &SiteSelection::AllSites, ds.payload_extent);
        assert!(scatter.points.is_empty());
    }
}
