use crate::color::ColorMap;
use crate::data::charts::{self, PieSpec, ScatterSpec, Selection, SiteSelection};
use crate::data::model::{LaunchDataset, PayloadRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is immutable once loaded; everything else is derived from it
/// and the current selection.  Widget changes go through the setters below,
/// which re-run the chart computations so the renderer always draws from a
/// fresh [`PieSpec`] / [`ScatterSpec`].
pub struct AppState {
    /// Loaded dataset, never mutated after construction.
    pub dataset: LaunchDataset,

    /// Current dropdown and slider values.
    pub selection: Selection,

    /// Slider bounds: the payload extent observed at load time.
    pub slider_bounds: PayloadRange,

    /// Chart-ready pie data for the current selection (cached).
    pub pie: PieSpec,

    /// Chart-ready scatter data for the current selection (cached).
    pub scatter: ScatterSpec,

    /// Booster category → colour, for the scatter chart and its legend.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state for a freshly loaded dataset.
    pub fn new(dataset: LaunchDataset) -> Self {
        let selection = Selection::initial(&dataset);
        let pie = charts::site_success_summary(&dataset, &selection.site);
        let scatter = charts::payload_scatter(&dataset, &selection.site, selection.payload);
        let color_map = ColorMap::new(&dataset.booster_categories);
        let slider_bounds = dataset.payload_extent;

        Self {
            dataset,
            selection,
            slider_bounds,
            pie,
            scatter,
            color_map,
            status_message: None,
        }
    }

    /// Swap in a dataset opened at runtime, resetting the selection and the
    /// slider bounds.
    pub fn replace_dataset(&mut self, dataset: LaunchDataset) {
        *self = AppState::new(dataset);
    }

    /// Re-run both chart computations from the current selection.
    pub fn refresh_charts(&mut self) {
        self.pie = charts::site_success_summary(&self.dataset, &self.selection.site);
        self.scatter =
            charts::payload_scatter(&self.dataset, &self.selection.site, self.selection.payload);
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteSelection) {
        self.selection.site = site;
        self.refresh_charts();
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, payload: PayloadRange) {
        self.selection.payload = payload;
        self.refresh_charts();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let rec = |site: &str, payload: f64, class: i64, booster: &str| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        };
        LaunchDataset::from_records(vec![
            rec("A", 500.0, 1, "v1"),
            rec("A", 1500.0, 0, "v1"),
            rec("B", 800.0, 1, "v2"),
        ])
    }

    #[test]
    fn initial_state_shows_everything() {
        let state = AppState::new(dataset());
        assert_eq!(state.selection.site, SiteSelection::AllSites);
        assert_eq!(state.scatter.points.len(), 3);
        assert_eq!(state.pie.total(), 3);
        assert_eq!(state.slider_bounds, PayloadRange::new(500.0, 1500.0));
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut state = AppState::new(dataset());
        state.set_site(SiteSelection::Site("A".to_string()));

        assert_eq!(state.pie.title, "Success vs Failed Launches for A");
        assert_eq!(state.pie.total(), 2);
        assert_eq!(state.scatter.points.len(), 2);
    }

    #[test]
    fn slider_change_recomputes_scatter() {
        let mut state = AppState::new(dataset());
        state.set_payload_range(PayloadRange::new(0.0, 1000.0));

        assert_eq!(state.scatter.points.len(), 2);
        // pie ignores the payload range
        assert_eq!(state.pie.total(), 3);
    }

    #[test]
    fn replace_dataset_resets_selection() {
        let mut state = AppState::new(dataset());
        state.set_site(SiteSelection::Site("A".to_string()));

        state.replace_dataset(LaunchDataset::from_records(Vec::new()));
        assert_eq!(state.selection.site, SiteSelection::AllSites);
        assert!(state.scatter.points.is_empty());
    }
}
