use std::sync::Arc;

use crate::config::PresentationPolicy;
use crate::data::aggregate::Aggregates;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads). Read-only once loaded.
    pub dataset: Option<Arc<AirQualityDataset>>,

    /// Current filter selection.
    pub criteria: Option<FilterCriteria>,

    /// Indices of records passing the current criteria.
    pub visible_indices: Vec<usize>,

    /// Aggregates of the visible records; rebuilt on every criteria change.
    pub aggregates: Option<Aggregates>,

    /// Thresholds, colours and labels used by the widgets.
    pub policy: PresentationPolicy,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PresentationPolicy::default())
    }
}

impl AppState {
    pub fn new(policy: PresentationPolicy) -> Self {
        Self {
            dataset: None,
            criteria: None,
            visible_indices: Vec::new(),
            aggregates: None,
            policy,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and select everything.
    pub fn set_dataset(&mut self, dataset: AirQualityDataset) {
        let dataset = Arc::new(dataset);
        self.criteria = Some(FilterCriteria::unrestricted(&dataset));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Record a fatal load error; any previous dataset is dropped so nothing
    /// stale is rendered.
    pub fn set_load_error(&mut self, message: String) {
        self.dataset = None;
        self.criteria = None;
        self.visible_indices.clear();
        self.aggregates = None;
        self.status_message = Some(message);
    }

    /// Replace the criteria, recomputing only if they actually changed.
    pub fn update_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria.as_ref() != Some(&criteria) {
            self.criteria = Some(criteria);
            self.refilter();
        }
    }

    /// Back to the criteria a freshly loaded dataset starts with.
    pub fn reset_criteria(&mut self) {
        if let Some(ds) = &self.dataset {
            let criteria = FilterCriteria::unrestricted(ds);
            self.update_criteria(criteria);
        }
    }

    /// Recompute `visible_indices` and `aggregates` from scratch.
    pub fn refilter(&mut self) {
        let (Some(ds), Some(criteria)) = (&self.dataset, &self.criteria) else {
            return;
        };
        self.visible_indices = filtered_indices(&ds.records, criteria);
        let view = ds.view(&self.visible_indices);
        self.aggregates = Some(Aggregates::compute(&view, &ds.schema));
        log::debug!(
            "Recomputed aggregates over {} of {} records",
            self.visible_indices.len(),
            ds.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::Metric;
    use crate::data::loader::read_csv;

    fn dataset() -> AirQualityDataset {
        let text = "datetime,station,PM2.5,PM10,SO2,NO2,CO,O3\n\
                    2013-03-01 00:00:00,Dongsi,10,20,1,1,1,1\n\
                    2014-03-01 00:00:00,Dongsi,30,40,1,1,1,1\n";
        read_csv(text.as_bytes()).unwrap()
    }

    #[test]
    fn loading_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.visible_indices, vec![0, 1]);
        let agg = state.aggregates.as_ref().unwrap();
        assert_eq!(agg.summary.mean_pm25, Metric::Value(20.0));
    }

    #[test]
    fn criteria_change_recomputes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let mut criteria = state.criteria.clone().unwrap();
        criteria.years.remove(&2013);
        state.update_criteria(criteria);

        assert_eq!(state.visible_indices, vec![1]);
        let agg = state.aggregates.as_ref().unwrap();
        assert_eq!(agg.summary.mean_pm25, Metric::Value(30.0));
        assert_eq!(agg.temperature_extremes.cold, Metric::Unavailable);
    }

    #[test]
    fn unchanged_criteria_do_not_recompute() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let same = state.criteria.clone().unwrap();
        state.aggregates = None;

        state.update_criteria(same.clone());
        assert!(state.aggregates.is_none());
        assert_eq!(state.criteria, Some(same));

        let mut changed = state.criteria.clone().unwrap();
        changed.hour_to = 12;
        state.update_criteria(changed);
        assert!(state.aggregates.is_some());
    }

    #[test]
    fn reset_restores_full_selection() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let mut criteria = state.criteria.clone().unwrap();
        criteria.stations.clear();
        state.update_criteria(criteria);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.aggregates.as_ref().unwrap().summary.mean_pm25, Metric::NoData);

        state.reset_criteria();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn load_error_clears_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_load_error("Missing required column 'PM10'".to_string());
        assert!(state.dataset.is_none());
        assert!(state.aggregates.is_none());
        assert!(state.visible_indices.is_empty());
    }
}
