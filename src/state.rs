use crate::chart::projection::{project, Projection};
use crate::config::ViewerConfig;
use crate::data::loader::LoadError;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the single startup load stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    /// User-facing message; terminal for the session.
    Failed(String),
}

/// The full UI state, independent of rendering. Every mutator ends in
/// [`AppState::recompute`].
pub struct AppState {
    pub config: ViewerConfig,

    pub status: LoadStatus,

    /// Loaded dataset (None until the load completes successfully).
    pub dataset: Option<Dataset>,

    /// Currently chosen category.
    pub selection: Option<String>,

    /// Projection for `selection`, rebuilt after each mutation.
    pub projection: Projection,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            status: LoadStatus::Loading,
            dataset: None,
            selection: None,
            projection: Projection::default(),
        }
    }

    /// Ingest a newly loaded dataset and pick the default selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = dataset.default_category().map(str::to_string);
        self.dataset = Some(dataset);
        self.status = LoadStatus::Loaded;
        self.recompute();
    }

    /// Record a failed load. The dataset stays unset.
    pub fn set_load_error(&mut self, err: &LoadError) {
        self.dataset = None;
        self.selection = None;
        self.status = LoadStatus::Failed(format!("Error fetching data: {err}"));
        self.recompute();
    }

    /// User picked a category. Unknown categories are ignored.
    pub fn select(&mut self, category: &str) {
        let known = self
            .dataset
            .as_ref()
            .is_some_and(|ds| ds.has_category(category));
        if !known {
            log::warn!("Ignoring selection of unknown category '{category}'");
            return;
        }
        if self.selection.as_deref() == Some(category) {
            return;
        }
        log::debug!("Selected {category}");
        self.selection = Some(category.to_string());
        self.recompute();
    }

    /// Rebuild the projection from the current dataset and selection.
    pub fn recompute(&mut self) {
        self.projection = match &self.dataset {
            Some(ds) => project(&ds.records, self.selection.as_deref(), &self.config.chart),
            None => Projection::default(),
        };
    }

    /// Categories offered by the selector, first-seen order.
    pub fn categories(&self) -> &[String] {
        self.dataset
            .as_ref()
            .map(|ds| ds.categories.as_slice())
            .unwrap_or(&[])
    }

    pub fn selector_enabled(&self) -> bool {
        self.status == LoadStatus::Loaded && !self.categories().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSpec;
    use crate::data::loader::parse_csv;

    const SAMPLE: &str = "Country,Year,Inflation\nX,2000,3.4\nX,2001,-1.6\nY,2000,9.9\n";

    fn loaded() -> AppState {
        let mut state = AppState::new(ViewerConfig::default());
        state.set_dataset(parse_csv(SAMPLE, &ColumnSpec::default()).unwrap());
        state
    }

    #[test]
    fn first_load_selects_first_category() {
        let state = loaded();
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.selection.as_deref(), Some("X"));
        assert_eq!(state.projection.points.len(), 2);
        assert!(state.selector_enabled());
        assert_eq!(state.categories(), ["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn selecting_recomputes_projection() {
        let mut state = loaded();
        state.select("Y");
        assert_eq!(state.selection.as_deref(), Some("Y"));
        assert_eq!(state.projection.category.as_deref(), Some("Y"));
        assert_eq!(state.projection.points.len(), 1);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut state = loaded();
        let before = state.projection.clone();
        state.select("Atlantis");
        assert_eq!(state.selection.as_deref(), Some("X"));
        assert_eq!(state.projection, before);
    }

    #[test]
    fn empty_dataset_leaves_selector_disabled() {
        let mut state = AppState::new(ViewerConfig::default());
        state.set_dataset(parse_csv("Country,Year,Inflation\n", &ColumnSpec::default()).unwrap());
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.selection, None);
        assert!(!state.selector_enabled());
        assert!(state.projection.is_empty());
    }

    #[test]
    fn load_error_is_terminal_and_visible() {
        let mut state = AppState::new(ViewerConfig::default());
        state.set_load_error(&LoadError::MissingColumn("Country".into()));
        match &state.status {
            LoadStatus::Failed(msg) => assert!(msg.starts_with("Error fetching data:")),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(state.dataset.is_none());
        assert!(!state.selector_enabled());
        state.select("X");
        assert_eq!(state.selection, None);
    }
}
