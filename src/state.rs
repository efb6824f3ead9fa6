use crate::chart::DashboardCharts;
use crate::color::ColorMap;
use crate::config::DashConfig;
use crate::data::filter::{PayloadRange, Selection, SiteFilter};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current site and payload range.
    pub selection: Selection,

    /// Charts for the current selection (cached).
    pub charts: Option<DashboardCharts>,

    /// Booster category colours for the scatter chart.
    pub color_map: ColorMap,

    /// Text typed into the site search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            dataset: None,
            selection: Selection {
                site: SiteFilter::All,
                payload: PayloadRange::new(0.0, 0.0),
            },
            charts: None,
            color_map: ColorMap::default(),
            site_search: String::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the selection to `ALL`
    /// over the observed payload bounds.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.color_map = ColorMap::new(&dataset.booster_categories);
        self.selection = Selection::for_dataset(&dataset);
        self.site_search.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute both charts for the current selection.
    pub fn refresh(&mut self) {
        self.charts = self
            .dataset
            .as_ref()
            .map(|ds| DashboardCharts::build(ds, &self.selection));

        if let Some(charts) = &self.charts {
            log::debug!(
                "selection site={} payload=[{}, {}]: {} launches in pie, {} in scatter",
                self.selection.site,
                self.selection.payload.low,
                self.selection.payload.high,
                charts.pie.total,
                charts.scatter.point_count()
            );
        }
    }

    pub fn set_site(&mut self, site: SiteFilter) {
        if self.selection.site != site {
            self.selection.site = site;
            self.refresh();
        }
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload != range {
            self.selection.payload = range;
            self.refresh();
        }
    }

    /// Back to `ALL` and the dataset's payload bounds.
    pub fn reset_selection(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = Selection::for_dataset(ds);
            self.refresh();
        }
    }

    /// Number of launches in the dataset and in the scatter chart.
    pub fn counts(&self) -> Option<(usize, usize)> {
        let ds = self.dataset.as_ref()?;
        let visible = self.charts.as_ref().map_or(0, |c| c.scatter.point_count());
        Some((ds.len(), visible))
    }
}
