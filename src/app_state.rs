//! Implements a struct that holds the state of the web server.

use std::{path::PathBuf, sync::Arc};

use crate::{dataset::Dataset, filter::FilterCache, pagination::PaginationConfig};

/// The settings that control how the dashboard page is presented.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// The page title, also shown in the header.
    pub title: String,
    /// The URL of the external link at the bottom of the sidebar.
    pub source_link: String,
    /// The directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Penguin Data By Jordan".to_owned(),
            source_link: "https://github.com/JfromNWMS/cintel-02-data".to_owned(),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The dataset, loaded once at startup and never modified.
    pub dataset: Arc<Dataset>,

    /// The memoised filtered view for the latest selection.
    pub filter_cache: FilterCache,

    /// The config that controls how to display pages of the data grid.
    pub pagination_config: PaginationConfig,

    /// The presentation settings for the dashboard page.
    pub dashboard_config: Arc<DashboardConfig>,
}

impl AppState {
    /// Create a new [AppState] serving `dataset`.
    pub fn new(
        dataset: Dataset,
        pagination_config: PaginationConfig,
        dashboard_config: DashboardConfig,
    ) -> Self {
        Self {
            dataset: Arc::new(dataset),
            filter_cache: FilterCache::new(),
            pagination_config,
            dashboard_config: Arc::new(dashboard_config),
        }
    }
}
