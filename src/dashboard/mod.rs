//! Dashboard module
//!
//! Provides the dashboard page and the endpoints that render its outputs:
//! two tables, two histograms and a scatterplot of the filtered penguins.

mod charts;
mod handlers;
mod histogram;
mod outputs;
mod page;
mod svg_histogram;
mod tables;

pub use handlers::{
    get_dashboard_page, render_data_grid, render_data_table, render_interactive_histogram,
    render_scatterplot, render_static_histogram,
};
pub use outputs::Output;
