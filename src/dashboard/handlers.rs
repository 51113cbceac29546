//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - The route handler for the dashboard page
//! - One route handler per output, each rendering an HTML fragment from the
//!   sidebar form
//! - The state used by the handlers

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use crate::{
    AppState, Error,
    app_state::DashboardConfig,
    controls::{BinCount, Controls},
    dashboard::{
        charts::{OutputChart, chart_view, histogram_chart, scatter_chart, scatter_tooltip_formatter},
        histogram::bin_values,
        outputs::Output,
        page::dashboard_view,
        svg_histogram::histogram_svg,
        tables::{GridParams, data_grid, data_table},
    },
    dataset::Dataset,
    filter::{FilterCache, FilteredView, NotReady},
    pagination::PaginationConfig,
};

/// The state needed for displaying the dashboard and its outputs.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The dataset the outputs are rendered from.
    pub dataset: Arc<Dataset>,
    /// The memoised filtered view shared by all outputs.
    pub filter_cache: FilterCache,
    /// The page size and page links of the data grid.
    pub pagination_config: PaginationConfig,
    /// The page title and source link.
    pub dashboard_config: Arc<DashboardConfig>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
            filter_cache: state.filter_cache.clone(),
            pagination_config: state.pagination_config.clone(),
            dashboard_config: state.dashboard_config.clone(),
        }
    }
}

/// Display the dashboard with every species and island selected.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    dashboard_view(&state.dataset, &state.dashboard_config).into_response()
}

/// Render the plain table of the filtered rows.
pub async fn render_data_table(
    State(state): State<DashboardState>,
    Form(controls): Form<Controls>,
) -> Response {
    let result = filtered_view(&state, &controls).map(|view| data_table(&view));

    into_output_response(Output::DataTable, result)
}

/// Render one page of the sortable data grid.
pub async fn render_data_grid(
    State(state): State<DashboardState>,
    Query(params): Query<GridParams>,
    Form(controls): Form<Controls>,
) -> Response {
    let target = format!("#{}", Output::DataGrid.element_id());
    let result = filtered_view(&state, &controls)
        .map(|view| data_grid(&view, &params, &state.pagination_config, &target));

    into_output_response(Output::DataGrid, result)
}

/// Render the ECharts histogram of the selected attribute.
pub async fn render_interactive_histogram(
    State(state): State<DashboardState>,
    Form(controls): Form<Controls>,
) -> Response {
    into_output_response(
        Output::InteractiveHistogram,
        interactive_histogram(&state, &controls),
    )
}

/// Render the SVG histogram of the selected attribute.
pub async fn render_static_histogram(
    State(state): State<DashboardState>,
    Form(controls): Form<Controls>,
) -> Response {
    into_output_response(Output::StaticHistogram, static_histogram(&state, &controls))
}

/// Render the scatterplot of the selected attribute against the y-axis
/// attribute.
pub async fn render_scatterplot(
    State(state): State<DashboardState>,
    Form(controls): Form<Controls>,
) -> Response {
    into_output_response(Output::Scatterplot, scatterplot(&state, &controls))
}

/// Gets the filtered rows for the species and islands checked in `controls`.
///
/// # Errors
/// Returns [Error::NotReady] if the selection has no rows, or
/// [Error::FilterCacheLock] if the filter cache cannot be used.
fn filtered_view(state: &DashboardState, controls: &Controls) -> Result<FilteredView, Error> {
    state
        .filter_cache
        .get_or_compute(&state.dataset, &controls.selection())
}

fn interactive_histogram(state: &DashboardState, controls: &Controls) -> Result<Markup, Error> {
    let view = filtered_view(state, controls)?;
    let bins = BinCount::parse(&controls.interactive_bin_count)?;
    let histogram = bin_values(view.rows(), controls.selected_attribute, bins)?;

    let chart = OutputChart {
        id: "interactive-histogram-chart",
        options: histogram_chart(&histogram, controls.selected_attribute, state.dataset.species())
            .to_string(),
        tooltip_formatter: None,
    };

    Ok(chart_view(&chart))
}

fn static_histogram(state: &DashboardState, controls: &Controls) -> Result<Markup, Error> {
    let view = filtered_view(state, controls)?;
    let bins = BinCount::parse(&controls.static_bin_count)?;
    let histogram = bin_values(view.rows(), controls.selected_attribute, bins)?;

    Ok(histogram_svg(
        &histogram,
        controls.selected_attribute,
        state.dataset.species(),
    ))
}

fn scatterplot(state: &DashboardState, controls: &Controls) -> Result<Markup, Error> {
    let view = filtered_view(state, controls)?;
    let (x, y) = (controls.selected_attribute, controls.scatter_y_attribute);

    let chart = scatter_chart(
        view.rows(),
        x,
        y,
        state.dataset.species(),
        state.dataset.islands(),
    )
    .ok_or(NotReady::NoMeasurements)?;

    let chart = OutputChart {
        id: "scatterplot-chart",
        options: chart.to_string(),
        tooltip_formatter: Some(scatter_tooltip_formatter(x, y, state.dataset.islands())),
    };

    Ok(chart_view(&chart))
}

/// Converts the result of rendering `output` into a response.
///
/// Errors become alerts, except for [Error::NotReady] which tells htmx to
/// keep the output's last good content.
fn into_output_response(output: Output, result: Result<Markup, Error>) -> Response {
    match result {
        Ok(markup) => markup.into_response(),
        Err(error) => {
            tracing::debug!("Not rendering {}: {error}", output.element_id());
            error.into_alert_response()
        }
    }
}
