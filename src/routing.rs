//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{
        get_dashboard_page, render_data_grid, render_data_table, render_interactive_histogram,
        render_scatterplot, render_static_histogram,
    },
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.dashboard_config.static_dir.clone();

    let output_routes = Router::new()
        .route(endpoints::DATA_TABLE, post(render_data_table))
        .route(endpoints::DATA_GRID, post(render_data_grid))
        .route(
            endpoints::INTERACTIVE_HISTOGRAM,
            post(render_interactive_histogram),
        )
        .route(endpoints::STATIC_HISTOGRAM, post(render_static_histogram))
        .route(endpoints::SCATTERPLOT, post(render_scatterplot));

    Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .merge(output_routes)
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}
