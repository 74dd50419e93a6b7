//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    amount_input::format_amount_endpoint,
    bulk_delete::{delete_preview_endpoint, delete_transactions_endpoint, get_delete_page},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::{get_annual_report_page, get_monthly_report_page, get_transactions_csv},
    transaction::{
        create_expense_endpoint, create_income_endpoint, get_new_expense_page, get_new_income_page,
    },
    truck::{create_truck_revenue_endpoint, get_truck_calculator_page, truck_preview_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_INCOME_VIEW, get(get_new_income_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(
            endpoints::TRUCK_CALCULATOR_VIEW,
            get(get_truck_calculator_page),
        )
        .route(endpoints::MONTHLY_REPORT_VIEW, get(get_monthly_report_page))
        .route(endpoints::MONTHLY_REPORT_CSV, get(get_transactions_csv))
        .route(endpoints::ANNUAL_REPORT_VIEW, get(get_annual_report_page))
        .route(endpoints::DELETE_VIEW, get(get_delete_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::INCOME_API, post(create_income_endpoint))
        .route(endpoints::EXPENSE_API, post(create_expense_endpoint))
        .route(endpoints::TRUCK_PREVIEW, post(truck_preview_endpoint))
        .route(endpoints::TRUCK_API, post(create_truck_revenue_endpoint))
        .route(endpoints::DELETE_PREVIEW, post(delete_preview_endpoint))
        .route(endpoints::DELETE_API, post(delete_transactions_endpoint))
        .route(endpoints::FORMAT_AMOUNT, post(format_amount_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
