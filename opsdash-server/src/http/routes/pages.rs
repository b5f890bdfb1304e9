//! Dashboard pages
//!
//! Both pages are static HTML compiled into the binary. The dashboard renders
//! itself client-side from `/api/metrics` and `/api/alerts`.

use axum::{response::Html, routing::get, Router};

const HOME_PAGE: &str = include_str!("../../../assets/index.html");
const DASHBOARD_PAGE: &str = include_str!("../../../assets/dashboard.html");

/// GET / - welcome page linking to the dashboard
async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// GET /dashboard
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// Page routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
}
