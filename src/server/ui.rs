//! Embedded browser assets

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("ui/index.html");
const APP_JS: &str = include_str!("ui/app.js");
const APP_CSS: &str = include_str!("ui/app.css");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /static/app.css
pub async fn serve_app_css() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], APP_CSS).into_response()
}
