//! Defines the page and route handler for when a resource cannot be found.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The 404 page.
pub struct NotFoundError;

impl NotFoundError {
    pub fn into_html(self) -> Html<String> {
        Html(
            error_view(
                "Halaman Tidak Ditemukan",
                "404",
                "Halaman tidak ditemukan.",
                "Periksa kembali alamat halaman atau kembali ke dashboard.",
            )
            .into_string(),
        )
    }
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, self.into_html()).into_response()
    }
}

/// The fallback route handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
