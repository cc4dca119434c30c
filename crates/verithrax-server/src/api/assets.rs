use axum::{http::header, response::IntoResponse};

/// Article and product page styling injected into every page head.
pub(crate) const STYLESHEET: &str = include_str!("../../assets/verithrax.css");

const STYLE_ELEMENT_ID: &str = "verithrax-article-styles";

pub(super) async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

pub(super) async fn head_snippet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        head_style_block(),
    )
}

/// The stylesheet wrapped in a `<style>` element ready for the page head.
pub(crate) fn head_style_block() -> String {
    format!("<style type=\"text/css\" id=\"{STYLE_ELEMENT_ID}\">\n{STYLESHEET}\n</style>\n")
}
