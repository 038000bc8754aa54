use axum::response::Html;

const FORM_PAGE: &str = include_str!("../../../../static/index.html");

pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}
