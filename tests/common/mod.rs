use axum::{Extension, Json, Router, routing::get};
use querypage::{Page, PageOptions};

async fn list_recipes(page: Page) -> Json<Page> {
    Json(page)
}

/// Router with default parser options.
pub fn setup_test_app() -> Router {
    let api = Router::new().route("/recipes", get(list_recipes));

    Router::new().nest("/api/v1", api)
}

/// Router with `PageOptions` installed as a request extension.
pub fn setup_test_app_with_options(options: PageOptions) -> Router {
    let api = Router::new()
        .route("/recipes", get(list_recipes))
        .layer(Extension(options));

    Router::new().nest("/api/v1", api)
}
