use super::{AppState, MAX_FILE_SIZE_BYTES, NOT_FOUND_PAGE, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_app(state: AppState) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        // Image listing and count
        .route("/api/images/", get(handlers::list_images))
        .route("/api/images_count/", get(handlers::images_count))
        // Upload
        .route("/upload/", post(handlers::upload))
        // Deletion by stored file name
        .route("/api/delete/{image_id}", delete(handlers::delete_image))
        // Uploaded files are served directly from the images directory; a
        // miss renders the same static 404 page as any unknown route
        .nest_service(
            "/images",
            ServeDir::new(&state.images_dir)
                .not_found_service(ServeFile::new(state.static_dir.join(NOT_FOUND_PAGE))),
        )
        // Every unregistered method/path pair renders the static 404 page
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE_BYTES as usize))
        // Add CORS layer for broader client compatibility
        .layer(CorsLayer::permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(state)
}
