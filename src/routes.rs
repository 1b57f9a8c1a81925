// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{admin, leaderboard, members, quiz},
    state::AppState,
    utils::guard::{group_admin_only, group_only},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, groups, chats, leaderboard).
/// * Gates group commands with the precondition stages.
/// * Applies global tracing and injects the shared state.
pub fn create_router(state: AppState) -> Router {
    let quiz_routes = Router::new()
        .route("/draw", get(quiz::draw_question));

    let group_routes = Router::new()
        .route("/{group_id}/active-questions", post(quiz::register_question))
        .route("/{group_id}/scores/{user_id}", get(leaderboard::get_score))
        .merge(
            Router::new()
                .route("/{group_id}/leaderboard", get(leaderboard::group_leaderboard))
                .route_layer(middleware::from_fn_with_state(state.clone(), group_only)),
        )
        .merge(
            Router::new()
                .route("/{group_id}/questions", post(admin::create_question))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    group_admin_only,
                )),
        );

    let chat_routes = Router::new()
        .route("/{chat_id}/members/{user_id}", put(members::upsert_member));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/groups", group_routes)
        .nest("/api/chats", chat_routes)
        .route("/api/answers", post(quiz::submit_answer))
        .route("/api/leaderboard", get(leaderboard::global_leaderboard))
        // Global Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
