// tests/api_tests.rs

use bigbrain::{
    config::Config,
    models::member::{ChatKind, MemberStatus},
    routes,
    state::AppState,
};
use sqlx::sqlite::SqlitePoolOptions;

const GROUP: i64 = 42;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the shared state.
async fn spawn_app() -> (String, AppState) {
    // 1. Create an in-memory pool that lives as long as the test
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };
    let state = AppState::new(pool, config);

    // 4. Create the router with the app state
    let app = routes::create_router(state.clone());

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, state)
}

async fn post_answer(
    client: &reqwest::Client,
    address: &str,
    question_id: &str,
    user_id: i64,
    chosen_option: usize,
) -> serde_json::Value {
    client
        .post(format!("{}/api/answers", address))
        .json(&serde_json::json!({
            "question_id": question_id,
            "user_id": user_id,
            "group_id": GROUP,
            "chosen_option": chosen_option
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse answer json")
}

async fn put_member(
    client: &reqwest::Client,
    address: &str,
    chat_id: i64,
    user_id: i64,
    name: &str,
    status: &str,
) {
    let response = client
        .put(format!("{}/api/chats/{}/members/{}", address, chat_id, user_id))
        .json(&serde_json::json!({
            "display_name": name,
            "status": status,
            "kind": "group"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn quiz_round_scores_once_and_ranks() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    put_member(&client, &address, GROUP, 7, "Ada", "member").await;
    let question_id = uuid::Uuid::new_v4().to_string();

    // Issue question
    let response = client
        .post(format!("{}/api/groups/{}/active-questions", address, GROUP))
        .json(&serde_json::json!({
            "question_id": question_id,
            "correct_option": 1,
            "points": 5
        }))
        .send()
        .await
        .expect("Failed to register question");
    assert_eq!(response.status().as_u16(), 201);

    // Act: answer twice
    let first = post_answer(&client, &address, &question_id, 7, 1).await;
    let second = post_answer(&client, &address, &question_id, 7, 1).await;

    // Assert
    assert_eq!(first["outcome"], "scored");
    assert_eq!(first["total"], 5);
    assert_eq!(second["outcome"], "unknown_question");

    let board: serde_json::Value = client
        .get(format!("{}/api/groups/{}/leaderboard?user_id=7", address, GROUP))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(board["standing"]["tier"], "podium");
    assert_eq!(board["standing"]["rank"], 1);
    assert_eq!(board["entries"][0]["user_id"], 7);
    assert_eq!(board["entries"][0]["display_name"], "Ada");
    assert_eq!(board["entries"][0]["points"], 5);
    assert_eq!(board["entries"][0]["medal"], "🥇");
    assert!(board.get("empty_message").is_none());

    let score: serde_json::Value = client
        .get(format!("{}/api/groups/{}/scores/7", address, GROUP))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(score["points"], 5);
    assert_eq!(score["group_id"], GROUP);
    assert!(score["updated_at"].is_string());
}

#[tokio::test]
async fn wrong_answer_is_incorrect_and_unscored() {
    let (address, state) = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/groups/{}/active-questions", address, GROUP))
        .json(&serde_json::json!({"question_id": "Q", "correct_option": 1, "points": 5}))
        .send()
        .await
        .unwrap();

    let outcome = post_answer(&client, &address, "Q", 7, 0).await;
    assert_eq!(outcome["outcome"], "incorrect");
    assert_eq!(state.store.get_score(7, GROUP).await.unwrap(), None);

    let response = client
        .get(format!("{}/api/groups/{}/scores/7", address, GROUP))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_rejects_out_of_range_points() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/groups/{}/active-questions", address, GROUP))
        .json(&serde_json::json!({"question_id": "Q", "correct_option": 0, "points": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/api/groups/{}/active-questions", address, GROUP))
        .json(&serde_json::json!({
            "question_id": "Q",
            "correct_option": 0,
            "points": i64::MAX
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

async fn assert_json_bad_request(response: reqwest::Response) {
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Error body is not JSON");
    assert!(body["error"].is_string(), "missing error field: {body}");
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    put_member(&client, &address, GROUP, 7, "Ada", "member").await;

    // Answer without `chosen_option`.
    let response = client
        .post(format!("{}/api/answers", address))
        .json(&serde_json::json!({"question_id": "Q", "user_id": 7}))
        .send()
        .await
        .unwrap();
    assert_json_bad_request(response).await;

    // Body that is not JSON at all.
    let response = client
        .post(format!("{}/api/answers", address))
        .body("chosen_option=1")
        .send()
        .await
        .unwrap();
    assert_json_bad_request(response).await;

    // Leaderboard without `user_id`.
    let response = client
        .get(format!("{}/api/groups/{}/leaderboard", address, GROUP))
        .send()
        .await
        .unwrap();
    assert_json_bad_request(response).await;

    // Non-numeric path ids, with and without a guard stage in front.
    let response = client
        .get(format!("{}/api/groups/abc/leaderboard?user_id=7", address))
        .send()
        .await
        .unwrap();
    assert_json_bad_request(response).await;

    let response = client
        .get(format!("{}/api/groups/{}/scores/abc", address, GROUP))
        .send()
        .await
        .unwrap();
    assert_json_bad_request(response).await;
}

#[tokio::test]
async fn empty_group_leaderboard_invites_play() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    put_member(&client, &address, GROUP, 7, "Ada", "member").await;

    let board: serde_json::Value = client
        .get(format!("{}/api/groups/{}/leaderboard?user_id=7", address, GROUP))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(board["standing"]["tier"], "unranked");
    assert_eq!(board["entries"].as_array().unwrap().len(), 0);
    assert!(board["empty_message"].as_str().unwrap().contains("No one played yet"));
}

#[tokio::test]
async fn group_leaderboard_is_group_only() {
    let (address, state) = spawn_app().await;
    let client = reqwest::Client::new();
    state
        .directory
        .upsert_member(5, ChatKind::Private, 5, "Solo", MemberStatus::Member);

    for chat_id in [5, 12345] {
        let response = client
            .get(format!("{}/api/groups/{}/leaderboard?user_id=5", address, chat_id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 403);
    }
}

#[tokio::test]
async fn global_leaderboard_ranks_best_scores() {
    let (address, state) = spawn_app().await;
    let client = reqwest::Client::new();

    for (user_id, group_id, points) in [(1, 10, 8), (1, 11, 3), (2, 10, 6), (3, 12, 4), (4, 12, 1)] {
        state.store.apply_correct_answer(user_id, group_id, points).await.unwrap();
    }
    for (user_id, name) in [(1, "Ada"), (2, "Bea"), (4, "Dee")] {
        put_member(&client, &address, GROUP, user_id, name, "member").await;
    }

    let board: serde_json::Value = client
        .get(format!("{}/api/leaderboard?chat_id={}&user_id=4", address, GROUP))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // User 3 is not in this chat and is skipped; the ranking still counts them.
    let names: Vec<&str> = board["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["display_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Bea", "Dee"]);
    assert_eq!(board["entries"][0]["points"], 8);
    assert_eq!(board["standing"]["tier"], "ranked");
    assert_eq!(board["standing"]["rank"], 4);
}

#[tokio::test]
async fn admin_can_add_and_draw_question() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    put_member(&client, &address, GROUP, 1, "Boss", "creator").await;
    put_member(&client, &address, GROUP, 2, "Pleb", "member").await;

    let question = serde_json::json!({
        "subject": "Geography",
        "content": "Capital of Norway?",
        "choices": ["Paris", "Oslo", "Rome"],
        "answer": "Oslo",
        "points": 3,
        "difficulty": "Easy"
    });

    // Non-admin is rejected before the handler runs.
    let response = client
        .post(format!("{}/api/groups/{}/questions", address, GROUP))
        .header("x-user-id", "2")
        .json(&question)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // Nothing to draw yet.
    let response = client.get(format!("{}/api/quiz/draw", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .post(format!("{}/api/groups/{}/questions", address, GROUP))
        .header("x-user-id", "1")
        .json(&question)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let drawn: serde_json::Value = client
        .get(format!("{}/api/quiz/draw", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(drawn["subject"], "Geography");
    assert_eq!(drawn["correct_option"], 1);
    assert_eq!(drawn["points"], 3);
    assert_eq!(drawn["choices"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn admin_question_fails_validation() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    put_member(&client, &address, GROUP, 1, "Boss", "administrator").await;

    let response = client
        .post(format!("{}/api/groups/{}/questions", address, GROUP))
        .header("x-user-id", "1")
        .json(&serde_json::json!({
            "subject": "Geography",
            "content": "Capital of Norway?",
            "choices": ["Paris", "Rome"],
            "answer": "Oslo",
            "points": 3,
            "difficulty": "Easy"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
