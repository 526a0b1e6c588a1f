// HTTP-level tests: a real server on an ephemeral port, driven with reqwest.

use serde_json::{json, Value};

use verbdrill_server::{Server, ServerConfig};

async fn start_server() -> Server {
    let config = ServerConfig {
        bind: "127.0.0.1:0".into(),
        ..ServerConfig::default()
    };
    Server::start(&config).await.unwrap()
}

async fn post(client: &reqwest::Client, server: &Server, path: &str, body: Value) -> (u16, Value) {
    let resp = client
        .post(server.url(path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn get(client: &reqwest::Client, server: &Server, path: &str) -> (u16, Value) {
    let resp = client.get(server.url(path)).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn test_token(client: &reqwest::Client, server: &Server) -> String {
    let (status, body) = post(client, server, "/api/auth/test-login", json!({})).await;
    assert_eq!(status, 200);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_catalog_reads() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let (status, body) = get(&client, &server, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], "ok");

    let (_, body) = get(&client, &server, "/api/presets").await;
    assert_eq!(body["data"], json!(["basic", "separable"]));

    let (_, body) = get(&client, &server, "/api/categories").await;
    assert_eq!(body["data"], json!(["Verb Conjugation", "Separable Verbs"]));

    server.shutdown().await;
}

#[tokio::test]
async fn basic_round_flow() {
    let server = start_server().await;
    let client = reqwest::Client::new();
    let token = test_token(&client, &server).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/round/start",
        json!({ "presetId": "basic", "identityToken": token }),
    )
    .await;
    assert_eq!(status, 200);
    let round = &body["data"];
    assert_eq!(round["index"], 0);
    assert_eq!(round["score"], 0);
    assert_eq!(round["total"], 2);
    assert_eq!(round["exercise"]["infinitive"], "machen");
    assert_eq!(round["exercise"]["sentence"], "Ich ____ meine Hausaufgaben.");
    let round_id = round["roundId"].as_str().unwrap().to_string();

    let (status, body) = post(
        &client,
        &server,
        "/api/round/submit",
        json!({ "roundId": round_id, "answer": "x" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!({ "correct": false, "expected": "mache", "score": 0 })
    );

    let (_, body) = post(&client, &server, "/api/round/next", json!({ "roundId": round_id })).await;
    assert_eq!(body["data"]["index"], 1);
    assert_eq!(body["data"]["exercise"]["person"], "WIR");

    let (_, body) = post(
        &client,
        &server,
        "/api/round/submit",
        json!({ "roundId": round_id, "answer": " Gehen " }),
    )
    .await;
    assert_eq!(body["data"]["correct"], true);
    assert_eq!(body["data"]["score"], 1);

    let (_, body) = post(&client, &server, "/api/round/next", json!({ "roundId": round_id })).await;
    assert!(body["data"]["exercise"].is_null());
    assert_eq!(body["data"]["score"], 1);

    let (_, body) = post(&client, &server, "/api/round/next", json!({ "roundId": round_id })).await;
    assert!(body["data"]["exercise"].is_null());

    let (status, body) = post(
        &client,
        &server,
        "/api/round/submit",
        json!({ "roundId": round_id, "answer": "gehen" }),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["data"], "round_complete");

    let (status, body) = get(&client, &server, &format!("/api/progress?token={token}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["totalAttempts"], 2);
    assert_eq!(body["data"]["struggling"][0]["key"]["infinitive"], "machen");

    server.shutdown().await;
}

#[tokio::test]
async fn start_without_session_is_unauthorized() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let (status, body) = post(
        &client,
        &server,
        "/api/round/start",
        json!({ "presetId": "basic", "identityToken": "nobody@example.com" }),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["data"], "unauthorized");
    assert_eq!(server.state().engine.round_count(), 0);

    let body = json!({ "presetId": "basic" });
    let (status, _) = post(&client, &server, "/api/round/start", body).await;
    assert_eq!(status, 401);

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_round_is_not_found() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let (status, body) = post(
        &client,
        &server,
        "/api/round/submit",
        json!({ "roundId": "round-missing", "answer": "x" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["data"], "round_not_found");

    let (status, body) = post(
        &client,
        &server,
        "/api/round/next",
        json!({ "roundId": "round-missing" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["data"], "round_not_found");

    server.shutdown().await;
}

#[tokio::test]
async fn auth_lifecycle() {
    let server = start_server().await;
    let client = reqwest::Client::new();
    let creds = json!({ "email": "learner@example.com", "password": "pw" });

    let (status, body) = post(&client, &server, "/api/auth/login", creds.clone()).await;
    assert_eq!(status, 401);
    assert_eq!(body["data"], "invalid_credentials");

    let (status, body) = post(&client, &server, "/api/auth/register", creds.clone()).await;
    assert_eq!(status, 201);
    assert_eq!(body["data"], "registered");

    let (status, body) = post(&client, &server, "/api/auth/login", creds).await;
    assert_eq!(status, 200);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = get(&client, &server, &format!("/api/me?token={token}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["email"], "learner@example.com");

    let (_, body) = post(&client, &server, "/api/auth/logout", json!({ "token": token })).await;
    assert_eq!(body["data"], "logged_out");

    let (status, _) = get(&client, &server, &format!("/api/me?token={token}")).await;
    assert_eq!(status, 401);
    let (status, _) = get(&client, &server, "/api/me").await;
    assert_eq!(status, 401);

    let (status, _) = post(
        &client,
        &server,
        "/api/round/start",
        json!({ "presetId": "basic", "token": token }),
    )
    .await;
    assert_eq!(status, 401);

    server.shutdown().await;
}

#[tokio::test]
async fn created_preset_is_playable() {
    let server = start_server().await;
    let client = reqwest::Client::new();
    let token = test_token(&client, &server).await;

    let (status, body) = post(
        &client,
        &server,
        "/api/presets",
        json!({
            "id": "modal",
            "forms": [{
                "infinitive": "können",
                "sentence": "Du ____ das.",
                "translation": "You can do it.",
                "expected": "kannst",
                "person": "DU"
            }]
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"], json!({ "id": "modal", "count": 1 }));

    let (_, body) = get(&client, &server, "/api/presets").await;
    assert_eq!(body["data"], json!(["basic", "modal", "separable"]));

    let (_, body) = post(
        &client,
        &server,
        "/api/round/start",
        json!({ "presetId": "modal", "token": token }),
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["exercise"]["expected"], "kannst");

    server.shutdown().await;
}

#[tokio::test]
async fn test_login_can_be_disabled() {
    let config = ServerConfig {
        bind: "127.0.0.1:0".into(),
        test_login: false,
        ..ServerConfig::default()
    };
    let server = Server::start(&config).await.unwrap();
    let client = reqwest::Client::new();

    let (status, body) = post(&client, &server, "/api/auth/test-login", json!({})).await;
    assert_eq!(status, 404);
    assert_eq!(body["data"], "test_login_disabled");

    server.shutdown().await;
}
