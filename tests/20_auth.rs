mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Everything here exercises paths that answer before any store round-trip,
// so these tests hold with or without a reachable database.

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in ["/hydroponic/", "/measurement/"] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for unauthenticated GET {}",
            path
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "unexpected body: {}", body);
    }

    Ok(())
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/hydroponic/", server.base_url))
        .header("authorization", "Token abc123")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/measurement/", server.base_url))
        .header("authorization", "Bearer not.a.jwt")
        .json(&json!({ "system": "00000000-0000-0000-0000-000000000000" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_obtain_rejects_malformed_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Missing password field -> 400 before any credential lookup
    let res = client
        .post(format!("{}/token/", server.base_url))
        .json(&json!({ "username": "grower" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "INVALID_JSON", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn refresh_rejects_invalid_tokens() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/token/refresh/", server.base_url))
        .json(&json!({ "refresh": "not.a.jwt" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_validates_username_before_the_store() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/register/", server.base_url))
        .json(&json!({ "username": "-bad", "password": "long enough" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/register/", server.base_url))
        .json(&json!({ "username": "grower", "password": "short" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
