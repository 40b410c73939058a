//! End-to-end tests over a real listener.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use userstat_core::protocol::{FixedSampler, OutcomeSampler, StatusBody};
use userstat_server::{
    app_state::AppState, config::ServerConfig, generator::TrafficGenerator, obs::UserstatMetrics,
    router,
};

async fn spawn_server(
    sampler: Option<Arc<dyn OutcomeSampler>>,
) -> (SocketAddr, Arc<UserstatMetrics>) {
    let metrics = Arc::new(UserstatMetrics::new());
    let cfg = ServerConfig::default();
    let state = match sampler {
        Some(s) => AppState::with_sampler(&cfg, Arc::clone(&metrics), s),
        None => AppState::new(&cfg, Arc::clone(&metrics)),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router::build_router(state)).await.unwrap();
    });
    (addr, metrics)
}

#[tokio::test]
async fn post_returns_200_with_label() {
    let (addr, _) = spawn_server(None).await;
    let client = reqwest::Client::new();
    for user in ["bob", "alice", "jack"] {
        let res = client
            .post(format!("http://{addr}/"))
            .json(&serde_json::json!({ "user": user }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        let body: StatusBody = res.json().await.unwrap();
        assert!(body.status == "2xx" || body.status == "4xx", "{}", body.status);
    }
}

#[tokio::test]
async fn pinned_bob_is_2xx_and_counted() {
    let (addr, metrics) = spawn_server(Some(Arc::new(FixedSampler(0.3)))).await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body(r#"{"user":"bob"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"2xx"}"#);
    assert_eq!(metrics.user_status.get(["bob", "2xx"]), 1);

    let text = reqwest::get(format!("http://{addr}/metrics"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains(r#"http_request_get_user_status_count{user="bob",status="2xx"} 1"#));
}

#[tokio::test]
async fn pinned_failure_still_returns_200() {
    let (addr, metrics) = spawn_server(Some(Arc::new(FixedSampler(0.99)))).await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body(r#"{"user":"jack"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"4xx"}"#);
    assert_eq!(metrics.user_status.get(["jack", "4xx"]), 1);
}

#[tokio::test]
async fn empty_object_records_empty_user() {
    let (addr, metrics) = spawn_server(None).await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(metrics.user_total(""), 1);
    assert_eq!(metrics.user_status.get(["", ""]), 0);
}

#[tokio::test]
async fn null_body_and_capitalized_key_are_accepted() {
    let (addr, metrics) = spawn_server(Some(Arc::new(FixedSampler(0.2)))).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/"))
        .body("null")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), r#"{"status":"2xx"}"#);
    assert_eq!(metrics.user_status.get(["", "2xx"]), 1);

    let res = client
        .post(format!("http://{addr}/"))
        .body(r#"{"User":"bob"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(metrics.user_status.get(["bob", "2xx"]), 1);
}

#[tokio::test]
async fn malformed_json_is_400_with_error() {
    let (addr, metrics) = spawn_server(None).await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body(r#"{"user":"alice""#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());

    let samples = metrics.user_status.samples();
    assert!(samples.iter().all(|([user, _], _)| user.is_empty()));
}

#[tokio::test]
async fn non_post_is_405() {
    let (addr, _) = spawn_server(None).await;
    let client = reqwest::Client::new();
    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let res = client
            .request(method.clone(), format!("http://{addr}/"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 405, "{method}");
        assert_eq!(res.text().await.unwrap(), "method not allowed");
    }
}

#[tokio::test]
async fn alice_total_matches_request_count() {
    let (addr, metrics) = spawn_server(None).await;
    let client = reqwest::Client::new();
    let n = 25;
    for _ in 0..n {
        let res = client
            .post(format!("http://{addr}/"))
            .body(r#"{"user":"alice"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }
    assert_eq!(metrics.user_total("alice"), n);
}

#[tokio::test]
async fn metrics_before_and_after_traffic() {
    let (addr, _) = spawn_server(Some(Arc::new(FixedSampler(0.1)))).await;
    let url = format!("http://{addr}/metrics");

    let res = reqwest::get(&url).await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let before = res.text().await.unwrap();
    assert!(before.contains("# TYPE http_request_get_user_status_count counter"));
    assert!(!before.contains("http_request_get_user_status_count{"));

    let client = reqwest::Client::new();
    for user in ["bob", "alice", "bob"] {
        client
            .post(format!("http://{addr}/"))
            .body(format!(r#"{{"user":"{user}"}}"#))
            .send()
            .await
            .unwrap();
    }

    let after = reqwest::get(&url).await.unwrap().text().await.unwrap();
    let series: Vec<_> = after
        .lines()
        .filter(|l| l.starts_with("http_request_get_user_status_count{"))
        .collect();
    assert_eq!(
        series,
        [
            r#"http_request_get_user_status_count{user="alice",status="2xx"} 1"#,
            r#"http_request_get_user_status_count{user="bob",status="2xx"} 2"#,
        ]
    );
}

#[tokio::test]
async fn healthz_ok() {
    let (addr, _) = spawn_server(None).await;
    let res = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn generator_drives_traffic_until_cancelled() {
    let (addr, metrics) = spawn_server(None).await;
    let pool: Vec<String> = ["bob", "alice", "jack"].map(String::from).to_vec();
    let generator =
        TrafficGenerator::new(format!("http://{addr}/"), pool.clone(), Duration::from_millis(20))
            .unwrap();
    let cancel = CancellationToken::new();
    let handle = generator.spawn(cancel.clone());

    tokio::time::timeout(Duration::from_secs(10), async {
        while metrics.user_status.samples().iter().map(|(_, v)| v).sum::<u64>() < 3 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("generator produced no traffic");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("generator did not stop")
        .unwrap();

    for ([user, status], _) in metrics.user_status.samples() {
        assert!(pool.contains(&user), "unexpected user {user}");
        assert!(status == "2xx" || status == "4xx");
    }
}
