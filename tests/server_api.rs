//! End-to-end tests: the real server over the in-memory store, driven by
//! the real API client.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use url::Url;

use newswire::client::{ApiClient, ClientError};
use newswire::model::{normalize_time, zero_time, Post, PostListOptions};
use newswire::store::MemStore;

fn api_client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(Url::parse(&format!("http://{addr}/api/")).unwrap())
}

#[tokio::test]
async fn create_get_list_round_trip() {
    let (addr, _shutdown) = common::spawn_server(Arc::new(MemStore::new())).await;
    let client = api_client(addr);

    let mut post = Post {
        title: "A post".to_string(),
        link_url: "http://example.com/a".to_string(),
        body: "details".to_string(),
        ..Post::default()
    };
    client.posts().create(&mut post).await.unwrap();

    assert_eq!(post.id, 1);
    assert_ne!(post.submitted_at, zero_time());
    // Server stamps in canonical resolution; nothing left to truncate.
    assert_eq!(post.submitted_at, normalize_time(post.submitted_at));

    let fetched = client.posts().get(post.id).await.unwrap();
    assert_eq!(fetched, post);

    let listed = client.posts().list(None).await.unwrap();
    assert_eq!(listed, vec![post]);
}

#[tokio::test]
async fn missing_post_is_status_404() {
    let (addr, _shutdown) = common::spawn_server(Arc::new(MemStore::new())).await;
    match api_client(addr).posts().get(99).await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected 404 Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unregistered_method_is_405_and_unknown_path_is_404() {
    let (addr, _shutdown) = common::spawn_server(Arc::new(MemStore::new())).await;
    let http = reqwest::Client::new();

    let response = http
        .delete(format!("http://{addr}/api/posts"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 405);
    let allow = response
        .headers()
        .get("allow")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(allow.contains("GET") && allow.contains("POST"), "Allow: {allow}");

    let response = http
        .get(format!("http://{addr}/api/comments"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_windows_through_form_values() {
    let (addr, _shutdown) = common::spawn_server(Arc::new(MemStore::new())).await;
    let client = api_client(addr);

    for i in 1..=3 {
        let mut post = Post {
            title: format!("post {i}"),
            ..Post::default()
        };
        client.posts().create(&mut post).await.unwrap();
    }

    let opts = PostListOptions {
        per_page: Some(2),
        page: Some(2),
    };
    let page = client.posts().list(Some(&opts)).await.unwrap();

    // Newest first; page two of size two holds only the oldest post.
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "post 1");
}
