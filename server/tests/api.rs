use axum::http::{self, Request, StatusCode};
use forum_server::{app, router, Post, PostStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn post_empty(uri: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- root ---

#[tokio::test]
async fn root_reports_liveness() {
    let resp = app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Learnato Discussion Forum API is running!");
}

// --- list ---

#[tokio::test]
async fn list_posts_seeded_sorted_by_votes() {
    let resp = app().oneshot(get("/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(posts[1].replies.len(), 2);
}

#[tokio::test]
async fn list_posts_empty_store() {
    let resp = router(PostStore::new().into_shared())
        .oneshot(get("/posts"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert!(posts.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_post_returns_201_with_defaults() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"title":"T","content":"C"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({
            "id": 3,
            "title": "T",
            "content": "C",
            "votes": 0,
            "author": "Anonymous",
            "replies": []
        })
    );
}

#[tokio::test]
async fn create_post_keeps_author() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/posts",
            r#"{"title":"T","content":"C","author":"Mia"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.author, "Mia");
}

#[tokio::test]
async fn create_post_empty_title_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"title":"","content":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"error": "Title and content are required"}));
}

#[tokio::test]
async fn create_post_without_body_returns_400() {
    let resp = app().oneshot(post_empty("/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "Title and content are required");
}

#[tokio::test]
async fn create_post_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"title":1"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_post_found() {
    let resp = app().oneshot(get("/posts/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 1);
    assert_eq!(post.author, "Rohan");
    assert_eq!(post.votes, 5);
}

#[tokio::test]
async fn get_post_not_found() {
    let resp = app().oneshot(get("/posts/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"error": "Post not found"}));
}

#[tokio::test]
async fn get_post_non_numeric_id_returns_404() {
    let resp = app().oneshot(get("/posts/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- reply ---

#[tokio::test]
async fn add_reply_appends_next_id() {
    let resp = app()
        .oneshot(json_request("POST", "/posts/1/reply", r#"{"text":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 1);
    let reply_ids: Vec<u64> = post.replies.iter().map(|r| r.id).collect();
    assert_eq!(reply_ids, vec![1, 2, 3]);
    assert_eq!(post.replies[2].text, "hi");
}

#[tokio::test]
async fn add_reply_missing_text_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/posts/1/reply", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"error": "Reply text is required"}));
}

#[tokio::test]
async fn add_reply_unknown_post_returns_404() {
    let resp = app()
        .oneshot(json_request("POST", "/posts/999/reply", r#"{"text":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_reply_checks_text_before_post() {
    let resp = app()
        .oneshot(json_request("POST", "/posts/999/reply", r#"{"text":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- upvote ---

#[tokio::test]
async fn upvote_increments_votes() {
    let resp = app().oneshot(post_empty("/posts/1/upvote")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.votes, 6);
}

#[tokio::test]
async fn upvote_unknown_post_returns_404() {
    let resp = app().oneshot(post_empty("/posts/999/upvote")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "Post not found");
}

// --- CORS ---

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/posts")
                .header(http::header::ORIGIN, "http://localhost:5173")
                .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// --- concurrency ---

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_mutations_are_atomic() {
    let store = PostStore::seeded().into_shared();

    let mut handles = Vec::new();
    for i in 0..100 {
        let app = router(store.clone());
        handles.push(tokio::spawn(async move {
            app.oneshot(post_empty("/posts/1/upvote")).await.unwrap().status()
        }));

        let app = router(store.clone());
        let body = format!(r#"{{"text":"reply {i}"}}"#);
        handles.push(tokio::spawn(async move {
            app.oneshot(json_request("POST", "/posts/1/reply", &body))
                .await
                .unwrap()
                .status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 100);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 100);

    let post = store.read().await.get_post(1).unwrap();
    assert_eq!(post.votes, 5 + 100);
    let reply_ids: Vec<u64> = post.replies.iter().map(|r| r.id).collect();
    assert_eq!(reply_ids, (1..=102).collect::<Vec<u64>>());
}

// --- full lifecycle ---

#[tokio::test]
async fn forum_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/posts",
            r#"{"title":"Lifetimes","content":"Why does the borrow checker complain?","author":"Sam"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = body_json(resp).await;
    assert_eq!(created.id, 3);
    let id = created.id;

    // reply twice; ids restart at 1 for the new post
    for (expected_id, text) in [(1, "Add an explicit lifetime"), (2, "Clone it")] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                &format!("/posts/{id}/reply"),
                &format!(r#"{{"text":"{text}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: Post = body_json(resp).await;
        assert_eq!(post.replies.last().unwrap().id, expected_id);
    }

    // upvote past both seeded posts
    for _ in 0..11 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(post_empty(&format!("/posts/{id}/upvote")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Post = body_json(resp).await;
    assert_eq!(fetched.votes, 11);
    assert_eq!(fetched.replies.len(), 2);
    assert_eq!(fetched.replies[0].text, "Add an explicit lifetime");

    // list: new post now leads
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/posts"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}
