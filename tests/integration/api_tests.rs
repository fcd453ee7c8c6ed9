//! API integration tests

use bookshelf_server::{api, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Serve a fresh application on an ephemeral port and return its base URL
async fn spawn_app() -> String {
    let app = api::create_router(AppState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

fn book_payload(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create_book(client: &Client, base_url: &str, payload: &Value) -> String {
    let response = client
        .post(format!("{}/books", base_url))
        .json(payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_book() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&book_payload("Buku A", 100, 25, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert_eq!(body["data"]["bookId"].as_str().map(str::len), Some(16));
}

#[tokio::test]
async fn test_create_book_without_name() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let mut payload = book_payload("", 100, 25, false);
    payload.as_object_mut().unwrap().remove("name");

    let response = client
        .post(format!("{}/books", base_url))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let body: Value = client
        .get(format!("{}/books", base_url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_book_read_page_over_page_count() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&book_payload("Buku A", 80, 90, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
}

#[tokio::test]
async fn test_create_book_malformed_body() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&json!({ "name": "Buku A", "pageCount": -1 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().unwrap().starts_with("Payload tidak valid"));
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let base_url = spawn_app().await;
    let client = Client::new();

    create_book(&client, &base_url, &book_payload("War and Peace", 100, 100, false)).await;
    create_book(&client, &base_url, &book_payload("The Art of WAR", 100, 10, true)).await;
    create_book(&client, &base_url, &book_payload("Dune", 100, 0, true)).await;

    let list = |query: &'static str| {
        let client = client.clone();
        let url = format!("{}/books{}", base_url, query);
        async move {
            let response = client.get(url).send().await.expect("Failed to send request");
            let status = response.status();
            let body: Value = response.json().await.expect("Failed to parse response");
            (status, body)
        }
    };

    let (status, body) = list("").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 3);
    let keys: Vec<&String> = books[0].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(books[0]["name"], "War and Peace");
    assert_eq!(books[0]["publisher"], "Dicoding Indonesia");

    let (_, body) = list("?name=war").await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 2);

    let (_, body) = list("?reading=1").await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 2);

    let (_, body) = list("?reading=0").await;
    assert_eq!(body["data"]["books"][0]["name"], "War and Peace");

    let (_, body) = list("?finished=1").await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (_, body) = list("?finished=0").await;
    let names: Vec<&str> = body["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|b| b["name"].as_str())
        .collect();
    assert_eq!(names, vec!["The Art of WAR", "Dune"]);

    // empty value is the same as no filter
    let (status, body) = list("?finished=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 3);

    // name wins over reading
    let (_, body) = list("?name=dune&reading=0").await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["books"][0]["name"], "Dune");

    let (status, body) = list("?reading=yes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_get_book() {
    let base_url = spawn_app().await;
    let client = Client::new();
    let id = create_book(&client, &base_url, &book_payload("Buku A", 100, 100, true)).await;

    let response = client
        .get(format!("{}/books/{}", base_url, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "Buku A");
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 100);
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let response = client
        .get(format!("{}/books/xxxxx", base_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_update_book() {
    let base_url = spawn_app().await;
    let client = Client::new();
    let id = create_book(&client, &base_url, &book_payload("Buku A", 100, 10, false)).await;

    let response = client
        .put(format!("{}/books/{}", base_url, id))
        .json(&book_payload("Buku A Revisi", 200, 200, true))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let body: Value = client
        .get(format!("{}/books/{}", base_url, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["book"]["name"], "Buku A Revisi");
    assert_eq!(body["data"]["book"]["finished"], true);

    let response = client
        .put(format!("{}/books/{}", base_url, id))
        .json(&book_payload("Buku A", 10, 20, true))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let response = client
        .put(format!("{}/books/xxxxx", base_url))
        .json(&book_payload("Buku A", 10, 5, true))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");
}

#[tokio::test]
async fn test_delete_book() {
    let base_url = spawn_app().await;
    let client = Client::new();
    let id = create_book(&client, &base_url, &book_payload("Buku A", 100, 10, false)).await;

    let response = client
        .delete(format!("{}/books/{}", base_url, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let response = client
        .delete(format!("{}/books/{}", base_url, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_list_books_repeated_query_key() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/books?name=a&name=b", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().unwrap().starts_with("Filter tidak valid"));
}
