//! End-to-end test over a real TCP socket.

use serde_json::{json, Value};
use tokio::net::TcpListener;

use quizgrade_core::QuestionBank;
use quizgrade_server::{create_app, run, AppState};

#[tokio::test]
async fn fetch_quiz_then_grade() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(AppState::new(QuestionBank::builtin(), 12), &[]).unwrap();
    let server = tokio::spawn(run(listener, app));

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let quiz: Value = client
        .get(format!("{base}/api/quiz"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(quiz["total"], 12);

    // Answer every question from the served key.
    let answers: Vec<Value> = quiz["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| {
            let value = match q["type"].as_str().unwrap() {
                "radio" => q["correctIndex"].clone(),
                "checkbox" => {
                    let mut indexes = q["correctIndexes"].as_array().unwrap().clone();
                    indexes.reverse();
                    Value::Array(indexes)
                }
                _ => json!(format!(
                    "  {}  ",
                    q["correctText"].as_str().unwrap().to_uppercase()
                )),
            };
            json!({ "id": q["id"].clone(), "value": value })
        })
        .collect();

    let response = client
        .post(format!("{base}/api/grade"))
        .json(&json!({ "answers": answers }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["score"], 12);
    assert_eq!(result["total"], 12);
    assert_eq!(result["results"].as_array().unwrap().len(), 12);

    let response = client
        .post(format!("{base}/api/grade"))
        .body("garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    server.abort();
}
