//! Message handler integration tests

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use parley_llm::{LlmMessage, LlmRole};
use serde_json::{json, Value};

use crate::common::TestApp;

fn messages_uri(id: i64) -> String {
    format!("/conversations/{}/messages", id)
}

mod test_send_message {
    use super::*;

    #[tokio::test]
    async fn test_send_to_missing_conversation_returns_404() {
        let app = TestApp::with_mock_llm().await.unwrap();

        let (status, body) = app
            .send(Method::POST, &messages_uri(999), Some(json!({"content": "Hi"})))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(app.message_count().await, 0);
        assert!(app.llm.as_ref().unwrap().recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_send_without_llm_stores_placeholder() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app
            .send(Method::POST, &messages_uri(id), Some(json!({"content": "Hi"})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "user");
        assert_eq!(body["user"]["content"], "Hi");
        assert_eq!(body["user"]["conversation_id"], id);
        assert_eq!(body["assistant"]["role"], "assistant");
        assert_eq!(body["assistant"]["content"], "[LLM not configured]");
        assert_eq!(app.message_count().await, 2);
    }

    #[tokio::test]
    async fn test_send_with_llm_stores_reply() {
        let app = TestApp::with_mock_llm().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app
            .send(Method::POST, &messages_uri(id), Some(json!({"content": "Hello"})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assistant"]["content"], "Mock response to: Hello");

        let requests = app.llm.as_ref().unwrap().recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gemma3");
        assert_eq!(requests[0].messages, vec![LlmMessage::user("Hello")]);
    }

    #[tokio::test]
    async fn test_send_passes_full_history_in_order() {
        let app = TestApp::with_mock_llm().await.unwrap();
        let id = app.create_conversation(None).await;

        app.send(Method::POST, &messages_uri(id), Some(json!({"content": "first"})))
            .await;
        app.send(Method::POST, &messages_uri(id), Some(json!({"content": "second"})))
            .await;

        let requests = app.llm.as_ref().unwrap().recorded_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].messages,
            vec![
                LlmMessage::user("first"),
                LlmMessage::assistant("Mock response to: first"),
                LlmMessage::user("second"),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_unknown_role_stored_verbatim_sent_as_user() {
        let app = TestApp::with_mock_llm().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app
            .send(
                Method::POST,
                &messages_uri(id),
                Some(json!({"role": "system", "content": "Be brief"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "system");

        let requests = app.llm.as_ref().unwrap().recorded_requests();
        assert_eq!(requests[0].messages[0].role, LlmRole::User);
        assert_eq!(requests[0].messages[0].content, "Be brief");
    }

    #[tokio::test]
    async fn test_send_with_failing_llm_still_succeeds() {
        let app = TestApp::with_failing_llm("connection refused").await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app
            .send(Method::POST, &messages_uri(id), Some(json!({"content": "Hi"})))
            .await;

        assert_eq!(status, StatusCode::OK);
        let content = body["assistant"]["content"].as_str().unwrap();
        assert!(content.starts_with("[LLM error] "));
        assert!(content.contains("connection refused"));
        assert_eq!(app.message_count().await, 2);
    }

    #[tokio::test]
    async fn test_send_missing_content_returns_400() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, _) = app
            .send(Method::POST, &messages_uri(id), Some(json!({"role": "user"})))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.message_count().await, 0);
    }

    #[tokio::test]
    async fn test_send_empty_and_long_roles_stored_verbatim() {
        let app = TestApp::with_mock_llm().await.unwrap();
        let id = app.create_conversation(None).await;
        let long_role = "x".repeat(33);

        for role in ["", long_role.as_str()] {
            let (status, body) = app
                .send(
                    Method::POST,
                    &messages_uri(id),
                    Some(json!({"role": role, "content": "Hi"})),
                )
                .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["user"]["role"], role);
        }

        let requests = app.llm.as_ref().unwrap().recorded_requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1]
            .messages
            .iter()
            .filter(|m| m.content == "Hi")
            .all(|m| m.role == LlmRole::User));
    }
}

mod test_list_messages {
    use super::*;

    #[tokio::test]
    async fn test_list_missing_conversation_returns_404() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.send(Method::GET, &messages_uri(42), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_empty_conversation() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app.send(Method::GET, &messages_uri(id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_list_after_two_exchanges_is_ordered() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;

        for content in ["one", "two"] {
            let (status, _) = app
                .send(Method::POST, &messages_uri(id), Some(json!({"content": content})))
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = app.send(Method::GET, &messages_uri(id), None).await;
        assert_eq!(status, StatusCode::OK);

        let messages = body.as_array().unwrap();
        let roles: Vec<&str> = messages
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "assistant", "user", "assistant"]);
        assert_eq!(messages[0]["content"], "one");
        assert_eq!(messages[2]["content"], "two");

        let stamps: Vec<DateTime<Utc>> = messages
            .iter()
            .map(|m| m["created_at"].as_str().unwrap().parse().unwrap())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{stamps:?}");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_conversation() {
        let app = TestApp::new().await.unwrap();
        let a = app.create_conversation(Some("a")).await;
        let b = app.create_conversation(Some("b")).await;

        app.send(Method::POST, &messages_uri(a), Some(json!({"content": "in a"})))
            .await;

        let (_, body) = app.send(Method::GET, &messages_uri(b), None).await;
        assert_eq!(body, Value::Array(vec![]));

        let (_, body) = app.send(Method::GET, &messages_uri(a), None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
