//! Conversation handler integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use parley_conversations::NewMessage;

use crate::common::TestApp;

mod test_create_conversation {
    use super::*;

    #[tokio::test]
    async fn test_create_without_title_gets_default() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .send(Method::POST, "/conversations/", Some(json!({})))
            .await;

        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_i64().unwrap();
        assert_eq!(body["title"], format!("Conversation {}", id));
    }

    #[tokio::test]
    async fn test_create_with_title_preserved() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .send(Method::POST, "/conversations/", Some(json!({"title": "Trip"})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Trip");
    }

    #[tokio::test]
    async fn test_create_with_empty_or_null_title_gets_default() {
        let app = TestApp::new().await.unwrap();

        for payload in [json!({"title": ""}), json!({"title": null})] {
            let (status, body) = app.send(Method::POST, "/conversations", Some(payload)).await;
            assert_eq!(status, StatusCode::OK);
            let id = body["id"].as_i64().unwrap();
            assert_eq!(body["title"], format!("Conversation {}", id));
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let app = TestApp::new().await.unwrap();

        let first = app.create_conversation(None).await;
        let second = app.create_conversation(None).await;

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_long_title_preserved() {
        let app = TestApp::new().await.unwrap();
        let title = "a".repeat(201);

        let (status, body) = app
            .send(Method::POST, "/conversations/", Some(json!({"title": title})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], title);
        assert_eq!(app.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_wrong_type_returns_400() {
        let app = TestApp::new().await.unwrap();

        let (status, _) = app
            .send(Method::POST, "/conversations/", Some(json!({"title": 5})))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod test_list_conversations {
    use super::*;

    #[tokio::test]
    async fn test_list_empty() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.send(Method::GET, "/conversations/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_list_returns_all_in_creation_order() {
        let app = TestApp::new().await.unwrap();
        let a = app.create_conversation(Some("a")).await;
        let b = app.create_conversation(Some("b")).await;

        let (status, body) = app.send(Method::GET, "/conversations", None).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_list_offset_and_limit() {
        let app = TestApp::new().await.unwrap();
        for title in ["one", "two", "three", "four"] {
            app.create_conversation(Some(title)).await;
        }

        let (status, body) = app
            .send(Method::GET, "/conversations/?offset=1&limit=2", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn test_list_negative_values_are_clamped() {
        let app = TestApp::new().await.unwrap();
        app.create_conversation(Some("only")).await;

        let (status, body) = app
            .send(Method::GET, "/conversations/?offset=-3&limit=-1", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_invalid_query_returns_400() {
        let app = TestApp::new().await.unwrap();

        let (status, _) = app
            .send(Method::GET, "/conversations/?limit=lots", None)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod test_get_conversation {
    use super::*;

    #[tokio::test]
    async fn test_get_existing() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(Some("Trip")).await;

        let (status, body) = app
            .send(Method::GET, &format!("/conversations/{}", id), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["title"], "Trip");
    }

    #[tokio::test]
    async fn test_get_missing_returns_404() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.send(Method::GET, "/conversations/999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Conversation not found"));
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() {
        let app = TestApp::new().await.unwrap();

        let (status, _) = app.send(Method::GET, "/conversations/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod test_delete_conversation {
    use super::*;

    #[tokio::test]
    async fn test_delete_existing() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;

        let (status, body) = app
            .send(Method::DELETE, &format!("/conversations/{}", id), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));

        let (status, _) = app
            .send(Method::GET, &format!("/conversations/{}", id), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_404_without_side_effects() {
        let app = TestApp::new().await.unwrap();
        let kept = app.create_conversation(Some("keep")).await;

        let (status, body) = app.send(Method::DELETE, "/conversations/999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(app.conversation_count().await, 1);
        assert!(app.repos.conversations.find(kept).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_twice_returns_404() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;
        let uri = format!("/conversations/{}", id);

        let (first, _) = app.send(Method::DELETE, &uri, None).await;
        let (second, _) = app.send(Method::DELETE, &uri, None).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_removes_messages() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_conversation(None).await;
        app.repos
            .messages
            .create(&NewMessage::posted(id, None, "Hi".to_string()))
            .await
            .unwrap();
        assert_eq!(app.message_count().await, 1);

        let (status, _) = app
            .send(Method::DELETE, &format!("/conversations/{}", id), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.message_count().await, 0);
    }
}
