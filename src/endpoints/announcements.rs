use std::sync::Arc;

use axum::Router;
use scylla::Session;

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

/// お知らせの一覧・作成・更新・削除をまとめたルーター
pub async fn route(db: Arc<Session>) -> anyhow::Result<Router> {
    let router = Router::new()
        .merge(list::endpoint::endpoint(db.clone()).await?)
        .merge(create::endpoint::endpoint(db.clone()).await?)
        .merge(update::endpoint::endpoint(db.clone()).await?)
        .merge(delete::endpoint::endpoint(db).await?);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::{to_bytes, Body}, Router};
    use http::{header::CONTENT_TYPE, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{common::announcement::{id::AnnouncementId, message::AnnouncementMessage}, helper::test::{announcement, days_from_now, InMemoryAnnouncements, MockTeacherDirectory}, middlewares::authenticate_caller::middleware::AuthenticateCallerLayer};

    use super::{create, delete, list, update};

    const REGISTERED: &str = "mrodriguez";

    fn app(store: Arc<InMemoryAnnouncements>) -> Router {
        let authenticator = AuthenticateCallerLayer::new(Arc::new(MockTeacherDirectory::with([REGISTERED])));

        Router::new()
            .merge(list::endpoint::router(store.clone()))
            .merge(create::endpoint::router(store.clone(), authenticator.clone()))
            .merge(update::endpoint::router(store.clone(), authenticator.clone()))
            .merge(delete::endpoint::router(store, authenticator))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Option<Value>) {
        let request = Request::builder()
            .method(method)
            .uri(uri);

        let request = match body {
            Some(body) => request.header(CONTENT_TYPE, "application/json").body(Body::from(body.to_owned())),
            None => request.body(Body::empty()),
        }.unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).ok())
    }

    fn as_teacher(path: &str) -> String {
        format!("{}?username={}", path, REGISTERED)
    }

    #[tokio::test]
    async fn list_without_username() {
        let active = announcement("Exam Friday", None, days_from_now(7));
        let expired = announcement("Club fair", None, days_from_now(-1));
        let store = Arc::new(InMemoryAnnouncements::with([active.clone(), expired]));

        let (status, body) = send(app(store), Method::GET, "/announcements", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap(), json!([{
            "id": active.id.to_string(),
            "message": "Exam Friday",
            "start_date": null,
            "expiration": active.expiration.to_rfc3339().unwrap(),
        }]));
    }

    #[tokio::test]
    async fn writes_require_username() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = Arc::new(InMemoryAnnouncements::with([existing.clone()]));
        let path = format!("/announcements/{}", existing.id);

        let (status, _) = send(app(store.clone()), Method::POST, "/announcements", Some(r#"{"message":"Spam","expiration":"2030-01-01T00:00:00Z"}"#)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app(store.clone()), Method::PUT, &path, Some(r#"{"message":"Spam"}"#)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app(store.clone()), Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(app(store.clone()), Method::DELETE, &format!("{}?username=", path), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert_eq!(store.get(existing.id), Some(existing));
    }

    #[tokio::test]
    async fn reject_unknown_teacher() {
        let store = Arc::new(InMemoryAnnouncements::default());

        let (status, _) = send(app(store.clone()), Method::POST, "/announcements?username=intruder", Some(r#"{"message":"Spam","expiration":"2030-01-01T00:00:00Z"}"#)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn create_as_teacher() {
        let store = Arc::new(InMemoryAnnouncements::default());

        let (status, body) = send(app(store.clone()), Method::POST, &as_teacher("/announcements"), Some(r#"{"message":"Exam Friday","expiration":"2030-01-01T00:00:00Z"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);

        let body = body.unwrap();
        assert_eq!(body["message"], "Exam Friday");
        assert_eq!(body["expiration"], "2030-01-01T00:00:00Z");
        assert!(body["start_date"].is_null());

        let id: AnnouncementId = body["id"].as_str().unwrap().parse().unwrap();
        let created = store.get(id).unwrap();
        assert_eq!(created.message, AnnouncementMessage::new("Exam Friday"));
    }

    #[tokio::test]
    async fn update_without_fields() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = Arc::new(InMemoryAnnouncements::with([existing.clone()]));
        let path = as_teacher(&format!("/announcements/{}", existing.id));

        let (status, _) = send(app(store.clone()), Method::PUT, &path, Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(app(store.clone()), Method::PUT, &path, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.get(existing.id), Some(existing));
    }

    #[tokio::test]
    async fn update_with_malformed_body() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = Arc::new(InMemoryAnnouncements::with([existing.clone()]));
        let path = as_teacher(&format!("/announcements/{}", existing.id));

        let (status, _) = send(app(store.clone()), Method::PUT, &path, Some(r#"{"expiration":"next week"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(app(store.clone()), Method::PUT, &path, Some(r#"{"message":"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.get(existing.id), Some(existing));
    }

    #[tokio::test]
    async fn update_unknown_announcement() {
        let store = Arc::new(InMemoryAnnouncements::default());
        let path = as_teacher(&format!("/announcements/{}", AnnouncementId::gen()));

        let (status, _) = send(app(store.clone()), Method::PUT, &path, Some(r#"{"message":"Exam Monday"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app(store), Method::PUT, &as_teacher("/announcements/not-an-id"), Some(r#"{"message":"Exam Monday"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_message_only() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = Arc::new(InMemoryAnnouncements::with([existing.clone()]));
        let path = as_teacher(&format!("/announcements/{}", existing.id));

        let (status, body) = send(app(store), Method::PUT, &path, Some(r#"{"message":"Exam Monday"}"#)).await;
        assert_eq!(status, StatusCode::OK);

        let body = body.unwrap();
        assert_eq!(body["id"], existing.id.to_string());
        assert_eq!(body["message"], "Exam Monday");
        assert_eq!(body["expiration"], existing.expiration.to_rfc3339().unwrap());
    }

    #[tokio::test]
    async fn delete_as_teacher() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = Arc::new(InMemoryAnnouncements::with([existing.clone()]));
        let path = as_teacher(&format!("/announcements/{}", existing.id));

        let (status, body) = send(app(store.clone()), Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap(), json!({ "success": true }));
        assert!(store.snapshot().is_empty());

        let (status, _) = send(app(store), Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
