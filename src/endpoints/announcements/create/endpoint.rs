use std::sync::Arc;

use axum::{extract::State, routing::post, Extension, Json, Router};
use http::StatusCode;
use scylla::Session;
use serde::Deserialize;
use tracing::{error, info};

use crate::{common::{announcement::{message::AnnouncementMessage, Announcement}, teacher::Teacher, unixtime::UnixtimeMillis}, helper::{error::InitError, middleware::caller_authenticator}, middlewares::authenticate_caller::{dsl::AuthenticateCaller, middleware::AuthenticateCallerLayer}};

use super::{dsl::CreateAnnouncement, interpreter::CreateAnnouncementImpl};

pub async fn endpoint(db: Arc<Session>) -> Result<Router, InitError<CreateAnnouncementImpl>> {
    let authenticator = caller_authenticator::<CreateAnnouncementImpl>(db.clone()).await?;

    let create_announcement = CreateAnnouncementImpl::try_new(db).await?;

    Ok(router(Arc::new(create_announcement), authenticator))
}

pub(crate) fn router<T, A>(create_announcement: Arc<T>, authenticator: AuthenticateCallerLayer<A>) -> Router
where
    T: CreateAnnouncement + Send + 'static,
    A: AuthenticateCaller + Send + 'static,
{
    Router::new()
        .route("/announcements", post(handler::<T>))
        .layer(authenticator)
        .with_state(create_announcement)
}

async fn handler<T: CreateAnnouncement>(
    State(routine): State<Arc<T>>,
    Extension(teacher): Extension<Teacher>,
    Json(payload): Json<Payload>
) -> Result<(StatusCode, Json<Announcement>), StatusCode> {
    match routine.create_announcement(payload.message, payload.expiration, payload.start_date).await {
        Ok(announcement) => {
            info!(
                username = %teacher.username,
                announcement_id = %announcement.id,
                "お知らせを作成しました"
            );
            Ok((StatusCode::CREATED, Json(announcement)))
        },
        Err(e) => {
            error!(
                error = %e,
                username = %teacher.username,
                "お知らせの作成に失敗しました"
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Deserialize)]
pub struct Payload {
    message: AnnouncementMessage,
    expiration: UnixtimeMillis,
    #[serde(default)]
    start_date: Option<UnixtimeMillis>,
}
