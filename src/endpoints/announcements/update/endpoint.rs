use std::sync::Arc;

use axum::{body::Bytes, extract::{Path, State}, response::{IntoResponse, Response}, routing::put, Extension, Json, Router};
use http::StatusCode;
use scylla::Session;
use serde::Deserialize;
use tracing::{error, info};

use crate::{common::{announcement::{message::AnnouncementMessage, Announcement, AnnouncementPatch}, teacher::Teacher, unixtime::UnixtimeMillis}, helper::{error::InitError, middleware::caller_authenticator}, middlewares::authenticate_caller::{dsl::AuthenticateCaller, middleware::AuthenticateCallerLayer}};

use super::{dsl::{UpdateAnnouncement, UpdateAnnouncementError}, interpreter::UpdateAnnouncementImpl};

pub async fn endpoint(db: Arc<Session>) -> Result<Router, InitError<UpdateAnnouncementImpl>> {
    let authenticator = caller_authenticator::<UpdateAnnouncementImpl>(db.clone()).await?;

    let update_announcement = UpdateAnnouncementImpl::try_new(db).await?;

    Ok(router(Arc::new(update_announcement), authenticator))
}

pub(crate) fn router<T, A>(update_announcement: Arc<T>, authenticator: AuthenticateCallerLayer<A>) -> Router
where
    T: UpdateAnnouncement + Send + 'static,
    A: AuthenticateCaller + Send + 'static,
{
    Router::new()
        .route("/announcements/:id", put(handler::<T>))
        .layer(authenticator)
        .with_state(update_announcement)
}

async fn handler<T: UpdateAnnouncement>(
    State(routine): State<Arc<T>>,
    Extension(teacher): Extension<Teacher>,
    Path(announcement_id): Path<String>,
    body: Bytes
) -> Result<Json<Announcement>, Response> {
    // 本文が空の場合は更新するフィールドが無いものとして扱う
    let patch: AnnouncementPatch = if body.is_empty() {
        AnnouncementPatch::default()
    } else {
        let Json(payload) = Json::<Payload>::from_bytes(&body)
            .map_err(IntoResponse::into_response)?;
        payload.into()
    };

    match routine.update_announcement(&announcement_id, patch).await {
        Ok(announcement) => {
            info!(
                username = %teacher.username,
                announcement_id = %announcement.id,
                "お知らせを更新しました"
            );
            Ok(Json(announcement))
        },
        Err(UpdateAnnouncementError::NoFieldsToUpdate) => Err(StatusCode::BAD_REQUEST.into_response()),
        Err(UpdateAnnouncementError::NotFound) => Err(StatusCode::NOT_FOUND.into_response()),
        Err(e) => {
            error!(
                error = %e,
                username = %teacher.username,
                announcement_id = %announcement_id,
                "お知らせの更新に失敗しました"
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

#[derive(Deserialize)]
pub struct Payload {
    #[serde(default)]
    message: Option<AnnouncementMessage>,
    #[serde(default)]
    expiration: Option<UnixtimeMillis>,
    #[serde(default)]
    start_date: Option<UnixtimeMillis>,
}

impl From<Payload> for AnnouncementPatch {
    fn from(payload: Payload) -> Self {
        AnnouncementPatch {
            message: payload.message,
            expiration: payload.expiration,
            start_date: payload.start_date,
        }
    }
}
