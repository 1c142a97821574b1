use std::sync::Arc;

use axum::{extract::{Path, State}, routing::delete, Extension, Json, Router};
use http::StatusCode;
use scylla::Session;
use serde::Serialize;
use tracing::{error, info};

use crate::{common::teacher::Teacher, helper::{error::InitError, middleware::caller_authenticator}, middlewares::authenticate_caller::{dsl::AuthenticateCaller, middleware::AuthenticateCallerLayer}};

use super::{dsl::{DeleteAnnouncement, DeleteAnnouncementError}, interpreter::DeleteAnnouncementImpl};

pub async fn endpoint(db: Arc<Session>) -> Result<Router, InitError<DeleteAnnouncementImpl>> {
    let authenticator = caller_authenticator::<DeleteAnnouncementImpl>(db.clone()).await?;

    let delete_announcement = DeleteAnnouncementImpl::try_new(db).await?;

    Ok(router(Arc::new(delete_announcement), authenticator))
}

pub(crate) fn router<T, A>(delete_announcement: Arc<T>, authenticator: AuthenticateCallerLayer<A>) -> Router
where
    T: DeleteAnnouncement + Send + 'static,
    A: AuthenticateCaller + Send + 'static,
{
    Router::new()
        .route("/announcements/:id", delete(handler::<T>))
        .layer(authenticator)
        .with_state(delete_announcement)
}

async fn handler<T: DeleteAnnouncement>(
    State(routine): State<Arc<T>>,
    Extension(teacher): Extension<Teacher>,
    Path(announcement_id): Path<String>
) -> Result<Json<Body>, StatusCode> {
    match routine.delete_announcement(&announcement_id).await {
        Ok(()) => {
            info!(
                username = %teacher.username,
                announcement_id = %announcement_id,
                "お知らせを削除しました"
            );
            Ok(Json(Body { success: true }))
        },
        Err(DeleteAnnouncementError::NotFound) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(
                error = %e,
                username = %teacher.username,
                announcement_id = %announcement_id,
                "お知らせの削除に失敗しました"
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Serialize)]
pub struct Body {
    success: bool,
}
