use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use http::StatusCode;
use scylla::Session;
use tracing::error;

use crate::{common::announcement::Announcement, helper::error::InitError};

use super::{dsl::ListActiveAnnouncements, interpreter::ListActiveAnnouncementsImpl};

pub async fn endpoint(db: Arc<Session>) -> Result<Router, InitError<ListActiveAnnouncementsImpl>> {
    let list_active_announcements = ListActiveAnnouncementsImpl::try_new(db).await?;

    Ok(router(Arc::new(list_active_announcements)))
}

// 閲覧は認証不要
pub(crate) fn router<T>(list_active_announcements: Arc<T>) -> Router
where
    T: ListActiveAnnouncements + Send + 'static,
{
    Router::new()
        .route("/announcements", get(handler::<T>))
        .with_state(list_active_announcements)
}

async fn handler<T: ListActiveAnnouncements>(
    State(routine): State<Arc<T>>,
) -> Result<Json<Vec<Announcement>>, StatusCode> {
    match routine.list_active_announcements().await {
        Ok(announcements) => Ok(Json(announcements)),
        Err(e) => {
            error!(
                error = %e,
                "お知らせの取得に失敗しました"
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
