use std::future::Future;

use thiserror::Error;

use crate::common::{announcement::id::AnnouncementId, fallible::Fallible};

pub(crate) trait DeleteAnnouncement: Sync {
    fn delete_announcement(&self, id: &str) -> impl Future<Output = Fallible<(), DeleteAnnouncementError>> + Send {
        async move {
            let id = id.parse::<AnnouncementId>()
                .map_err(|_| DeleteAnnouncementError::NotFound)?;

            if self.remove_announcement(id).await? {
                Ok(())
            } else {
                Err(DeleteAnnouncementError::NotFound)
            }
        }
    }

    /// 削除を試み、対象が存在したかを返す
    fn remove_announcement(&self, id: AnnouncementId) -> impl Future<Output = Fallible<bool, DeleteAnnouncementError>> + Send;
}

#[derive(Debug, Error)]
pub enum DeleteAnnouncementError {
    #[error("お知らせが見つかりません")]
    NotFound,
    #[error("お知らせの削除に失敗しました")]
    DeleteAnnouncementFailed(#[source] anyhow::Error),
}
