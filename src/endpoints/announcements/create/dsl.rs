use std::future::Future;

use thiserror::Error;

use crate::common::{announcement::{id::AnnouncementId, message::AnnouncementMessage, Announcement}, fallible::Fallible, unixtime::UnixtimeMillis};

pub(crate) trait CreateAnnouncement: Sync {
    // 有効期限が過去であることや開始日時との前後関係は検証しない
    fn create_announcement(&self, message: AnnouncementMessage, expiration: UnixtimeMillis, start_date: Option<UnixtimeMillis>) -> impl Future<Output = Fallible<Announcement, CreateAnnouncementError>> + Send {
        async move {
            let announcement = Announcement {
                id: AnnouncementId::gen(),
                message,
                start_date,
                expiration,
            };

            self.insert_announcement(&announcement).await?;

            Ok(announcement)
        }
    }

    fn insert_announcement(&self, announcement: &Announcement) -> impl Future<Output = Fallible<(), CreateAnnouncementError>> + Send;
}

#[derive(Debug, Error)]
pub enum CreateAnnouncementError {
    #[error("お知らせの作成に失敗しました")]
    CreateAnnouncementFailed(#[source] anyhow::Error),
}
