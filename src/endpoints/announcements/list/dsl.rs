use std::future::Future;

use thiserror::Error;

use crate::common::{announcement::Announcement, fallible::Fallible, unixtime::UnixtimeMillis};

pub(crate) trait ListActiveAnnouncements: Sync {
    fn list_active_announcements(&self) -> impl Future<Output = Fallible<Vec<Announcement>, ListActiveAnnouncementsError>> + Send {
        // 現在時刻は呼び出し時に一度だけ評価する
        self.fetch_announcements_active_at(UnixtimeMillis::now())
    }

    /// 有効期限が`now`以降のお知らせを取得する
    ///
    /// 開始日時は絞り込みに使わないため、開始前のお知らせも含まれる
    fn fetch_announcements_active_at(&self, now: UnixtimeMillis) -> impl Future<Output = Fallible<Vec<Announcement>, ListActiveAnnouncementsError>> + Send;
}

#[derive(Debug, Error)]
pub enum ListActiveAnnouncementsError {
    #[error("お知らせの取得に失敗しました")]
    ListActiveAnnouncementsFailed(#[source] anyhow::Error),
}
