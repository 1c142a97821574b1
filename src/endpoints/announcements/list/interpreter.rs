use std::sync::Arc;

use scylla::{prepared_statement::PreparedStatement, Session};

use crate::{common::{announcement::{Announcement, AnnouncementRow}, fallible::Fallible, unixtime::UnixtimeMillis}, helper::{error::InitError, scylla::{Statement, TypedStatement}}};

use super::dsl::{ListActiveAnnouncements, ListActiveAnnouncementsError};

pub struct ListActiveAnnouncementsImpl {
    db: Arc<Session>,
    select_active_announcements: Arc<SelectActiveAnnouncements>,
}

impl ListActiveAnnouncementsImpl {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<Self>> {
        let select_active_announcements = SELECT_ACTIVE_ANNOUNCEMENTS.prepared(&db, SelectActiveAnnouncements)
            .await
            .map_err(InitError::<Self>::new)?;

        Ok(Self { db, select_active_announcements })
    }
}

impl ListActiveAnnouncements for ListActiveAnnouncementsImpl {
    async fn fetch_announcements_active_at(&self, now: UnixtimeMillis) -> Fallible<Vec<Announcement>, ListActiveAnnouncementsError> {
        self.select_active_announcements
            .query(&self.db, (now, ))
            .await
            .map(|rows| rows.into_iter().map(Announcement::from).collect())
            .map_err(ListActiveAnnouncementsError::ListActiveAnnouncementsFailed)
    }
}

// 期限切れの行も削除されるまで走査対象に残り、結果は一度に取得する
// 走査量は削除されていないお知らせの総数に比例する
const SELECT_ACTIVE_ANNOUNCEMENTS: Statement<SelectActiveAnnouncements>
    = Statement::of("SELECT id, message, start_date, expiration FROM announcements WHERE expiration >= ? ALLOW FILTERING");

struct SelectActiveAnnouncements(PreparedStatement);

impl TypedStatement<(UnixtimeMillis, ), AnnouncementRow> for SelectActiveAnnouncements {
    type Result<U> = Vec<U>;

    async fn query(&self, session: &Arc<Session>, values: (UnixtimeMillis, )) -> anyhow::Result<Self::Result<AnnouncementRow>> {
        session.execute_unpaged(&self.0, values)
            .await
            .map_err(anyhow::Error::from)?
            .rows_typed::<AnnouncementRow>()
            .map_err(anyhow::Error::from)?
            .collect::<Result<Vec<AnnouncementRow>, _>>()
            .map_err(anyhow::Error::from)
    }
}
