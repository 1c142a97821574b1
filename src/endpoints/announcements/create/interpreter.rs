use std::sync::Arc;

use scylla::{prepared_statement::PreparedStatement, Session};

use crate::{common::{announcement::{id::AnnouncementId, message::AnnouncementMessage, Announcement}, fallible::Fallible, unixtime::UnixtimeMillis}, helper::{error::InitError, scylla::{Statement, TypedStatement}}};

use super::dsl::{CreateAnnouncement, CreateAnnouncementError};

pub struct CreateAnnouncementImpl {
    db: Arc<Session>,
    insert_announcement: Arc<InsertAnnouncement>,
}

impl CreateAnnouncementImpl {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<Self>> {
        let insert_announcement = INSERT_ANNOUNCEMENT.prepared(&db, InsertAnnouncement)
            .await
            .map_err(InitError::<Self>::new)?;

        Ok(Self { db, insert_announcement })
    }
}

impl CreateAnnouncement for CreateAnnouncementImpl {
    async fn insert_announcement(&self, announcement: &Announcement) -> Fallible<(), CreateAnnouncementError> {
        let values = (&announcement.id, &announcement.message, &announcement.start_date, &announcement.expiration);

        self.insert_announcement
            .query(&self.db, values)
            .await
            .map_err(CreateAnnouncementError::CreateAnnouncementFailed)
    }
}

const INSERT_ANNOUNCEMENT: Statement<InsertAnnouncement>
    = Statement::of("INSERT INTO announcements (id, message, start_date, expiration) VALUES (?, ?, ?, ?)");

struct InsertAnnouncement(PreparedStatement);

type InsertValues<'a> = (&'a AnnouncementId, &'a AnnouncementMessage, &'a Option<UnixtimeMillis>, &'a UnixtimeMillis);

impl<'a> TypedStatement<InsertValues<'a>, ()> for InsertAnnouncement {
    type Result<U> = U;

    async fn query(&self, session: &Arc<Session>, values: InsertValues<'a>) -> anyhow::Result<Self::Result<()>> {
        session.execute_unpaged(&self.0, values)
            .await
            .map(|_| ())
            .map_err(anyhow::Error::from)
    }
}
