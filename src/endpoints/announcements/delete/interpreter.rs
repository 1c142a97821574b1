use std::sync::Arc;

use scylla::{prepared_statement::PreparedStatement, Session};

use crate::{common::{announcement::id::AnnouncementId, fallible::Fallible}, helper::{error::InitError, scylla::{applied, Statement, TypedStatement}}};

use super::dsl::{DeleteAnnouncement, DeleteAnnouncementError};

pub struct DeleteAnnouncementImpl {
    db: Arc<Session>,
    delete_announcement_if_exists: Arc<DeleteAnnouncementIfExists>,
}

impl DeleteAnnouncementImpl {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<Self>> {
        let delete_announcement_if_exists = DELETE_ANNOUNCEMENT_IF_EXISTS.prepared(&db, DeleteAnnouncementIfExists)
            .await
            .map_err(InitError::<Self>::new)?;

        Ok(Self { db, delete_announcement_if_exists })
    }
}

impl DeleteAnnouncement for DeleteAnnouncementImpl {
    async fn remove_announcement(&self, id: AnnouncementId) -> Fallible<bool, DeleteAnnouncementError> {
        self.delete_announcement_if_exists
            .query(&self.db, (id, ))
            .await
            .map_err(DeleteAnnouncementError::DeleteAnnouncementFailed)
    }
}

const DELETE_ANNOUNCEMENT_IF_EXISTS: Statement<DeleteAnnouncementIfExists>
    = Statement::of("DELETE FROM announcements WHERE id = ? IF EXISTS");

struct DeleteAnnouncementIfExists(PreparedStatement);

impl TypedStatement<(AnnouncementId, ), bool> for DeleteAnnouncementIfExists {
    type Result<U> = U;

    async fn query(&self, session: &Arc<Session>, values: (AnnouncementId, )) -> anyhow::Result<Self::Result<bool>> {
        let result = session.execute_unpaged(&self.0, values)
            .await
            .map_err(anyhow::Error::from)?;

        applied(result)
    }
}
