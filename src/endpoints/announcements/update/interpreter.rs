use std::sync::Arc;

use scylla::{frame::value::MaybeUnset, prepared_statement::PreparedStatement, Session};

use crate::{common::{announcement::{id::AnnouncementId, message::AnnouncementMessage, Announcement, AnnouncementPatch, AnnouncementRow}, fallible::Fallible, unixtime::UnixtimeMillis}, helper::{error::InitError, scylla::{applied, unset_if_none, Statement, TypedStatement}}};

use super::dsl::{UpdateAnnouncement, UpdateAnnouncementError};

pub struct UpdateAnnouncementImpl {
    db: Arc<Session>,
    update_announcement_if_exists: Arc<UpdateAnnouncementIfExists>,
    select_announcement: Arc<SelectAnnouncement>,
}

impl UpdateAnnouncementImpl {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<Self>> {
        fn handle_error<E: Into<anyhow::Error>>(e: E) -> InitError<UpdateAnnouncementImpl> {
            InitError::new(e.into())
        }

        let update_announcement_if_exists = UPDATE_ANNOUNCEMENT_IF_EXISTS.prepared(&db, UpdateAnnouncementIfExists)
            .await
            .map_err(handle_error)?;

        let select_announcement = SELECT_ANNOUNCEMENT.prepared(&db, SelectAnnouncement)
            .await
            .map_err(handle_error)?;

        Ok(Self { db, update_announcement_if_exists, select_announcement })
    }
}

impl UpdateAnnouncement for UpdateAnnouncementImpl {
    async fn patch_announcement(&self, id: AnnouncementId, patch: &AnnouncementPatch) -> Fallible<bool, UpdateAnnouncementError> {
        let values = (
            unset_if_none(patch.message.as_ref()),
            unset_if_none(patch.start_date.as_ref()),
            unset_if_none(patch.expiration.as_ref()),
            id,
        );

        self.update_announcement_if_exists
            .query(&self.db, values)
            .await
            .map_err(UpdateAnnouncementError::PatchAnnouncementFailed)
    }

    async fn fetch_announcement(&self, id: AnnouncementId) -> Fallible<Option<Announcement>, UpdateAnnouncementError> {
        self.select_announcement
            .query(&self.db, (id, ))
            .await
            .map(|row| row.map(Announcement::from))
            .map_err(UpdateAnnouncementError::FetchAnnouncementFailed)
    }
}

// 未指定のフィールドは`unset`として渡し、既存の値を残す
const UPDATE_ANNOUNCEMENT_IF_EXISTS: Statement<UpdateAnnouncementIfExists>
    = Statement::of("UPDATE announcements SET message = ?, start_date = ?, expiration = ? WHERE id = ? IF EXISTS");

struct UpdateAnnouncementIfExists(PreparedStatement);

type PatchValues<'a> = (MaybeUnset<&'a AnnouncementMessage>, MaybeUnset<&'a UnixtimeMillis>, MaybeUnset<&'a UnixtimeMillis>, AnnouncementId);

impl<'a> TypedStatement<PatchValues<'a>, bool> for UpdateAnnouncementIfExists {
    type Result<U> = U;

    async fn query(&self, session: &Arc<Session>, values: PatchValues<'a>) -> anyhow::Result<Self::Result<bool>> {
        let result = session.execute_unpaged(&self.0, values)
            .await
            .map_err(anyhow::Error::from)?;

        applied(result)
    }
}

const SELECT_ANNOUNCEMENT: Statement<SelectAnnouncement>
    = Statement::of("SELECT id, message, start_date, expiration FROM announcements WHERE id = ?");

struct SelectAnnouncement(PreparedStatement);

impl TypedStatement<(AnnouncementId, ), AnnouncementRow> for SelectAnnouncement {
    type Result<U> = Option<U>;

    async fn query(&self, session: &Arc<Session>, values: (AnnouncementId, )) -> anyhow::Result<Self::Result<AnnouncementRow>> {
        session.execute_unpaged(&self.0, values)
            .await
            .map_err(anyhow::Error::from)?
            .maybe_first_row_typed::<AnnouncementRow>()
            .map_err(anyhow::Error::from)
    }
}
