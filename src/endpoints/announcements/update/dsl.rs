use std::future::Future;

use thiserror::Error;

use crate::common::{announcement::{id::AnnouncementId, Announcement, AnnouncementPatch}, fallible::Fallible};

pub(crate) trait UpdateAnnouncement: Sync {
    fn update_announcement(&self, id: &str, patch: AnnouncementPatch) -> impl Future<Output = Fallible<Announcement, UpdateAnnouncementError>> + Send {
        async move {
            if patch.is_empty() {
                return Err(UpdateAnnouncementError::NoFieldsToUpdate);
            }

            // 識別子として解釈できない文字列に対応するお知らせは存在しない
            let id = id.parse::<AnnouncementId>()
                .map_err(|_| UpdateAnnouncementError::NotFound)?;

            if !self.patch_announcement(id, &patch).await? {
                return Err(UpdateAnnouncementError::NotFound);
            }

            // 更新から再取得までの間に削除された場合も見つからない扱いとする
            self.fetch_announcement(id)
                .await?
                .ok_or(UpdateAnnouncementError::NotFound)
        }
    }

    /// 指定されたフィールドのみを上書きし、対象が存在したかを返す
    fn patch_announcement(&self, id: AnnouncementId, patch: &AnnouncementPatch) -> impl Future<Output = Fallible<bool, UpdateAnnouncementError>> + Send;

    fn fetch_announcement(&self, id: AnnouncementId) -> impl Future<Output = Fallible<Option<Announcement>, UpdateAnnouncementError>> + Send;
}

#[derive(Debug, Error)]
pub enum UpdateAnnouncementError {
    #[error("更新するフィールドがありません")]
    NoFieldsToUpdate,
    #[error("お知らせが見つかりません")]
    NotFound,
    #[error("お知らせの更新に失敗しました")]
    PatchAnnouncementFailed(#[source] anyhow::Error),
    #[error("更新後のお知らせの取得に失敗しました")]
    FetchAnnouncementFailed(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use crate::{common::{announcement::{id::AnnouncementId, message::AnnouncementMessage, Announcement, AnnouncementPatch}, fallible::Fallible}, endpoints::announcements::create::dsl::CreateAnnouncement, helper::test::{announcement, days_from_now, InMemoryAnnouncements}};

    use super::{UpdateAnnouncement, UpdateAnnouncementError};

    fn message_patch(message: &str) -> AnnouncementPatch {
        AnnouncementPatch {
            message: Some(AnnouncementMessage::new(message)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn no_fields_to_update() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = InMemoryAnnouncements::with([existing.clone()]);
        let before = store.snapshot();

        let res = store.update_announcement(&existing.id.to_string(), AnnouncementPatch::default()).await;
        assert!(matches!(res.err().unwrap(), UpdateAnnouncementError::NoFieldsToUpdate));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn no_fields_checked_before_id() {
        let store = InMemoryAnnouncements::default();

        let res = store.update_announcement("missing", AnnouncementPatch::default()).await;
        assert!(matches!(res.err().unwrap(), UpdateAnnouncementError::NoFieldsToUpdate));
    }

    #[tokio::test]
    async fn unknown_id() {
        let store = InMemoryAnnouncements::with([announcement("Exam Friday", None, days_from_now(7))]);

        let res = store.update_announcement(&AnnouncementId::gen().to_string(), message_patch("Exam moved")).await;
        assert!(matches!(res.err().unwrap(), UpdateAnnouncementError::NotFound));
    }

    #[tokio::test]
    async fn malformed_id() {
        let store = InMemoryAnnouncements::default();

        let res = store.update_announcement("not-an-id", message_patch("Exam moved")).await;
        assert!(matches!(res.err().unwrap(), UpdateAnnouncementError::NotFound));
    }

    #[tokio::test]
    async fn message_only() {
        let existing = announcement("Exam Friday", Some(days_from_now(1)), days_from_now(7));
        let store = InMemoryAnnouncements::with([existing.clone()]);

        let updated = store.update_announcement(&existing.id.to_string(), message_patch("Exam moved to Monday")).await.unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.message, AnnouncementMessage::new("Exam moved to Monday"));
        assert_eq!(updated.expiration, existing.expiration);
        assert_eq!(updated.start_date, existing.start_date);
    }

    #[tokio::test]
    async fn expiration_and_start_date() {
        let existing = announcement("Exam Friday", None, days_from_now(7));
        let store = InMemoryAnnouncements::with([existing.clone()]);

        let patch = AnnouncementPatch {
            expiration: Some(days_from_now(14)),
            start_date: Some(days_from_now(2)),
            ..Default::default()
        };

        let updated = store.update_announcement(&existing.id.to_string(), patch.clone()).await.unwrap();
        assert_eq!(updated.message, existing.message);
        assert_eq!(Some(updated.expiration), patch.expiration);
        assert_eq!(updated.start_date, patch.start_date);
        assert_eq!(store.get(existing.id), Some(updated));
    }

    #[tokio::test]
    async fn create_then_update() {
        let store = InMemoryAnnouncements::default();
        let expiration = days_from_now(7);

        let created = store.create_announcement(AnnouncementMessage::new("Exam Friday"), expiration, None).await.unwrap();
        let updated = store.update_announcement(&created.id.to_string(), message_patch("Exam moved to Monday")).await.unwrap();

        assert_eq!(updated, Announcement {
            message: AnnouncementMessage::new("Exam moved to Monday"),
            ..created
        });
    }

    // 更新の直後に別のリクエストで削除された状況を模倣する
    struct DeletedAfterPatch;

    impl UpdateAnnouncement for DeletedAfterPatch {
        async fn patch_announcement(&self, _: AnnouncementId, _: &AnnouncementPatch) -> Fallible<bool, UpdateAnnouncementError> {
            Ok(true)
        }

        async fn fetch_announcement(&self, _: AnnouncementId) -> Fallible<Option<Announcement>, UpdateAnnouncementError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn deleted_between_patch_and_fetch() {
        let res = DeletedAfterPatch.update_announcement(&AnnouncementId::gen().to_string(), message_patch("Exam moved")).await;
        assert!(matches!(res.err().unwrap(), UpdateAnnouncementError::NotFound));
    }
}
