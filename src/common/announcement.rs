use serde::Serialize;

use id::AnnouncementId;
use message::AnnouncementMessage;

use super::unixtime::UnixtimeMillis;

pub mod id;
pub mod message;

/// DBの行と同じ並び
pub type AnnouncementRow = (AnnouncementId, AnnouncementMessage, Option<UnixtimeMillis>, UnixtimeMillis);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub message: AnnouncementMessage,
    pub start_date: Option<UnixtimeMillis>,
    pub expiration: UnixtimeMillis,
}

impl Announcement {
    // 開始日時は表示期間の判定に含めない
    pub fn is_active_at(&self, now: UnixtimeMillis) -> bool {
        self.expiration >= now
    }
}

impl From<AnnouncementRow> for Announcement {
    fn from((id, message, start_date, expiration): AnnouncementRow) -> Self {
        Announcement { id, message, start_date, expiration }
    }
}

/// 指定されたフィールドのみを上書きする部分更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementPatch {
    pub message: Option<AnnouncementMessage>,
    pub expiration: Option<UnixtimeMillis>,
    pub start_date: Option<UnixtimeMillis>,
}

impl AnnouncementPatch {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.expiration.is_none() && self.start_date.is_none()
    }
}
