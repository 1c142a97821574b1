use std::future::Future;

use thiserror::Error;

use crate::common::{fallible::Fallible, teacher::{Teacher, Username}};

pub(crate) trait AuthenticateCaller: Sync {
    fn authenticate_caller(&self, username: Option<&str>) -> impl Future<Output = Fallible<Teacher, AuthenticateCallerError>> + Send {
        async move {
            let username = match username {
                Some(username) if !username.is_empty() => Username::new(username),
                _ => return Err(AuthenticateCallerError::Unauthenticated),
            };

            self.find_teacher(&username)
                .await?
                .ok_or(AuthenticateCallerError::InvalidCaller)
        }
    }

    fn find_teacher(&self, username: &Username) -> impl Future<Output = Fallible<Option<Teacher>, AuthenticateCallerError>> + Send;
}

#[derive(Debug, Error)]
pub enum AuthenticateCallerError {
    #[error("認証が必要です")]
    Unauthenticated,
    #[error("無効なユーザーです")]
    InvalidCaller,
    #[error("教員の取得に失敗しました")]
    ResolveCallerFailed(#[source] anyhow::Error),
}
