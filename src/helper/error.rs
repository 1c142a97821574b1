use std::{fmt, marker::PhantomData};

use thiserror::Error;

// エンドポイントの初期化で使用する
#[derive(Error)]
#[error("初期化に失敗しました")]
pub struct InitError<T>(#[source] anyhow::Error, PhantomData<fn() -> T>);

impl<T> InitError<T> {
    pub fn new(error: anyhow::Error) -> Self {
        InitError(error, PhantomData)
    }
}

impl<T> fmt::Debug for InitError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InitError")
            .field(&self.0)
            .finish()
    }
}
