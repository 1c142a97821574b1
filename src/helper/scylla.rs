use std::{marker::PhantomData, sync::Arc};

use scylla::{frame::value::MaybeUnset, prepared_statement::PreparedStatement, Session, QueryResult};

/// 型付きステートメントの雛形
pub struct Statement<T>(&'static str, PhantomData<T>);

impl<T> Statement<T> {
    pub const fn of(statement: &'static str) -> Self {
        Statement(statement, PhantomData)
    }

    pub async fn prepared<F>(&self, session: &Arc<Session>, wrap: F) -> anyhow::Result<Arc<T>>
    where
        F: FnOnce(PreparedStatement) -> T
    {
        session.prepare(self.0)
            .await
            .map(|prepared| Arc::new(wrap(prepared)))
            .map_err(anyhow::Error::from)
    }
}

pub(crate) trait TypedStatement<I, O> {
    type Result<U>;

    async fn query(&self, session: &Arc<Session>, values: I) -> anyhow::Result<Self::Result<O>>;
}

/// 軽量トランザクションの`[applied]`列を取り出す
pub fn applied(result: QueryResult) -> anyhow::Result<bool> {
    let (applied_idx, _) = result.get_column_spec("[applied]")
        .ok_or_else(|| anyhow::anyhow!("[applied]列がありません"))?;

    let mut row = result.first_row()?;

    let applied = row.columns
        .get_mut(applied_idx)
        .and_then(Option::take)
        .and_then(|value| value.as_boolean())
        .ok_or_else(|| anyhow::anyhow!("[applied]列が真偽値ではありません"))?;

    Ok(applied)
}

// 未指定の列は更新しない
pub fn unset_if_none<T>(value: Option<T>) -> MaybeUnset<T> {
    match value {
        Some(value) => MaybeUnset::Set(value),
        None => MaybeUnset::Unset,
    }
}
