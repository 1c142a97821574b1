use std::sync::Arc;

use scylla::SessionBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::{endpoints::announcements, helper::config::Config};

pub async fn startup() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let db = SessionBuilder::new()
        .known_node(&config.scylla_uri)
        .use_keyspace(&config.scylla_keyspace, false)
        .build()
        .await?;

    // ステートメントの準備に失敗した場合は起動しない
    let app = announcements::route(Arc::new(db)).await?;

    let listener = TcpListener::bind(config.bind_address).await?;

    info!(
        address = %config.bind_address,
        keyspace = %config.scylla_keyspace,
        "お知らせAPIを起動しました"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
