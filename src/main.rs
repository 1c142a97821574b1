use school_announcements_api::startup::startup;
use time::{format_description::well_known::Rfc3339, UtcOffset};
use tracing::Level;
use tracing_subscriber::fmt::time::OffsetTime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 分析ソフトが解釈しやすいよう、時刻はRFC3339で出力する
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(true)
        .with_file(true)
        .with_timer(OffsetTime::new(
            UtcOffset::from_hms(9, 0, 0)?,
            Rfc3339
        ))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    startup().await
}
