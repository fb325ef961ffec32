use std::sync::Arc;

use anyhow::Context;
use cardstmt_extract::{StatementPipeline, TextSource};
use cardstmt_pdf::default_pdf_source;
use cardstmt_server::{router, AppState, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let settings = Settings::from_env().context("loading settings")?;

    let source: Box<dyn TextSource> = Box::new(default_pdf_source(settings.parser.min_text_chars));
    let pipeline = Arc::new(StatementPipeline::new(source, settings.parser));
    let app = router(AppState { pipeline }, settings.server.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("binding {}", settings.server.bind))?;
    tracing::info!("Statement parser listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
