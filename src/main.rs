use std::sync::Arc;

use delay_predictor::config::Config;
use delay_predictor::encoder::BinaryEncoder;
use delay_predictor::model::TorchClassifier;
use delay_predictor::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::from_env()?;

    // Load both artifacts before binding so a bad path fails the boot, not
    // the first request.
    let encoder = BinaryEncoder::load(&cfg.encoder_path)?;
    let in_dim = encoder.output_width();
    tracing::info!(
        "loaded encoder; columns[{}]: {:?}, output width {}",
        encoder.column_names().len(),
        encoder.column_names(),
        in_dim
    );

    let classifier = TorchClassifier::load(&cfg.model_path, in_dim)?;
    tracing::info!("loaded classifier; warmup forward ok");

    let state = AppState {
        encoder: Arc::new(encoder),
        classifier: Arc::new(classifier),
    };
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
