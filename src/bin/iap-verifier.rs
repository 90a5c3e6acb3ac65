//! HTTP entry point serving `verifyPurchase`.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use fractic_iap_verifier::{secrets::IapSecretsConfig, server};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verifies in-app purchases with the App Store and Google Play.
#[derive(Parser, Debug)]
#[command(name = "iap-verifier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080", env = "IAP_VERIFIER_LISTEN")]
    listen: SocketAddr,

    /// App-specific shared secret for verifyReceipt.
    #[arg(long, env = "APPSTORE_SECRET", hide_env_values = true)]
    app_store_shared_secret: String,

    /// Package name of the Android app.
    #[arg(long, env = "ANDROID_PACKAGE_NAME")]
    android_package_name: String,

    /// Path to the service account key JSON with Play Developer API access.
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_KEY_PATH")]
    google_service_account_key_path: PathBuf,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "IAP_VERIFIER_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("iap-verifier v{}", env!("CARGO_PKG_VERSION"));

    let secrets = IapSecretsConfig {
        app_store_shared_secret: cli.app_store_shared_secret,
        android_package_name: cli.android_package_name,
        google_service_account_key: yup_oauth2::read_service_account_key(
            &cli.google_service_account_key_path,
        )
        .await?,
    };
    info!(?secrets, "Loaded vendor credentials.");

    let app = server::router_from_secrets(&secrets);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!(listen = %cli.listen, "Serving {}.", server::VERIFY_PURCHASE_PATH);
    axum::serve(listener, app).await?;
    Ok(())
}
