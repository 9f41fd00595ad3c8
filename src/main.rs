use denuncias_server::{config::ServerConfig, context::AppContext, error::ApiResult, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ApiResult<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "denuncias_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Print banner
    print_banner();

    // Load configuration
    let config = ServerConfig::from_env()?;

    // Create application context
    let ctx = AppContext::new(config).await?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
   _____ _____ _____
  / ____/ ____|  __ \
 | (___| |  __| |  | |
  \___ \ |_ |_| |  | |
  ____) | |__| | |__| |
 |_____/ \_____|_____/

        Sistema de Gestión de Denuncias v{}
        "#,
        env!("CARGO_PKG_VERSION")
    );
}
