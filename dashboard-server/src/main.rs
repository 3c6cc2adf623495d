use dashboard_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, config, logging
    let config = setup_environment()?;

    print_banner();
    tracing::info!(
        environment = %config.environment,
        database = %config.database_url,
        "📊 Sales dashboard starting..."
    );

    // 2. Load the fact table up front; a broken database is fatal
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(code = %e.code, error = %e, "Failed to load sales data");
            return Err(e.into());
        }
    };

    // 3. Serve until Ctrl-C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
