use desk_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    print_banner();

    tracing::info!("Front desk server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Floor plan + visit database
    let state = ServerState::initialize(&config)?;
    tracing::info!(venues = state.floor_plan.len(), "Floor plan loaded");

    // 4. HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
