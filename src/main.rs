use dotenvy::dotenv;
use tracing::{error, info};
use trivia::logging::init_tracing;
use trivia::metrics::{init_metrics, metrics_app};
use trivia::router::init_router;
use trivia::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    let address = state.server_config.address();
    let mut app = init_router(state);

    match init_metrics() {
        Ok(Some(handle)) => {
            app = app.merge(metrics_app(handle));
            info!("Prometheus metrics available at /metrics");
        }
        Ok(None) => info!("Observability disabled, metrics endpoint not mounted"),
        Err(e) => error!(error = %e, "Failed to install metrics recorder"),
    }

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %address, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }

    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
