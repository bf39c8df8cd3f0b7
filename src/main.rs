//! Server entry point — wires config, provider client, pipeline, router.

use reply_copilot::pipeline::ReplyGenerationService;
use reply_copilot::{config, llm, server};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    config::load_dotenv();
    env_logger::init();

    let cfg = config::Config::from_env();

    let client = match llm::client_from_env(&cfg) {
        Ok(client) => client,
        Err(e) => {
            log::error!("[STARTUP] No usable model provider: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(ReplyGenerationService::new(client, &cfg));
    let router = server::create_router(service);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            log::error!("[STARTUP] Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    log::info!("[SERVER] Listening on {}", addr);
    axum::serve(listener, router)
        .await
        .expect("Error running reply-copilot server");
}
