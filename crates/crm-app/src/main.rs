use crm_hex::application::crm_service::CrmService;
use crm_hex::config::Config;
use crm_hex::inbound::http::{HttpServer, HttpServerConfig};
use crm_repo::{build_repo, CachedRepository};
use crm_types::domain::client::Client;
use crm_types::domain::order::Order;
use crm_types::ports::repository::Repository;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_PORT / CRM_* when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let orders = build_repo::<Order>(&config.orders_file).await;
    let clients = build_repo::<Client>(&config.clients_file).await;

    if config.cache_clients {
        serve(CrmService::new(CachedRepository::new(clients), orders), &config).await
    } else {
        serve(CrmService::new(clients, orders), &config).await
    }
}

async fn serve<C, O>(service: CrmService<C, O>, config: &Config) -> anyhow::Result<()>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    service.subscribe(|client: &Client| {
        tracing::info!(id = client.id, name = %client.name, email = %client.email, "new client");
    });

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(Arc::new(service), server_cfg).await?;
    http.run().await
}
