///  To run :
///  cargo r --example demo
use crm_client::{ClientSearch, CreateClientRequest, CreateOrderRequest, CrmClient};
use crm_hex::application::crm_service::CrmService;
use crm_hex::inbound::http::{HttpServer, HttpServerConfig};
use crm_repo::build_repo;
use crm_types::domain::client::Client;
use crm_types::domain::order::Order;
use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::tempdir;

fn find_free_port() -> anyhow::Result<u16> {
    Ok(std::net::TcpListener::bind("127.0.0.1:0")?
        .local_addr()?
        .port())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port()?;
    let addr = format!("http://127.0.0.1:{port}/");

    // Temp data dir so the demo always starts from empty files.
    let tmp = tempdir()?;
    let clients = build_repo::<Client>(&tmp.path().join("clients.json")).await;
    let orders = build_repo::<Order>(&tmp.path().join("orders.json")).await;
    let service = CrmService::new(clients, orders);
    service.subscribe(|c: &Client| println!("[notify] new client #{} {} <{}>", c.id, c.name, c.email));

    let server = HttpServer::new(
        Arc::new(service),
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;
    let handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("server stopped: {e:#}");
        }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let api = CrmClient::new(&addr)?;
    api.health().await?;

    for (name, email) in [
        ("Ann", "ann@x.com"),
        ("Bob", "bob@y.org"),
        ("Cleo", "cleo@x.com"),
    ] {
        let c = api
            .add_client(CreateClientRequest {
                name: name.into(),
                email: email.into(),
            })
            .await?;
        println!("Added client id={} name={}", c.id, c.name);
    }

    for (client_id, description, amount) in [
        (1, "Widget", Decimal::from(100)),
        (1, "Support plan", Decimal::new(4999, 2)),
        (2, "Gadget", Decimal::from(250)),
    ] {
        let o = api
            .add_order(CreateOrderRequest {
                client_id,
                description: description.into(),
                amount,
            })
            .await?;
        println!(
            "Added order id={} client={} amount={} due={}",
            o.id,
            o.client_id,
            o.amount,
            o.due_date.date_naive()
        );
    }

    for search in [
        ClientSearch::Name("an".into()),
        ClientSearch::Domain("x.com".into()),
        ClientSearch::Id(2),
    ] {
        let found = api.search_clients(&search).await?;
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        println!("Search {:?} -> {:?}", search, names);
    }

    println!("Clients:");
    for c in api.list_clients().await? {
        println!("  #{} {} <{}> since {}", c.id, c.name, c.email, c.created_at);
    }
    println!("Orders:");
    for o in api.list_orders().await? {
        println!("  #{} client={} {} {}", o.id, o.client_id, o.description, o.amount);
    }

    handle.abort();
    Ok(())
}
