use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    serve, Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::crm_service::CrmService;
use crate::application::search::ClientQuery;
use crate::errors::AppError;
use crm_types::domain::client::Client;
use crm_types::domain::entity::EntityId;
use crm_types::domain::order::Order;
use crm_types::ports::repository::Repository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct HttpServer<C, O> {
    pub service: Arc<CrmService<C, O>>,
    pub config: HttpServerConfig,
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: EntityId,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub id: Option<EntityId>,
}

impl TryFrom<SearchParams> for ClientQuery {
    type Error = AppError;

    fn try_from(p: SearchParams) -> Result<Self, Self::Error> {
        match (p.name, p.domain, p.id) {
            (Some(name), None, None) => Ok(ClientQuery::ByNameSubstring(name)),
            (None, Some(domain), None) => Ok(ClientQuery::ByEmailDomain(domain)),
            (None, None, Some(id)) => Ok(ClientQuery::ById(id)),
            _ => Err(AppError::BadRequest(
                "exactly one of name, domain or id is required".into(),
            )),
        }
    }
}

impl<C, O> HttpServer<C, O>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    pub async fn new(service: Arc<CrmService<C, O>>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self { service, config })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/health", get(health))
            .route("/clients", get(list_clients::<C, O>).post(create_client::<C, O>))
            .route("/clients/search", get(search_clients::<C, O>))
            .route("/clients/{id}", get(get_client::<C, O>))
            .route("/orders", get(list_orders::<C, O>).post(create_order::<C, O>))
            .route("/orders/{id}", get(get_order::<C, O>))
            .layer(trace_layer)
            .with_state(self.service.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

type Svc<C, O> = State<Arc<CrmService<C, O>>>;

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn create_client<C, O>(
    State(service): Svc<C, O>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), AppError>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    let Json(payload) = payload?;
    let client = service.add_client(payload.name, payload.email).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn list_clients<C, O>(State(service): Svc<C, O>) -> Json<Vec<Client>>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    Json(service.get_all_clients().await)
}

async fn search_clients<C, O>(
    State(service): Svc<C, O>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Client>>, AppError>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    let Query(params) = params?;
    let query = ClientQuery::try_from(params)?;
    Ok(Json(service.find_clients(&query).await))
}

async fn get_client<C, O>(
    State(service): Svc<C, O>,
    Path(id): Path<String>,
) -> Result<Json<Client>, AppError>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    let id = parse_id(&id)?;
    Ok(Json(service.get_client(id).await?))
}

async fn create_order<C, O>(
    State(service): Svc<C, O>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    let Json(payload) = payload?;
    let order = service
        .add_order_for_client(payload.client_id, payload.description, payload.amount)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders<C, O>(State(service): Svc<C, O>) -> Json<Vec<Order>>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    Json(service.get_all_orders().await)
}

async fn get_order<C, O>(
    State(service): Svc<C, O>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    let id = parse_id(&id)?;
    Ok(Json(service.get_order(id).await?))
}

fn parse_id(raw: &str) -> Result<EntityId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id {raw:?}")))
}
