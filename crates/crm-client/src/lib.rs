use std::time::Duration;

use anyhow::Context;
use crm_types::domain::client::Client;
use crm_types::domain::entity::EntityId;
use crm_types::domain::order::Order;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct CrmClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct CrmClient {
    base: Url,
    client: reqwest::Client,
}

/// Client search criteria, mirroring the server's `/clients/search` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSearch {
    Name(String),
    Domain(String),
    Id(EntityId),
}

impl ClientSearch {
    fn query_pair(&self) -> (&'static str, String) {
        match self {
            ClientSearch::Name(n) => ("name", n.clone()),
            ClientSearch::Domain(d) => ("domain", d.clone()),
            ClientSearch::Id(id) => ("id", id.to_string()),
        }
    }
}

impl CrmClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<CrmClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(CrmClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        self.client
            .get(self.url("health")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn add_client(&self, req: CreateClientRequest) -> anyhow::Result<Client> {
        tracing::debug!(name = %req.name, "adding client");
        let res = self
            .client
            .post(self.url("clients")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_client(&self, id: EntityId) -> anyhow::Result<Client> {
        let res = self
            .client
            .get(self.url(&format!("clients/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_clients(&self) -> anyhow::Result<Vec<Client>> {
        let res = self
            .client
            .get(self.url("clients")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn search_clients(&self, search: &ClientSearch) -> anyhow::Result<Vec<Client>> {
        let res = self
            .client
            .get(self.url("clients/search")?)
            .query(&[search.query_pair()])
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn add_order(&self, req: CreateOrderRequest) -> anyhow::Result<Order> {
        tracing::debug!(client_id = req.client_id, "adding order");
        let res = self
            .client
            .post(self.url("orders")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: EntityId) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("orders/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .client
            .get(self.url("orders")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl CrmClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<CrmClient> {
        if let Some(client) = self.client {
            return Ok(CrmClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(CrmClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: EntityId,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_client() -> Client {
        Client::new(1, "Ann".into(), "ann@x.com".into(), chrono::Utc::now()).unwrap()
    }

    fn sample_order() -> Order {
        Order::new(1, 1, "Widget".into(), Decimal::from(100), chrono::Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn add_and_get_client() {
        let server = MockServer::start();
        let client = sample_client();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/clients")
                .json_body_obj(&CreateClientRequest {
                    name: "Ann".into(),
                    email: "ann@x.com".into(),
                });
            then.status(201).json_body_obj(&client);
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/clients/1");
            then.status(200).json_body_obj(&client);
        });

        let api = CrmClient::new(&server.base_url()).unwrap();
        let created = api
            .add_client(CreateClientRequest {
                name: "Ann".into(),
                email: "ann@x.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(created, client);

        let fetched = api.get_client(1).await.unwrap();
        assert_eq!(fetched.email, "ann@x.com");

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn search_sends_single_parameter() {
        let server = MockServer::start();
        let client = sample_client();

        let search_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/clients/search")
                .query_param("domain", "x.com");
            then.status(200).json_body_obj(&vec![client.clone()]);
        });

        let api = CrmClient::new(&server.base_url()).unwrap();
        let found = api
            .search_clients(&ClientSearch::Domain("x.com".into()))
            .await
            .unwrap();
        assert_eq!(found, vec![client]);

        search_mock.assert();
    }

    #[tokio::test]
    async fn add_list_and_get_orders() {
        let server = MockServer::start();
        let order = sample_order();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orders")
                .json_body_obj(&CreateOrderRequest {
                    client_id: 1,
                    description: "Widget".into(),
                    amount: Decimal::from(100),
                });
            then.status(201).json_body_obj(&order);
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/orders");
            then.status(200).json_body_obj(&vec![order.clone()]);
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/orders/1");
            then.status(200).json_body_obj(&order);
        });

        let api = CrmClient::new(&server.base_url()).unwrap();
        let created = api
            .add_order(CreateOrderRequest {
                client_id: 1,
                description: "Widget".into(),
                amount: Decimal::from(100),
            })
            .await
            .unwrap();
        assert_eq!(created, order);

        assert_eq!(api.list_orders().await.unwrap().len(), 1);
        assert_eq!(api.get_order(1).await.unwrap(), order);

        create_mock.assert();
        list_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn not_found_is_an_error() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/clients/9");
            then.status(404).json_body(serde_json::json!({ "error": "client 9" }));
        });

        let api = CrmClient::builder(&server.base_url())
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .with_header("x-request-source", "tests")
            .unwrap()
            .build()
            .unwrap();
        let err = api.get_client(9).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<reqwest::Error>().and_then(|e| e.status()),
            Some(reqwest::StatusCode::NOT_FOUND)
        );
        missing.assert();
    }
}
