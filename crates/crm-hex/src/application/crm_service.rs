use crate::application::notifier::{Notifier, SubscriptionId};
use crate::application::search::ClientQuery;
use crate::errors::AppError;
use chrono::Utc;
use crm_types::domain::client::Client;
use crm_types::domain::entity::EntityId;
use crm_types::domain::order::Order;
use crm_types::ports::repository::Repository;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Entry point over the client and order repositories.
///
/// Each mutation assigns the id, appends and saves under a per-collection
/// write gate, so concurrent callers never share an id and the file is
/// written before the call returns. A failed save takes the entity back out
/// of memory.
pub struct CrmService<C, O> {
    clients: C,
    orders: O,
    client_writes: Mutex<()>,
    order_writes: Mutex<()>,
    notifier: Notifier,
}

impl<C, O> CrmService<C, O>
where
    C: Repository<Client>,
    O: Repository<Order>,
{
    pub fn new(clients: C, orders: O) -> Self {
        Self {
            clients,
            orders,
            client_writes: Mutex::new(()),
            order_writes: Mutex::new(()),
            notifier: Notifier::new(),
        }
    }

    /// Register a listener for newly added clients. It runs before
    /// `add_client` returns.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Client) + Send + Sync + 'static,
    {
        self.notifier.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub async fn add_client(&self, name: String, email: String) -> Result<Client, AppError> {
        let _gate = self.client_writes.lock().await;
        let id = self
            .clients
            .next_id()
            .await
            .ok_or_else(|| AppError::IdsExhausted("client".into()))?;
        let client = Client::new(id, name, email, Utc::now())
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.clients.add(client.clone()).await;
        if let Err(e) = self.clients.save().await {
            self.clients.discard(id).await;
            warn!(id, error = %e, "client not saved, add rolled back");
            return Err(e.into());
        }
        info!(id, name = %client.name, "client added");
        self.notifier.client_added(&client);
        Ok(client)
    }

    pub async fn add_order_for_client(
        &self,
        client_id: EntityId,
        description: String,
        amount: Decimal,
    ) -> Result<Order, AppError> {
        let _gate = self.order_writes.lock().await;
        let id = self
            .orders
            .next_id()
            .await
            .ok_or_else(|| AppError::IdsExhausted("order".into()))?;
        let order = Order::new(id, client_id, description, amount, Utc::now())
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.orders.add(order.clone()).await;
        if let Err(e) = self.orders.save().await {
            self.orders.discard(id).await;
            warn!(id, error = %e, "order not saved, add rolled back");
            return Err(e.into());
        }
        info!(id, client_id, amount = %order.amount, "order added");
        Ok(order)
    }

    pub async fn get_all_clients(&self) -> Vec<Client> {
        self.clients.get_all().await
    }

    pub async fn get_all_orders(&self) -> Vec<Order> {
        self.orders.get_all().await
    }

    pub async fn get_client(&self, id: EntityId) -> Result<Client, AppError> {
        self.clients
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("client {}", id)))
    }

    pub async fn get_order(&self, id: EntityId) -> Result<Order, AppError> {
        self.orders
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))
    }

    pub async fn find_clients(&self, query: &ClientQuery) -> Vec<Client> {
        self.clients
            .get_all()
            .await
            .into_iter()
            .filter(|c| query.matches(c))
            .collect()
    }
}
