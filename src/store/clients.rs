use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::StoreError;
use super::{by_name, new_id};
use crate::core::ClientDetails;

/// A saved client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Contact details to copy onto an invoice.
    pub fn details(&self) -> ClientDetails {
        ClientDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

/// Client form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ClientInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Invalid {
                entity: "client",
                message: "name must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Storage for clients.
pub trait ClientRepository {
    fn create(&mut self, input: ClientInput, now: DateTime<Utc>) -> Result<Client, StoreError>;
    fn update(&mut self, id: &str, input: ClientInput) -> Result<Client, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn get(&self, id: &str) -> Result<Client, StoreError>;
    /// All clients, sorted by name.
    fn list(&self) -> Result<Vec<Client>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryClients {
    clients: HashMap<String, Client>,
}

impl InMemoryClients {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientRepository for InMemoryClients {
    fn create(&mut self, input: ClientInput, now: DateTime<Utc>) -> Result<Client, StoreError> {
        input.check()?;
        let client = Client {
            id: new_id(),
            name: input.name.trim().to_string(),
            email: input.email,
            phone: input.phone,
            address: input.address,
            created_at: now,
        };
        debug!(id = %client.id, name = %client.name, "created client");
        self.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    fn update(&mut self, id: &str, input: ClientInput) -> Result<Client, StoreError> {
        input.check()?;
        let client = self
            .clients
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("client", id))?;
        client.name = input.name.trim().to_string();
        client.email = input.email;
        client.phone = input.phone;
        client.address = input.address;
        Ok(client.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.clients
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    fn get(&self, id: &str) -> Result<Client, StoreError> {
        self.clients
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    fn list(&self) -> Result<Vec<Client>, StoreError> {
        let mut clients: Vec<Client> = self.clients.values().cloned().collect();
        clients.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(clients)
    }
}
