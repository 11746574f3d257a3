use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::OpsResult;
use crate::models::patch::Patch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated client ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateClientRequest {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub address: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateClientRequest {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub address: Patch<String>,
}

impl CreateClientRequest {
    pub fn validate(self) -> OpsResult<NewClient> {
        Ok(NewClient {
            name: self.name.require("name")?,
            email: self.email.require("email")?,
            phone: self.phone.require("phone")?,
            address: self.address.require("address")?,
        })
    }
}

impl UpdateClientRequest {
    pub fn validate(self) -> OpsResult<ClientChanges> {
        Ok(ClientChanges {
            name: self.name.update("name")?,
            email: self.email.update("email")?,
            phone: self.phone.update("phone")?,
            address: self.address.update("address")?,
        })
    }
}

impl Client {
    pub fn apply(&mut self, changes: ClientChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
    }
}
