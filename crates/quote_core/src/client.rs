//! Client master data.

use serde::{Deserialize, Serialize};

/// Client identifier: the ordinal row index the client was read from.
pub type ClientId = usize;

/// A client a quotation can be addressed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Ordinal identifier
    pub id: ClientId,
    /// Client name
    pub name: String,
    /// Postal address
    pub address: String,
    /// Attention line
    pub attention: String,
}

impl Client {
    /// Creates a client record.
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        address: impl Into<String>,
        attention: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            attention: attention.into(),
        }
    }
}
