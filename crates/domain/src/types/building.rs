//! Building and address types

use serde::{Deserialize, Serialize};

/// Fiber infrastructure available at a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Infrastructure {
    /// Fiber to the home
    Ftth,
    /// Fiber to the building
    Fttb,
}

/// A building known to the address store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    /// External address-store key, also used for promotion targeting
    pub id: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub infrastructure: Infrastructure,
    /// Whether orders can currently be placed for this building
    pub serviceable: bool,
}

/// Address fields submitted by the availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressQuery {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
}
