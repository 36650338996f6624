use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::{ensure_max_chars, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Home => "Home",
            AddressType::Work => "Work",
            AddressType::Other => "Other",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(AddressType::Home),
            "work" => Ok(AddressType::Work),
            "other" => Ok(AddressType::Other),
            other => Err(DomainError::validation(format!(
                "Unknown address type '{other}', expected Home, Work or Other"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub mobile: String,
    pub pincode: String,
    pub flat: String,
    pub street: String,
    pub cod: bool,
    pub city: String,
    pub state: String,
    pub landmark: Option<String>,
    pub address_type: AddressType,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub name: String,
    pub mobile: String,
    pub pincode: String,
    pub flat: String,
    pub street: String,
    pub cod: bool,
    pub city: String,
    pub state: String,
    pub landmark: Option<String>,
    pub address_type: AddressType,
}

impl NewAddress {
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            &self.name,
            &self.mobile,
            &self.pincode,
            &self.city,
            &self.state,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DomainError::validation("Missing required address fields"));
        }
        // Column widths of the addresses table.
        ensure_max_chars("name", &self.name, 255)?;
        ensure_max_chars("mobile", &self.mobile, 32)?;
        ensure_max_chars("pincode", &self.pincode, 16)?;
        ensure_max_chars("flat", &self.flat, 255)?;
        ensure_max_chars("street", &self.street, 255)?;
        ensure_max_chars("city", &self.city, 128)?;
        ensure_max_chars("state", &self.state, 128)?;
        if let Some(landmark) = &self.landmark {
            ensure_max_chars("landmark", landmark, 255)?;
        }
        Ok(())
    }
}

/// Copy of an [`Address`] frozen into an order at checkout.
///
/// Later edits to the source address never reach orders that were already
/// placed. Every field defaults so that rows written by older clients still
/// decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressSnapshot {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub mobile: String,
    pub pincode: String,
    pub flat: String,
    pub street: String,
    pub cod: bool,
    pub city: String,
    pub state: String,
    pub landmark: Option<String>,
    pub address_type: AddressType,
}

impl From<&Address> for AddressSnapshot {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            name: a.name.clone(),
            mobile: a.mobile.clone(),
            pincode: a.pincode.clone(),
            flat: a.flat.clone(),
            street: a.street.clone(),
            cod: a.cod,
            city: a.city.clone(),
            state: a.state.clone(),
            landmark: a.landmark.clone(),
            address_type: a.address_type,
        }
    }
}
