use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::AddressService;
use crate::domain::address::{Address, AddressType, NewAddress};
use crate::domain::errors::DomainError;
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub user_id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub flat: String,
    #[serde(default)]
    pub street: String,
    /// Cash on delivery accepted at this address.
    #[serde(default)]
    pub cod: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub landmark: Option<String>,
    /// Home, Work or Other. Defaults to Home.
    pub address_type: Option<String>,
}

impl CreateAddressRequest {
    fn into_domain(self) -> Result<(i32, NewAddress), DomainError> {
        let user_id = self
            .user_id
            .ok_or_else(|| DomainError::validation("userId is required"))?;
        let address_type = match self.address_type.as_deref() {
            None | Some("") => AddressType::default(),
            Some(raw) => raw.parse()?,
        };
        Ok((
            user_id,
            NewAddress {
                name: self.name,
                mobile: self.mobile,
                pincode: self.pincode,
                flat: self.flat,
                street: self.street,
                cod: self.cod,
                city: self.city,
                state: self.state,
                landmark: self.landmark.filter(|l| !l.trim().is_empty()),
                address_type,
            },
        ))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
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

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            name: a.name,
            mobile: a.mobile,
            pincode: a.pincode,
            flat: a.flat,
            street: a.street,
            cod: a.cod,
            city: a.city,
            state: a.state,
            landmark: a.landmark,
            address_type: a.address_type,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAddressResponse {
    pub message: String,
    pub address: AddressResponse,
}

/// POST /users/addresses
#[utoipa::path(
    post,
    path = "/users/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address saved", body = CreateAddressResponse),
        (status = 400, description = "Missing userId or address fields"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "addresses"
)]
pub async fn create_address(
    svc: web::Data<AddressService>,
    body: web::Json<CreateAddressRequest>,
) -> Result<HttpResponse, AppError> {
    let (user_id, address) = body.into_inner().into_domain()?;

    let saved = web::block(move || svc.create_address(user_id, address)).await??;

    Ok(HttpResponse::Ok().json(CreateAddressResponse {
        message: "Address saved".to_string(),
        address: saved.into(),
    }))
}

/// GET /users/addresses/{user_id}
#[utoipa::path(
    get,
    path = "/users/addresses/{user_id}",
    params(
        ("user_id" = i32, Path, description = "Address owner"),
    ),
    responses(
        (status = 200, description = "Saved addresses of the user", body = Vec<AddressResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "addresses"
)]
pub async fn list_addresses(
    svc: web::Data<AddressService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let addresses = web::block(move || svc.list_addresses(user_id)).await??;

    let body: Vec<AddressResponse> = addresses.into_iter().map(AddressResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
