use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Cuisine, Restaurant, RestaurantStatus},
};

/// Body accepted by both create and update.
///
/// Update is a full replace: anything left out is written back as empty or
/// as its creation default, never merged with the stored row.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct RestaurantPayload {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub average_price: Option<f64>,
    pub rating: Option<f64>,
    pub status: Option<String>,
    pub image: Option<String>,
}

/// A payload that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantFields {
    pub name: String,
    pub cuisine: Cuisine,
    pub address: String,
    pub average_price: Option<f64>,
    pub rating: f64,
    pub status: RestaurantStatus,
    pub image: Option<String>,
}

impl RestaurantPayload {
    pub fn validate(self) -> AppResult<RestaurantFields> {
        let name = required(self.name);
        let cuisine = required(self.cuisine);
        let address = required(self.address);

        let (Some(name), Some(cuisine), Some(address)) = (name, cuisine, address) else {
            return Err(AppError::Validation(
                "Name, cuisine and address are required".into(),
            ));
        };

        let cuisine = cuisine
            .parse::<Cuisine>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let status = match required(self.status) {
            Some(status) => status
                .parse::<RestaurantStatus>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
            None => RestaurantStatus::default(),
        };

        let rating = self.rating.unwrap_or(0.0);
        if !rating.is_finite() {
            return Err(AppError::Validation("Rating must be a number".into()));
        }
        if self.average_price.is_some_and(|p| !p.is_finite()) {
            return Err(AppError::Validation("Average price must be a number".into()));
        }

        Ok(RestaurantFields {
            name,
            cuisine,
            address,
            average_price: self.average_price,
            rating,
            status,
            image: required(self.image),
        })
    }
}

/// Trimmed value, or `None` when absent or blank.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct RestaurantList {
    #[schema(value_type = Vec<Restaurant>)]
    pub items: Vec<Restaurant>,
}
