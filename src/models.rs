use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Cuisine {
    #[sea_orm(string_value = "moroccan")]
    Moroccan,
    #[sea_orm(string_value = "italian")]
    Italian,
    #[sea_orm(string_value = "asian")]
    Asian,
}

impl Cuisine {
    pub const ALL: [Cuisine; 3] = [Cuisine::Moroccan, Cuisine::Italian, Cuisine::Asian];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Moroccan => "moroccan",
            Cuisine::Italian => "italian",
            Cuisine::Asian => "asian",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    #[sea_orm(string_value = "partner")]
    Partner,
    #[default]
    #[sea_orm(string_value = "prospect")]
    Prospect,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl RestaurantStatus {
    pub const ALL: [RestaurantStatus; 3] = [
        RestaurantStatus::Partner,
        RestaurantStatus::Prospect,
        RestaurantStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantStatus::Partner => "partner",
            RestaurantStatus::Prospect => "prospect",
            RestaurantStatus::Inactive => "inactive",
        }
    }
}

/// Returned when a string is not one of an enum's accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub field: &'static str,
    pub allowed: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}. Choose from: {}", self.field, self.allowed)
    }
}

impl FromStr for Cuisine {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuisine::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                field: "cuisine",
                allowed: Cuisine::ALL.map(|c| c.as_str()).join(", "),
            })
    }
}

impl FromStr for RestaurantStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RestaurantStatus::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                field: "status",
                allowed: RestaurantStatus::ALL.map(|c| c.as_str()).join(", "),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Restaurant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub cuisine: Cuisine,
    pub address: String,
    pub average_price: Option<f64>,
    pub rating: f64,
    pub status: RestaurantStatus,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub favorited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScrapingStatus {
    Success,
    Failed,
}

impl ScrapingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapingStatus::Success => "success",
            ScrapingStatus::Failed => "failed",
        }
    }
}
