use serde::Serialize;
use utoipa::ToSchema;

use crate::models::FavoriteRestaurant;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteRestaurantList {
    #[schema(value_type = Vec<FavoriteRestaurant>)]
    pub items: Vec<FavoriteRestaurant>,
}
