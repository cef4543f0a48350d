use chrono::{DateTime, Utc};

use crate::{
    db::DbPool,
    dto::favorites::FavoriteRestaurantList,
    error::{AppError, AppResult, is_foreign_key_violation, is_unique_violation},
    middleware::auth::AuthUser,
    models::{Cuisine, FavoriteRestaurant, Restaurant, RestaurantStatus},
    response::{Ack, ApiResponse},
};

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: i64,
    name: String,
    cuisine: String,
    address: String,
    average_price: Option<f64>,
    rating: f64,
    status: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    creator_name: String,
    favorited_at: DateTime<Utc>,
}

impl TryFrom<FavoriteRow> for FavoriteRestaurant {
    type Error = AppError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let cuisine = row
            .cuisine
            .parse::<Cuisine>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("stored {e}")))?;
        let status = row
            .status
            .parse::<RestaurantStatus>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("stored {e}")))?;
        Ok(FavoriteRestaurant {
            restaurant: Restaurant {
                id: row.id,
                user_id: row.user_id,
                name: row.name,
                cuisine,
                address: row.address,
                average_price: row.average_price,
                rating: row.rating,
                status,
                image: row.image,
                created_at: row.created_at,
                creator_name: Some(row.creator_name),
            },
            favorited_at: row.favorited_at,
        })
    }
}

pub async fn list_favorites(
    db: &DbPool,
    user: &AuthUser,
) -> AppResult<ApiResponse<FavoriteRestaurantList>> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        r#"
        SELECT r.id, r.user_id, r.name, r.cuisine, r.address, r.average_price,
               r.rating, r.status, r.image, r.created_at,
               u.username AS creator_name, f.created_at AS favorited_at
        FROM favorites f
        JOIN restaurants r ON r.id = f.restaurant_id
        JOIN users u ON u.id = r.user_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC, f.restaurant_id DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(db)
    .await?;

    let items = rows
        .into_iter()
        .map(FavoriteRestaurant::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Favorites",
        FavoriteRestaurantList { items },
        None,
    ))
}

pub async fn add_favorite(pool: &DbPool, user: &AuthUser, restaurant_id: i64) -> AppResult<Ack> {
    let restaurant_exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM restaurants WHERE id = $1")
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await?;

    if restaurant_exists.is_none() {
        return Err(AppError::not_found("Restaurant"));
    }

    // No pre-check for an existing pair: the primary key rejects duplicates.
    sqlx::query("INSERT INTO favorites (user_id, restaurant_id) VALUES ($1, $2)")
        .bind(user.user_id)
        .bind(restaurant_id)
        .execute(pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("This restaurant is already in your favorites".into())
            } else if is_foreign_key_violation(&err) {
                // restaurant deleted between the existence check and the insert
                AppError::not_found("Restaurant")
            } else {
                AppError::DbError(err)
            }
        })?;

    tracing::debug!(restaurant_id, user_id = user.user_id, "favorite added");
    Ok(Ack::new("Restaurant added to favorites"))
}

pub async fn remove_favorite(
    pool: &DbPool,
    user: &AuthUser,
    restaurant_id: i64,
) -> AppResult<Ack> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND restaurant_id = $2")
        .bind(user.user_id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "This restaurant is not in your favorites".into(),
        ));
    }

    tracing::debug!(restaurant_id, user_id = user.user_id, "favorite removed");
    Ok(Ack::new("Restaurant removed from favorites"))
}
