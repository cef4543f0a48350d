use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    dto::restaurants::{RestaurantList, RestaurantPayload},
    entity::{
        restaurants::{ActiveModel, Column, Entity as Restaurants, Model as RestaurantModel},
        users::{Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{Cuisine, Restaurant, RestaurantStatus},
    response::{Ack, ApiResponse, PageMeta},
    routes::params::RestaurantQuery,
    state::AppState,
};

pub async fn list_restaurants(
    state: &AppState,
    query: RestaurantQuery,
) -> AppResult<ApiResponse<RestaurantList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let condition = filter_condition(&query)?;

    let total = Restaurants::find()
        .filter(condition.clone())
        .count(&state.orm)
        .await? as i64;

    let items = Restaurants::find()
        .find_also_related(Users)
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(restaurant, creator)| restaurant_from_entity(restaurant, creator))
        .collect();

    let meta = PageMeta::new(page, limit, total);
    let data = RestaurantList { items };
    Ok(ApiResponse::success("Restaurants", data, Some(meta)))
}

pub async fn get_restaurant(state: &AppState, id: i64) -> AppResult<ApiResponse<Restaurant>> {
    let found = Restaurants::find_by_id(id)
        .find_also_related(Users)
        .one(&state.orm)
        .await?;
    let restaurant = match found {
        Some((restaurant, creator)) => restaurant_from_entity(restaurant, creator),
        None => return Err(AppError::not_found("Restaurant")),
    };
    Ok(ApiResponse::success("Restaurant", restaurant, None))
}

pub async fn create_restaurant(
    state: &AppState,
    user: &AuthUser,
    payload: RestaurantPayload,
) -> AppResult<ApiResponse<Restaurant>> {
    let fields = payload.validate()?;

    let active = ActiveModel {
        id: NotSet,
        user_id: Set(user.user_id),
        name: Set(fields.name),
        cuisine: Set(fields.cuisine),
        address: Set(fields.address),
        average_price: Set(fields.average_price),
        rating: Set(fields.rating),
        status: Set(fields.status),
        image: Set(fields.image),
        created_at: NotSet,
    };
    let restaurant = active.insert(&state.orm).await?;

    tracing::info!(
        restaurant_id = restaurant.id,
        user_id = user.user_id,
        "restaurant created"
    );

    Ok(ApiResponse::success(
        "Restaurant created",
        restaurant_from_entity(restaurant, None),
        None,
    ))
}

/// Full replace of every mutable field, owner only.
pub async fn update_restaurant(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: RestaurantPayload,
) -> AppResult<Ack> {
    let existing = find_owned(state, user, id).await?;
    let fields = payload.validate()?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.cuisine = Set(fields.cuisine);
    active.address = Set(fields.address);
    active.average_price = Set(fields.average_price);
    active.rating = Set(fields.rating);
    active.status = Set(fields.status);
    active.image = Set(fields.image);
    active.update(&state.orm).await?;

    tracing::info!(restaurant_id = id, user_id = user.user_id, "restaurant updated");
    Ok(Ack::new("Restaurant updated"))
}

pub async fn delete_restaurant(state: &AppState, user: &AuthUser, id: i64) -> AppResult<Ack> {
    find_owned(state, user, id).await?;

    let result = Restaurants::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Restaurant"));
    }

    tracing::info!(restaurant_id = id, user_id = user.user_id, "restaurant deleted");
    Ok(Ack::new("Restaurant deleted"))
}

/// Loads the record and applies the ownership rule before any write happens.
async fn find_owned(state: &AppState, user: &AuthUser, id: i64) -> AppResult<RestaurantModel> {
    let existing = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    if let Err(err) = ensure_owner(user, existing.user_id) {
        tracing::warn!(
            restaurant_id = id,
            owner_id = existing.user_id,
            user_id = user.user_id,
            "rejected write by non-owner"
        );
        return Err(err);
    }
    Ok(existing)
}

fn filter_condition(query: &RestaurantQuery) -> AppResult<Condition> {
    let mut condition = Condition::all();

    if let Some(search) = non_blank(&query.search) {
        let pattern = format!("%{}%", escape_like(search));
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Restaurants, Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((Restaurants, Column::Address)).ilike(pattern)),
        );
    }

    if let Some(cuisine) = non_blank(&query.cuisine) {
        let cuisine = cuisine
            .parse::<Cuisine>()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        condition = condition.add(Column::Cuisine.eq(cuisine));
    }

    if let Some(status) = non_blank(&query.status) {
        let status = status
            .parse::<RestaurantStatus>()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        condition = condition.add(Column::Status.eq(status));
    }

    Ok(condition)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn restaurant_from_entity(model: RestaurantModel, creator: Option<UserModel>) -> Restaurant {
    Restaurant {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        cuisine: model.cuisine,
        address: model.address,
        average_price: model.average_price,
        rating: model.rating,
        status: model.status,
        image: model.image,
        created_at: model.created_at.with_timezone(&Utc),
        creator_name: creator.map(|u| u.username),
    }
}
