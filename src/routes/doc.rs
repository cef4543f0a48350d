use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        chat::ChatRequest,
        favorites::FavoriteRestaurantList,
        restaurants::{RestaurantList, RestaurantPayload},
        scraping::{TriggerScrapingRequest, TriggerScrapingResponse},
    },
    models::{Cuisine, FavoriteRestaurant, Restaurant, RestaurantStatus, User},
    response::{Ack, ApiResponse, PageMeta},
    routes::{auth, chat, favorites, health, params, restaurants, scraping},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::index,
        auth::register,
        auth::login,
        auth::me,
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        restaurants::create_restaurant,
        restaurants::update_restaurant,
        restaurants::delete_restaurant,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::list_favorites,
        scraping::trigger,
        chat::chat
    ),
    components(
        schemas(
            User,
            Restaurant,
            FavoriteRestaurant,
            Cuisine,
            RestaurantStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            RestaurantPayload,
            RestaurantList,
            FavoriteRestaurantList,
            TriggerScrapingRequest,
            TriggerScrapingResponse,
            ChatRequest,
            params::RestaurantQuery,
            PageMeta,
            Ack,
            ApiResponse<User>,
            ApiResponse<Restaurant>,
            ApiResponse<RestaurantList>,
            ApiResponse<FavoriteRestaurantList>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Restaurants", description = "Restaurant records, writable by their owner only"),
        (name = "Favorites", description = "Per-user restaurant bookmarks"),
        (name = "Scraping", description = "Scraping workflow trigger"),
        (name = "Chat", description = "Chatbot relay"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
