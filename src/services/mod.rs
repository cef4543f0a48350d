pub mod auth_service;
pub mod chat_service;
pub mod favorite_service;
pub mod restaurant_service;
pub mod scraping_service;
