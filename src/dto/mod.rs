pub mod auth;
pub mod chat;
pub mod favorites;
pub mod restaurants;
pub mod scraping;
