pub mod restaurants;
pub mod users;

pub use restaurants::Entity as Restaurants;
pub use users::Entity as Users;
