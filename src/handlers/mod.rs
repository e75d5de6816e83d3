pub mod add;
pub mod get;
pub mod health;

pub use add::add_customer_handler;
pub use get::{get_add_customer_handler, get_customer_handler};
pub use health::health_handler;
