//! Authentication

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod throttle;
mod token;

pub use errors::*;
pub use models::*;
pub use password::{hash_password, verify_password};
pub use repository::*;
pub use service::*;
pub use throttle::LoginThrottle;
pub use token::*;
