// Authentication: token to identity resolution, roles, credentials

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::*;
pub use middleware::*;
pub use models::*;
pub use password::*;
pub use service::*;
