pub mod auth;
pub mod cors;
pub mod response;

pub use auth::{bearer_token, BearerToken};
pub use cors::{cors_middleware, CorsPolicy};
pub use response::{ApiResponse, ApiResult};
