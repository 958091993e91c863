pub mod clicks;
pub mod frontend;
pub mod health;
pub mod helpers;
pub mod types;

pub use clicks::{ClickApi, api_routes};
pub use frontend::{FrontendService, frontend_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use types::{ClickRequest, ClickResponse, ErrorDetail, GroupClickResponse, RegisterUserRequest};
