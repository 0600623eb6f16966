pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use model::AdminSession;
pub use routes::routes;
pub use services::SessionGate;
