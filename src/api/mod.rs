//! API Module
//!
//! HTTP handlers and routing for the ATM locator.
//!
//! # Endpoints
//! - `GET /atms?lat=&lng=&radius=` - ATMs within `radius` miles of a point
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
