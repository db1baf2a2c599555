//! API routes and handlers

pub mod health;
mod router;
pub mod split;

pub use router::create_router;
