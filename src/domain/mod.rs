//! Domain types and DTOs

pub mod auth;
pub mod community;
pub mod inquiries;
pub mod mechanics;
pub mod owners;
pub mod quote_requests;
pub mod reviews;
pub mod service_inquiries;
pub mod sync;
pub mod unified;
