pub mod auth;
pub mod businesses;
pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod posts;
pub mod reviews;
