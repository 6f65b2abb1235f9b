pub mod auth;
pub mod business;
pub mod dashboard;
pub mod message;
pub mod order;
pub mod post;
pub mod review;
