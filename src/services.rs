pub mod auth;
pub mod business_service;
pub mod dashboard_service;
pub mod messaging_service;
pub mod order_service;
pub mod post_service;
pub mod review_service;

#[cfg(test)]
pub(crate) mod test_support;
