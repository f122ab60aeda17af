pub mod exchange_objects;
pub mod exchange_rate_api;
pub mod order_flow_api;
pub mod user_api;
pub mod vendor_api;
