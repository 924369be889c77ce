pub mod donation_status;
pub mod order_status;
