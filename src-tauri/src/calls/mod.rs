pub mod classifier;
pub mod commands;
pub mod controller;
pub mod device_log;
pub mod initiator;
pub mod store;

pub use controller::CallLogController;
pub use initiator::ContactDetails;
