mod dispatch_hub;
mod error;

pub use dispatch_hub::DispatchHub;
pub use error::HubError;
