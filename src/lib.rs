// License Manager SDK - REST client for automatic license activation
// Library exports

pub mod client;
pub mod errors;
pub mod transport;

pub use client::{
    activate, activate_with_timeout, create_slave, create_slave_with_timeout, DEFAULT_TIMEOUT,
};
pub use errors::{Error, Result};
pub use transport::ensure_initialized;
