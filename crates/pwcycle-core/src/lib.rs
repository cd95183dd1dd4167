pub mod config;
pub mod credentials;
pub mod cycler;
pub mod error;
pub mod policy;
pub mod poll;
pub mod session;

pub use error::{Error, Result};
