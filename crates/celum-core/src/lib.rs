pub mod client;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod http;
pub mod logging;
pub mod node;
pub mod operations;
pub mod params;
pub mod schema;
pub mod upload;

pub use context::{BinaryData, BinaryPayload, HostContext};
pub use error::{NodeError, Result};
pub use node::{describe, execute, NodeOutput};
