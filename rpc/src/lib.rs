pub mod client;
pub mod config;
pub mod context;
pub mod generator;
pub mod proto;
pub mod service_definition;
pub mod status;
pub mod transports;

pub use client::{BookService, BookServiceClient, BookStream, ClientError, ClientResult};
pub use config::ClientConfig;
pub use context::CallContext;
pub use status::{Code, Status};
