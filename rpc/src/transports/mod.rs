//! The wire between the [`BookServiceClient`](crate::client::BookServiceClient) and the library server.
//!
//! The client only knows how to encode requests and decode responses. Moving the bytes (gRPC-Web, HTTP/2, an
//! in-process channel...) is left to whatever meets the requirements of the [`Transport`] trait.
//!
use std::fmt;

use async_trait::async_trait;

use crate::{context::CallContext, status::Status};

pub mod memory;

/// A remote procedure, addressed by its fully qualified service name and its method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub service: String,
    pub name: &'static str,
}

impl Method {
    pub fn new(service: impl Into<String>, name: &'static str) -> Self {
        Self {
            service: service.into(),
            name,
        }
    }

    /// The gRPC path of the method: `/package.Service/Method`
    pub fn path(&self) -> String {
        format!("/{}/{}", self.service, self.name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.name)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its single response.
    ///
    /// The call has to be aborted with the corresponding [`Status`] as soon as `ctx` is done.
    async fn unary_call(
        &self,
        method: &Method,
        request: Vec<u8>,
        ctx: &CallContext,
    ) -> Result<Vec<u8>, Status>;

    /// Send one request and open the stream of responses.
    ///
    /// The returned stream is bound to `ctx` as well.
    async fn stream_call(
        &self,
        method: &Method,
        request: Vec<u8>,
        ctx: &CallContext,
    ) -> Result<Box<dyn TransportStream>, Status>;
}

/// Receiving half of a server-streaming call
#[async_trait]
pub trait TransportStream: Send {
    /// Wait for the next raw message.
    ///
    /// `Ok(None)` signals that the server finished the stream normally.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Status>;
}

#[cfg(test)]
mod tests {
    use super::Method;

    #[test]
    fn test_method_path() {
        let method = Method::new("library.BookService", "GetBook");
        assert_eq!(method.path(), "/library.BookService/GetBook");
        assert_eq!(method.to_string(), "library.BookService/GetBook");
    }
}
