//! Procedures served in-process by a [`MemoryTransport`](crate::transports::memory::MemoryTransport).
//!
//! Handlers work on raw bytes, exactly like a remote server would: they receive the encoded request and
//! answer with the encoded response (or a stream of them).
//!
use crate::{generator::Generator, status::Status};
use core::future::Future;
use std::{collections::HashMap, pin::Pin, sync::Arc};

/// General type returned by every procedure
pub type Response<T> = Pin<Box<dyn Future<Output = Result<T, Status>> + Send>>;

/// Payload for every procedure: the encoded request
pub type CommonPayload = Vec<u8>;

/// Response type returned by a unary procedure
pub type UnaryResponse = Response<Vec<u8>>;

/// Handler type for a unary procedure.
pub type UnaryRequestHandler = dyn Fn(CommonPayload) -> UnaryResponse + Send + Sync;

/// An item of a server stream. An `Err` ends the stream with that status.
pub type StreamItem = Result<Vec<u8>, Status>;

/// Response type returned by a server streams procedure
pub type ServerStreamsResponse = Response<Generator<StreamItem>>;

/// Handler type for a server streams procedure
pub type ServerStreamsRequestHandler = dyn Fn(CommonPayload) -> ServerStreamsResponse + Send + Sync;

/// Type used for storing procedure definitions
pub enum ProcedureDefinition {
    /// Basic request<>response
    Unary(Arc<UnaryRequestHandler>),
    /// One request, then the server sends all the data that it has and closes the stream
    ServerStreams(Arc<ServerStreamsRequestHandler>),
}

impl Clone for ProcedureDefinition {
    fn clone(&self) -> Self {
        match self {
            Self::Unary(procedure) => Self::Unary(procedure.clone()),
            Self::ServerStreams(procedure) => Self::ServerStreams(procedure.clone()),
        }
    }
}

/// It stores all procedures defined for a service
pub struct ServiceDefinition {
    /// Fully qualified name of the service, e.g. `library.BookService`
    name: String,
    /// the key is the procedure's name and the value is the handler for the procedure
    procedure_definitions: HashMap<String, ProcedureDefinition>,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            procedure_definitions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an unary procedure handler to the service definition
    pub fn add_unary<H: Fn(CommonPayload) -> UnaryResponse + Send + Sync + 'static>(
        &mut self,
        name: &str,
        handler: H,
    ) {
        self.add_definition(name, ProcedureDefinition::Unary(Arc::new(handler)));
    }

    /// Add a server streams procedure handler to the service definition
    pub fn add_server_streams<
        H: Fn(CommonPayload) -> ServerStreamsResponse + Send + Sync + 'static,
    >(
        &mut self,
        name: &str,
        handler: H,
    ) {
        self.add_definition(name, ProcedureDefinition::ServerStreams(Arc::new(handler)));
    }

    fn add_definition(&mut self, name: &str, definition: ProcedureDefinition) {
        self.procedure_definitions
            .insert(name.to_string(), definition);
    }

    pub fn get_definition(&self, name: &str) -> Option<&ProcedureDefinition> {
        self.procedure_definitions.get(name)
    }
}
