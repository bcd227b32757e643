//! MemoryTransport has no use case against a real library server, but it's great for testing purposes.
//!
//! It runs the procedures of a [`ServiceDefinition`] in the same process, behind the same [`Transport`] seam
//! a network transport would use. Requests and responses still go through the wire codec.
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::select;

use super::{Method, Transport, TransportStream};
use crate::{
    context::CallContext,
    generator::Generator,
    service_definition::{ProcedureDefinition, ServiceDefinition, StreamItem},
    status::Status,
};

/// Calls the procedures of a [`ServiceDefinition`] directly, honouring the [`CallContext`] of every call
#[derive(Clone)]
pub struct MemoryTransport {
    service: Arc<ServiceDefinition>,
}

impl MemoryTransport {
    pub fn new(service: ServiceDefinition) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    fn procedure(&self, method: &Method) -> Result<ProcedureDefinition, Status> {
        if method.service != self.service.name() {
            return Err(Status::unimplemented(format!(
                "unknown service {}",
                method.service
            )));
        }

        self.service
            .get_definition(method.name)
            .cloned()
            .ok_or_else(|| Status::unimplemented(format!("unknown method {}", method.name)))
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn unary_call(
        &self,
        method: &Method,
        request: Vec<u8>,
        ctx: &CallContext,
    ) -> Result<Vec<u8>, Status> {
        let handler = match self.procedure(method)? {
            ProcedureDefinition::Unary(handler) => handler,
            ProcedureDefinition::ServerStreams(_) => {
                return Err(Status::unimplemented(format!(
                    "{method} is not a unary procedure"
                )))
            }
        };

        debug!("> MemoryTransport > unary call {method}");
        ctx.guard(handler(request)).await
    }

    async fn stream_call(
        &self,
        method: &Method,
        request: Vec<u8>,
        ctx: &CallContext,
    ) -> Result<Box<dyn TransportStream>, Status> {
        let handler = match self.procedure(method)? {
            ProcedureDefinition::ServerStreams(handler) => handler,
            ProcedureDefinition::Unary(_) => {
                return Err(Status::unimplemented(format!(
                    "{method} is not a server streams procedure"
                )))
            }
        };

        debug!("> MemoryTransport > server streams call {method}");
        let generator = ctx.guard(handler(request)).await?;

        Ok(Box::new(MemoryStream {
            generator,
            ctx: ctx.clone(),
        }))
    }
}

/// Reads the items of a server streams procedure while its [`CallContext`] is alive
struct MemoryStream {
    generator: Generator<StreamItem>,
    ctx: CallContext,
}

#[async_trait]
impl TransportStream for MemoryStream {
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Status> {
        if let Some(status) = self.ctx.err() {
            self.generator.close();
            return Err(status);
        }

        select! {
            status = self.ctx.done() => {
                self.generator.close();
                Err(status)
            }
            item = self.generator.next() => item.transpose(),
        }
    }
}
