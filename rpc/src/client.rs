use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{stream, Stream};
use log::{debug, error};
use prost::{DecodeError, Message};

use crate::{
    config::ClientConfig,
    context::CallContext,
    proto::{Book, GetBookRequest, QueryBooksRequest},
    status::{Code, Status},
    transports::{Method, Transport, TransportStream},
};

pub const GET_BOOK: &str = "GetBook";
pub const QUERY_BOOKS: &str = "QueryBooks";

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The call failed below the client. The status is the one the transport returned.
    #[error(transparent)]
    Status(#[from] Status),
    /// The bytes received are not a valid message
    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    pub fn code(&self) -> Code {
        match self {
            Self::Status(status) => status.code(),
            Self::Decode(_) => Code::Internal,
        }
    }

    /// Text meant to be displayed to the end user as is
    pub fn message(&self) -> String {
        match self {
            Self::Status(status) => status.message().to_string(),
            Self::Decode(error) => error.to_string(),
        }
    }
}

/// The procedures exposed by the library `BookService`
#[async_trait]
pub trait BookService: Send + Sync {
    /// Get the book matching the ISBN provided. `NotFound` if the library doesn't have it.
    async fn get_book(&self, ctx: &CallContext, isbn: i64) -> ClientResult<Book>;

    /// Every book whose author starts with `author_prefix`, as a stream
    async fn query_books(&self, ctx: &CallContext, author_prefix: &str)
        -> ClientResult<BookStream>;
}

/// Client of the library `BookService`.
///
/// It holds no state per call, so one instance (or its clones) can be shared between tasks.
pub struct BookServiceClient<T: Transport + ?Sized> {
    transport: Arc<T>,
    config: ClientConfig,
}

impl<T: Transport + ?Sized> BookServiceClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: Arc<T>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn method(&self, name: &'static str) -> Method {
        Method::new(self.config.service_name.as_str(), name)
    }

    /// Get the book matching `isbn`.
    ///
    /// Transport errors are returned as they come, the call is never retried.
    pub async fn get_book(&self, ctx: &CallContext, isbn: i64) -> ClientResult<Book> {
        let method = self.method(GET_BOOK);
        // An expired context doesn't even reach the transport
        if let Some(status) = ctx.err() {
            debug!("> BookServiceClient > {method} > context already done: {status}");
            return Err(status.into());
        }

        let request = GetBookRequest::new(isbn).encode_to_vec();
        debug!("> BookServiceClient > {method} > isbn {isbn}");
        let response = self.transport.unary_call(&method, request, ctx).await?;

        Book::decode(response.as_slice()).map_err(|err| {
            error!("> BookServiceClient > {method} > invalid response: {err}");
            ClientError::Decode(err)
        })
    }

    /// Open the stream of the books whose author starts with `author_prefix`
    pub async fn query_books(
        &self,
        ctx: &CallContext,
        author_prefix: &str,
    ) -> ClientResult<BookStream> {
        let method = self.method(QUERY_BOOKS);
        if let Some(status) = ctx.err() {
            debug!("> BookServiceClient > {method} > context already done: {status}");
            return Err(status.into());
        }

        let request = QueryBooksRequest::new(author_prefix).encode_to_vec();
        debug!("> BookServiceClient > {method} > author prefix {author_prefix:?}");
        let stream = self.transport.stream_call(&method, request, ctx).await?;

        Ok(BookStream::new(stream))
    }
}

impl<T: Transport + ?Sized> Clone for BookServiceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
        }
    }
}

#[async_trait]
impl<T: Transport + ?Sized> BookService for BookServiceClient<T> {
    async fn get_book(&self, ctx: &CallContext, isbn: i64) -> ClientResult<Book> {
        BookServiceClient::get_book(self, ctx, isbn).await
    }

    async fn query_books(
        &self,
        ctx: &CallContext,
        author_prefix: &str,
    ) -> ClientResult<BookStream> {
        BookServiceClient::query_books(self, ctx, author_prefix).await
    }
}

/// How a [`BookStream`] ended
enum Terminal {
    End,
    Failed(ClientError),
}

/// Cursor over the books sent by the server for a `QueryBooks` call.
///
/// It can't be restarted: once the stream ended or failed, every [`recv`](#method.recv) returns the same outcome.
pub struct BookStream {
    inner: Box<dyn TransportStream>,
    terminal: Option<Terminal>,
}

impl BookStream {
    fn new(inner: Box<dyn TransportStream>) -> Self {
        Self {
            inner,
            terminal: None,
        }
    }

    /// Wait for the next book. `Ok(None)` when the server finished the stream.
    pub async fn recv(&mut self) -> ClientResult<Option<Book>> {
        match &self.terminal {
            Some(Terminal::End) => return Ok(None),
            Some(Terminal::Failed(err)) => return Err(err.clone()),
            None => {}
        }

        let result = match self.inner.recv().await {
            Ok(Some(payload)) => Book::decode(payload.as_slice())
                .map(Some)
                .map_err(ClientError::from),
            Ok(None) => Ok(None),
            Err(status) => Err(ClientError::from(status)),
        };

        match &result {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("> BookStream > end of stream");
                self.terminal = Some(Terminal::End);
            }
            Err(err) => {
                debug!("> BookStream > closed with error: {err}");
                self.terminal = Some(Terminal::Failed(err.clone()));
            }
        }

        result
    }

    pub fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }

    /// Turn the cursor into a [`Stream`]. It ends after the last book or right after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = ClientResult<Book>> + Send {
        stream::unfold(Some(self), |state| async move {
            let mut books = state?;
            match books.recv().await {
                Ok(Some(book)) => Some((Ok(book), Some(books))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}
