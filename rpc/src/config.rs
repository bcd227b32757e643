/// Default fully qualified name of the library service
pub const DEFAULT_SERVICE_NAME: &str = "library.BookService";

/// Settings of a [`BookServiceClient`](crate::client::BookServiceClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Fully qualified name of the service the procedures are called on
    pub service_name: String,
}

impl ClientConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}
