//! Transport-independent request identity.

use std::collections::HashMap;

/// The slice of a request that key makers are allowed to see.
///
/// The transport layer resolves whatever identity material it has (peer
/// hostname, authenticated user, API key) into a context before calling the
/// limiter; the core never touches headers or sockets itself.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    hostname: Option<String>,
    attributes: HashMap<String, String>,
}

impl RequestContext {
    /// An empty context, carrying no identity at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context for a client with a resolved hostname.
    pub fn from_hostname(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            attributes: HashMap::new(),
        }
    }

    /// Attach a named attribute (user id, API key, route) for custom key
    /// makers to read.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The client's resolved hostname, if the transport provided one.
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Look up a named attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
