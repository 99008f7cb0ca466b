pub use http::Method;

/// The parts of an outgoing HTTP request that get signed.
#[derive(Debug, Clone, Copy)]
pub struct RequestDescriptor<'a> {
    method: &'a Method,
    target_uri: &'a str,
    body: Option<&'a [u8]>,
}

impl<'a> RequestDescriptor<'a> {
    /// `target_uri` is signed exactly as given and must be the same
    /// string the transport sends the request to.
    pub fn new(method: &'a Method, target_uri: &'a str, body: Option<&'a [u8]>) -> Self {
        Self {
            method,
            target_uri,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        self.method
    }

    pub fn target_uri(&self) -> &str {
        self.target_uri
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body
    }

    pub fn body_len(&self) -> usize {
        self.body.map_or(0, <[u8]>::len)
    }
}
