//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;

use crate::method::Method;

/// An incoming HTTP request, fully buffered.
///
/// The server builds one per hyper request after collecting the body. Tests
/// and middleware can build one directly with [`Request::new`].
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// A bodiless request for `target`, which may carry a `?query` suffix.
    ///
    /// ```rust
    /// use flightfinder_api::{Method, Request};
    ///
    /// let req = Request::new(Method::Get, "/api/airports?page=2")
    ///     .with_header("accept-encoding", "gzip");
    /// assert_eq!(req.path(), "/api/airports");
    /// assert_eq!(req.query(), Some("page=2"));
    /// ```
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };
        Self {
            method,
            path,
            query,
            headers: Vec::new(),
            body: Bytes::new(),
            params: HashMap::new(),
        }
    }

    pub(crate) fn from_parts(
        method: Method,
        path: String,
        query: Option<String>,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self { method, path, query, headers, body, params: HashMap::new() }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a repeated header, in arrival order.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/airports/{code}`, `req.param("code")` on `/airports/LHR`
    /// returns `Some("LHR")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Get, "/").with_header("Accept-Encoding", "gzip");
        assert_eq!(req.header("accept-encoding"), Some("gzip"));
        assert_eq!(req.header("origin"), None);
    }

    #[test]
    fn repeated_headers_keep_their_order() {
        let req = Request::new(Method::Get, "/")
            .with_header("Accept-Encoding", "br")
            .with_header("origin", "https://a.example")
            .with_header("accept-encoding", "gzip;q=0.5");
        assert_eq!(req.header_all("accept-encoding").collect::<Vec<_>>(), ["br", "gzip;q=0.5"]);
        assert_eq!(req.header_all("vary").count(), 0);
    }

    #[test]
    fn target_without_query() {
        let req = Request::new(Method::Get, "/api/airports");
        assert_eq!(req.path(), "/api/airports");
        assert_eq!(req.query(), None);
        assert!(req.body().is_empty());
    }
}
