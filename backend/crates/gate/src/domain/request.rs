//! Request Descriptor
//!
//! The per-request view the gate decides on.

use http::HeaderMap;

/// Per-request input to the gate
pub struct RequestDescriptor<'a, S: ?Sized> {
    /// Originating request path, deployment root included
    pub uri_path: &'a str,
    /// Deployment root the application is mounted under (`""` at the root)
    pub context_path: &'a str,
    pub headers: &'a HeaderMap,
    /// `None` when the caller has no session
    pub session: Option<&'a mut S>,
}

impl<'a, S: ?Sized> RequestDescriptor<'a, S> {
    pub fn new(
        uri_path: &'a str,
        context_path: &'a str,
        headers: &'a HeaderMap,
        session: Option<&'a mut S>,
    ) -> Self {
        Self {
            uri_path,
            context_path,
            headers,
            session,
        }
    }

    /// Request path with the deployment root removed
    ///
    /// A path outside the deployment root is returned unchanged.
    pub fn bare_path(&self) -> &'a str {
        self.uri_path
            .strip_prefix(self.context_path)
            .unwrap_or(self.uri_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Session;

    fn descriptor<'a>(uri: &'a str, ctx: &'a str, headers: &'a HeaderMap) -> RequestDescriptor<'a, Session> {
        RequestDescriptor::new(uri, ctx, headers, None)
    }

    #[test]
    fn test_bare_path_strips_context() {
        let headers = HeaderMap::new();
        assert_eq!(descriptor("/admin/index", "/admin", &headers).bare_path(), "/index");
        assert_eq!(descriptor("/admin", "/admin", &headers).bare_path(), "");
    }

    #[test]
    fn test_bare_path_at_root() {
        let headers = HeaderMap::new();
        assert_eq!(descriptor("/index", "", &headers).bare_path(), "/index");
    }

    #[test]
    fn test_bare_path_outside_context() {
        let headers = HeaderMap::new();
        assert_eq!(descriptor("/index", "/admin", &headers).bare_path(), "/index");
    }
}
