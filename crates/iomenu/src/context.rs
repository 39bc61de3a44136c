//! Collaborators a menu consults while it is queried or rendered.
//!
//! The tree never reaches for global state: the route resolver, the current
//! user, the request URI and the label translator are all carried in an
//! explicit [`MenuContext`] owned by the tree.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::attributes::Options;
use crate::credentials::Credentials;

/// A request to turn a route into a URL.
#[derive(Debug, Clone, Copy)]
pub struct UrlRequest<'a> {
    /// Route name (`@blog`, `blog`) or raw URL (`/about`, `https://...`).
    pub route: &'a str,
    /// Route parameters. Never contains `absolute`.
    pub params: &'a Options,
    /// Whether an absolute URL (scheme and host) is wanted.
    pub absolute: bool,
}

/// Failure reported by a [`RouteResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route \"{0}\" does not exist")]
    UnknownRoute(String),

    #[error("invalid url \"{url}\": {details}")]
    InvalidUrl { url: String, details: String },
}

/// Resolves route identifiers to URLs.
pub trait RouteResolver {
    fn resolve(&self, request: &UrlRequest<'_>) -> Result<String, RouteError>;
}

/// The user a menu is rendered for.
pub trait SecurityUser {
    fn is_authenticated(&self) -> bool;

    fn has_credential(&self, credential: &str) -> bool;

    /// Preferred culture of the user, if known.
    fn culture(&self) -> Option<&str> {
        None
    }

    /// Evaluate a full credential requirement.
    fn has_credentials(&self, credentials: &Credentials) -> bool {
        credentials.is_satisfied_by(|c| self.has_credential(c))
    }
}

/// Translates labels for display.
pub trait LabelTranslator {
    fn translate(&self, label: &str, culture: &str) -> String;
}

/// Ambient collaborators of a menu tree.
#[derive(Clone, Default)]
pub struct MenuContext {
    routes: Option<Arc<dyn RouteResolver>>,
    user: Option<Arc<dyn SecurityUser>>,
    request_uri: Option<String>,
    translator: Option<Arc<dyn LabelTranslator>>,
}

impl MenuContext {
    /// A context with no collaborators: routes are used verbatim as URLs,
    /// every item is accessible and nothing is current.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(mut self, routes: impl RouteResolver + 'static) -> Self {
        self.routes = Some(Arc::new(routes));
        self
    }

    pub fn with_user(mut self, user: impl SecurityUser + 'static) -> Self {
        self.user = Some(Arc::new(user));
        self
    }

    /// Set the URI of the request being served. Any query string is dropped.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(strip_query(&uri.into()).to_string());
        self
    }

    pub fn with_translator(mut self, translator: impl LabelTranslator + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    pub fn routes(&self) -> Option<&dyn RouteResolver> {
        self.routes.as_deref()
    }

    pub fn user(&self) -> Option<&dyn SecurityUser> {
        self.user.as_deref()
    }

    pub fn request_uri(&self) -> Option<&str> {
        self.request_uri.as_deref()
    }

    pub fn translator(&self) -> Option<&dyn LabelTranslator> {
        self.translator.as_deref()
    }
}

impl fmt::Debug for MenuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuContext")
            .field("routes", &self.routes.is_some())
            .field("user", &self.user.is_some())
            .field("request_uri", &self.request_uri)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

/// Drop the `?query` part of a URI or route name.
pub fn strip_query(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(path, _)| path)
}
