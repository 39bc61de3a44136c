//! Table-driven route resolver.
//!
//! Routes are looked up by name (`@blog` and `blog` are the same route);
//! raw paths and absolute URLs pass through. Parameters other than those
//! consumed by the path become the query string.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::attributes::Options;
use crate::context::{RouteError, RouteResolver, UrlRequest, strip_query};

/// A fixed table of named routes.
#[derive(Debug, Clone)]
pub struct StaticRoutes {
    base_url: Url,
    routes: HashMap<String, String>,
}

#[derive(Deserialize)]
struct RoutesFile {
    base_url: String,
    #[serde(default)]
    routes: HashMap<String, String>,
}

impl StaticRoutes {
    /// Create an empty table serving URLs below `base_url`.
    pub fn new(base_url: &str) -> Result<Self, RouteError> {
        let base_url = Url::parse(base_url).map_err(|e| RouteError::InvalidUrl {
            url: base_url.to_string(),
            details: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            routes: HashMap::new(),
        })
    }

    /// Register a named route. Path segments written `:name` are filled
    /// from the route parameters.
    pub fn route(mut self, name: &str, path: &str) -> Self {
        self.routes
            .insert(name.trim_start_matches('@').to_string(), path.to_string());
        self
    }

    /// Parse a YAML route table:
    ///
    /// ```yaml
    /// base_url: http://localhost
    /// routes:
    ///   homepage: /
    ///   blog_post: /blog/:slug
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: RoutesFile = serde_yml::from_str(yaml).context("invalid route table")?;
        let mut table = Self::new(&file.base_url)?;
        table.routes = file
            .routes
            .into_iter()
            .map(|(name, path)| (name.trim_start_matches('@').to_string(), path))
            .collect();
        debug!(routes = table.routes.len(), "loaded route table");
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn expand(&self, route: &str, params: &Options) -> Result<String, RouteError> {
        // raw urls and paths are used as given
        if route.contains("://") || route.starts_with('/') {
            return Ok(append_query(route.to_string(), params.iter()));
        }

        let name = strip_query(route).trim_start_matches('@');
        let inline_query = route.split_once('?').map(|(_, query)| query);
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(route.to_string()))?;

        let mut used = Vec::new();
        let mut segments = Vec::new();
        for segment in pattern.split('/') {
            match segment.strip_prefix(':') {
                Some(param) => {
                    let value = params
                        .get(param)
                        .map(value_to_string)
                        .ok_or_else(|| RouteError::InvalidUrl {
                            url: pattern.clone(),
                            details: format!("missing parameter '{param}'"),
                        })?;
                    used.push(param);
                    segments.push(urlencoding::encode(&value).into_owned());
                }
                None => segments.push(segment.to_string()),
            }
        }

        let mut path = segments.join("/");
        if let Some(query) = inline_query.filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(query);
        }
        let rest = params.iter().filter(|(k, _)| !used.contains(k));
        Ok(append_query(path, rest))
    }
}

impl RouteResolver for StaticRoutes {
    fn resolve(&self, request: &UrlRequest<'_>) -> Result<String, RouteError> {
        let url = self.expand(request.route, request.params)?;
        if !request.absolute || url.contains("://") {
            return Ok(url);
        }

        self.base_url
            .join(&url)
            .map(String::from)
            .map_err(|e| RouteError::InvalidUrl {
                url,
                details: e.to_string(),
            })
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn append_query<'a>(mut url: String, params: impl Iterator<Item = (&'a str, &'a Value)>) -> String {
    let query: Vec<String> = params
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(&value_to_string(v))
            )
        })
        .collect();
    if !query.is_empty() {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query.join("&"));
    }
    url
}
