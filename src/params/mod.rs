//! Request parameters and endpoint descriptors.
//!
//! Every endpoint is an [`Endpoint`] value (method, path template, accepted
//! query names, pagination token name, client-side default selections). A
//! call is that descriptor plus a [`RequestParams`]; [`Endpoint::build`] turns
//! the pair into a concrete request, rejecting names the endpoint does not
//! accept.

pub mod endpoints;

use std::collections::BTreeMap;

use reqwest::Method;

use crate::error::{Result, TwitterError};

pub use endpoints::Endpoint;

/// Selector value (`expansions`, `tweet.fields`, ...).
///
/// `Default` applies the endpoint's client-side default when it has one and
/// sends nothing otherwise; `Omit` never sends the parameter, leaving the
/// choice to the server; `Custom` is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    #[default]
    Default,
    Omit,
    Custom(String),
}

impl FieldSelection {
    pub fn custom(value: impl Into<String>) -> Self {
        Self::Custom(value.into())
    }

    fn resolve(&self, default: Option<&str>) -> Option<String> {
        match self {
            Self::Default => default.map(str::to_string),
            Self::Omit => None,
            Self::Custom(v) => Some(v.clone()),
        }
    }
}

impl From<&str> for FieldSelection {
    fn from(value: &str) -> Self {
        Self::Custom(value.to_string())
    }
}

impl From<String> for FieldSelection {
    fn from(value: String) -> Self {
        Self::Custom(value)
    }
}

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Named optional fields of one call.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    path: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    selections: BTreeMap<String, FieldSelection>,
    body: Option<serde_json::Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a `{name}` placeholder in the path.
    pub fn path(mut self, name: &str, value: impl ToString) -> Self {
        self.path.insert(name.to_string(), value.to_string());
        self
    }

    /// Query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    /// Query parameter, skipped when `None`.
    pub fn opt_param<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// Comma-joined list parameter (`ids`, `usernames`, `user_ids`).
    pub fn list<I, V>(self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.param(name, joined)
    }

    /// Field selector or `expansions`.
    pub fn fields(mut self, name: &str, selection: impl Into<FieldSelection>) -> Self {
        self.selections.insert(name.to_string(), selection.into());
        self
    }

    pub fn expansions(self, selection: impl Into<FieldSelection>) -> Self {
        self.fields("expansions", selection)
    }

    pub fn max_results(self, max_results: u32) -> Self {
        self.param("max_results", max_results)
    }

    /// JSON body for write endpoints.
    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Concrete request produced by [`Endpoint::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Endpoint {
    /// Resolve the path, query and body for one call.
    pub fn build(
        &self,
        base_url: &str,
        params: &RequestParams,
        token: Option<&str>,
    ) -> Result<BuiltRequest> {
        let url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.render_path(&params.path)?
        );

        let mut query = Vec::new();
        for (name, value) in &params.query {
            if Some(name.as_str()) == self.token_param {
                return Err(TwitterError::InvalidParameter(format!(
                    "{}: pass '{name}' as the pagination token, not as a parameter",
                    self.name
                )));
            }
            if !self.accepts(name) {
                return Err(self.unknown(name));
            }
            query.push((name.clone(), value.clone()));
        }

        for name in params.selections.keys() {
            if !self.accepts(name) {
                return Err(self.unknown(name));
            }
        }
        for name in self.query.iter().filter(|n| is_selector(n)) {
            let default = self
                .defaults
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| *v);
            let selection = params.selections.get(*name).cloned().unwrap_or_default();
            if let Some(value) = selection.resolve(default) {
                query.push((name.to_string(), value));
            }
        }

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let name = self.token_param.ok_or_else(|| {
                TwitterError::InvalidParameter(format!("{} is not paginated", self.name))
            })?;
            query.push((name.to_string(), token.to_string()));
        }

        Ok(BuiltRequest {
            method: self.method.into(),
            url,
            query,
            body: params.body.clone(),
        })
    }

    fn accepts(&self, name: &str) -> bool {
        self.query.iter().any(|q| *q == name)
    }

    fn unknown(&self, name: &str) -> TwitterError {
        TwitterError::InvalidParameter(format!("{} does not accept '{name}'", self.name))
    }

    fn render_path(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let mut out = String::with_capacity(self.path.len());
        let mut used = 0;
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let end = rest[start..].find('}').map(|i| start + i).ok_or_else(|| {
                TwitterError::ConfigurationError(format!("malformed path template {}", self.path))
            })?;
            let name = &rest[start + 1..end];
            let value = values.get(name).ok_or_else(|| {
                TwitterError::InvalidParameter(format!(
                    "{}: missing path parameter '{name}'",
                    self.name
                ))
            })?;
            if value.is_empty() {
                return Err(TwitterError::InvalidParameter(format!(
                    "{}: path parameter '{name}' is empty",
                    self.name
                )));
            }
            out.push_str(&urlencoding::encode(value));
            used += 1;
            rest = &rest[end + 1..];
        }
        out.push_str(rest);

        if used != values.len() {
            let unexpected = values
                .keys()
                .find(|k| !self.path.contains(&format!("{{{k}}}")))
                .cloned()
                .unwrap_or_default();
            return Err(TwitterError::InvalidParameter(format!(
                "{}: unexpected path parameter '{unexpected}'",
                self.name
            )));
        }
        Ok(out)
    }
}

fn is_selector(name: &str) -> bool {
    name == "expansions" || name.ends_with(".fields")
}
