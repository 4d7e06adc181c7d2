//! URL query-string collaborator.
//!
//! The editor keeps the open query in a `queryId` URL parameter so a page can
//! be reloaded or shared. The core never owns routing; it asks a
//! [`Navigator`] to read, set or drop the parameter.

use std::fmt;

pub const QUERY_ID_PARAM: &str = "queryId";

pub trait Navigator {
    fn query_param(&self, key: &str) -> Option<String>;

    fn set_query_param(&mut self, key: &str, value: &str);

    fn remove_query_param(&mut self, key: &str);
}

/// In-memory URL: a path plus ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    path: String,
    params: Vec<(String, String)>,
}

impl UrlState {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Parses `path?key=value&flag`. No percent-decoding is applied.
    pub fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self {
            path: path.to_string(),
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Navigator for UrlState {
    fn query_param(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set_query_param(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    fn remove_query_param(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            if v.is_empty() {
                write!(f, "{}{}", sep, k)?;
            } else {
                write!(f, "{}{}={}", sep, k, v)?;
            }
        }
        Ok(())
    }
}
