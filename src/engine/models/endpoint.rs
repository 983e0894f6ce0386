//! Endpoint descriptor model
//!
//! Static metadata describing one invokable HTTP operation. Descriptors are
//! supplied once when the engine is built and never change afterwards.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// HTTP method shown on the endpoint badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(anyhow::anyhow!("Unsupported HTTP method: '{other}'")),
        }
    }
}

/// A documented parameter. Display only: values are never validated or substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_hint: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: type_hint.into(),
        }
    }
}

/// Immutable description of one endpoint in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointDescriptor {
    pub id: String,
    pub method: HttpMethod,
    pub title: String,
    pub description: String,
    /// URL template, may contain `{placeholder}` tokens
    pub invocation_url: String,
    /// Concrete URL used for display and live invocation when present
    pub example_url: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Section heading the endpoint is listed under
    pub group: Option<String>,
    /// Extra usage notes, only shown when the entry is expanded
    pub notes: Option<String>,
}

impl EndpointDescriptor {
    /// Create a GET descriptor with no example URL, parameters, group or notes
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        invocation_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            method: HttpMethod::default(),
            title: title.into(),
            description: description.into(),
            invocation_url: invocation_url.into(),
            example_url: None,
            parameters: Vec::new(),
            group: None,
            notes: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_example_url(mut self, url: impl Into<String>) -> Self {
        self.example_url = Some(url.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_hint));
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The URL to show, copy and call: the example URL, else the invocation URL
    pub fn target_url(&self) -> &str {
        self.example_url.as_deref().unwrap_or(&self.invocation_url)
    }

    /// Names of the `{placeholder}` tokens in the invocation URL, in order
    pub fn placeholders(&self) -> Vec<&str> {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
        });
        re.captures_iter(&self.invocation_url)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}
