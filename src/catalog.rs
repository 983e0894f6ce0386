//! # Endpoint Catalog
//!
//! Loads endpoint descriptors from an INI file. The unnamed section carries
//! catalog-wide settings; every named section is one endpoint:
//!
//! ```ini
//! title = Anime API
//! timeout_secs = 10
//!
//! [anime-details]
//! method = GET
//! group = Detailed Anime Information
//! title = Anime Details
//! description = Full details about one anime
//! url = https://api.jikan.moe/v4/anime/{animeId}/full
//! example_url = https://api.jikan.moe/v4/anime/1/full
//! param = animeId: number (MyAnimeList ID)
//! notes = Use ID 1 for Cowboy Bebop
//! ```

use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::config::HttpSettings;
use crate::engine::models::{EndpointDescriptor, HttpMethod, Parameter};

/// Endpoints listed under the same heading
pub type EndpointGroup<'a> = (Option<&'a str>, Vec<&'a EndpointDescriptor>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub title: Option<String>,
    pub description: Option<String>,
    pub timeout: Option<Duration>,
    pub endpoints: Vec<EndpointDescriptor>,
}

impl Catalog {
    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading catalog from '{}'", path.display());

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read catalog '{}'", path.display()))?;
        Self::from_ini(&ini)
    }

    /// Parse catalog text
    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str(text).context("Failed to parse catalog")?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let general = ini.section(None::<String>);
        let setting = |key: &str| general.and_then(|properties| properties.get(key));

        let timeout = setting("timeout_secs")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| anyhow::anyhow!("Invalid timeout_secs '{raw}': {e}"))
            })
            .transpose()?;

        let mut seen = HashSet::new();
        let mut endpoints = Vec::new();
        for (section, properties) in ini.iter() {
            let Some(id) = section else {
                continue;
            };
            if !seen.insert(id.to_string()) {
                return Err(anyhow::anyhow!("Duplicate endpoint section [{id}]"));
            }
            endpoints.push(parse_endpoint(id, properties)?);
        }

        tracing::info!("Catalog loaded with {} endpoints", endpoints.len());

        Ok(Self {
            title: non_empty(setting("title")),
            description: non_empty(setting("description")),
            timeout,
            endpoints,
        })
    }

    /// HTTP settings requested by the catalog
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: self.timeout,
        }
    }

    /// Endpoints grouped by heading, in order of first appearance
    pub fn groups(&self) -> Vec<EndpointGroup<'_>> {
        group_endpoints(&self.endpoints)
    }
}

/// Group descriptors by heading, in order of first appearance
pub fn group_endpoints(endpoints: &[EndpointDescriptor]) -> Vec<EndpointGroup<'_>> {
    let mut groups: Vec<EndpointGroup<'_>> = Vec::new();
    for endpoint in endpoints {
        let heading = endpoint.group.as_deref();
        match groups.iter_mut().find(|(name, _)| *name == heading) {
            Some((_, members)) => members.push(endpoint),
            None => groups.push((heading, vec![endpoint])),
        }
    }
    groups
}

fn parse_endpoint(id: &str, properties: &Properties) -> Result<EndpointDescriptor> {
    let url = non_empty(properties.get("url"))
        .ok_or_else(|| anyhow::anyhow!("Endpoint [{id}] has no url"))?;

    let method = match properties.get("method") {
        Some(raw) => raw
            .parse::<HttpMethod>()
            .with_context(|| format!("Endpoint [{id}] has an invalid method"))?,
        None => HttpMethod::default(),
    };

    let parameters = properties.get_all("param").map(parse_parameter).collect();

    Ok(EndpointDescriptor {
        id: id.to_string(),
        method,
        title: non_empty(properties.get("title")).unwrap_or_else(|| id.to_string()),
        description: properties.get("description").unwrap_or("").trim().to_string(),
        invocation_url: url,
        example_url: non_empty(properties.get("example_url")),
        parameters,
        group: non_empty(properties.get("group")),
        notes: non_empty(properties.get("notes")),
    })
}

/// `name: type hint`, the type hint may be omitted
fn parse_parameter(raw: &str) -> Parameter {
    match raw.split_once(':') {
        Some((name, type_hint)) => Parameter::new(name.trim(), type_hint.trim()),
        None => Parameter::new(raw.trim(), ""),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
