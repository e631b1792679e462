//! File-based request loader.
//!
//! Reads a batch of gift requests from a `.toml` or `.json` file and turns
//! every entry into a validated [`GiftRequest`] through the domain builder.
//!
//! # File format
//!
//! ```toml
//! [[requests]]
//! recipient     = "Ada"
//! region        = "europe"       # north-pole | north-america | europe | ...
//! nice_score    = 95             # 0..=100
//! dispatch_date = "2026-12-01"   # optional, defaults to today
//!
//! [[requests.items]]
//! name          = "Train set"
//! category      = "toy"          # toy | book | game | clothing | electronics | sweets
//! cost_cents    = 4999
//! build_minutes = 90
//! ```
//!
//! JSON files use the same shape: `{ "requests": [ { ..., "items": [ ... ] } ] }`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use workshop_core::{
    application::ApplicationError,
    domain::{Category, DomainError, GiftRequest, LineItem, Money, Region, RequestId},
    error::WorkshopResult,
};

// ── File types ────────────────────────────────────────────────────────────────

/// Deserialised representation of a request file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    #[serde(default)]
    pub requests: Vec<RequestEntry>,
}

/// One `[[requests]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestEntry {
    /// Keeps a stable id across runs; generated when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub recipient: String,
    pub region: String,
    pub nice_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// One `[[requests.items]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    pub name: String,
    pub category: String,
    pub cost_cents: u64,
    pub build_minutes: u32,
}

impl RequestEntry {
    /// Convert through the domain builder.
    pub fn into_request(self) -> Result<GiftRequest, DomainError> {
        let region: Region = self.region.parse()?;
        let items = self
            .items
            .into_iter()
            .map(ItemEntry::into_line_item)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = GiftRequest::builder()
            .recipient(self.recipient)
            .region(region)
            .nice_score(self.nice_score)?
            .items(items);
        if let Some(id) = self.id {
            builder = builder.id(RequestId::from_uuid(id));
        }
        if let Some(date) = self.dispatch_date {
            builder = builder.dispatch_date(date);
        }
        builder.build()
    }
}

impl ItemEntry {
    fn into_line_item(self) -> Result<LineItem, DomainError> {
        let category: Category = self.category.parse()?;
        Ok(LineItem::new(
            self.name,
            category,
            Money::from_cents(self.cost_cents),
            self.build_minutes,
        ))
    }
}

// ── Format ────────────────────────────────────────────────────────────────────

/// Supported request file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Toml,
    Json,
}

impl RequestFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file extension (expected .toml or .json)")]
    UnsupportedFormat,

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file contains no requests")]
    Empty,

    #[error("request #{index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: DomainError,
    },
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Parse request file content in the given format.
pub fn parse_requests(content: &str, format: RequestFormat) -> WorkshopResult<Vec<GiftRequest>> {
    parse(content, format).map_err(|e| load_error(PathBuf::from("<inline>"), e))
}

/// Load every request from a file.
///
/// Fails on the first invalid entry; the error names the file and the
/// 1-based entry index.
#[instrument(fields(path = %path.as_ref().display()), skip_all)]
pub fn load_requests(path: impl AsRef<Path>) -> WorkshopResult<Vec<GiftRequest>> {
    let path = path.as_ref();
    let requests = read(path).map_err(|e| load_error(path.to_path_buf(), e))?;
    debug!(count = requests.len(), "Loaded requests");
    Ok(requests)
}

fn read(path: &Path) -> Result<Vec<GiftRequest>, LoadError> {
    let format = RequestFormat::from_path(path).ok_or(LoadError::UnsupportedFormat)?;
    let content = fs::read_to_string(path)?;
    parse(&content, format)
}

fn parse(content: &str, format: RequestFormat) -> Result<Vec<GiftRequest>, LoadError> {
    let file: RequestFile = match format {
        RequestFormat::Toml => toml::from_str(content)?,
        RequestFormat::Json => serde_json::from_str(content)?,
    };
    if file.requests.is_empty() {
        return Err(LoadError::Empty);
    }

    file.requests
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.into_request().map_err(|source| LoadError::Entry {
                index: i + 1,
                source,
            })
        })
        .collect()
}

fn load_error(path: PathBuf, error: LoadError) -> workshop_core::error::WorkshopError {
    ApplicationError::RequestLoad {
        path,
        reason: error.to_string(),
    }
    .into()
}
