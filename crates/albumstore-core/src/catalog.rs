//! Static album catalog.
//!
//! Maps album titles to the blob store prefix holding their files and the price
//! charged at checkout. Built once from configuration and shared read-only.

use std::collections::BTreeMap;

const DEFAULT_CURRENCY: &str = "usd";

/// Catalog used when `ALBUM_CATALOG` is not set.
pub const DEFAULT_CATALOG: &str = "WE BOW=albums/WE BOW=3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub download_path: String,
    /// Price per copy in the currency's minor unit.
    pub unit_amount_cents: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl AlbumCatalog {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.title.clone(), e))
                .collect(),
        }
    }

    /// Parse `Title=path=cents[=currency]` entries separated by `;`.
    pub fn parse(spec: &str) -> Result<Self, anyhow::Error> {
        let mut entries = Vec::new();
        for raw in spec.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let parts: Vec<&str> = raw.split('=').map(str::trim).collect();
            let (title, path, cents, currency) = match parts.as_slice() {
                [title, path, cents] => (*title, *path, *cents, DEFAULT_CURRENCY),
                [title, path, cents, currency] => (*title, *path, *cents, *currency),
                _ => {
                    return Err(anyhow::anyhow!(
                        "Invalid catalog entry '{}': expected Title=path=cents[=currency]",
                        raw
                    ))
                }
            };
            if title.is_empty() || path.is_empty() {
                return Err(anyhow::anyhow!(
                    "Invalid catalog entry '{}': title and path must not be empty",
                    raw
                ));
            }
            let unit_amount_cents: i64 = cents.parse().map_err(|_| {
                anyhow::anyhow!("Invalid catalog entry '{}': price must be an integer", raw)
            })?;
            if unit_amount_cents <= 0 {
                return Err(anyhow::anyhow!(
                    "Invalid catalog entry '{}': price must be positive",
                    raw
                ));
            }
            entries.push(CatalogEntry {
                title: title.to_string(),
                download_path: path.to_string(),
                unit_amount_cents,
                currency: currency.to_lowercase(),
            });
        }
        if entries.is_empty() {
            return Err(anyhow::anyhow!("Album catalog must contain at least one album"));
        }
        Ok(Self::new(entries))
    }

    pub fn get(&self, title: &str) -> Option<&CatalogEntry> {
        self.entries.get(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}
