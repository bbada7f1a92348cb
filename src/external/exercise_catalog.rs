// ABOUTME: wger exercise catalog client used by the exercise search endpoint
// ABOUTME: Implements search, result shaping, TTL caching and retries for transient failures

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! wger Exercise Catalog Client
//!
//! Exercises referenced by workout templates come from the public wger
//! catalog. The client queries `exerciseinfo`, flattens each entry into an
//! [`ExerciseSummary`] and caches pages for a short TTL.
//!
//! # API Reference
//! wger REST API: <https://wger.de/api/v2/>

use crate::config::CatalogConfig;
use crate::constants::catalog::{
    DEFAULT_BROWSE_LIMIT, ENGLISH_LANGUAGE_ID, MAX_PAGE_SIZE, UNNAMED_EXERCISE,
};
use crate::errors::{AppError, AppResult};
use crate::models::{CatalogPage, ExerciseSummary};
use crate::utils::http_client::ResilientClient;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

const SERVICE_NAME: &str = "wger";

/// Searchable exercise catalog
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Search exercises by free-text term
    ///
    /// An empty or absent term browses the catalog.
    async fn search(&self, query: Option<&str>, limit: u32, offset: u32)
        -> AppResult<CatalogPage>;
}

/// wger API client configuration
#[derive(Debug, Clone)]
pub struct WgerClientConfig {
    /// Base URL for the wger API (default: <https://wger.de/api/v2>)
    pub base_url: String,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
}

impl From<&CatalogConfig> for WgerClientConfig {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            cache_ttl_secs: config.cache_ttl_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WgerPage {
    #[serde(default)]
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    #[serde(default)]
    results: Vec<WgerExerciseInfo>,
}

#[derive(Debug, Deserialize)]
struct WgerExerciseInfo {
    id: i64,
    uuid: Option<String>,
    category: Option<WgerNamed>,
    #[serde(default)]
    muscles: Vec<WgerMuscle>,
    #[serde(default)]
    muscles_secondary: Vec<WgerMuscle>,
    #[serde(default)]
    equipment: Vec<WgerNamed>,
    #[serde(default)]
    images: Vec<WgerImage>,
    #[serde(default)]
    translations: Vec<WgerTranslation>,
}

#[derive(Debug, Deserialize)]
struct WgerNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WgerMuscle {
    name: String,
    #[serde(default)]
    name_en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WgerImage {
    image: String,
    #[serde(default)]
    is_main: bool,
}

#[derive(Debug, Deserialize)]
struct WgerTranslation {
    language: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl WgerMuscle {
    fn display_name(&self) -> String {
        self.name_en
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
            .to_owned()
    }
}

impl From<WgerExerciseInfo> for ExerciseSummary {
    fn from(info: WgerExerciseInfo) -> Self {
        let english = info
            .translations
            .iter()
            .find(|t| t.language == ENGLISH_LANGUAGE_ID && !t.name.trim().is_empty());
        let name = english
            .or_else(|| info.translations.iter().find(|t| !t.name.trim().is_empty()))
            .map_or_else(|| UNNAMED_EXERCISE.to_owned(), |t| t.name.trim().to_owned());
        let description = english
            .and_then(|t| t.description.clone())
            .filter(|d| !d.trim().is_empty());
        let image_url = info
            .images
            .iter()
            .find(|image| image.is_main)
            .or_else(|| info.images.first())
            .map(|image| image.image.clone());

        Self {
            id: info.id,
            uuid: info.uuid,
            name,
            category: info.category.map(|c| c.name),
            primary_muscles: info.muscles.iter().map(WgerMuscle::display_name).collect(),
            secondary_muscles: info
                .muscles_secondary
                .iter()
                .map(WgerMuscle::display_name)
                .collect(),
            equipment: info.equipment.into_iter().map(|e| e.name).collect(),
            image_url,
            description,
        }
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

type SearchKey = (String, u32, u32);

/// wger catalog client
pub struct WgerClient {
    config: WgerClientConfig,
    http_client: ResilientClient,
    search_cache: Arc<RwLock<HashMap<SearchKey, CacheEntry<CatalogPage>>>>,
}

impl WgerClient {
    /// Create a new wger client
    #[must_use]
    pub fn new(config: WgerClientConfig, http_client: ResilientClient) -> Self {
        Self {
            config,
            http_client,
            search_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of cached pages, including expired ones not yet replaced
    pub async fn cached_pages(&self) -> usize {
        self.search_cache.read().await.len()
    }

    async fn fetch_page(&self, term: &str, limit: u32, offset: u32) -> AppResult<WgerPage> {
        let url = format!("{}/exerciseinfo/", self.config.base_url);
        let mut params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if !term.is_empty() {
            params.push(("search", term.to_owned()));
        }

        let response = self
            .http_client
            .send(|client| client.get(&url).query(&params))
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!(
                    "HTTP {status}: {}",
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}")))
    }
}

#[async_trait]
impl ExerciseCatalog for WgerClient {
    async fn search(
        &self,
        query: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> AppResult<CatalogPage> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(AppError::out_of_range(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let term = query.map(str::trim).unwrap_or_default().to_lowercase();
        let cache_key = (term.clone(), limit, offset);
        {
            let cache = self.search_cache.read().await;
            if let Some(entry) = cache.get(&cache_key) {
                if Instant::now() < entry.expires_at {
                    debug!("Catalog cache hit for '{term}'");
                    return Ok(entry.data.clone());
                }
            }
        }

        let page = self.fetch_page(&term, limit, offset).await?;
        let summaries = page.results.into_iter().map(ExerciseSummary::from);
        let results: Vec<ExerciseSummary> = if term.is_empty() {
            summaries.take(DEFAULT_BROWSE_LIMIT).collect()
        } else {
            summaries.filter(|exercise| exercise.matches(&term)).collect()
        };

        let shaped = CatalogPage {
            count: page.count,
            next: page.next,
            previous: page.previous,
            results,
        };

        {
            let mut cache = self.search_cache.write().await;
            let now = Instant::now();
            cache.retain(|_, entry| entry.expires_at > now);
            // TTLs past the clock's range are not cached
            if let Some(expires_at) =
                now.checked_add(Duration::from_secs(self.config.cache_ttl_secs))
            {
                cache.insert(
                    cache_key,
                    CacheEntry {
                        data: shaped.clone(),
                        expires_at,
                    },
                );
            }
        }

        Ok(shaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ExerciseSummary {
        let info: WgerExerciseInfo = serde_json::from_str(json).unwrap();
        ExerciseSummary::from(info)
    }

    #[test]
    fn test_english_translation_preferred() {
        let summary = parse(
            r#"{
                "id": 9,
                "uuid": "abc",
                "category": {"id": 8, "name": "Arms"},
                "muscles": [{"id": 1, "name": "Biceps brachii", "name_en": "Biceps"}],
                "muscles_secondary": [{"id": 2, "name": "Brachialis", "name_en": ""}],
                "equipment": [{"id": 1, "name": "Barbell"}],
                "images": [
                    {"id": 1, "image": "https://img/side.png", "is_main": false},
                    {"id": 2, "image": "https://img/main.png", "is_main": true}
                ],
                "translations": [
                    {"id": 10, "language": 4, "name": "Bizepscurls", "description": "de"},
                    {"id": 11, "language": 2, "name": "Biceps Curl", "description": "Curl it"}
                ]
            }"#,
        );
        assert_eq!(summary.name, "Biceps Curl");
        assert_eq!(summary.category.as_deref(), Some("Arms"));
        assert_eq!(summary.primary_muscles, vec!["Biceps"]);
        assert_eq!(summary.secondary_muscles, vec!["Brachialis"]);
        assert_eq!(summary.image_url.as_deref(), Some("https://img/main.png"));
        assert_eq!(summary.description.as_deref(), Some("Curl it"));
    }

    #[test]
    fn test_name_fallbacks() {
        let first = parse(
            r#"{"id": 1, "translations": [{"id": 1, "language": 4, "name": "Kniebeuge"}]}"#,
        );
        assert_eq!(first.name, "Kniebeuge");
        assert_eq!(first.description, None);

        let unnamed = parse(r#"{"id": 2, "translations": []}"#);
        assert_eq!(unnamed.name, UNNAMED_EXERCISE);
        assert!(unnamed.image_url.is_none());
    }
}
