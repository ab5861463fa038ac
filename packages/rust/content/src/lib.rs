//! Portfolio content for the Tokyon site.
//!
//! Case studies come from the Sanity CMS when one is configured. Any CMS
//! failure, or an empty answer, falls back to the cases bundled with the
//! binary so a service page never renders empty because the CMS is down.

mod portfolio;

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokyon_shared::{ContentConfig, Result, TokyonError};
use tracing::{debug, instrument, warn};
use url::Url;

pub use portfolio::{CaseStudy, Language, find_case, local_portfolio};

/// User-Agent string for outbound calls.
const USER_AGENT: &str = concat!("Tokyon/", env!("CARGO_PKG_VERSION"));

/// Cases that list the service and match the language.
const PORTFOLIO_QUERY: &str = r#"*[_type == "portfolioItem" && $serviceId in serviceIds && language == $language]{
  "slug": slug.current,
  serviceIds,
  client,
  project,
  description,
  "imageUrl": image.asset->url,
  imageColor
}"#;

/// Background used when a CMS case has neither image nor color.
const DEFAULT_IMAGE_COLOR: &str = "bg-gray-900";

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Vec<CmsCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CmsCase {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    service_ids: Option<Vec<String>>,
    client: String,
    project: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_color: Option<String>,
}

impl CmsCase {
    fn into_case(self, service_id: &str, language: Language) -> CaseStudy {
        let image_color = match (self.image_url, self.image_color) {
            (Some(url), _) => format!("url({url})"),
            (None, Some(color)) => color,
            (None, None) => DEFAULT_IMAGE_COLOR.to_string(),
        };
        CaseStudy {
            slug: self.slug.unwrap_or_default(),
            service_ids: self
                .service_ids
                .unwrap_or_else(|| vec![service_id.to_string()]),
            language,
            client: self.client,
            project: self.project,
            description: self.description.unwrap_or_default(),
            image_color,
            hero_image: None,
            challenge: None,
            solution: None,
            gallery: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct CmsSource {
    http: Client,
    /// `{endpoint}/{api_version}/data/query/{dataset}`
    query_url: Url,
}

/// Serves case studies for the site.
#[derive(Debug, Clone)]
pub struct ContentService {
    cms: Option<CmsSource>,
}

impl ContentService {
    /// Serve the bundled cases only.
    pub fn local() -> Self {
        Self { cms: None }
    }

    /// Query `endpoint` first, falling back to the bundled cases.
    pub fn with_cms(
        endpoint: &Url,
        api_version: &str,
        dataset: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TokyonError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            cms: Some(CmsSource {
                http,
                query_url: query_url(endpoint, api_version, dataset)?,
            }),
        })
    }

    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        match config.cms_endpoint()? {
            Some(endpoint) => Self::with_cms(
                &endpoint,
                &config.api_version,
                &config.dataset,
                Duration::from_secs(config.timeout_secs),
            ),
            None => {
                debug!("no content project configured, serving bundled portfolio");
                Ok(Self::local())
            }
        }
    }

    pub fn has_cms(&self) -> bool {
        self.cms.is_some()
    }

    /// Case studies for a service page.
    #[instrument(skip(self))]
    pub async fn portfolio_for_service(
        &self,
        service_id: &str,
        language: Language,
    ) -> Vec<CaseStudy> {
        if let Some(cms) = &self.cms {
            match cms.query(service_id, language).await {
                Ok(cases) if !cases.is_empty() => return cases,
                Ok(_) => debug!("CMS has no cases for this service, using bundled portfolio"),
                Err(e) => warn!(error = %e, "CMS query failed, using bundled portfolio"),
            }
        }
        local_portfolio(Some(service_id), language)
    }
}

impl CmsSource {
    async fn query(&self, service_id: &str, language: Language) -> Result<Vec<CaseStudy>> {
        let url = &self.query_url;
        // Query parameters are GROQ values, so strings go in JSON-quoted.
        let service_param = serde_json::to_string(service_id)
            .map_err(|e| TokyonError::parse(format!("service id: {e}")))?;
        let language_param = format!("\"{}\"", language.as_str());

        let response = self
            .http
            .get(url.clone())
            .query(&[
                ("query", PORTFOLIO_QUERY),
                ("$serviceId", service_param.as_str()),
                ("$language", language_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokyonError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokyonError::Network(format!("{url}: HTTP {status}")));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| TokyonError::parse(format!("{url}: unexpected query response: {e}")))?;

        debug!(count = body.result.len(), "CMS returned cases");
        Ok(body
            .result
            .into_iter()
            .map(|case| case.into_case(service_id, language))
            .collect())
    }
}

fn query_url(endpoint: &Url, api_version: &str, dataset: &str) -> Result<Url> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("{api_version}/data/query/{dataset}"))
        .map_err(|e| TokyonError::config(format!("invalid content endpoint: {e}")))
}
