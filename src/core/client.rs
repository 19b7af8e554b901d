use crate::core::query::{university_query, CourseQuery};
use crate::domain::model::{CoursePage, FilterSelection, University, UniversityList};
use crate::domain::ports::{ConfigProvider, CourseCatalog};
use crate::utils::error::{FinderError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the hosted content API.
pub struct CmsClient {
    client: Client,
    base_url: String,
    query: CourseQuery,
    university_limit: u32,
}

impl CmsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query: CourseQuery::default(),
            university_limit: crate::core::query::UNIVERSITY_LIMIT,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base().trim_end_matches('/').to_string(),
            query: CourseQuery::new(config.page_size(), config.depth()),
            university_limit: config.university_limit(),
        })
    }

    pub fn page_size(&self) -> u32 {
        self.query.page_size
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        collection: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, collection);
        tracing::debug!("GET {} with {} params", url, params.len());

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(FinderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl CourseCatalog for CmsClient {
    async fn fetch_courses(&self, filters: &FilterSelection, page: u32) -> Result<CoursePage> {
        let params = self.query.build(filters, page);
        let page: CoursePage = self.get_json("courses", &params).await?;
        tracing::info!(
            "Fetched page {}/{} ({} courses in total)",
            page.page,
            page.total_pages,
            page.total_docs
        );
        Ok(page)
    }

    async fn fetch_universities(&self) -> Result<Vec<University>> {
        let list: UniversityList = self
            .get_json("universities", &university_query(self.university_limit))
            .await?;
        tracing::debug!("Fetched {} universities", list.docs.len());
        Ok(list.docs)
    }
}
