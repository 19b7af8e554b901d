use crate::domain::model::{CoursePage, FilterSelection, University};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the hosted course catalogue.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn fetch_courses(&self, filters: &FilterSelection, page: u32) -> Result<CoursePage>;
    async fn fetch_universities(&self) -> Result<Vec<University>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn page_size(&self) -> u32;
    fn depth(&self) -> u32;
    fn university_limit(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}
