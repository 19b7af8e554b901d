//! Translates a filter selection into the content API's `where[...]` query.

use crate::domain::model::{FilterKey, FilterSelection};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_DEPTH: u32 = 2;
pub const UNIVERSITY_LIMIT: u32 = 100;

pub type QueryParams = Vec<(String, String)>;

/// Provider field and operator for each filter.
pub fn where_clause(key: FilterKey) -> &'static str {
    match key {
        FilterKey::Location => "where[locations][contains]",
        FilterKey::Level => "where[level][equals]",
        FilterKey::Intake => "where[intakes][contains]",
        FilterKey::University => "where[relatedSchools.relatedUniversities.id][equals]",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseQuery {
    pub page_size: u32,
    pub depth: u32,
}

impl Default for CourseQuery {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl CourseQuery {
    pub fn new(page_size: u32, depth: u32) -> Self {
        Self { page_size, depth }
    }

    pub fn build(&self, filters: &FilterSelection, page: u32) -> QueryParams {
        let mut params: QueryParams = filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (where_clause(key).to_string(), value.to_string()))
            .collect();

        params.push(("depth".to_string(), self.depth.to_string()));
        params.push(("limit".to_string(), self.page_size.to_string()));
        params.push(("page".to_string(), page.max(1).to_string()));
        params
    }
}

pub fn build_course_query(filters: &FilterSelection, page: u32, page_size: u32) -> QueryParams {
    CourseQuery::new(page_size, DEFAULT_DEPTH).build(filters, page)
}

/// Id and name of every university, without relation expansion.
pub fn university_query(limit: u32) -> QueryParams {
    vec![
        ("depth".to_string(), "0".to_string()),
        ("select[name]".to_string(), "true".to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}

pub fn encode(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
