//! Course listing driven entirely by its URL query string.

use crate::core::pagination::{self, PageLink};
use crate::core::wizard::LISTING_PATH;
use crate::domain::labels::{self, ALL_OPTION};
use crate::domain::model::{Course, CoursePage, FilterKey, FilterSelection, University};
use crate::domain::ports::CourseCatalog;
use crate::utils::error::Result;
use crate::utils::format::{format_currency, format_number};
use serde::Serialize;
use url::Url;

pub const APPLY_PATH: &str = "/apply";

#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    Loaded(CoursePage),
}

#[derive(Debug, Clone)]
pub struct ListingView {
    params: Vec<(String, String)>,
    filters: FilterSelection,
    page: u32,
    state: ListingState,
    universities: Vec<University>,
}

fn parse_query(url: &str) -> Result<Vec<(String, String)>> {
    let base = Url::parse("http://localhost/")?;
    let parsed = base.join(url)?;
    Ok(parsed.query_pairs().into_owned().collect())
}

fn last_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn compose_url(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return LISTING_PATH.to_string();
    }
    format!("{}?{}", LISTING_PATH, crate::core::query::encode(params))
}

impl ListingView {
    /// Builds the view from a listing URL such as `/courses?level=degree&page=2`.
    pub fn from_url(url: &str) -> Result<Self> {
        let mut view = Self {
            params: Vec::new(),
            filters: FilterSelection::default(),
            page: 1,
            state: ListingState::Loading,
            universities: Vec::new(),
        };
        view.navigate(url)?;
        Ok(view)
    }

    /// Replaces the view's URL and re-derives filters and page from it.
    pub fn navigate(&mut self, url: &str) -> Result<()> {
        let params = parse_query(url)?;

        let mut filters = FilterSelection::default();
        for key in FilterKey::ALL {
            filters.set(key, last_param(&params, key.param()));
        }

        self.page = last_param(&params, "page")
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        self.filters = filters;
        self.params = params;
        tracing::debug!("Listing URL is now {}", self.url());
        Ok(())
    }

    pub fn url(&self) -> String {
        compose_url(&self.params)
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn loaded_page(&self) -> Option<&CoursePage> {
        match &self.state {
            ListingState::Loaded(page) => Some(page),
            ListingState::Loading => None,
        }
    }

    /// Sets or clears (blank or [`ALL_OPTION`]) one filter. The URL keeps only
    /// non-empty filters and goes back to page 1.
    pub fn update_filter(&mut self, key: FilterKey, value: &str) -> Result<String> {
        let mut filters = self.filters.clone();
        let value = if value == ALL_OPTION { "" } else { value };
        filters.set(key, Some(value));

        let mut params: Vec<(String, String)> = filters
            .iter()
            .map(|(k, v)| (k.param().to_string(), v.to_string()))
            .collect();
        params.push(("page".to_string(), "1".to_string()));

        let url = compose_url(&params);
        self.navigate(&url)?;
        Ok(url)
    }

    /// Rewrites only the `page` parameter.
    pub fn change_page(&mut self, page: u32) -> Result<String> {
        let mut params = self.params.clone();
        let value = page.to_string();
        match params.iter().position(|(k, _)| k == "page") {
            Some(first) => {
                params[first].1 = value;
                let mut index = 0;
                params.retain(|(k, _)| {
                    let keep = k != "page" || index == first;
                    index += 1;
                    keep
                });
            }
            None => params.push(("page".to_string(), value)),
        }

        let url = compose_url(&params);
        self.navigate(&url)?;
        Ok(url)
    }

    pub fn previous_page(&mut self) -> Result<Option<String>> {
        let has_prev = self.loaded_page().is_some_and(|p| p.has_prev_page);
        if has_prev && self.page > 1 {
            return self.change_page(self.page - 1).map(Some);
        }
        Ok(None)
    }

    pub fn next_page(&mut self) -> Result<Option<String>> {
        let has_next = self.loaded_page().is_some_and(|p| p.has_next_page);
        if has_next {
            return self.change_page(self.page + 1).map(Some);
        }
        Ok(None)
    }

    /// Fetches the page for the current URL. Failures are logged and the view
    /// keeps whatever it showed before.
    pub async fn load<C: CourseCatalog + ?Sized>(&mut self, catalog: &C) {
        match catalog.fetch_courses(&self.filters, self.page).await {
            Ok(page) => self.state = ListingState::Loaded(page),
            Err(e) => tracing::error!("Error fetching courses: {}", e),
        }
    }

    /// Like [`load`](Self::load), but a page past the last one is pulled back
    /// into range and fetched again, with the URL rewritten to match.
    pub async fn load_clamped<C: CourseCatalog + ?Sized>(&mut self, catalog: &C) -> Result<()> {
        self.load(catalog).await;

        let Some(total_pages) = self.loaded_page().map(|page| page.total_pages) else {
            return Ok(());
        };
        let clamped = pagination::clamp_page(self.page, total_pages);
        if clamped != self.page {
            tracing::warn!("Page {} is out of range, showing page {}", self.page, clamped);
            self.change_page(clamped)?;
            self.load(catalog).await;
        }
        Ok(())
    }

    pub async fn load_universities<C: CourseCatalog + ?Sized>(&mut self, catalog: &C) {
        match catalog.fetch_universities().await {
            Ok(list) => self.universities = list,
            Err(e) => tracing::error!("Error fetching universities: {}", e),
        }
    }

    /// `(value, label)` choices for a filter, led by [`ALL_OPTION`].
    pub fn filter_options(&self, key: FilterKey) -> Vec<(String, String)> {
        let all = (ALL_OPTION.to_string(), ALL_OPTION.to_string());
        let choices: Vec<(String, String)> = match key {
            FilterKey::University => self
                .universities
                .iter()
                .map(|uni| (uni.id.to_string(), uni.name.clone()))
                .collect(),
            _ => labels::table(key)
                .iter()
                .map(|(code, label)| ((*code).to_string(), (*label).to_string()))
                .collect(),
        };
        std::iter::once(all).chain(choices).collect()
    }

    pub fn result_count_line(&self) -> String {
        let total = self.loaded_page().map(|p| p.total_docs).unwrap_or(0);
        format!("共找到 {} 个结果", format_number(total))
    }

    pub fn cards(&self) -> Vec<CourseCard> {
        self.loaded_page()
            .map(|page| page.docs.iter().map(CourseCard::from_course).collect())
            .unwrap_or_default()
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        self.loaded_page()
            .map(|page| pagination::page_links(self.page, page.total_pages))
            .unwrap_or_default()
    }
}

/// Display-ready fields of one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCard {
    pub id: u64,
    pub name: String,
    pub level: String,
    pub university: String,
    pub faculty: String,
    pub locations: String,
    pub duration: String,
    pub fee: String,
    pub intakes: String,
    pub apply_url: String,
}

impl CourseCard {
    pub fn from_course(course: &Course) -> Self {
        let locations = course
            .locations
            .iter()
            .map(|code| labels::display(FilterKey::Location, code))
            .collect::<Vec<_>>()
            .join(", ");

        let intakes = if course.intakes.len() == labels::INTAKES.len() {
            "全年".to_string()
        } else {
            course
                .intakes
                .iter()
                .map(|code| labels::display(FilterKey::Intake, code))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let duration = course
            .duration_in_month
            .first()
            .map(|months| format!("{} 个月", months))
            .unwrap_or_default();

        Self {
            id: course.id,
            name: course.name.clone(),
            level: labels::display(FilterKey::Level, &course.level),
            university: course.related_schools.university().to_string(),
            faculty: course.related_schools.faculty().unwrap_or_default().to_string(),
            locations,
            duration,
            fee: format_currency(course.fee, &course.currency),
            intakes,
            apply_url: apply_url(course),
        }
    }
}

/// Hand-off to the application form for `course`.
pub fn apply_url(course: &Course) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("university", &course.related_schools.name)
        .append_pair("courseId", &course.id.to_string())
        .finish();
    format!("{}?{}", APPLY_PATH, query)
}
