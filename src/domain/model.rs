use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter dimensions understood by the listing page and its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Location,
    Level,
    Intake,
    University,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Location,
        FilterKey::Level,
        FilterKey::Intake,
        FilterKey::University,
    ];

    /// Name of the URL query parameter carrying this filter.
    pub fn param(self) -> &'static str {
        match self {
            FilterKey::Location => "location",
            FilterKey::Level => "level",
            FilterKey::Intake => "intake",
            FilterKey::University => "university",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Selected filter values. `None` means unconstrained; empty strings never
/// make it in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub location: Option<String>,
    pub level: Option<String>,
    pub intake: Option<String>,
    pub university: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Location => self.location.as_deref(),
            FilterKey::Level => self.level.as_deref(),
            FilterKey::Intake => self.intake.as_deref(),
            FilterKey::University => self.university.as_deref(),
        }
    }

    /// Stores `value`, treating blank input as clearing the filter.
    pub fn set(&mut self, key: FilterKey, value: Option<&str>) {
        let normalized = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        match key {
            FilterKey::Location => self.location = normalized,
            FilterKey::Level => self.level = normalized,
            FilterKey::Intake => self.intake = normalized,
            FilterKey::University => self.university = normalized,
        }
    }

    pub fn with(mut self, key: FilterKey, value: &str) -> Self {
        self.set(key, Some(value));
        self
    }

    /// Present filters in URL order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> + '_ {
        FilterKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRef {
    /// Stored as `"<university>@<faculty>"`.
    pub name: String,
}

impl SchoolRef {
    pub fn university(&self) -> &str {
        self.name.split('@').next().unwrap_or_default()
    }

    pub fn faculty(&self) -> Option<&str> {
        self.name.split('@').nth(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub related_schools: SchoolRef,
    pub level: String,
    pub currency: String,
    pub fee: f64,
    #[serde(default)]
    pub duration_in_month: Vec<String>,
    #[serde(default)]
    pub intakes: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Page envelope returned by the course listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePage {
    pub docs: Vec<Course>,
    pub page: u32,
    pub total_pages: u32,
    pub total_docs: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub prev_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityList {
    pub docs: Vec<University>,
}
