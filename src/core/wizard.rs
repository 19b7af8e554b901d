//! Guided search: location → level → intake → university, then hand off to
//! the listing page through its URL.

use crate::domain::labels;
use crate::domain::model::{FilterKey, FilterSelection, University};
use crate::domain::ports::CourseCatalog;
use std::collections::BTreeMap;
use thiserror::Error;

pub const LISTING_PATH: &str = "/courses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardStep {
    pub key: FilterKey,
    pub title: &'static str,
    /// Optional steps may be completed without a choice.
    pub optional: bool,
}

pub const STEPS: [WizardStep; 4] = [
    WizardStep {
        key: FilterKey::Location,
        title: "选择地点",
        optional: false,
    },
    WizardStep {
        key: FilterKey::Level,
        title: "选择学历",
        optional: false,
    },
    WizardStep {
        key: FilterKey::Intake,
        title: "选择入学时间",
        optional: false,
    },
    WizardStep {
        key: FilterKey::University,
        title: "选择院校",
        optional: true,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOption {
    pub value: String,
    pub label: String,
}

/// University choices, loaded once per wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UniversityOptions {
    #[default]
    NotLoaded,
    Loaded(Vec<University>),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardTransition {
    Advanced { step: usize },
    Navigate { url: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("step {step} ({title}) needs a selection before moving on")]
    NoSelection { step: usize, title: &'static str },

    #[error("'{value}' is not an option for {title}")]
    UnknownOption { value: String, title: &'static str },
}

#[derive(Debug, Clone, Default)]
pub struct StepWizard {
    current: usize,
    selections: BTreeMap<usize, String>,
    universities: UniversityOptions,
}

impl StepWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the university list for the last step. A failure is logged and
    /// leaves that step without options.
    pub async fn load_universities<C: CourseCatalog + ?Sized>(&mut self, catalog: &C) {
        if self.universities != UniversityOptions::NotLoaded {
            return;
        }
        match catalog.fetch_universities().await {
            Ok(list) => {
                tracing::debug!("Wizard received {} universities", list.len());
                self.universities = UniversityOptions::Loaded(list);
            }
            Err(e) => {
                tracing::error!("Error fetching universities: {}", e);
                self.universities = UniversityOptions::Failed;
            }
        }
    }

    pub fn universities(&self) -> &UniversityOptions {
        &self.universities
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> &'static WizardStep {
        &STEPS[self.current]
    }

    pub fn step_count(&self) -> usize {
        STEPS.len()
    }

    pub fn is_last_step(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    pub fn options(&self) -> Vec<StepOption> {
        options_for(self.step().key, &self.universities)
    }

    pub fn selection(&self, step: usize) -> Option<&str> {
        self.selections.get(&step).map(String::as_str)
    }

    /// Records `value` for the current step without advancing.
    pub fn select_option(&mut self, value: &str) -> Result<(), WizardError> {
        let step = self.step();
        if !self.options().iter().any(|option| option.value == value) {
            return Err(WizardError::UnknownOption {
                value: value.to_string(),
                title: step.title,
            });
        }
        self.selections.insert(self.current, value.to_string());
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        self.step().optional || self.selections.contains_key(&self.current)
    }

    pub fn next(&mut self) -> Result<WizardTransition, WizardError> {
        if !self.can_advance() {
            return Err(WizardError::NoSelection {
                step: self.current + 1,
                title: self.step().title,
            });
        }

        if self.is_last_step() {
            let url = self.completion_url();
            tracing::info!("Search wizard finished, navigating to {}", url);
            return Ok(WizardTransition::Navigate { url });
        }

        self.current += 1;
        Ok(WizardTransition::Advanced { step: self.current })
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// `(step number, step count, percent complete)` for the progress bar.
    pub fn progress(&self) -> (usize, usize, u32) {
        let number = self.current + 1;
        let total = STEPS.len();
        let percent = ((number as f64 / total as f64) * 100.0).round() as u32;
        (number, total, percent)
    }

    pub fn selections(&self) -> FilterSelection {
        let mut filters = FilterSelection::default();
        for (index, step) in STEPS.iter().enumerate() {
            filters.set(step.key, self.selection(index));
        }
        filters
    }

    /// Listing URL carrying every step's value, blank for steps left empty.
    pub fn completion_url(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (index, step) in STEPS.iter().enumerate() {
            query.append_pair(step.key.param(), self.selection(index).unwrap_or(""));
        }
        query.append_pair("page", "1");
        format!("{}?{}", LISTING_PATH, query.finish())
    }
}

pub fn options_for(key: FilterKey, universities: &UniversityOptions) -> Vec<StepOption> {
    match key {
        FilterKey::University => match universities {
            UniversityOptions::Loaded(list) => list
                .iter()
                .map(|uni| StepOption {
                    value: uni.id.to_string(),
                    label: uni.name.clone(),
                })
                .collect(),
            UniversityOptions::NotLoaded | UniversityOptions::Failed => Vec::new(),
        },
        _ => labels::table(key)
            .iter()
            .map(|(code, label)| StepOption {
                value: (*code).to_string(),
                label: (*label).to_string(),
            })
            .collect(),
    }
}
