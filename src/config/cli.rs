use crate::config::toml_config::FinderConfig;
use crate::domain::model::{FilterKey, FilterSelection};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-finder")]
#[command(about = "Find study-abroad courses and prepare an application", version)]
pub struct CliConfig {
    /// Base URL of the course content API (overrides the config file)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Courses per listing page (overrides the config file)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Step-by-step search: location, level, intake, university
    Search,
    /// List courses for a filter set or a /courses URL
    Courses(CoursesArgs),
    /// List universities known to the catalogue
    Universities,
    /// Fill in the application form
    Apply(ApplyArgs),
    /// Print the location, level and intake dictionaries
    Labels,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CoursesArgs {
    /// Listing URL, e.g. "/courses?location=penang&page=2"
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub level: Option<String>,

    #[arg(long)]
    pub intake: Option<String>,

    /// University id
    #[arg(long)]
    pub university: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CoursesArgs {
    /// Listing URL for these arguments; `--url` wins over individual filters.
    pub fn listing_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut filters = FilterSelection::default();
        filters.set(FilterKey::Location, self.location.as_deref());
        filters.set(FilterKey::Level, self.level.as_deref());
        filters.set(FilterKey::Intake, self.intake.as_deref());
        filters.set(FilterKey::University, self.university.as_deref());

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in filters.iter() {
            query.append_pair(key.param(), value);
        }
        query.append_pair("page", &self.page.unwrap_or(1).to_string());
        format!("{}?{}", crate::core::wizard::LISTING_PATH, query.finish())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ApplyArgs {
    /// Application URL, e.g. "/apply?university=...&courseId=12"
    #[arg(long, default_value = "/apply")]
    pub url: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub chinese_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Highest education completed
    #[arg(long)]
    pub education: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Supporting document (pdf, doc, docx, jpg, jpeg, png); repeatable
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

impl CliConfig {
    /// Config file (if any) with command-line overrides applied.
    pub fn resolve(&self) -> Result<FinderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                FinderConfig::from_file(path)?
            }
            None => FinderConfig::default(),
        };

        if let Some(base) = &self.api_base {
            config.api.base_url = base.clone();
        }
        if let Some(page_size) = self.page_size {
            config.listing.page_size = Some(page_size);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base) = &self.api_base {
            validate_url("api_base", base)?;
        }
        if let Some(page_size) = self.page_size {
            validate_positive_number("page_size", page_size as usize, 1)?;
        }
        Ok(())
    }
}
