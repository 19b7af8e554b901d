pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::FinderConfig;
pub use self::core::{
    application::ApplicationForm, client::CmsClient, listing::ListingView, wizard::StepWizard,
};
pub use domain::model::{Course, CoursePage, FilterKey, FilterSelection, University};
pub use domain::ports::{ConfigProvider, CourseCatalog};
pub use utils::error::{FinderError, Result};
