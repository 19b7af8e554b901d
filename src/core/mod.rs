pub mod application;
pub mod client;
pub mod listing;
pub mod pagination;
pub mod query;
pub mod wizard;

pub use crate::domain::model::{Course, CoursePage, FilterKey, FilterSelection, University};
pub use crate::domain::ports::{ConfigProvider, CourseCatalog};
pub use crate::utils::error::Result;
