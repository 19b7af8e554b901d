use crate::core::wizard::WizardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::Http(_) | FinderError::Status { .. } => ErrorCategory::Network,
            FinderError::Serialization(_) | FinderError::Csv(_) => ErrorCategory::Data,
            FinderError::Url(_)
            | FinderError::Config { .. }
            | FinderError::ConfigValidation { .. }
            | FinderError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            FinderError::Validation { .. } | FinderError::Wizard(_) => ErrorCategory::Input,
            FinderError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FinderError::Http(_) => ErrorSeverity::Medium,
            FinderError::Status { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            FinderError::Status { .. } => ErrorSeverity::High,
            FinderError::Wizard(WizardError::NoSelection { .. }) => ErrorSeverity::Low,
            FinderError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Short message for the person at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("无法连接课程服务: {}", self),
            ErrorCategory::Data => format!("课程数据格式异常: {}", self),
            ErrorCategory::Configuration => format!("配置有误: {}", self),
            ErrorCategory::Input => format!("输入有误: {}", self),
            ErrorCategory::System => format!("系统错误: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FinderError::Http(_) => "Check your network connection and the --api-base value",
            FinderError::Status { status, .. } if *status >= 500 => {
                "The course service is having trouble, try again later"
            }
            FinderError::Status { .. } => "Check the filter values and page number",
            FinderError::Serialization(_) => {
                "The API response shape changed, confirm the endpoint is a course listing API"
            }
            FinderError::Csv(_) => "Try --format text or --format json instead",
            FinderError::Url(_) => "Use a URL like /courses?location=penang&page=1",
            FinderError::Config { .. }
            | FinderError::ConfigValidation { .. }
            | FinderError::InvalidConfigValue { .. } => {
                "Fix the configuration file or command-line flags and run again"
            }
            FinderError::Validation { .. } => "Correct the highlighted field and submit again",
            FinderError::Wizard(_) => "Choose one of the listed options",
            FinderError::Io(_) => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
