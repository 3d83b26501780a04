/// Simplified error system - no over-engineering!
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    DomError(String),
    TemplateError(String),
    ConfigError(String),
    RenderingError(String),
    StateError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::DomError(msg) => write!(f, "DOM Error: {}", msg),
            AppError::TemplateError(msg) => write!(f, "Template Error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::StateError(msg) => write!(f, "State Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(error: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
