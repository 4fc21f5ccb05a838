mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{
    API_KEY_ENV_VARS, AcquisitionConfig, AdGateConfig, Config, GenerationConfig, OutputConfig,
    UiConfig,
};
pub use validation::{unknown_fields, warn_unknown_fields};
