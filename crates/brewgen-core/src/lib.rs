pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod formula;
pub mod release;
pub mod template;

pub use error::FormulaError;
pub use formula::{generate, GenerateOptions};
pub use release::TemplateArgs;
