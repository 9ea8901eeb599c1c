//! Environment variable extraction from unit environment dumps

mod extractor;

pub use extractor::{extract_env, parse_variable_names, EnvFilter, EXPORT_PREFIX};
