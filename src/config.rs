//! Analysis configuration, loadable from JSON.
//!
//! [AnalysisConfig] bundles the options of the three processing steps. Every
//! field has a default, so a JSON document only needs the fields it changes:
//!
//! ```
//! use multihit::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_json_str(r#"{
//!     "parser": { "root_name": "root" },
//!     "tagging": { "patterns": [["Test", "selected"]] },
//!     "traversal": { "model_key": "MH" }
//! }"#)?;
//!
//! assert_eq!(config.parser.root_name.as_deref(), Some("root"));
//! assert_eq!(config.tagging.internal_tag, "test");
//! assert_eq!(config.traversal.model_key, "MH");
//! # Ok::<(), multihit::config::ConfigError>(())
//! ```

use crate::newick::{NewickParser, ParserOptions};
use crate::tagging::{NodeTagger, TaggerConfig};
use crate::substitution::TraversalConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors when loading an [AnalysisConfig].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or does not fit the schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A field has an unusable value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Options of parsing, tagging and traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// See [ParserOptions]
    pub parser: ParserOptions,
    /// See [TaggerConfig]
    pub tagging: TaggerConfig,
    /// See [TraversalConfig]
    pub traversal: TraversalConfig,
}

impl AnalysisConfig {
    /// Parses and [validates](Self::validate) a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that the type system does not rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traversal.model_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "traversal.model_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.traversal.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.max_depth",
                reason: "must be positive".to_string(),
            });
        }
        if self.tagging.default_leaf_tag.is_empty() || self.tagging.internal_tag.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tagging",
                reason: "tags must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// A [NewickParser] with these parser options.
    pub fn newick_parser(&self) -> NewickParser {
        NewickParser::with_options(self.parser.clone())
    }

    /// A [NodeTagger] with these tagging options.
    pub fn node_tagger(&self) -> NodeTagger {
        NodeTagger::from_config(&self.tagging)
    }
}
