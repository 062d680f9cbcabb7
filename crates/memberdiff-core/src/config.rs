use serde::{Deserialize, Serialize};

use memberdiff_types::{CompareError, CompareResult};

/// How difference records are named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    /// Scalar records carry the member's own name; collection records carry
    /// the element type's name.
    #[default]
    ElementType,
    /// Records carry the dotted path from the root value, e.g.
    /// `customer.address.city`. Collection records carry the member path.
    MemberPath,
}

/// Configuration for a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// How records are named.
    pub attribution: Attribution,
    /// Maximum nesting depth before the comparison aborts.
    pub max_depth: usize,
    /// Whether to track the pairs currently being walked and fail when one
    /// is reached again.
    pub detect_cycles: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            attribution: Attribution::ElementType,
            max_depth: 256,
            detect_cycles: true,
        }
    }
}

impl CompareConfig {
    /// Default settings with records named by member path.
    pub fn with_paths() -> Self {
        Self {
            attribution: Attribution::MemberPath,
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> CompareResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CompareError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CompareResult<()> {
        if self.max_depth == 0 {
            return Err(CompareError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}
