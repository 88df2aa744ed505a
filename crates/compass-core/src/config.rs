//! Router configuration

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Prefix for all path names, as in "example.com/BASE_PATH/home".
    /// Empty means none; otherwise it must match `^(/[^/]+)*$`.
    pub base_path: String,
    /// Bound on redirect chains before a navigation fails
    pub max_redirect_depth: usize,
    /// Document origin used to classify anchor clicks
    pub origin: String,
}

impl RouterConfig {
    pub fn validate(&self) -> Result<()> {
        if !base_path_is_valid(&self.base_path) {
            return Err(CoreError::Config(format!(
                "Base path \"{}\" must match ^(/[^/]+)*$",
                self.base_path
            )));
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_redirect_depth: 10,
            origin: "http://localhost".to_string(),
        }
    }
}

fn base_path_is_valid(base: &str) -> bool {
    base.is_empty()
        || (base.starts_with('/')
            && !base.ends_with('/')
            && base[1..].split('/').all(|segment| !segment.is_empty()))
}
