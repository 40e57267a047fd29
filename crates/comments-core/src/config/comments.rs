//! Comment numbering and operating mode configuration.

use serde::{Deserialize, Serialize};

/// Settings of the comment services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsConfig {
    /// Template of the human-facing comment number. `{0}` is replaced by
    /// the sequence value; `{0:000}` pads it with zeros to the given width.
    #[serde(default = "default_number_template")]
    pub number_template: String,
    /// When set, every mutating API route is rejected.
    #[serde(default)]
    pub read_only: bool,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            number_template: default_number_template(),
            read_only: false,
        }
    }
}

fn default_number_template() -> String {
    "!{0:000}".to_string()
}
