use serde::{Deserialize, Serialize};

/// A selectable chat model: what the user sees, what the endpoint is
/// called with, and whether it accepts image input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub display_name: String,
    pub deployment_id: String,
    #[serde(default)]
    pub supports_image_input: bool,
}

impl ModelSelection {
    pub fn new(display_name: impl Into<String>, deployment_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            deployment_id: deployment_id.into(),
            supports_image_input: false,
        }
    }

    pub fn with_image_input(mut self, supported: bool) -> Self {
        self.supports_image_input = supported;
        self
    }
}
