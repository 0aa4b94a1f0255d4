use serde::{Deserialize, Serialize};

/// Banner text pointing at a storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub redirect_url: String,
    pub text: String,
}

impl Ad {
    pub fn new(redirect_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            text: text.into(),
        }
    }
}
