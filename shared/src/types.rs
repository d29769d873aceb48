use serde::{Deserialize, Serialize};

// ========== STYLIST ==========
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StylistStatus {
    Active,
    Inactive,
}

impl StylistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StylistStatus::Active => "active",
            StylistStatus::Inactive => "inactive",
        }
    }

    /// Parse a stored status value. Anything unrecognized reads as active,
    /// the creation default.
    pub fn parse(value: &str) -> StylistStatus {
        match value {
            "inactive" => StylistStatus::Inactive,
            _ => StylistStatus::Active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Stylist {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: String, // free-form: colorist | barber | receptionist | ...
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
    pub status: StylistStatus,
    pub created_at: String,
}

/// Optional photo attached to a create request. `file_data` is base64.
#[derive(Debug, Deserialize, Clone)]
pub struct PhotoPayload {
    pub file_name: String,
    pub content_type: String,
    pub file_data: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    pub photo: Option<PhotoPayload>,
}

/// A validated, normalized stylist ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewStylist {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
    pub photo_url: String,
}

// ========== WELCOME EMAIL ==========
/// Outcome tier of the best-effort welcome email. Informational only:
/// never changes the HTTP outcome of a create.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WelcomeEmailStatus {
    Sent,
    Fallback,
    Failed,
    Error,
    #[default]
    None,
}
