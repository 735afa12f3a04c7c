//! User profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: String,

    /// Name shown to coaches
    pub display_name: String,

    /// Contact email, if shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Free-form introduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// IANA timezone name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Coaching goals picked during onboarding
    #[serde(default)]
    pub goals: Vec<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Partial profile update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// New bio; `Some(String::new())` clears it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// New timezone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Replacement goal list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
}
