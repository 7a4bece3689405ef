use serde::{Deserialize, Serialize};

/// `players/{userId}` document.
///
/// Written by the profile editor; the game only reads it when publishing
/// standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
}

impl PlayerProfile {
    pub fn new(display_name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            avatar: avatar.into(),
        }
    }
}
