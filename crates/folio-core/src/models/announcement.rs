use serde::{Deserialize, Serialize};

/// Visual style of the announcement bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementVariant {
    #[default]
    Info,
    Success,
    Warning,
}

impl std::fmt::Display for AnnouncementVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementVariant::Info => write!(f, "info"),
            AnnouncementVariant::Success => write!(f, "success"),
            AnnouncementVariant::Warning => write!(f, "warning"),
        }
    }
}

/// Singleton announcement document edited in the content backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub is_active: bool,
    pub text: String,
    pub link: Option<String>,
    pub link_text: Option<String>,
    // The backend leaves this unset until an editor picks a style
    #[serde(default)]
    pub variant: Option<AnnouncementVariant>,
}

impl Announcement {
    pub fn variant(&self) -> AnnouncementVariant {
        self.variant.unwrap_or_default()
    }

    /// The call-to-action, shown only when both the URL and its label are set.
    pub fn call_to_action(&self) -> Option<(&str, &str)> {
        match (self.link.as_deref(), self.link_text.as_deref()) {
            (Some(link), Some(text)) if !link.is_empty() && !text.is_empty() => Some((text, link)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(link: Option<&str>, link_text: Option<&str>) -> Announcement {
        Announcement {
            id: "a1".to_string(),
            is_active: true,
            text: "Now booking talks".to_string(),
            link: link.map(String::from),
            link_text: link_text.map(String::from),
            variant: None,
        }
    }

    #[test]
    fn test_variant_defaults_to_info() {
        let a = announcement(None, None);
        assert_eq!(a.variant(), AnnouncementVariant::Info);

        let parsed: Announcement = serde_json::from_str(
            r#"{"_id":"a2","isActive":true,"text":"Hi","variant":"warning"}"#,
        )
        .unwrap();
        assert_eq!(parsed.variant(), AnnouncementVariant::Warning);
    }

    #[test]
    fn test_call_to_action_requires_link_and_text() {
        assert!(announcement(Some("https://example.com"), None).call_to_action().is_none());
        assert!(announcement(None, Some("Learn more")).call_to_action().is_none());
        assert_eq!(
            announcement(Some("https://example.com"), Some("Learn more")).call_to_action(),
            Some(("Learn more", "https://example.com"))
        );
    }
}
