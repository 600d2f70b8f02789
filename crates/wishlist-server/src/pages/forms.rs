use serde::Deserialize;
use wishlist_core::{ItemPatch, ItemSpec};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginForm {
    pub password: String,
}

/// What a submission of the management form asks for.
///
/// Only the three named selectors are recognized; every other value,
/// including a missing one, means create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Edit,
    Delete,
    Status,
}

impl FormAction {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("edit") => Self::Edit,
            Some("delete") => Self::Delete,
            Some("status") => Self::Status,
            _ => Self::Create,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ItemForm {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub action: Option<String>,
}

impl ItemForm {
    pub fn action(&self) -> FormAction {
        FormAction::parse(self.action.as_deref())
    }

    /// The key exactly as submitted; keys are matched verbatim.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn spec(&self) -> ItemSpec {
        ItemSpec {
            description: filled(&self.description),
            link: filled(&self.link),
            picture_url: filled(&self.picture_url),
            owned: None,
        }
    }

    pub fn patch(&self) -> ItemPatch {
        ItemPatch {
            description: filled(&self.description),
            link: filled(&self.link),
            picture_url: filled(&self.picture_url),
        }
    }
}

// Blank inputs mean "leave unchanged"
fn filled(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_selector() {
        assert_eq!(FormAction::parse(Some("edit")), FormAction::Edit);
        assert_eq!(FormAction::parse(Some("delete")), FormAction::Delete);
        assert_eq!(FormAction::parse(Some("status")), FormAction::Status);
        assert_eq!(FormAction::parse(None), FormAction::Create);
        assert_eq!(FormAction::parse(Some("add")), FormAction::Create);
        assert_eq!(FormAction::parse(Some("EDIT")), FormAction::Create);
    }

    #[test]
    fn test_blank_fields_are_omitted() {
        let form = ItemForm {
            key: "  lamp ".to_string(),
            description: "desk lamp".to_string(),
            link: "   ".to_string(),
            ..Default::default()
        };

        assert_eq!(form.key(), "  lamp ");
        let patch = form.patch();
        assert_eq!(patch.description.as_deref(), Some("desk lamp"));
        assert!(patch.link.is_none());
        assert!(patch.picture_url.is_none());
        assert!(form.spec().owned.is_none());
    }
}
