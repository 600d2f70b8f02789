use serde::{Deserialize, Serialize};

/// A single wishlist entry.
///
/// `key` is chosen by the caller at creation and never changes. The three
/// descriptive fields are always present; unset values are stored as empty
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub owned: bool,
}

impl Item {
    /// Build a fresh, not yet owned item from a creation request.
    pub fn new(key: impl Into<String>, spec: ItemSpec) -> Self {
        Self {
            key: key.into(),
            description: spec.description.unwrap_or_default(),
            link: spec.link.unwrap_or_default(),
            picture_url: spec.picture_url.unwrap_or_default(),
            owned: false,
        }
    }
}

/// Body of a creation request.
///
/// `owned` is accepted for compatibility with existing clients but is never
/// honored: new items always start out wanted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub owned: Option<bool>,
}

/// Body of a partial update request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ItemPatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
}

impl ItemPatch {
    /// Overwrite the fields this patch supplies. Empty strings count as not
    /// supplied. Returns whether anything changed.
    pub fn apply(&self, item: &mut Item) -> bool {
        let mut changed = false;
        changed |= overwrite(&mut item.description, self.description.as_deref());
        changed |= overwrite(&mut item.link, self.link.as_deref());
        changed |= overwrite(&mut item.picture_url, self.picture_url.as_deref());
        changed
    }
}

fn overwrite(target: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(value) if !value.is_empty() && target != value => {
            *target = value.to_string();
            true
        }
        _ => false,
    }
}
