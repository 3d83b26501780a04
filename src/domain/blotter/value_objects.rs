use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter};

/// Options/data map handed to a template. Always empty for the trade form.
pub type Extras = BTreeMap<String, String>;

/// Value Object - reference to a renderable template fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Sections of the trade blotter form, in the order they are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, AsRefStr)]
pub enum BlockKind {
    #[strum(serialize = "portfolio")]
    Portfolio,
    #[strum(serialize = "security")]
    Security,
    #[strum(serialize = "trade")]
    TradeFields,
    #[strum(serialize = "security_ids")]
    SecurityIds,
    #[strum(serialize = "attributes")]
    Attributes,
}

impl BlockKind {
    pub fn template(&self) -> TemplateRef {
        TemplateRef(format!("blotter.blocks.{}", self.as_ref()))
    }
}

/// Position of a block inside its owning form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "form-block-{}", _0)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    pub fn index(&self) -> usize {
        self.0
    }

    /// CSS class placed on the block's wrapper region.
    pub fn region_class(&self) -> String {
        self.to_string()
    }
}

/// One `<option>` of a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    #[serde(alias = "name")]
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// A single external identifier of a security, e.g. `ISIN~US0378331005`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityId {
    pub scheme: String,
    pub value: String,
}

impl SecurityId {
    pub fn new(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self { scheme: scheme.into(), value: value.into() }
    }
}

/// Identifier bundle shown in the security-identifiers block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Serialize, Deserialize)]
pub struct SecurityIds(Vec<SecurityId>);

impl SecurityIds {
    pub fn new(ids: Vec<SecurityId>) -> Self {
        Self(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn block_templates_follow_kind_names() {
        let templates: Vec<String> = BlockKind::iter().map(|k| k.template().to_string()).collect();
        assert_eq!(
            templates,
            vec![
                "blotter.blocks.portfolio",
                "blotter.blocks.security",
                "blotter.blocks.trade",
                "blotter.blocks.security_ids",
                "blotter.blocks.attributes",
            ]
        );
    }

    #[test]
    fn dropdown_option_accepts_name_alias() {
        let option: DropdownOption = serde_json::from_str(r#"{"value":"AAPL","name":"Apple"}"#).unwrap();
        assert_eq!(option, DropdownOption::new("AAPL", "Apple"));
    }
}
