use std::collections::HashMap;

use crate::domain::{
    blotter::{escape_html, Extras, TemplateRef, TemplateRenderer},
    errors::{AppError, AppResult},
};

const TRADE_FORM: &str = r#"<div class="blotter-form"><h2 class="blotter-form-title">Trade</h2></div>"#;

const PORTFOLIO_BLOCK: &str = r#"<fieldset class="blotter-blocks-portfolio"><legend>Portfolio</legend><input type="text" name="portfolio" placeholder="Portfolio node" /></fieldset>"#;

const SECURITY_BLOCK: &str = r#"<fieldset class="blotter-blocks-security"><legend>Security</legend><select class="blotter-security-select" name="security"></select></fieldset>"#;

const TRADE_BLOCK: &str = r#"<fieldset class="blotter-blocks-trade"><legend>Trade</legend><input type="date" name="trade_date" /><input type="number" name="quantity" step="any" /><input type="text" name="counterparty" /></fieldset>"#;

const SECURITY_IDS_BLOCK: &str = r#"<fieldset class="blotter-blocks-ids"><legend>Identifiers</legend><div class="blotter-blocks-security-ids"></div></fieldset>"#;

const ATTRIBUTES_BLOCK: &str = r#"<fieldset class="blotter-blocks-attributes"><legend>Attributes</legend><div class="blotter-attributes"></div></fieldset>"#;

/// Built-in markup keyed by template name. `{{key}}` placeholders are
/// filled from the data map, HTML-escaped.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    templates: HashMap<String, String>,
}

impl StaticTemplates {
    pub fn builtin() -> Self {
        Self::default()
            .with("blotter.forms.trade", TRADE_FORM)
            .with("blotter.blocks.portfolio", PORTFOLIO_BLOCK)
            .with("blotter.blocks.security", SECURITY_BLOCK)
            .with("blotter.blocks.trade", TRADE_BLOCK)
            .with("blotter.blocks.security_ids", SECURITY_IDS_BLOCK)
            .with("blotter.blocks.attributes", ATTRIBUTES_BLOCK)
    }

    pub fn with(mut self, template: impl Into<String>, markup: impl Into<String>) -> Self {
        self.templates.insert(template.into(), markup.into());
        self
    }
}

impl TemplateRenderer for StaticTemplates {
    fn render(&self, template: &TemplateRef, data: &Extras) -> AppResult<String> {
        let markup = self
            .templates
            .get(template.value())
            .ok_or_else(|| AppError::TemplateError(format!("unknown template {template}")))?;
        Ok(data.iter().fold(markup.clone(), |html, (key, value)| {
            html.replace(&format!("{{{{{key}}}}}"), &escape_html(value))
        }))
    }
}
