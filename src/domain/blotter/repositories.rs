use super::value_objects::{DropdownOption, Extras, SecurityId, SecurityIds, TemplateRef};
use crate::domain::errors::AppResult;
use std::collections::HashMap;

/// Turns a template reference plus its data map into markup.
pub trait TemplateRenderer {
    fn render(&self, template: &TemplateRef, data: &Extras) -> AppResult<String>;
}

/// Ordered option list for the security dropdown.
pub trait OptionSource {
    fn options(&self) -> Vec<DropdownOption>;
}

/// `selected value -> identifiers` lookup for the dependent block.
pub trait IdentifierTable {
    fn identifiers(&self, value: &str) -> Option<SecurityIds>;
}

/// In-memory catalog backing both lookups.
#[derive(Debug, Clone, Default)]
pub struct StaticSecurityCatalog {
    options: Vec<DropdownOption>,
    ids: HashMap<String, SecurityIds>,
}

impl StaticSecurityCatalog {
    pub fn new(options: Vec<DropdownOption>, ids: HashMap<String, SecurityIds>) -> Self {
        Self { options, ids }
    }

    /// Placeholder securities until the blotter is wired to the security master.
    pub fn placeholder() -> Self {
        let options = vec![
            DropdownOption::new("AAPL", "Apple Inc. Equity"),
            DropdownOption::new("MSFT", "Microsoft Corp. Equity"),
            DropdownOption::new("USD-LIBOR-3M", "USD LIBOR 3M"),
        ];

        let mut ids = HashMap::new();
        ids.insert(
            "AAPL".to_string(),
            SecurityIds::new(vec![
                SecurityId::new("BLOOMBERG_TICKER", "AAPL US Equity"),
                SecurityId::new("CUSIP", "037833100"),
                SecurityId::new("ISIN", "US0378331005"),
            ]),
        );
        ids.insert(
            "MSFT".to_string(),
            SecurityIds::new(vec![
                SecurityId::new("BLOOMBERG_TICKER", "MSFT US Equity"),
                SecurityId::new("CUSIP", "594918104"),
                SecurityId::new("ISIN", "US5949181045"),
            ]),
        );
        ids.insert(
            "USD-LIBOR-3M".to_string(),
            SecurityIds::new(vec![SecurityId::new("BLOOMBERG_TICKER", "US0003M Index")]),
        );

        Self { options, ids }
    }
}

impl OptionSource for StaticSecurityCatalog {
    fn options(&self) -> Vec<DropdownOption> {
        self.options.clone()
    }
}

impl IdentifierTable for StaticSecurityCatalog {
    fn identifiers(&self, value: &str) -> Option<SecurityIds> {
        self.ids.get(value).cloned()
    }
}
