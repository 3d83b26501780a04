//! Assembles the browser implementations of every port.

use std::rc::Rc;

use crate::application::{FormDeps, GadgetDeps};
use crate::config::ConsoleConfig;
use crate::domain::{blotter::StaticSecurityCatalog, errors::AppResult, logging::GlobalLogger};
use crate::global_state::gadget_ids;
use crate::infrastructure::{BrowserDom, CanvasCurvePlugin, StaticTemplates, WebSocketCellSource};

pub fn browser_form_deps() -> AppResult<FormDeps> {
    let catalog = Rc::new(StaticSecurityCatalog::placeholder());
    Ok(FormDeps {
        dom: Rc::new(BrowserDom::new()?),
        templates: Rc::new(StaticTemplates::builtin()),
        options: catalog.clone(),
        identifiers: catalog,
        logger: GlobalLogger::shared(),
    })
}

pub fn browser_gadget_deps(config: &ConsoleConfig) -> AppResult<GadgetDeps> {
    Ok(GadgetDeps {
        source: Rc::new(WebSocketCellSource::new(config.analytics_url.clone())),
        dom: Rc::new(BrowserDom::new()?),
        charts: Rc::new(CanvasCurvePlugin::new()),
        ids: gadget_ids(),
        logger: GlobalLogger::shared(),
        class_prefix: config.gadget_class_prefix.clone(),
    })
}
