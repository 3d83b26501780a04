use super::repositories::TemplateRenderer;
use super::value_objects::{BlockId, BlockKind, Extras, TemplateRef};
use crate::domain::dom::{ChangeHandler, Dom, ListenerHandle};
use crate::domain::errors::{AppError, AppResult};

/// Construction parameters of a [`Form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Root template rendered into `selector`.
    pub module: TemplateRef,
    pub data: Extras,
    pub type_map: Extras,
    /// Container the whole form is rendered into.
    pub selector: String,
    pub extras: Extras,
}

impl FormConfig {
    pub fn new(module: impl Into<TemplateRef>, selector: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            data: Extras::new(),
            type_map: Extras::new(),
            selector: selector.into(),
            extras: Extras::new(),
        }
    }
}

/// Entity - one templated fragment owned by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
    template: TemplateRef,
    extras: Extras,
    rendered: bool,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn template(&self) -> &TemplateRef {
        &self.template
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

/// Aggregate root - ordered blocks rendered into one container.
///
/// Blocks can only be created through [`Form::push`], so each block belongs
/// to exactly one form; [`Form::dom`] renders every block once.
pub struct Form {
    config: FormConfig,
    children: Vec<Block>,
    rendered: bool,
    loaded: Vec<Box<dyn FnOnce()>>,
}

impl Form {
    pub fn new(config: FormConfig) -> Self {
        Self { config, children: Vec::new(), rendered: false, loaded: Vec::new() }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Append a block with an empty options map.
    pub fn push(&mut self, kind: BlockKind) -> AppResult<BlockId> {
        self.push_with(kind, Extras::new())
    }

    pub fn push_with(&mut self, kind: BlockKind, extras: Extras) -> AppResult<BlockId> {
        if self.rendered {
            return Err(AppError::StateError(format!(
                "cannot append {} block to a rendered form",
                kind
            )));
        }
        let id = BlockId(self.children.len());
        self.children.push(Block { id, kind, template: kind.template(), extras, rendered: false });
        Ok(id)
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.children.get(id.index())
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Selector of a block's rendered region inside the form container.
    pub fn region_selector(&self, id: BlockId) -> Option<String> {
        self.block(id)
            .map(|block| format!("{} .{}", self.config.selector, block.id.region_class()))
    }

    /// One-shot handler fired right after [`Form::dom`] finishes.
    pub fn on_loaded(&mut self, handler: impl FnOnce() + 'static) {
        self.loaded.push(Box::new(handler));
    }

    /// Render the root template and every block into the container.
    pub fn dom(&mut self, dom: &dyn Dom, templates: &dyn TemplateRenderer) -> AppResult<()> {
        if self.rendered {
            return Err(AppError::StateError("form already rendered".to_string()));
        }
        if !dom.exists(&self.config.selector) {
            return Err(AppError::DomError(format!(
                "form container {} not found",
                self.config.selector
            )));
        }

        let root = templates.render(&self.config.module, &self.config.data)?;
        dom.set_inner_html(&self.config.selector, &root)?;

        for block in &mut self.children {
            let body = templates.render(&block.template, &block.extras)?;
            let region = format!(
                r#"<div class="form-block {}" data-block="{}">{}</div>"#,
                block.id.region_class(),
                block.kind,
                body
            );
            dom.append_html(&self.config.selector, &region)?;
            block.rendered = true;
        }
        self.rendered = true;

        for handler in std::mem::take(&mut self.loaded) {
            handler();
        }
        Ok(())
    }

    /// Delegate `change` events from `selector` inside one block's region.
    pub fn on_change(
        &self,
        dom: &dyn Dom,
        block: BlockId,
        selector: &str,
        handler: ChangeHandler,
    ) -> AppResult<Box<dyn ListenerHandle>> {
        let scope = self
            .region_selector(block)
            .ok_or_else(|| AppError::StateError(format!("{} does not belong to this form", block)))?;
        dom.on_change(&scope, selector, handler)
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("config", &self.config)
            .field("children", &self.children)
            .field("rendered", &self.rendered)
            .field("pending_loaded", &self.loaded.len())
            .finish()
    }
}
