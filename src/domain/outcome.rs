use derive_more::Display;

/// Why a handler deliberately did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SkipReason {
    /// Payload tag was not `CURVE`.
    #[display(fmt = "expected CURVE payload, got {}", received)]
    KindMismatch { received: String },
    /// Target selector matched no element.
    #[display(fmt = "host element is detached")]
    HostDetached,
    /// Gadget already lost its host and closed its subscription.
    #[display(fmt = "gadget is dead")]
    Dead,
    #[display(fmt = "DOM failure: {}", _0)]
    DomFailure(String),
}

/// Tagged result of every event handler in the console.
///
/// Handlers run inside a dispatch loop we do not own, so nothing is thrown;
/// callers and tests inspect this value instead.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    /// A chart widget was (re)created.
    #[display(fmt = "rendered")]
    Rendered,
    /// An existing chart widget was updated in place.
    #[display(fmt = "updated")]
    Updated,
    /// A display region was replaced with new content.
    #[display(fmt = "replaced")]
    Replaced,
    /// A display region was emptied.
    #[display(fmt = "cleared")]
    Cleared,
    #[display(fmt = "skipped: {}", _0)]
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}
