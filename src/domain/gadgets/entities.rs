use strum::Display as StrumDisplay;

/// Lifecycle of a single gadget. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum GadgetState {
    Constructed,
    Subscribed,
    Rendered,
    Updated,
    Dead,
}

impl GadgetState {
    pub fn is_dead(&self) -> bool {
        matches!(self, GadgetState::Dead)
    }

    pub fn has_widget(&self) -> bool {
        matches!(self, GadgetState::Rendered | GadgetState::Updated)
    }
}
