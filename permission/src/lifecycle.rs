/// Visibility transitions of a host UI context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The context was created.
    Created,
    /// The context became visible.
    Started,
    /// The context started interacting with the user.
    Resumed,
    /// The context stopped interacting with the user.
    Paused,
    /// The context is no longer visible.
    Stopped,
}

impl LifecycleEvent {
    /// Whether a context reaching this state may issue permission prompts.
    #[must_use]
    pub const fn binds(self) -> bool {
        matches!(self, Self::Created | Self::Started | Self::Resumed)
    }
}
