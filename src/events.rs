// Event types for async communication

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The generator returned a list of names
    NamesGenerated(Vec<String>),
    /// The generator reported an error, already rendered for display
    GenerationFailed(String),
    /// The generation task ended without reporting back (panic or abort)
    GenerationAborted,
}
