/// Result alias that carries the crate-wide [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the audio transport layer.
///
/// Selection-time errors (`NotAudio`, `Discover`) leave the currently
/// loaded resource untouched; callers log them and move on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selected file carries no audio stream.
    #[error("no audio stream in {0}")]
    NotAudio(String),
    /// The file could not be probed at all (unreadable or corrupt).
    #[error("could not probe media: {0}")]
    Discover(String),
    /// Pipeline construction or a state change failed.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}
