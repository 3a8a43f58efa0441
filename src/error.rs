use thiserror::Error;

/// Errors surfaced by the page controller.
///
/// Most absent DOM nodes are not errors at all: widgets whose anchor is missing are
/// skipped. Only the conditions below abort an operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The mandatory primary canvas is not in the document; startup cannot continue.
    #[error("primary surface `{0}` not found")]
    MissingPrimarySurface(String),

    /// Two widgets tried to bind the same DOM element.
    #[error("anchor `{0}` is already bound to a widget")]
    DuplicateAnchor(String),

    /// The loading overlay is a one-shot; it cannot be started twice.
    #[error("loading overlay already started")]
    OverlayAlreadyStarted,

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    /// A JS call failed; the payload is the stringified exception.
    #[error("js: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;
