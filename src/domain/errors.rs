//! Domain errors for marker parsing and element attribute decoding

/// Errors raised while turning a marker match into a descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    /// The alias token is not one of the known roll mode aliases
    #[error("Unknown roll mode alias: {0}")]
    UnknownRollMode(String),

    /// A capture group the grammar always produces was absent
    #[error("Marker is missing its {0} capture")]
    MissingCapture(&'static str),
}

/// Errors raised while reading a descriptor back from element attributes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// A required attribute is not present on the element
    #[error("Element is missing the {0} attribute")]
    Missing(&'static str),

    /// The element names a command kind this crate does not dispatch
    #[error("Unknown command kind: {0}")]
    UnknownKind(String),

    /// The stored mode is not a canonical roll mode
    #[error(transparent)]
    Mode(#[from] MarkerError),
}
