//! Error types for the layout layer.

/// A corridor was requested from lines that cannot form one.
///
/// The generator only ever asks for corridors between room centres that
/// differ on both axes, so any of these means a bug upstream. Callers
/// should treat it as fatal rather than retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CorridorError {
    /// One of the lines has zero length.
    #[error("corridor lines cannot be degenerate")]
    Degenerate,

    /// The first line is not horizontal or the second is not vertical.
    #[error("corridor needs a horizontal line followed by a vertical one")]
    NotPerpendicular,

    /// The two lines do not meet at a common endpoint.
    #[error("corridor lines must share a junction endpoint")]
    Disjoint,

    /// Endpoints are not ordered left-to-right / top-to-bottom.
    #[error("corridor endpoints must be ordered left-to-right and top-to-bottom")]
    Unordered,
}

/// Errors that can occur while generating a layout or a match.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The configuration cannot produce any room at all.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    /// The attempt budget ran out without accepting a single room.
    #[error("no room could be placed in {attempts} attempts")]
    NoRooms { attempts: u32 },

    /// Corridor construction hit an invariant violation.
    #[error("layout invariant violated: {0}")]
    Invariant(#[from] CorridorError),
}
