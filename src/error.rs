use thiserror::Error;

/// Top-level error type for the geokern geometry kernel.
#[derive(Debug, Error)]
pub enum GeokernError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing geometries from raw coordinates.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("linear ring is not closed: first ({first_x}, {first_y}) != last ({last_x}, {last_y})")]
    RingNotClosed {
        first_x: f64,
        first_y: f64,
        last_x: f64,
        last_y: f64,
    },

    #[error("invalid number of points in linear ring (found {0} - must be 0 or >= 4)")]
    InvalidRingSize(usize),

    #[error("invalid number of points in line string (found {0} - must be 0 or >= 2)")]
    InvalidLineStringSize(usize),

    #[error("polygon shell is empty but {0} hole(s) were given")]
    EmptyShellWithHoles(usize),

    #[error("geometry is not polygonal: {0}")]
    NotPolygonal(&'static str),
}

/// Errors raised by numeric computations whose result cannot be represented.
#[derive(Debug, Error)]
pub enum NumericError {
    #[error("intersection is not representable: ({x}, {y})")]
    NotRepresentable { x: f64, y: f64 },

    #[error("ordinates must not be NaN")]
    NanOrdinate,
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`GeokernError`].
pub type Result<T> = std::result::Result<T, GeokernError>;
