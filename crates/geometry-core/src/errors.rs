use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The accumulated matrix has a determinant of exactly zero, e.g. an
    /// ancestor carries `scale(0)`.
    #[error("Matrix is not invertible (determinant is zero)")]
    SingularMatrix,
    /// Only produced by the strict `try_parse_transform`; the lenient
    /// `parse_transform` falls back to the identity matrix instead.
    #[error("Unparsable transform: {0}")]
    UnparsableTransform(String),
}
