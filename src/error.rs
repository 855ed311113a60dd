use thiserror::Error;

/// Top-level error type for STL reading, writing and geometry.
#[derive(Debug, Error)]
pub enum StlError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to facet geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("facet has {vertices} vertices, triangle metrics need exactly 3")]
    NotATriangle { vertices: usize },

    #[error("no ear found while triangulating a {vertices}-vertex polygon")]
    NoEar { vertices: usize },
}

/// Errors in the layout of a binary STL stream.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("binary STL needs at least 84 bytes, got {len}")]
    HeaderTooShort { len: usize },

    #[error("binary STL declares {count} triangles ({expected} bytes), got {actual} bytes")]
    RecordsTooShort {
        count: u32,
        expected: usize,
        actual: usize,
    },

    #[error("{extra} unexpected bytes after the last triangle record")]
    TrailingBytes { extra: usize },
}

/// Errors in the grammar of a text STL stream.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("line {line}, column {column}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}, column {column}: loop has {found} vertices, expected 3")]
    VertexCount {
        line: usize,
        column: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: invalid number `{token}`")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}: input is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// Errors raised before writing a solid.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("facet {index} has {vertices} vertices; triangulate before writing")]
    NonTriangularFacet { index: usize, vertices: usize },

    #[error("{count} facets do not fit the 32-bit binary STL triangle count")]
    TooManyFacets { count: usize },

    #[error("solid name {name:?} spans several lines")]
    MultilineName { name: String },
}

/// Convenience type alias for results using [`StlError`].
pub type Result<T> = std::result::Result<T, StlError>;
