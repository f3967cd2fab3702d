//! Error types for Sussy encoding and decoding

use std::fmt;
use std::io;

/// Section of the file being read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PosNormalCount,
    PosNormalTable,
    UvCount,
    UvTable,
    TriangleCount,
    Triangles,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PosNormalCount => "position/normal count",
            Self::PosNormalTable => "position/normal table",
            Self::UvCount => "UV count",
            Self::UvTable => "UV table",
            Self::TriangleCount => "triangle count",
            Self::Triangles => "triangle list",
        };
        f.write_str(name)
    }
}

/// Bounded collection inside a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    PosNormal,
    Uv,
    Triangles,
    /// Welded host vertices (position only)
    Positions,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PosNormal => "position/normal table",
            Self::Uv => "UV table",
            Self::Triangles => "triangle list",
            Self::Positions => "position table",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when encoding or decoding a Sussy mesh
#[derive(Debug, thiserror::Error)]
pub enum SussyError {
    /// Underlying file or stream failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended before the section was complete
    #[error("Truncated data in {section} at byte offset {offset}")]
    TruncatedData { section: Section, offset: u64 },

    /// A triangle corner references an entry past the end of its table
    #[error(
        "Triangle {triangle} corner {corner}: {table} index {index} out of range (table has {len} entries)"
    )]
    IndexOutOfRange {
        triangle: usize,
        corner: usize,
        table: TableKind,
        index: u16,
        len: usize,
    },

    /// A table or the triangle list needs more than 65535 entries
    #[error("{table} exceeds maximum of {} entries", crate::MAX_ENTRIES)]
    CapacityExceeded { table: TableKind },

    /// An integer does not fit its 16-bit field
    #[error("Value {value} does not fit in u16 field ({section})")]
    EncodeRange { value: usize, section: Section },

    /// Bytes remain after the declared triangle list
    #[error("{extra} trailing bytes after triangle list")]
    TrailingData { extra: usize },
}

/// Result alias for Sussy operations
pub type SussyResult<T> = Result<T, SussyError>;
