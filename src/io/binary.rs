//! Binary STL.
//!
//! ```text
//! UINT8[80]    – Header (ignored on read, zero-filled on write)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count, kept as opaque bytes
//! end
//! ```
//!
//! All values are little-endian.

use std::io::{Read, Write};

use crate::error::{EncodeError, FormatError, Result};
use crate::math::Vector3d;
use crate::topology::{Facet, Solid};

use super::{ReadParams, WriteParams};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Reads a binary STL stream, rejecting trailing bytes.
///
/// # Errors
///
/// Returns `StlError::Format` if the stream is truncated or has bytes after
/// the last triangle, and `StlError::Io` if reading fails.
pub fn decode_binary<R: Read>(reader: R) -> Result<Solid> {
    decode_binary_with(reader, &ReadParams::default())
}

/// Reads a binary STL stream with explicit parameters.
///
/// Every facet keeps its stored normal verbatim and the two attribute bytes
/// of its record. The solid has no name.
///
/// # Errors
///
/// Returns `StlError::Format` if the stream is truncated, or has trailing
/// bytes while `params.allow_trailing_bytes` is off. Returns `StlError::Io`
/// if reading fails.
pub fn decode_binary_with<R: Read>(mut reader: R, params: &ReadParams) -> Result<Solid> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    if data.len() < PREAMBLE_SIZE {
        return Err(FormatError::HeaderTooShort { len: data.len() }.into());
    }

    let count = u32::from_le_bytes([
        data[HEADER_SIZE],
        data[HEADER_SIZE + 1],
        data[HEADER_SIZE + 2],
        data[HEADER_SIZE + 3],
    ]);
    let expected = usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(TRIANGLE_SIZE))
        .and_then(|n| n.checked_add(PREAMBLE_SIZE))
        .unwrap_or(usize::MAX);

    if data.len() < expected {
        return Err(FormatError::RecordsTooShort {
            count,
            expected,
            actual: data.len(),
        }
        .into());
    }
    if data.len() > expected {
        let extra = data.len() - expected;
        if !params.allow_trailing_bytes {
            return Err(FormatError::TrailingBytes { extra }.into());
        }
        tracing::debug!(extra, "ignoring trailing bytes after binary STL records");
    }

    let facets: Vec<Facet> = data[PREAMBLE_SIZE..expected]
        .chunks_exact(TRIANGLE_SIZE)
        .map(read_record)
        .collect();
    tracing::debug!(triangles = facets.len(), "decoded binary STL");

    Ok(Solid::new(None, facets))
}

/// Decodes one 50-byte triangle record.
fn read_record(record: &[u8]) -> Facet {
    let normal = read_vector(&record[0..12]);
    let vertices = vec![
        read_vector(&record[12..24]),
        read_vector(&record[24..36]),
        read_vector(&record[36..48]),
    ];
    Facet::from_parts(Some(normal), vertices).with_attributes(record[48..50].to_vec())
}

/// Reads a vector from 12 bytes (3 f32s).
fn read_vector(buf: &[u8]) -> Vector3d {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3d::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Writes a solid as binary STL, rejecting polygon facets.
///
/// # Errors
///
/// Returns `StlError::Encode` if a facet is not a triangle, and
/// `StlError::Io` if writing fails.
pub fn encode_binary<W: Write>(solid: &Solid, writer: W) -> Result<()> {
    encode_binary_with(solid, writer, &WriteParams::default())
}

/// Writes a solid as binary STL with explicit parameters.
///
/// Emits exactly `84 + 50 * triangles` bytes. Attribute bytes are written as
/// zero and absent normals as `(0, 0, 0)`. `params.precision` does not apply.
///
/// # Errors
///
/// Returns `StlError::Encode` if a facet is not a triangle under
/// `PolygonPolicy::Reject` or there are more than `u32::MAX` triangles,
/// `StlError::Geometry` if triangulation fails, and `StlError::Io` if writing
/// fails. Nothing is written when an encode or geometry error is returned.
pub fn encode_binary_with<W: Write>(solid: &Solid, mut writer: W, params: &WriteParams) -> Result<()> {
    let facets = params.triangles(solid)?;
    let count = u32::try_from(facets.len()).map_err(|_| EncodeError::TooManyFacets {
        count: facets.len(),
    })?;

    writer.write_all(&[0u8; HEADER_SIZE])?;
    writer.write_all(&count.to_le_bytes())?;

    for facet in facets.iter() {
        let mut record = [0u8; TRIANGLE_SIZE];
        let normal = facet.normal.unwrap_or_default();
        write_vector(&mut record[0..12], &normal);
        for (slot, vertex) in record[12..48].chunks_exact_mut(12).zip(&facet.vertices) {
            write_vector(slot, vertex);
        }
        writer.write_all(&record)?;
    }
    tracing::debug!(triangles = count, "encoded binary STL");

    Ok(())
}

/// Writes a vector as 3 little-endian f32s into a 12-byte slot.
#[allow(clippy::cast_possible_truncation)]
// Truncation: binary STL stores single precision
fn write_vector(slot: &mut [u8], v: &Vector3d) {
    for (bytes, coord) in slot.chunks_exact_mut(4).zip(v.to_array()) {
        bytes.copy_from_slice(&(coord as f32).to_le_bytes());
    }
}
