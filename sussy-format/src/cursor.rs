//! Little-endian primitive reads and writes
//!
//! The only layer that touches raw bytes.

use std::io::{Cursor, Read, Write};

use crate::error::{Section, SussyError, SussyResult};

/// Read a 16-bit little-endian integer
pub(crate) fn read_u16(cursor: &mut Cursor<&[u8]>, section: Section) -> SussyResult<u16> {
    let mut buf = [0u8; 2];
    read_exact(cursor, &mut buf, section)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read a 32-bit little-endian IEEE-754 float
pub(crate) fn read_f32(cursor: &mut Cursor<&[u8]>, section: Section) -> SussyResult<f32> {
    let mut buf = [0u8; 4];
    read_exact(cursor, &mut buf, section)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_exact(cursor: &mut Cursor<&[u8]>, buf: &mut [u8], section: Section) -> SussyResult<()> {
    let offset = cursor.position();
    cursor
        .read_exact(buf)
        .map_err(|_| SussyError::TruncatedData { section, offset })
}

/// Write a 16-bit little-endian integer, rejecting values above `u16::MAX`
pub(crate) fn write_u16<W: Write>(w: &mut W, value: usize, section: Section) -> SussyResult<()> {
    let v = u16::try_from(value).map_err(|_| SussyError::EncodeRange { value, section })?;
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a 32-bit little-endian IEEE-754 float
pub(crate) fn write_f32<W: Write>(w: &mut W, value: f32) -> SussyResult<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}
