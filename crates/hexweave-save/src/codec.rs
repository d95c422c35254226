//! Binary encode/decode for per-world records and patterns.
//!
//! All integers are little-endian. Strings are length-prefixed with a `u32`
//! length. Counts read from untrusted input never drive allocation up front.

use std::io::{Cursor, Read, Write};

use hexweave_core::OperatorId;
use hexweave_space::{Direction, Pattern, PatternRecord};

use crate::error::SaveError;
use crate::types::{PerWorldEntry, PerWorldRecord};
use crate::{FORMAT_VERSION, MAGIC};

/// Longest string the decoder will accept, in bytes.
///
/// Signatures and operator ids are short; anything longer is corruption.
pub const MAX_STR_LEN: usize = 64 * 1024;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), SaveError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), SaveError> {
    write_u32_le(w, checked_len(s.len())?)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn checked_len(len: usize) -> Result<u32, SaveError> {
    u32::try_from(len).map_err(|_| SaveError::Malformed {
        detail: format!("length {len} does not fit in u32"),
    })
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, SaveError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, SaveError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, SaveError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, SaveError> {
    let len = read_u32_le(r)? as usize;
    if len > MAX_STR_LEN {
        return Err(SaveError::Malformed {
            detail: format!("string length {len} exceeds limit {MAX_STR_LEN}"),
        });
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| SaveError::Malformed {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

// ── Pattern encode/decode ───────────────────────────────────────

/// Encode a pattern as `[start_dir u8] [angle_count u32] [angles u8 *]`.
pub fn encode_pattern(w: &mut dyn Write, pattern: &Pattern) -> Result<(), SaveError> {
    let record = pattern.to_record();
    write_u8(w, record.start_dir)?;
    write_u32_le(w, checked_len(record.angles.len())?)?;
    w.write_all(&record.angles)?;
    Ok(())
}

/// Decode a pattern written by [`encode_pattern`].
///
/// Out-of-range ordinals are rejected. Drawability is not re-checked.
pub fn decode_pattern(r: &mut dyn Read) -> Result<Pattern, SaveError> {
    let start_dir = read_u8(r)?;
    let count = read_u32_le(r)? as u64;
    let mut angles = Vec::new();
    let read = r.take(count).read_to_end(&mut angles)?;
    if read as u64 != count {
        return Err(SaveError::Malformed {
            detail: format!("truncated pattern: expected {count} angles, got {read}"),
        });
    }
    Ok(Pattern::from_record(&PatternRecord { start_dir, angles })?)
}

// ── Record encode/decode ────────────────────────────────────────

/// Encode a per-world record, entries in table order.
pub fn encode_record(w: &mut dyn Write, record: &PerWorldRecord) -> Result<(), SaveError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u64_le(w, record.seed())?;
    write_u32_le(w, checked_len(record.len())?)?;
    for (signature, entry) in record.iter() {
        write_length_prefixed_str(w, signature)?;
        write_length_prefixed_str(w, &entry.operator.to_string())?;
        write_u32_le(w, u32::from(entry.start_dir.ordinal()))?;
    }
    Ok(())
}

/// Decode and validate a per-world record.
pub fn decode_record(r: &mut dyn Read) -> Result<PerWorldRecord, SaveError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SaveError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion { found: version });
    }

    let seed = read_u64_le(r)?;
    let count = read_u32_le(r)?;
    let mut record = PerWorldRecord::new(seed);
    for i in 0..count {
        let signature = read_length_prefixed_str(r)?;
        let operator: OperatorId = read_length_prefixed_str(r)?.parse()?;
        let ordinal = read_u32_le(r)?;
        let start_dir = u8::try_from(ordinal)
            .ok()
            .and_then(Direction::from_ordinal)
            .ok_or(SaveError::DirectionOutOfRange { value: ordinal })?;
        let entry = PerWorldEntry {
            operator,
            start_dir,
        };
        if record.insert(signature, entry).is_some() {
            return Err(SaveError::Malformed {
                detail: format!("duplicate signature at entry {i}"),
            });
        }
    }
    Ok(record)
}

/// Encode a record into a fresh buffer.
pub fn record_to_bytes(record: &PerWorldRecord) -> Result<Vec<u8>, SaveError> {
    let mut buf = Vec::new();
    encode_record(&mut buf, record)?;
    Ok(buf)
}

/// Decode a record from a complete buffer. Trailing bytes are an error.
pub fn record_from_bytes(bytes: &[u8]) -> Result<PerWorldRecord, SaveError> {
    let mut cursor = Cursor::new(bytes);
    let record = decode_record(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(SaveError::Malformed {
            detail: format!("{} trailing bytes after record", bytes.len() - consumed),
        });
    }
    Ok(record)
}
