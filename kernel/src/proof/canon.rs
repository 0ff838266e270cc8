//! Canonical JSON bytes for artifacts that get digested.
//!
//! Rules:
//!
//! 1. Object keys are sorted by byte order.
//! 2. Compact form, no whitespace (`{"a":1,"b":2}`).
//! 3. Strings are escaped per RFC 8259 §7; other code points pass through as UTF-8.
//! 4. Numbers must be integers. Floats are rejected so digests never depend
//!    on float formatting.

use std::io::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = CanonicalWriter { buf: Vec::new() };
    out.value(value)?;
    Ok(out.buf)
}

struct CanonicalWriter {
    buf: Vec<u8>,
}

impl CanonicalWriter {
    fn value(&mut self, value: &serde_json::Value) -> Result<(), CanonError> {
        match value {
            serde_json::Value::Null => self.buf.extend_from_slice(b"null"),
            serde_json::Value::Bool(true) => self.buf.extend_from_slice(b"true"),
            serde_json::Value::Bool(false) => self.buf.extend_from_slice(b"false"),
            serde_json::Value::Number(n) => self.number(n)?,
            serde_json::Value::String(s) => self.string(s),
            serde_json::Value::Array(items) => {
                self.buf.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.buf.push(b',');
                    }
                    self.value(item)?;
                }
                self.buf.push(b']');
            }
            serde_json::Value::Object(map) => {
                let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

                self.buf.push(b'{');
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        self.buf.push(b',');
                    }
                    self.string(key);
                    self.buf.push(b':');
                    self.value(item)?;
                }
                self.buf.push(b'}');
            }
        }
        Ok(())
    }

    fn number(&mut self, n: &serde_json::Number) -> Result<(), CanonError> {
        if let Some(i) = n.as_i64() {
            let _ = write!(self.buf, "{i}");
        } else if let Some(u) = n.as_u64() {
            let _ = write!(self.buf, "{u}");
        } else {
            return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
        }
        Ok(())
    }

    fn string(&mut self, s: &str) {
        self.buf.push(b'"');
        for ch in s.chars() {
            match ch {
                '"' => self.buf.extend_from_slice(b"\\\""),
                '\\' => self.buf.extend_from_slice(b"\\\\"),
                '\n' => self.buf.extend_from_slice(b"\\n"),
                '\r' => self.buf.extend_from_slice(b"\\r"),
                '\t' => self.buf.extend_from_slice(b"\\t"),
                c if c < '\u{0020}' => {
                    let _ = write!(self.buf, "\\u{:04x}", c as u32);
                }
                c => {
                    let mut utf8 = [0u8; 4];
                    self.buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        self.buf.push(b'"');
    }
}
