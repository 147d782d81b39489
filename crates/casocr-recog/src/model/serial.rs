//! Binary serialization for [`Model`]
//!
//! # Format (little-endian)
//!
//! ```text
//! Offset  Size  Field
//! 0       4     magic "cmdl"
//! 4       4     format version (u32) = 1
//! 8       4     number of labels n (u32)
//! 12      68*n  entries, ascending by label:
//!                 4   label (u32 Unicode scalar value)
//!                 8   samples (u64, > 0)
//!                 56  sum: width, height, pixels, q0, q1, q2, q3 (f64 bits)
//! ```
//!
//! Floats are stored by bit pattern, so reading and re-writing a file
//! reproduces it byte for byte.

use super::{Accumulator, Model};
use crate::error::{RecogError, RecogResult};
use crate::features::GlyphFeatures;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// File magic
pub const MODEL_MAGIC: [u8; 4] = *b"cmdl";

/// Format version written and accepted
pub const MODEL_VERSION: u32 = 1;

/// Largest label count a reader accepts
pub const MAX_MODEL_LABELS: usize = 4096;

const HEADER_SIZE: usize = 12;
const ENTRY_SIZE: usize = 4 + 8 + 8 * GlyphFeatures::FIELDS;

/// Largest valid file size
const MAX_INPUT_SIZE: usize = HEADER_SIZE + ENTRY_SIZE * MAX_MODEL_LABELS;

fn format_err(msg: impl Into<String>) -> RecogError {
    RecogError::ModelFormat(msg.into())
}

/// Little-endian cursor over a byte slice.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> RecogResult<[u8; N]> {
        let end = self.pos + N;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| {
            format_err(format!(
                "truncated: need {} bytes at offset {}, have {}",
                N,
                self.pos,
                self.data.len()
            ))
        })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn u32(&mut self) -> RecogResult<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn u64(&mut self) -> RecogResult<u64> {
        Ok(u64::from_le_bytes(self.take()?))
    }

    fn f64(&mut self) -> RecogResult<f64> {
        Ok(f64::from_bits(self.u64()?))
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl Model {
    /// Read a model from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> RecogResult<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE as u64 + 1).read_to_end(&mut buf)?;
        if buf.len() > MAX_INPUT_SIZE {
            return Err(format_err(format!(
                "input too large: exceeds maximum of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a model from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RecogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let model = Self::read_from_reader(&mut BufReader::new(file))?;
        info!(
            path = %path.display(),
            labels = model.len(),
            samples = model.total_samples(),
            "loaded model"
        );
        Ok(model)
    }

    /// Read a model from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> RecogResult<Self> {
        let mut cur = Cursor::new(data);

        let magic: [u8; 4] = cur.take()?;
        if magic != MODEL_MAGIC {
            return Err(format_err(format!("bad magic {:02x?}", magic)));
        }
        let version = cur.u32()?;
        if version != MODEL_VERSION {
            return Err(format_err(format!("unsupported version {version}")));
        }
        let n = cur.u32()? as usize;
        if n > MAX_MODEL_LABELS {
            return Err(format_err(format!(
                "{n} labels exceeds maximum {MAX_MODEL_LABELS}"
            )));
        }
        if cur.remaining() < n * ENTRY_SIZE {
            return Err(format_err(format!(
                "truncated: {n} entries need {} bytes, have {}",
                n * ENTRY_SIZE,
                cur.remaining()
            )));
        }

        let mut entries = BTreeMap::new();
        let mut prev: Option<char> = None;
        for i in 0..n {
            let raw = cur.u32()?;
            let label = char::from_u32(raw)
                .ok_or_else(|| format_err(format!("entry {i}: invalid label U+{raw:04X}")))?;
            if prev.is_some_and(|p| p >= label) {
                return Err(format_err(format!(
                    "entry {i}: label {label:?} duplicated or out of order"
                )));
            }
            prev = Some(label);

            let samples = cur.u64()?;
            if samples == 0 {
                return Err(format_err(format!("entry {i}: label {label:?} has no samples")));
            }
            let mut fields = [0.0; GlyphFeatures::FIELDS];
            for f in &mut fields {
                *f = cur.f64()?;
            }
            if !fields.iter().all(|v| v.is_finite()) {
                return Err(format_err(format!("entry {i}: non-finite sum")));
            }
            entries.insert(
                label,
                Accumulator {
                    samples,
                    sum: GlyphFeatures::from_array(fields),
                },
            );
        }

        if cur.remaining() != 0 {
            return Err(format_err(format!(
                "{} trailing bytes after {n} entries",
                cur.remaining()
            )));
        }

        Ok(Model { entries })
    }

    /// Write the model to a writer.
    ///
    /// # Errors
    ///
    /// [`RecogError::ModelFormat`] if the model has more than
    /// [`MAX_MODEL_LABELS`] labels, a label with no samples or a non-finite
    /// sum.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RecogResult<()> {
        if self.len() > MAX_MODEL_LABELS {
            return Err(format_err(format!(
                "{} labels exceeds maximum {MAX_MODEL_LABELS}",
                self.len()
            )));
        }
        if let Some((label, _)) = self.iter().find(|(_, acc)| acc.samples == 0) {
            return Err(format_err(format!("label {label:?} has no samples")));
        }
        if let Some((label, _)) = self
            .iter()
            .find(|(_, acc)| !acc.sum.to_array().iter().all(|v| v.is_finite()))
        {
            return Err(format_err(format!("label {label:?} has a non-finite sum")));
        }

        writer.write_all(&MODEL_MAGIC)?;
        writer.write_all(&MODEL_VERSION.to_le_bytes())?;
        writer.write_all(&(self.len() as u32).to_le_bytes())?;
        for (&label, acc) in self {
            writer.write_all(&u32::from(label).to_le_bytes())?;
            writer.write_all(&acc.samples.to_le_bytes())?;
            for v in acc.sum.to_array() {
                writer.write_all(&v.to_bits().to_le_bytes())?;
            }
        }
        Ok(())
    }

    /// Write the model to a file.
    ///
    /// The data goes to a sibling temporary file first and is renamed over
    /// `path`, so a failed write leaves any previous model intact. The
    /// temporary file is removed when writing fails.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RecogResult<()> {
        let path = path.as_ref();
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = Path::new(&tmp_name);

        let written = File::create(tmp)
            .map_err(RecogError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.write_to_writer(&mut writer)?;
                writer.flush()?;
                Ok(())
            })
            .and_then(|()| std::fs::rename(tmp, path).map_err(RecogError::from));
        if let Err(e) = written {
            let _ = std::fs::remove_file(tmp);
            return Err(e);
        }

        info!(
            path = %path.display(),
            labels = self.len(),
            samples = self.total_samples(),
            "saved model"
        );
        Ok(())
    }

    /// Write the model to a byte vector.
    pub fn write_to_bytes(&self) -> RecogResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + ENTRY_SIZE * self.len());
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}
