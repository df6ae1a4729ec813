//! P6 pixel-map format
//!
//! Reads and writes the fixed binary pixel-map format used by every
//! artifact of a run: an ASCII header `"P6\n<width> <height>\n<maxval>\n"`
//! followed by `width * height * 3` raw bytes, row-major top-to-bottom,
//! one byte per channel, no padding between rows.
//!
//! The header grammar is deterministic: the magic number, then a token
//! reader that skips whitespace (and, in the tolerant variant, `#`
//! comment lines) until the three required integers are obtained. There
//! is no retry loop and no iteration cap.

use crate::error::{IoError, IoResult};
use petri_core::PixelBuffer;
use std::io::{BufRead, Write};

/// Channel maxval written by every producer in this crate.
pub const MAXVAL: u32 = 255;

/// Parsed pixel-map header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Maximum channel value declared by the file
    pub maxval: u32,
}

impl PnmHeader {
    /// Number of payload bytes implied by the dimensions.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.width * self.height * 3
    }
}

/// How the header reader treats `#` comment lines between the magic
/// number and the numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTolerance {
    /// Reject anything that is not whitespace or a digit
    #[default]
    Strict,
    /// Skip comment lines starting with `#`
    SkipComments,
}

/// Read and validate a P6 header, leaving the reader positioned at the
/// first payload byte.
///
/// # Errors
///
/// - [`IoError::BadMagic`] if the stream does not start with `P6`
/// - [`IoError::MalformedHeader`] if a numeric field cannot be parsed,
///   the stream ends inside the header, or the declared dimensions or
///   maxval are unusable
/// - [`IoError::Io`] for underlying read failures
pub fn read_header<R: BufRead>(reader: &mut R, tolerance: HeaderTolerance) -> IoResult<PnmHeader> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    if &magic != b"P6" {
        return Err(IoError::BadMagic {
            found: String::from_utf8_lossy(&magic).into_owned(),
        });
    }

    let width = read_field(reader, tolerance, "width")?;
    let height = read_field(reader, tolerance, "height")?;
    let maxval = read_field(reader, tolerance, "maxval")?;

    if width == 0 || height == 0 {
        return Err(IoError::MalformedHeader(format!(
            "degenerate dimensions {width}x{height}"
        )));
    }
    // One byte per sample only; a larger maxval would imply two-byte
    // samples, which this format does not carry.
    if maxval == 0 || maxval > MAXVAL {
        return Err(IoError::MalformedHeader(format!(
            "maxval {maxval} outside 1..={MAXVAL}"
        )));
    }

    Ok(PnmHeader {
        width: width as usize,
        height: height as usize,
        maxval,
    })
}

/// Read one unsigned decimal field, consuming its single terminating
/// whitespace byte.
fn read_field<R: BufRead>(
    reader: &mut R,
    tolerance: HeaderTolerance,
    what: &str,
) -> IoResult<u32> {
    loop {
        let b = read_byte(reader, what)?;
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => continue,
            b'#' if tolerance == HeaderTolerance::SkipComments => {
                // Consume the comment through its newline.
                while read_byte(reader, what)? != b'\n' {}
            }
            b'0'..=b'9' => {
                let mut value = u64::from(b - b'0');
                loop {
                    let c = read_byte(reader, what)?;
                    match c {
                        b'0'..=b'9' => {
                            value = value * 10 + u64::from(c - b'0');
                            if value > u64::from(u32::MAX) {
                                return Err(IoError::MalformedHeader(format!(
                                    "{what} overflows 32 bits"
                                )));
                            }
                        }
                        b' ' | b'\t' | b'\r' | b'\n' => return Ok(value as u32),
                        other => {
                            return Err(IoError::MalformedHeader(format!(
                                "unexpected byte {other:#04x} in {what}"
                            )));
                        }
                    }
                }
            }
            other => {
                return Err(IoError::MalformedHeader(format!(
                    "unexpected byte {other:#04x} while reading {what}"
                )));
            }
        }
    }
}

fn read_byte<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u8> {
    let mut b = [0u8; 1];
    reader.read_exact(&mut b).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            IoError::MalformedHeader(format!("stream ended while reading {what}"))
        } else {
            IoError::Io(e)
        }
    })?;
    Ok(b[0])
}

/// Write a P6 header with the fixed maxval of [`MAXVAL`].
pub fn write_header<W: Write>(writer: &mut W, width: usize, height: usize) -> IoResult<()> {
    write!(writer, "P6\n{width} {height}\n{MAXVAL}\n")?;
    Ok(())
}

/// Read a full P6 image: header plus raw RGB payload.
///
/// # Errors
///
/// All of [`read_header`]'s errors, plus [`IoError::PayloadSize`] if the
/// stream holds fewer than `width * height * 3` payload bytes.
pub fn read_p6<R: BufRead>(
    reader: &mut R,
    tolerance: HeaderTolerance,
) -> IoResult<(PnmHeader, Vec<u8>)> {
    let header = read_header(reader, tolerance)?;
    let expected = header.payload_len();

    let mut payload = Vec::new();
    payload
        .try_reserve_exact(expected)
        .map_err(|_| petri_core::Error::OutOfMemory { bytes: expected })?;
    payload.resize(expected, 0);

    let mut got = 0;
    while got < expected {
        let n = reader.read(&mut payload[got..])?;
        if n == 0 {
            return Err(IoError::PayloadSize { expected, got });
        }
        got += n;
    }

    Ok((header, payload))
}

/// Write a full P6 image from a raw RGB payload.
///
/// # Errors
///
/// Returns [`IoError::PayloadSize`] if `rgb.len() != width * height * 3`.
pub fn write_p6<W: Write>(writer: &mut W, width: usize, height: usize, rgb: &[u8]) -> IoResult<()> {
    let expected = width * height * 3;
    if rgb.len() != expected {
        return Err(IoError::PayloadSize {
            expected,
            got: rgb.len(),
        });
    }
    write_header(writer, width, height)?;
    writer.write_all(rgb)?;
    Ok(())
}

/// Write a single-channel buffer as a P6 image, replicating each value
/// across all three channels.
pub fn write_gray<W: Write>(writer: &mut W, buf: &PixelBuffer) -> IoResult<()> {
    write_header(writer, buf.width(), buf.height())?;
    for &v in buf.data() {
        writer.write_all(&[v, v, v])?;
    }
    Ok(())
}
