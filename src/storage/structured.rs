//! Checksummed binary records.
//!
//! Values are little-endian. Variable-length integers use LEB128, strings and
//! byte blobs carry a varint length prefix. [`StructWriter::close`] appends a
//! CRC32 of everything written, and [`StructReader::new`] refuses input whose
//! footer does not match.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher;

use crate::error::{LexisError, Result};

const FOOTER_LEN: usize = 4;

/// Writes structured values and tracks their checksum.
pub struct StructWriter<W: Write> {
    writer: W,
    hasher: Hasher,
    buffer: Vec<u8>,
}

impl<W: Write> StructWriter<W> {
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            hasher: Hasher::new(),
            buffer: Vec::with_capacity(16),
        }
    }

    fn emit(&mut self) -> Result<()> {
        self.hasher.update(&self.buffer);
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.write_u8(value)?;
        self.emit()
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buffer.write_u32::<LittleEndian>(value)?;
        self.emit()
    }

    pub fn write_varint(&mut self, mut value: u64) -> Result<()> {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buffer.push(byte);
                break;
            }
            self.buffer.push(byte | 0x80);
        }
        self.emit()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_varint(bytes.len() as u64)?;
        self.hasher.update(bytes);
        self.writer.write_all(bytes)?;
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Append the checksum footer and flush. Returns the checksum.
    pub fn close(mut self) -> Result<u32> {
        let checksum = self.hasher.clone().finalize();
        self.writer.write_u32::<LittleEndian>(checksum)?;
        self.writer.flush()?;
        Ok(checksum)
    }
}

/// Reads values written by [`StructWriter`] after verifying the checksum.
#[derive(Debug)]
pub struct StructReader {
    cursor: Cursor<Vec<u8>>,
    checksum: u32,
}

impl StructReader {
    pub fn new<R: Read>(mut input: R) -> Result<Self> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(mut data: Vec<u8>) -> Result<Self> {
        if data.len() < FOOTER_LEN {
            return Err(LexisError::corrupt("file too short for checksum footer"));
        }
        let body_len = data.len() - FOOTER_LEN;
        let stored = (&data[body_len..]).read_u32::<LittleEndian>()?;
        let actual = crc32fast::hash(&data[..body_len]);
        if stored != actual {
            return Err(LexisError::corrupt(format!(
                "checksum mismatch: stored {stored:08x}, computed {actual:08x}"
            )));
        }
        data.truncate(body_len);
        Ok(StructReader {
            cursor: Cursor::new(data),
            checksum: actual,
        })
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.position() as usize >= self.cursor.get_ref().len()
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(truncated)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor.read_u32::<LittleEndian>().map_err(truncated)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            if shift >= 64 || (shift == 63 && byte > 1) {
                return Err(LexisError::corrupt("varint overflows 64 bits"));
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Varint that must fit in a `u32`.
    pub fn read_varint_u32(&mut self) -> Result<u32> {
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| LexisError::corrupt(format!("value {value} exceeds u32")))
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_varint()?;
        let remaining = self.cursor.get_ref().len() as u64 - self.cursor.position();
        if len > remaining {
            return Err(LexisError::corrupt(format!(
                "length {len} exceeds remaining {remaining} bytes"
            )));
        }
        let mut bytes = vec![0; len as usize];
        self.cursor.read_exact(&mut bytes).map_err(truncated)?;
        Ok(bytes)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| LexisError::corrupt(format!("invalid utf-8: {e}")))
    }
}

fn truncated(err: std::io::Error) -> LexisError {
    LexisError::corrupt(format!("unexpected end of data: {err}"))
}
