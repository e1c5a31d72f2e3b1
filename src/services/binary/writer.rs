//! Little-endian primitive writer and the SC tag-length-value block framing.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// ASCII strings are length-prefixed; this length marks "no string".
const NULL_STRING: u8 = 0xFF;

#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn fill(&mut self, size: usize) -> io::Result<()> {
        self.buffer.write_all(&vec![0u8; size])
    }

    pub fn write_bool(&mut self, data: bool) -> io::Result<()> {
        self.buffer.write_u8(u8::from(data))
    }

    pub fn write_char(&mut self, data: i8) -> io::Result<()> {
        self.buffer.write_i8(data)
    }

    pub fn write_uchar(&mut self, data: u8) -> io::Result<()> {
        self.buffer.write_u8(data)
    }

    pub fn write_short(&mut self, data: i16) -> io::Result<()> {
        self.buffer.write_i16::<LittleEndian>(data)
    }

    pub fn write_ushort(&mut self, data: u16) -> io::Result<()> {
        self.buffer.write_u16::<LittleEndian>(data)
    }

    pub fn write_int(&mut self, data: i32) -> io::Result<()> {
        self.buffer.write_i32::<LittleEndian>(data)
    }

    pub fn write_uint(&mut self, data: u32) -> io::Result<()> {
        self.buffer.write_u32::<LittleEndian>(data)
    }

    /// Length-prefixed ASCII. Empty and absent strings are both written as
    /// the null marker. Strings longer than 254 bytes are rejected.
    pub fn write_ascii(&mut self, data: Option<&str>) -> io::Result<()> {
        match data {
            Some(text) if !text.is_empty() => {
                if !text.is_ascii() || text.len() >= NULL_STRING as usize {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("cannot encode {text:?} as a short ASCII string"),
                    ));
                }
                self.write_uchar(text.len() as u8)?;
                self.buffer.write_all(text.as_bytes())
            }
            _ => self.write_uchar(NULL_STRING),
        }
    }

    /// Pixels → twips, rounded, as a signed 32-bit int.
    pub fn write_twip(&mut self, data: f32) -> io::Result<()> {
        self.write_int((data * 20.0).round() as i32)
    }
}

impl Write for BinaryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write one block: 1-byte tag, 4-byte little-endian payload length, payload.
///
/// The payload is produced by `save` into a scratch writer so its length is
/// known up front; `None` writes an empty block (e.g. the end tag).
pub fn write_block<F>(writer: &mut BinaryWriter, tag: u8, save: Option<F>) -> io::Result<()>
where
    F: FnOnce(&mut BinaryWriter) -> io::Result<()>,
{
    let payload = match save {
        Some(save) => {
            let mut block = BinaryWriter::new();
            save(&mut block)?;
            block.into_inner()
        }
        None => Vec::new(),
    };

    let length = u32::try_from(payload.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "block payload too large"))?;

    writer.write_uchar(tag)?;
    writer.write_uint(length)?;
    writer.write_all(&payload)
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
