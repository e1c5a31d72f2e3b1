//! End-of-central-directory record inspection and the single known repair.
//!
//! Some exporters write a central directory 54 bytes shorter than the size
//! they record in the EOCD (one extra-field block they never emit). Strict
//! readers reject such an archive and lenient ones read it without complaint,
//! so the record is checked before any read. The record is assumed to sit at the very
//! end of the file, i.e. the archive has no trailing comment.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use crate::types::errors::{ConvertError, ConvertResult};

pub const EOCD_SIZE: usize = 22;
pub const EOCD_SIGNATURE: u32 = 0x0605_4b50;
pub const CDIR_SIZE_CORRECTION: i64 = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    pub signature: u32,
    pub disk_number: u16,
    pub cdir_disk: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cdir_size: u32,
    pub cdir_offset: u32,
    pub comment_length: u16,
}

impl EndOfCentralDirectory {
    /// Decode the record at `len - 22`. `None` if the file is too short or the
    /// signature does not match.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        let start = bytes.len().checked_sub(EOCD_SIZE)?;
        let mut cursor = Cursor::new(&bytes[start..]);
        let record = Self {
            signature: cursor.read_u32::<LittleEndian>().ok()?,
            disk_number: cursor.read_u16::<LittleEndian>().ok()?,
            cdir_disk: cursor.read_u16::<LittleEndian>().ok()?,
            disk_entries: cursor.read_u16::<LittleEndian>().ok()?,
            total_entries: cursor.read_u16::<LittleEndian>().ok()?,
            cdir_size: cursor.read_u32::<LittleEndian>().ok()?,
            cdir_offset: cursor.read_u32::<LittleEndian>().ok()?,
            comment_length: cursor.read_u16::<LittleEndian>().ok()?,
        };
        (record.signature == EOCD_SIGNATURE).then_some(record)
    }

    /// Write the record back over the last 22 bytes of `bytes`.
    pub fn write(&self, bytes: &mut [u8]) -> ConvertResult<()> {
        let start = bytes
            .len()
            .checked_sub(EOCD_SIZE)
            .ok_or_else(|| ConvertError::InvalidInput("archive shorter than EOCD".into()))?;
        let mut out = &mut bytes[start..];
        out.write_u32::<LittleEndian>(self.signature)?;
        out.write_u16::<LittleEndian>(self.disk_number)?;
        out.write_u16::<LittleEndian>(self.cdir_disk)?;
        out.write_u16::<LittleEndian>(self.disk_entries)?;
        out.write_u16::<LittleEndian>(self.total_entries)?;
        out.write_u32::<LittleEndian>(self.cdir_size)?;
        out.write_u32::<LittleEndian>(self.cdir_offset)?;
        out.write_u16::<LittleEndian>(self.comment_length)?;
        Ok(())
    }

    /// Declared central-directory size minus the size implied by the layout
    /// (everything between the directory offset and the record).
    pub fn size_delta(&self, file_len: usize) -> i64 {
        let actual = file_len as i64 - i64::from(self.cdir_offset) - EOCD_SIZE as i64;
        i64::from(self.cdir_size) - actual
    }
}

/// Outcome of checking an archive's EOCD against its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EocdCheck {
    /// Declared size matches the layout; nothing to repair.
    Consistent,
    /// The known 54-byte overstatement, patched in the returned bytes.
    Patched(Vec<u8>),
}

/// Patch the known central-directory size overstatement.
///
/// Fails with `UnrepairableArchive` for any other non-zero discrepancy, and
/// with `InvalidInput` if no EOCD record sits at the end of the file.
pub fn repair_central_directory(bytes: &[u8]) -> ConvertResult<EocdCheck> {
    let mut record = EndOfCentralDirectory::read(bytes).ok_or_else(|| {
        ConvertError::InvalidInput("no end-of-central-directory record at end of file".into())
    })?;

    let delta = record.size_delta(bytes.len());
    match delta {
        0 => Ok(EocdCheck::Consistent),
        CDIR_SIZE_CORRECTION => {
            log::info!(
                "Central directory size overstated by {} bytes, patching {} -> {}",
                delta,
                record.cdir_size,
                record.cdir_size as i64 - CDIR_SIZE_CORRECTION
            );
            record.cdir_size -= CDIR_SIZE_CORRECTION as u32;
            let mut patched = bytes.to_vec();
            record.write(&mut patched)?;
            Ok(EocdCheck::Patched(patched))
        }
        _ => Err(ConvertError::UnrepairableArchive { delta }),
    }
}
