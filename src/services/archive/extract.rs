use super::eocd::{repair_central_directory, EndOfCentralDirectory, EocdCheck};
use super::types::{is_project_archive, ExtractionResult};
use crate::types::errors::{ConvertError, ConvertResult};
use std::fs;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

/// Extract a packed `.fla` project next to itself (named after the archive,
/// sans extension).
///
/// Steps:
/// 1. Reject anything that is not an existing `.fla` file
/// 2. Check the EOCD record against the layout: the known 54-byte
///    central-directory size overstatement is patched, any other discrepancy
///    is fatal
/// 3. Read the (possibly patched) bytes; read errors propagate unchanged
pub fn extract_project(archive_path: &Path) -> ConvertResult<ExtractionResult> {
    if !is_project_archive(archive_path) {
        return Err(ConvertError::InvalidInput(format!(
            "File is not \".fla\": {}",
            archive_path.display()
        )));
    }
    if !archive_path.is_file() {
        return Err(ConvertError::InvalidInput(format!(
            "Project does not exist: {}",
            archive_path.display()
        )));
    }

    let dest_path = archive_path.with_extension("");
    let bytes = fs::read(archive_path)?;

    // zip accepts an overstated directory size, so the record is checked first.
    let patched = match EndOfCentralDirectory::read(&bytes) {
        Some(_) => match repair_central_directory(&bytes)? {
            EocdCheck::Patched(patched) => Some(patched),
            EocdCheck::Consistent => None,
        },
        None => {
            log::debug!(
                "No trailing EOCD record in {}, reading as is",
                archive_path.display()
            );
            None
        }
    };
    let repaired = patched.is_some();
    let readable = patched.as_deref().unwrap_or(bytes.as_slice());

    let mut archive = zip::ZipArchive::new(Cursor::new(readable))?;
    let files_extracted = extract_entries(&mut archive, &dest_path)?;

    log::info!(
        "Extracted {} files from {} into {}{}",
        files_extracted,
        archive_path.display(),
        dest_path.display(),
        if repaired { " (repaired)" } else { "" }
    );

    Ok(ExtractionResult {
        dest_path,
        files_extracted,
        repaired,
    })
}

fn extract_entries<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    dest_path: &Path,
) -> ConvertResult<usize> {
    fs::create_dir_all(dest_path)?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                log::warn!("Skipping unsafe entry name: {}", entry.name());
                continue;
            }
        };

        let output_path = dest_path.join(&entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
            count += 1;
        }
    }
    Ok(count)
}
