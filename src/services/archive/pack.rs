use super::types::archive_path_for;
use crate::types::errors::{ConvertError, ConvertResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Zip a project directory into `<dir>.fla` and delete the directory.
///
/// Entry names are `/`-separated paths relative to the directory. Any I/O
/// failure aborts the whole pack; the directory is only removed after the
/// archive has been finished.
pub fn pack_project(project_dir: &Path) -> ConvertResult<PathBuf> {
    if !project_dir.is_dir() {
        return Err(ConvertError::InvalidInput(format!(
            "Project directory does not exist: {}",
            project_dir.display()
        )));
    }

    let archive_path = archive_path_for(project_dir);
    let file = fs::File::create(&archive_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let mut count = 0usize;
    for entry in WalkDir::new(project_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(project_dir)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        writer.start_file(name, options)?;
        let mut source = fs::File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
        count += 1;
    }
    writer.finish()?;

    fs::remove_dir_all(project_dir)?;

    log::debug!(
        "Packed {} files from {} into {}",
        count,
        project_dir.display(),
        archive_path.display()
    );
    Ok(archive_path)
}
