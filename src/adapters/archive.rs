use crate::domain::model::ArchiveSummary;
use crate::utils::error::{Result, TransferError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Zips every regular file under `folder` into `zip_path`. Symbolic links
/// to files are stored under the link's name; links to directories are not
/// followed.
///
/// Entry names are relative to the parent of `folder`, so the first path
/// component of each entry is the folder's own name.
pub fn zip_folder(folder: &Path, zip_path: &Path) -> Result<ArchiveSummary> {
    let base = folder.parent().unwrap_or(folder);
    tracing::info!(
        folder = %folder.display(),
        archive = %zip_path.display(),
        "Zipping folder"
    );

    let mut zip = ZipWriter::new(BufWriter::new(File::create(zip_path)?));
    let mut entries = 0usize;

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        let metadata = if entry.path_is_symlink() {
            // Links to regular files are archived with the target's content.
            match std::fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => target,
                Ok(_) => {
                    tracing::debug!(path = %entry.path().display(), "Not following directory link");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "Skipping dangling symbolic link");
                    continue;
                }
            }
        } else if entry.file_type().is_file() {
            entry.metadata()?
        } else {
            continue;
        };

        let name = entry_name(base, entry.path())?;
        let options = file_options(&metadata);

        zip.start_file(name.as_str(), options)?;
        let mut file = File::open(entry.path())?;
        std::io::copy(&mut file, &mut zip)?;
        entries += 1;

        tracing::debug!(entry = %name, "Added file to archive");
    }

    if entries == 0 {
        return Err(TransferError::EmptyArchive {
            path: folder.display().to_string(),
        });
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    drop(writer);

    let bytes = std::fs::metadata(zip_path)?.len();
    tracing::info!(entries, bytes, "Archive written");

    Ok(ArchiveSummary {
        path: zip_path.to_path_buf(),
        entries,
        bytes,
    })
}

/// `/`-separated archive name of `path` relative to `base`.
fn entry_name(base: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        TransferError::IoError(std::io::Error::other(format!(
            "{} is outside {}",
            path.display(),
            base.display()
        )))
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn file_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(metadata.len() >= u32::MAX as u64);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    }
    #[cfg(not(unix))]
    {
        options
    }
}
