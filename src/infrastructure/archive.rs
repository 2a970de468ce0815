//! Zip extraction into layer directories

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{LayersError, LayersResult};

/// Extract `archive` into `destination`, dropping the first
/// `strip_components` path components of every entry
///
/// Entries left with an empty path after stripping are skipped. Entries whose
/// names would escape `destination` are rejected.
pub fn extract_zip(archive: &Path, destination: &Path, strip_components: usize) -> LayersResult<()> {
    let file = File::open(archive)
        .map_err(|e| LayersError::io(format!("opening {}", archive.display()), e))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(|e| LayersError::Archive {
        path: archive.to_path_buf(),
        source: e,
    })?;

    fs::create_dir_all(destination)
        .map_err(|e| LayersError::io(format!("creating {}", destination.display()), e))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| LayersError::Archive {
            path: archive.to_path_buf(),
            source: e,
        })?;

        let name = entry.enclosed_name().ok_or_else(|| LayersError::PathEscape {
            path: PathBuf::from(entry.name()),
            root: destination.to_path_buf(),
        })?;

        let stripped: PathBuf = name.components().skip(strip_components).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = destination.join(&stripped);
        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| LayersError::io(format!("creating {}", target.display()), e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LayersError::io(format!("creating {}", parent.display()), e))?;
        }

        let mut out = File::create(&target)
            .map_err(|e| LayersError::io(format!("creating {}", target.display()), e))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| LayersError::io(format!("writing {}", target.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                    .map_err(|e| LayersError::io(format!("chmod {}", target.display()), e))?;
            }
        }
    }

    tracing::debug!(
        archive = %archive.display(),
        destination = %destination.display(),
        strip_components,
        "extracted zip archive"
    );
    Ok(())
}
