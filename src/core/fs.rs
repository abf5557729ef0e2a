//! Filesystem primitives.
//!
//! Every file vault-handler writes holds secret material, so writes always
//! end up owner-only (0600 on Unix), including when overwriting a file that
//! had wider permissions.

use std::path::Path;

use crate::error::{FileError, Result};

/// Whether a path exists.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Whether a path exists and is a directory.
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Read a whole file.
///
/// # Errors
///
/// Returns `FileError::NotFound` if the file is absent, `FileError::Io` for
/// any other failure.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf()).into()
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }
    })
}

/// Create or truncate a file with owner-only permissions and write `contents`.
///
/// # Errors
///
/// Returns `FileError::Io` if the file can't be created or written.
pub fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let io_err = |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(crate::core::constants::FILE_MODE)
            .open(path)
            .map_err(io_err)?;
        file.write_all(contents).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        // `mode` only applies on creation.
        std::fs::set_permissions(
            path,
            std::fs::Permissions::from_mode(crate::core::constants::FILE_MODE),
        )
        .map_err(io_err)?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, contents).map_err(io_err)?;
    }

    Ok(())
}

/// Permission bits of a file (Unix only).
#[cfg(unix)]
pub fn mode(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(metadata.permissions().mode() & 0o777)
}
