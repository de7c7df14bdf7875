use std::fs;
use std::io;
use std::path::Path;

/// Removes a file, symlink or directory tree; missing paths are not an error.
pub fn remove_path_if_exists(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

pub fn create_private_dir_all(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;

        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(path)
    }

    #[cfg(not(unix))]
    {
        fs::create_dir_all(path)
    }
}

/// Leaves `path` as an empty owner-only directory.
pub fn reset_dir(path: &Path) -> io::Result<()> {
    remove_path_if_exists(path)?;
    create_private_dir_all(path)
}
