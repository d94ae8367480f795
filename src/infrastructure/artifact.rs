//! 결과 파일(patch.txt 등) 원자적 기록.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::domain::error::ArtifactError;

/// `content`로 `path`를 덮어쓴다.
/// 같은 디렉터리의 임시 파일에 먼저 쓰고 rename 하므로 실패해도 부분 파일이 남지 않는다.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), ArtifactError> {
    let err = |source: std::io::Error| ArtifactError {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if path.is_dir() {
        return Err(err(std::io::Error::new(
            std::io::ErrorKind::IsADirectory,
            "target path is a directory",
        )));
    }

    let mut tmp = temp_file_in(parent).map_err(err)?;
    tmp.write_all(content.as_bytes()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;

    let permissions = fs::metadata(path).ok().map(|m| m.permissions());
    tmp.persist(path).map_err(|e| err(e.error))?;
    if let Some(permissions) = permissions {
        fs::set_permissions(path, permissions).map_err(err)?;
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

/// 새 파일은 umask를 따르도록 0666으로 연다(`NamedTempFile` 기본값은 0600).
#[cfg(unix)]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(parent)
}

#[cfg(not(unix))]
fn temp_file_in(parent: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new().tempfile_in(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_file_with_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.txt");

        write_artifact(&path, "```diff\n+x\n```").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "```diff\n+x\n```");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.txt");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        write_artifact(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn new_file_mode_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.txt");
        fs::write(&reference, "x").unwrap();
        let path = dir.path().join("patch.txt");

        write_artifact(&path, "x").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.txt");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_artifact(&path, "new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn missing_directory_fails_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("patch.txt");

        let err = write_artifact(&path, "data").unwrap_err();

        assert_eq!(err.path, path);
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn directory_target_fails_and_is_untouched() {
        let dir = tempfile::tempdir().unwrap();

        let err = write_artifact(dir.path(), "data").unwrap_err();

        assert_eq!(err.path, dir.path());
        assert!(dir.path().is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
