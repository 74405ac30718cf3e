//! On-disk layout helpers rooted at `UPLOAD_DIR` (see spec §6).
use crate::config;
use chrono::{DateTime, Utc};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Global upload root (absolute), from `config::upload_dir()`.
/// If relative in env, resolve against current_dir().
pub fn upload_root() -> PathBuf {
    let root = config::upload_dir();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Canonical timestamp string used in directory names: `YYYY-MM-DD-HH-MM-SS`.
pub fn ts_dirname(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d-%H-%M-%S").to_string()
}

/// `{UPLOAD_DIR}/{user_id}`
pub fn user_dir(user_id: &str) -> PathBuf {
    upload_root().join(user_id)
}

/// `{UPLOAD_DIR}/{user_id}/{ts}-{submission_id}` — single-submission uploads.
pub fn single_submission_dir(user_id: &str, ts: DateTime<Utc>, submission_id: i64) -> PathBuf {
    user_dir(user_id).join(format!("{}-{}", ts_dirname(ts), submission_id))
}

/// `{UPLOAD_DIR}/{user_id}/format-check/{lecture_id}`
pub fn self_check_lecture_dir(user_id: &str, lecture_id: i64) -> PathBuf {
    user_dir(user_id)
        .join("format-check")
        .join(lecture_id.to_string())
}

/// `{UPLOAD_DIR}/{user_id}/format-check/{lecture_id}/{ts}` — self-check expansion.
pub fn self_check_dir(user_id: &str, lecture_id: i64, ts: DateTime<Utc>) -> PathBuf {
    self_check_lecture_dir(user_id, lecture_id).join(ts_dirname(ts))
}

/// `{UPLOAD_DIR}/batch`
pub fn batch_root() -> PathBuf {
    upload_root().join("batch")
}

/// `{UPLOAD_DIR}/batch/{ts}-{batch_id}`
pub fn batch_dir(ts: DateTime<Utc>, batch_id: i64) -> PathBuf {
    batch_root().join(format!("{}-{}", ts_dirname(ts), batch_id))
}

/// `{UPLOAD_DIR}/batch/{ts}-{batch_id}/reportlist.xlsx`
pub fn batch_roster_path(ts: DateTime<Utc>, batch_id: i64, ext: &str) -> PathBuf {
    batch_dir(ts, batch_id).join(format!("reportlist.{ext}"))
}

/// `{UPLOAD_DIR}/batch/{ts}-{batch_id}/{user_id}`
pub fn batch_student_dir(ts: DateTime<Utc>, batch_id: i64, user_id: &str) -> PathBuf {
    batch_dir(ts, batch_id).join(user_id)
}

/// `{UPLOAD_DIR}/problems/{problem_id}/arranged` — where pre-seeded
/// ArrangedFiles for a problem live on disk, keyed by filename.
pub fn problem_arranged_dir(problem_id: i64) -> PathBuf {
    upload_root()
        .join("problems")
        .join(problem_id.to_string())
        .join("arranged")
}

/// Resolve a path stored as relative-to-`UPLOAD_DIR` into an absolute path.
/// Per spec §9, uploaded-file paths are always recorded relative; callers
/// join with the upload root at access time.
pub fn resolve(relative: &str) -> PathBuf {
    upload_root().join(relative)
}

/// Turn an absolute path rooted under `upload_root()` back into the
/// relative form that gets persisted in an UploadedFile row.
pub fn to_relative(absolute: &Path) -> io::Result<String> {
    let root = upload_root();
    absolute
        .strip_prefix(&root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path is not under upload root"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serial_test::serial;
    use tempfile::TempDir;

    fn set_root(root: &Path) {
        unsafe {
            std::env::set_var("UPLOAD_DIR", root.to_str().unwrap());
        }
    }

    #[test]
    #[serial]
    fn builds_expected_single_submission_path() {
        let td = TempDir::new().unwrap();
        set_root(td.path());

        let ts = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
        let p = single_submission_dir("s001", ts, 42);
        assert_eq!(p, td.path().join("s001").join("2026-03-05-09-30-00-42"));
    }

    #[test]
    #[serial]
    fn relative_round_trips_through_resolve() {
        let td = TempDir::new().unwrap();
        set_root(td.path());

        let abs = td.path().join("s001").join("file.c");
        let rel = to_relative(&abs).unwrap();
        assert_eq!(rel, "s001/file.c");
        assert_eq!(resolve(&rel), abs);
    }
}
