//! Archive handler (spec §4.B): validates and unfolds a student/grader ZIP
//! into a canonical flat directory layout.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnfoldError {
    #[error("file name must end in .zip")]
    NotAZip,
    #[error("archive could not be opened: {0}")]
    Corrupt(String),
    #[error("uncompressed size exceeds the {0} byte limit")]
    TooLarge(u64),
    #[error("archive contains a path that escapes the destination directory")]
    ZipSlip,
    #[error("archive is empty")]
    Empty,
    #[error("archive still contains a subdirectory after flattening")]
    NestedDirectory,
    #[error("archive still contains a nested .zip file after flattening")]
    NestedZip,
    #[error("io error: {0}")]
    Io(String),
}

impl From<io::Error> for UnfoldError {
    fn from(e: io::Error) -> Self {
        UnfoldError::Io(e.to_string())
    }
}

/// Validate `zip_path`'s name, extract into `dest_dir`, flatten a single
/// wrapping directory, and reject any shape the judging protocol can't
/// trust (nested directories, nested zips, oversized archives).
///
/// On any rejection the caller is expected to remove `dest_dir`; this
/// function does not clean up after itself so partial extraction state
/// stays inspectable by the caller if needed.
pub fn unfold(zip_path: &Path, dest_dir: &Path, max_uncompressed_bytes: u64) -> Result<(), UnfoldError> {
    let name = zip_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if !name.to_ascii_lowercase().ends_with(".zip") {
        return Err(UnfoldError::NotAZip);
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;

    let mut total: u64 = 0;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;
        total += entry.size();
        if total > max_uncompressed_bytes {
            return Err(UnfoldError::TooLarge(max_uncompressed_bytes));
        }
    }

    fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;
        let outpath = match entry.enclosed_name() {
            Some(p) => dest_dir.join(p),
            None => return Err(UnfoldError::ZipSlip),
        };
        if !outpath.starts_with(dest_dir) {
            return Err(UnfoldError::ZipSlip);
        }

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile)?;
        }
    }

    if is_empty_dir(dest_dir)? {
        return Err(UnfoldError::Empty);
    }

    flatten_single_root(dest_dir)?;

    reject_nested(dest_dir)?;

    Ok(())
}

/// Extract `zip_path` into `dest_dir` as-is, preserving its directory tree.
/// Used for the grader-level batch archive, which legitimately contains a
/// roster file and one subdirectory per student — unlike [`unfold`], this
/// does not flatten or reject nested directories.
pub fn extract_tree(zip_path: &Path, dest_dir: &Path, max_uncompressed_bytes: u64) -> Result<(), UnfoldError> {
    let name = zip_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if !name.to_ascii_lowercase().ends_with(".zip") {
        return Err(UnfoldError::NotAZip);
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;

    let mut total: u64 = 0;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;
        total += entry.size();
        if total > max_uncompressed_bytes {
            return Err(UnfoldError::TooLarge(max_uncompressed_bytes));
        }
    }

    fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| UnfoldError::Corrupt(e.to_string()))?;
        let outpath = match entry.enclosed_name() {
            Some(p) => dest_dir.join(p),
            None => return Err(UnfoldError::ZipSlip),
        };
        if !outpath.starts_with(dest_dir) {
            return Err(UnfoldError::ZipSlip);
        }

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile)?;
        }
    }

    if is_empty_dir(dest_dir)? {
        return Err(UnfoldError::Empty);
    }

    Ok(())
}

/// Build a ZIP at `dest_zip` containing each `(archive_name, source_path)`
/// pair, used for on-demand file-bundle downloads (spec §4.G).
pub fn build_zip(dest_zip: &Path, entries: &[(String, PathBuf)]) -> io::Result<()> {
    let file = File::create(dest_zip)?;
    let mut zw = ZipWriter::new(file);
    let options: FileOptions<()> = FileOptions::default();

    for (archive_name, source_path) in entries {
        zw.start_file(archive_name, options)?;
        let mut src = File::open(source_path)?;
        io::copy(&mut src, &mut zw)?;
    }

    zw.finish()?;
    Ok(())
}

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

/// If `dest_dir` contains exactly one entry and it's a directory, move
/// its contents up one level and remove the now-empty shell.
fn flatten_single_root(dest_dir: &Path) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dest_dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();

    if entries.len() == 1 && entries[0].is_dir() {
        let shell = entries.remove(0);
        for child in fs::read_dir(&shell)? {
            let child = child?.path();
            let target = dest_dir.join(child.file_name().unwrap());
            fs::rename(&child, &target)?;
        }
        fs::remove_dir(&shell)?;
    }

    Ok(())
}

/// Reject if the flattened directory still has any subdirectory or `.zip`.
fn reject_nested(dest_dir: &Path) -> Result<(), UnfoldError> {
    for entry in fs::read_dir(dest_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            return Err(UnfoldError::NestedDirectory);
        }
        if path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("zip"))
            .unwrap_or(false)
        {
            return Err(UnfoldError::NestedZip);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zw = ZipWriter::new(file);
        let options: FileOptions<()> = FileOptions::default();
        for (name, bytes) in entries {
            zw.start_file(*name, options).unwrap();
            zw.write_all(bytes).unwrap();
        }
        zw.finish().unwrap();
    }

    #[test]
    fn rejects_non_zip_filename() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("archive.tar");
        fs::write(&src, b"not a zip").unwrap();
        let dest = td.path().join("out");
        assert_eq!(unfold(&src, &dest, 1024), Err(UnfoldError::NotAZip));
    }

    #[test]
    fn flattens_single_wrapping_directory() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(
            &src,
            &[
                ("root/main.c", b"int main(){}"),
                ("root/Makefile", b"all:"),
            ],
        );
        let dest = td.path().join("out");
        unfold(&src, &dest, 1024 * 1024).unwrap();
        assert!(dest.join("main.c").exists());
        assert!(dest.join("Makefile").exists());
        assert!(!dest.join("root").exists());
    }

    #[test]
    fn flat_layout_is_accepted_unchanged() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(&src, &[("main.c", b"int main(){}")]);
        let dest = td.path().join("out");
        unfold(&src, &dest, 1024 * 1024).unwrap();
        assert!(dest.join("main.c").exists());
    }

    #[test]
    fn rejects_nested_directory_after_flatten() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(&src, &[("a/b/main.c", b"x")]);
        let dest = td.path().join("out");
        let err = unfold(&src, &dest, 1024 * 1024).unwrap_err();
        assert_eq!(err, UnfoldError::NestedDirectory);
    }

    #[test]
    fn rejects_nested_zip_after_flatten() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(&src, &[("inner.zip", b"fake")]);
        let dest = td.path().join("out");
        let err = unfold(&src, &dest, 1024 * 1024).unwrap_err();
        assert_eq!(err, UnfoldError::NestedZip);
    }

    #[test]
    fn rejects_oversized_archive() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(&src, &[("main.c", &vec![0u8; 2048])]);
        let dest = td.path().join("out");
        let err = unfold(&src, &dest, 1024).unwrap_err();
        assert_eq!(err, UnfoldError::TooLarge(1024));
    }

    #[test]
    fn rejects_empty_archive() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("submission.zip");
        write_zip(&src, &[]);
        let dest = td.path().join("out");
        let err = unfold(&src, &dest, 1024 * 1024).unwrap_err();
        assert_eq!(err, UnfoldError::Empty);
    }

    #[test]
    fn build_zip_contains_given_entries() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("main.c");
        fs::write(&src, b"int main(){}").unwrap();

        let dest_zip = td.path().join("bundle.zip");
        build_zip(&dest_zip, &[("main.c".to_string(), src.clone())]).unwrap();

        let file = File::open(&dest_zip).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "main.c");
    }

    #[test]
    fn extract_tree_preserves_subdirectories() {
        let td = TempDir::new().unwrap();
        let src = td.path().join("batch.zip");
        write_zip(
            &src,
            &[
                ("reportlist.xlsx", b"fake"),
                ("100000001@1234567890123/class1.zip", b"fake"),
            ],
        );
        let dest = td.path().join("out");
        extract_tree(&src, &dest, 1024 * 1024).unwrap();
        assert!(dest.join("reportlist.xlsx").exists());
        assert!(dest.join("100000001@1234567890123").join("class1.zip").exists());
    }
}
