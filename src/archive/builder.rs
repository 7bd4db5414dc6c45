//! Deterministic tar construction from a directory tree
//!
//! Entries are emitted depth-first with siblings sorted by name, which is the
//! component-wise lexicographic order of their relative paths. Symlinks are
//! recorded as symlinks with their literal target and never followed.
//! Timestamps and ownership are zeroed so the same tree always produces the
//! same bytes.

use crate::error::{StageError, StageResult};
use flate2::{write::GzEncoder, Compression};
use std::fs::{self, File, Metadata};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tar::{EntryType, Header};
use tracing::debug;
use walkdir::WalkDir;

/// Append every entry under `source_dir` to `builder`.
///
/// Does not call `finish`; the caller owns the archive trailer.
pub fn build_archive<W: Write>(source_dir: &Path, builder: &mut tar::Builder<W>) -> StageResult<()> {
    builder.follow_symlinks(false);

    let archive_err = |source: io::Error| StageError::Archive {
        path: source_dir.to_path_buf(),
        source,
    };

    for entry in WalkDir::new(source_dir)
        .follow_links(false)
        .sort_by_file_name()
        .min_depth(1)
    {
        let entry = entry.map_err(|e| archive_err(e.into()))?;
        let path = entry.path();
        let rel = path
            .strip_prefix(source_dir)
            .map_err(|e| StageError::Internal(format!("walked outside {}: {e}", source_dir.display())))?;

        let metadata = fs::symlink_metadata(path).map_err(archive_err)?;
        let file_type = metadata.file_type();

        let mut header = Header::new_gnu();
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);

        if file_type.is_dir() {
            header.set_entry_type(EntryType::Directory);
            header.set_mode(mode_of(&metadata, 0o755));
            header.set_size(0);
            builder
                .append_data(&mut header, rel, io::empty())
                .map_err(archive_err)?;
        } else if file_type.is_file() {
            header.set_entry_type(EntryType::Regular);
            header.set_mode(mode_of(&metadata, 0o644));
            header.set_size(metadata.len());
            let file = File::open(path).map_err(archive_err)?;
            builder
                .append_data(&mut header, rel, file)
                .map_err(archive_err)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(path).map_err(archive_err)?;
            header.set_entry_type(EntryType::Symlink);
            header.set_mode(0o777);
            header.set_size(0);
            builder
                .append_link(&mut header, rel, &target)
                .map_err(archive_err)?;
        } else {
            debug!(path = %path.display(), "skipping special file during archive");
        }
    }

    Ok(())
}

/// Write a complete, finished tar of `source_dir` into `writer`
pub fn write_tar<W: Write>(source_dir: &Path, writer: W) -> StageResult<W> {
    let mut builder = tar::Builder::new(writer);
    build_archive(source_dir, &mut builder)?;
    builder.into_inner().map_err(|source| StageError::Archive {
        path: source_dir.to_path_buf(),
        source,
    })
}

/// Tar `source_dir` into an in-memory buffer
pub fn tar_bytes(source_dir: &Path) -> StageResult<Vec<u8>> {
    write_tar(source_dir, Vec::new())
}

/// Write a gzip-compressed tar of `source_dir` to `dest`, truncating it first
pub fn write_tgz(source_dir: &Path, dest: &Path) -> StageResult<PathBuf> {
    let archive_err = |source: io::Error| StageError::Archive {
        path: dest.to_path_buf(),
        source,
    };

    let file = File::create(dest).map_err(archive_err)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let encoder = write_tar(source_dir, encoder)?;
    let mut file = encoder.finish().map_err(archive_err)?;
    file.flush().map_err(archive_err)?;

    debug!(source = %source_dir.display(), dest = %dest.display(), "wrote archive");
    Ok(dest.to_path_buf())
}

#[cfg(unix)]
fn mode_of(metadata: &Metadata, _fallback: u32) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(metadata: &Metadata, fallback: u32) -> u32 {
    if metadata.permissions().readonly() {
        fallback & !0o222
    } else {
        fallback
    }
}
