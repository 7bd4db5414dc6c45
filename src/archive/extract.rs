//! Unpacking fetched buildpack bundles

use flate2::read::MultiGzDecoder;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Unpack a tar or gzip-compressed tar stream into `dest`.
///
/// Compression is detected from the stream's magic bytes. `dest` is created
/// if missing. Entry permissions are preserved; entries that would land
/// outside `dest` are skipped by the tar reader.
pub fn extract_bundle<R: Read>(mut reader: R, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    // `take` keeps reading through short reads until the magic is complete or EOF
    let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
    (&mut reader)
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    let gzipped = magic == GZIP_MAGIC;
    let stream = Cursor::new(magic).chain(reader);
    if gzipped {
        unpack(MultiGzDecoder::new(stream), dest)
    } else {
        unpack(stream, dest)
    }
}

fn unpack<R: Read>(reader: R, dest: &Path) -> io::Result<()> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);
    archive.unpack(dest)
}
