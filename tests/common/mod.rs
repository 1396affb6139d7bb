//! Shared fixture builders for the integration tests.
//!
//! Every fixture holds the same tree: a `foo` directory, `foo/baar.txt`
//! (27 bytes) and `foo/bazz` (5 bytes).

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const BAAR: &[u8] = b"das Pferd isst Gurkensalat\n";
pub const BAZZ: &[u8] = b"bazz\n";

/// Fixture file names, one per supported format.
pub const FIXTURES: [&str; 5] = [
    "test.cpio",
    "test.tar.gz",
    "test.tar.bz2",
    "test.tar.xz",
    "test.zip",
];

/// Write every fixture into `dir`.
pub fn write_all_fixtures(dir: &Path) {
    for name in FIXTURES {
        write_fixture(dir, name);
    }
}

/// Write the fixture `name` into `dir`, choosing the format by suffix.
pub fn write_fixture(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();

    if name.ends_with(".cpio") {
        write_cpio(file, &fixture_files());
    } else if name.ends_with(".tar.gz") {
        let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        write_tar(enc, &fixture_files()).finish().unwrap();
    } else if name.ends_with(".tar.bz2") {
        let enc = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
        write_tar(enc, &fixture_files()).finish().unwrap();
    } else if name.ends_with(".tar.xz") {
        let enc = xz2::write::XzEncoder::new(file, 6);
        write_tar(enc, &fixture_files()).finish().unwrap();
    } else if name.ends_with(".zip") {
        write_zip(file, &fixture_files());
    } else {
        panic!("no fixture writer for {}", name);
    }

    path
}

/// (name, content) pairs; a `None` content marks a directory.
pub fn fixture_files() -> Vec<(&'static str, Option<&'static [u8]>)> {
    vec![
        ("foo", None),
        ("foo/baar.txt", Some(BAAR)),
        ("foo/bazz", Some(BAZZ)),
    ]
}

/// Write a newc cpio archive.
pub fn write_cpio<W: Write>(mut w: W, files: &[(&str, Option<&[u8]>)]) -> W {
    for (name, content) in files {
        let (mode, data) = match content {
            Some(data) => (0o100644, *data),
            None => (0o040755, &[][..]),
        };
        let mut writer = cpio::newc::Builder::new(name)
            .mode(mode)
            .write(w, data.len() as u32);
        writer.write_all(data).unwrap();
        w = writer.finish().unwrap();
    }
    cpio::newc::trailer(w).unwrap()
}

/// Write a tar stream into `w` and return the inner writer.
pub fn write_tar<W: Write>(w: W, files: &[(&str, Option<&[u8]>)]) -> W {
    let mut builder = tar::Builder::new(w);

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        match content {
            Some(data) => {
                header.set_path(name).unwrap();
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                header.set_entry_type(tar::EntryType::Regular);
                header.set_cksum();
                builder.append(&header, *data).unwrap();
            }
            None => {
                header.set_path(format!("{}/", name)).unwrap();
                header.set_size(0);
                header.set_mode(0o755);
                header.set_entry_type(tar::EntryType::Directory);
                header.set_cksum();
                builder.append(&header, &[][..]).unwrap();
            }
        }
    }

    builder.into_inner().unwrap()
}

/// Write a zip archive.
pub fn write_zip<W: Write + std::io::Seek>(w: W, files: &[(&str, Option<&[u8]>)]) -> W {
    let mut zip = zip::ZipWriter::new(w);
    let options: zip::write::FileOptions<()> =
        zip::write::FileOptions::default().unix_permissions(0o644);

    for (name, content) in files {
        match content {
            Some(data) => {
                zip.start_file(*name, options).unwrap();
                zip.write_all(data).unwrap();
            }
            None => {
                zip.add_directory(format!("{}/", name), options.unix_permissions(0o755))
                    .unwrap();
            }
        }
    }

    zip.finish().unwrap()
}

/// Write a `.tar.gz` archive with the given entries.
pub fn write_tar_gz(dir: &Path, name: &str, files: &[(&str, Option<&[u8]>)]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    write_tar(enc, files).finish().unwrap();
    path
}

/// Write a zip archive with the given entries.
pub fn write_zip_file(dir: &Path, name: &str, files: &[(&str, Option<&[u8]>)]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    write_zip(file, files);
    path
}

/// Write a cpio archive with the given entries.
pub fn write_cpio_file(dir: &Path, name: &str, files: &[(&str, Option<&[u8]>)]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    write_cpio(file, files);
    path
}
