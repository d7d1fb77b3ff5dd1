//! Zip container adapter - Implementation of ArchiveReader.
//!
//! BCF archives are plain zip files. Entries are looked up by their full
//! name (`{topic}/{filename}`).

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::sync::Mutex;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::ports::{ArchiveError, ArchiveReader, EntryStream};

/// Zip-backed archive reader.
///
/// The underlying `ZipArchive` needs `&mut` access to seek, so lookups
/// are serialized through a mutex. Each opened entry is decompressed into
/// an owned buffer before the lock is released.
///
/// # Usage
///
/// ```rust,ignore
/// let archive = ZipArchiveReader::open("issues.bcfzip")?;
/// for name in archive.entry_names() {
///     println!("{}", name);
/// }
/// ```
#[derive(Debug)]
pub struct ZipArchiveReader<R> {
    archive: Mutex<ZipArchive<R>>,
    names: Vec<String>,
}

impl ZipArchiveReader<Cursor<Vec<u8>>> {
    /// Reads an archive held in memory, e.g. an uploaded file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        Self::new(Cursor::new(bytes))
    }
}

impl ZipArchiveReader<File> {
    /// Opens an archive on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            ArchiveError::Open(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipArchiveReader<R> {
    /// Wraps any seekable reader holding a zip container.
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| ArchiveError::Open(e.to_string()))?;

        let mut names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive
                .by_index(index)
                .map_err(|e| ArchiveError::Open(e.to_string()))?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }

        Ok(Self {
            archive: Mutex::new(archive),
            names,
        })
    }

    /// Number of file entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<R: Read + Seek + Send> ArchiveReader for ZipArchiveReader<R> {
    fn entry_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn find_entry(&self, path: &str) -> Result<Option<EntryStream>, ArchiveError> {
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| ArchiveError::read(path, "archive lock poisoned"))?;

        let mut entry = match archive.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(ArchiveError::read(path, e.to_string())),
        };
        if entry.is_dir() {
            return Ok(None);
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::read(path, e.to_string()))?;

        Ok(Some(Box::new(Cursor::new(bytes))))
    }
}
