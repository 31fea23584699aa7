//! Reunión de entradas: archivos sueltos, directorios y archivos ZIP se
//! convierten en buffers en memoria listos para el agregador.

use crate::analyzers::ImageFormat;
use crate::error::SourceError;
use crate::metadata::mime::declared_mime_type;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;
const DEFAULT_MAX_FILES: usize = 10_000;

/// Entrada del lote: nombre declarado, tipo MIME declarado y contenido.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Deriva el tipo MIME del nombre y, si no basta, del contenido.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = declared_mime_type(&name, &data);
        Self::new(name, mime_type, data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Recorre subdirectorios.
    pub recursive: bool,
    /// Los archivos mayores se omiten con una advertencia.
    pub max_file_size: u64,
    /// Expande los `.zip` pasados como entrada.
    pub include_archives: bool,
    /// Tope de entradas por ejecución.
    pub max_files: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            include_archives: true,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// Reúne las entradas en el orden dado; dentro de un directorio, ordenadas
/// por nombre.
pub fn collect_sources<P: AsRef<Path>>(
    paths: &[P],
    options: &SourceOptions,
) -> Result<Vec<SourceFile>, SourceError> {
    let mut collector = Collector {
        options,
        files: Vec::new(),
    };

    for path in paths {
        let path = path.as_ref();
        if collector.is_full() {
            break;
        }

        if path.is_dir() {
            collector.add_directory(path)?;
        } else if path.is_file() {
            collector.add_file(path)?;
        } else {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
    }

    Ok(collector.files)
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn is_image_name(name: &str) -> bool {
    ImageFormat::from_filename(Some(name)).is_known()
}

struct Collector<'a> {
    options: &'a SourceOptions,
    files: Vec<SourceFile>,
}

impl Collector<'_> {
    fn is_full(&self) -> bool {
        self.files.len() >= self.options.max_files
    }

    fn push(&mut self, file: SourceFile) {
        if self.is_full() {
            tracing::warn!(
                limit = self.options.max_files,
                file = %file.name,
                "file limit reached, skipping remaining entries"
            );
            return;
        }
        self.files.push(file);
    }

    fn within_size_limit(&self, name: &str, size: u64) -> bool {
        if size > self.options.max_file_size {
            tracing::warn!(
                file = name,
                size,
                limit = self.options.max_file_size,
                "file skipped, exceeds maximum size"
            );
            return false;
        }
        true
    }

    fn add_directory(&mut self, dir: &Path) -> Result<(), SourceError> {
        let max_depth = if self.options.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !is_image_name(&entry.file_name().to_string_lossy()) {
                tracing::debug!(path = %entry.path().display(), "unsupported extension");
                continue;
            }
            self.add_file(entry.path())?;
            if self.is_full() {
                break;
            }
        }
        Ok(())
    }

    fn add_file(&mut self, path: &Path) -> Result<(), SourceError> {
        if self.options.include_archives && is_archive(path) {
            return self.add_archive(path);
        }

        let name = path.display().to_string();
        let size = fs::metadata(path)
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if !self.within_size_limit(&name, size) {
            return Ok(());
        }

        let data = fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.push(SourceFile::from_bytes(name, data));
        Ok(())
    }

    fn add_archive(&mut self, path: &Path) -> Result<(), SourceError> {
        let io_error = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let archive_error = |source| SourceError::Archive {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let mut archive = zip::ZipArchive::new(file).map_err(archive_error)?;
        tracing::debug!(archive = %path.display(), entries = archive.len(), "expanding ZIP archive");

        for index in 0..archive.len() {
            if self.is_full() {
                break;
            }

            let mut entry = archive.by_index(index).map_err(archive_error)?;
            if entry.is_dir() || !is_image_name(entry.name()) {
                continue;
            }

            let name = entry.name().to_string();
            if !self.within_size_limit(&name, entry.size()) {
                continue;
            }

            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data).map_err(io_error)?;
            let mime_type = ImageFormat::from_filename(Some(&name)).mime_type();
            self.push(SourceFile::new(name, mime_type, data));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = ZipWriter::new(File::create(path)?);
        let options = SimpleFileOptions::default();
        writer.add_directory("nested/", options)?;
        for (name, contents) in entries {
            writer.start_file(*name, options)?;
            writer.write_all(contents)?;
        }
        writer.finish()?;
        Ok(())
    }

    #[test]
    fn directory_walk_is_sorted_and_filtered() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.png"), b"png")?;
        fs::write(dir.path().join("a.GIF"), b"gif")?;
        fs::write(dir.path().join("notes.txt"), b"text")?;
        fs::create_dir(dir.path().join("deep"))?;
        fs::write(dir.path().join("deep").join("c.bmp"), b"bmp")?;

        let shallow = collect_sources(&[dir.path()], &SourceOptions::default())?;
        let names: Vec<_> = shallow
            .iter()
            .filter_map(|file| Path::new(&file.name).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.GIF", "b.png"]);
        assert_eq!(shallow[0].mime_type, "image/gif");
        assert_eq!(shallow[1].data, b"png");

        let options = SourceOptions {
            recursive: true,
            ..SourceOptions::default()
        };
        let deep = collect_sources(&[dir.path()], &options)?;
        assert_eq!(deep.len(), 3);
        assert!(deep.iter().any(|file| file.name.ends_with("c.bmp")));
        Ok(())
    }

    #[test]
    fn explicit_files_keep_any_extension() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("upload.bin");
        fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\x0dIHDR")?;

        let files = collect_sources(&[&path], &SourceOptions::default())?;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime_type, "image/png");
        Ok(())
    }

    #[test]
    fn zip_entries_are_expanded_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("batch.zip");
        write_zip(
            &path,
            &[
                ("nested/scan.pcx", &b"\x0a\x05\x05\x01"[..]),
                ("readme.md", &b"skip"[..]),
                ("photo.jpeg", &b"\xff\xd8"[..]),
            ],
        )?;

        let files = collect_sources(&[&path], &SourceOptions::default())?;
        let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, vec!["nested/scan.pcx", "photo.jpeg"]);
        assert_eq!(files[0].mime_type, "image/x-pcx");
        assert_eq!(files[1].data, b"\xff\xd8");

        let options = SourceOptions {
            include_archives: false,
            ..SourceOptions::default()
        };
        let raw = collect_sources(&[&path], &options)?;
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].mime_type, "application/zip");
        Ok(())
    }

    #[test]
    fn limits_skip_large_files_and_cap_count() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("big.png"), vec![0_u8; 32])?;
        fs::write(dir.path().join("small.png"), vec![0_u8; 8])?;
        fs::write(dir.path().join("tiny.png"), vec![0_u8; 4])?;

        let options = SourceOptions {
            max_file_size: 16,
            ..SourceOptions::default()
        };
        let files = collect_sources(&[dir.path()], &options)?;
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|file| !file.name.ends_with("big.png")));

        let options = SourceOptions {
            max_files: 1,
            ..SourceOptions::default()
        };
        let files = collect_sources(&[dir.path(), dir.path()], &options)?;
        assert_eq!(files.len(), 1);
        assert!(files[0].name.ends_with("big.png"));
        Ok(())
    }

    #[test]
    fn missing_path_is_an_error() {
        let result = collect_sources(&["/definitely/not/here.png"], &SourceOptions::default());
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[test]
    fn options_deserialize_with_defaults() -> Result<(), serde_json::Error> {
        let options: SourceOptions = serde_json::from_str(r#"{"recursive": true}"#)?;
        assert!(options.recursive);
        assert_eq!(options.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert!(options.include_archives);
        Ok(())
    }
}
