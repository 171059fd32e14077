use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ChartError, ChartResult};
use crate::render::RenderSurface;

use super::{Chart, ChartKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

/// One exported image ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    #[must_use]
    pub fn new(stem: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{stem}.{}", format.extension()),
            format,
            bytes,
        }
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Destination for exported files (a download prompt, a directory, memory).
pub trait ExportSink {
    fn deliver(&mut self, file: ExportedFile) -> ChartResult<()>;
}

/// Collects exported files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<ExportedFile>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn files(&self) -> &[ExportedFile] {
        &self.files
    }

    #[must_use]
    pub fn into_files(self) -> Vec<ExportedFile> {
        self.files
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file: ExportedFile) -> ChartResult<()> {
        self.files.push(file);
        Ok(())
    }
}

/// Writes exported files into a directory, replacing same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> ChartResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ChartError::Export(format!(
                "export directory does not exist: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: ExportedFile) -> ChartResult<()> {
        let path = self.root.join(&file.file_name);
        fs::write(&path, &file.bytes)?;
        info!(path = %path.display(), bytes = file.bytes.len(), "wrote export");
        Ok(())
    }
}

/// Serializes `surface` as `<stem>.svg` and hands it to `sink`.
pub fn export_scene_svg<S: RenderSurface + ?Sized>(
    surface: &S,
    stem: &str,
    sink: &mut dyn ExportSink,
) -> ChartResult<()> {
    let markup = surface.serialize()?;
    sink.deliver(ExportedFile::new(stem, ExportFormat::Svg, markup.into_bytes()))
}

/// Rasterizes `surface` as `<stem>.png` and hands it to `sink`.
#[cfg(feature = "cairo-backend")]
pub fn export_scene_png<S: RenderSurface + ?Sized>(
    surface: &S,
    stem: &str,
    sink: &mut dyn ExportSink,
) -> ChartResult<()> {
    if surface.is_disposed() {
        return Err(ChartError::SurfaceDisposed);
    }
    let bytes = crate::render::rasterize_png(&surface.snapshot())?;
    sink.deliver(ExportedFile::new(stem, ExportFormat::Png, bytes))
}

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Delivers the current drawing as `<kind>.svg`.
    pub fn export_svg(&self, sink: &mut dyn ExportSink) -> ChartResult<()> {
        export_scene_svg(&self.surface, K::FILE_STEM, sink)
    }

    /// Delivers the current drawing rasterized at the configured size as
    /// `<kind>.png`.
    #[cfg(feature = "cairo-backend")]
    pub fn export_png(&self, sink: &mut dyn ExportSink) -> ChartResult<()> {
        export_scene_png(&self.surface, K::FILE_STEM, sink)
    }
}
