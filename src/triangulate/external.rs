//! Mesh provider backed by an external geometry process.
//!
//! The process is run once, synchronously, with the source image path and a
//! sample count appended to its arguments. On success it must leave a mesh
//! JSON file behind; any failure along the way aborts the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbaImage;
use tracing::debug;

use crate::error::{Result, TesseraError};
use crate::types::Mesh;

use super::{MeshProvider, DEFAULT_SAMPLES};

/// File the provider is expected to write, relative to its working directory.
pub const DEFAULT_RESULT_FILE: &str = "triangles.json";

/// Runs an external program to triangulate the source image.
#[derive(Debug, Clone)]
pub struct ExternalMeshProvider {
    program: PathBuf,
    args: Vec<String>,
    samples: usize,
    result_file: PathBuf,
    working_dir: Option<PathBuf>,
}

impl ExternalMeshProvider {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            samples: DEFAULT_SAMPLES,
            result_file: PathBuf::from(DEFAULT_RESULT_FILE),
            working_dir: None,
        }
    }

    /// Arguments placed before the source path and sample count.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_result_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_file = path.into();
        self
    }

    /// Run the process in `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Where the result file is read from.
    pub fn result_path(&self) -> PathBuf {
        match &self.working_dir {
            Some(dir) => dir.join(&self.result_file),
            None => self.result_file.clone(),
        }
    }

    fn run(&self, source_path: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(source_path)
            .arg(self.samples.to_string());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program.display(), args = ?self.args, "running mesh provider");

        let output = cmd.output().map_err(|e| TesseraError::MeshProcess {
            message: format!("Failed to start {}: {}", self.program.display(), e),
            help: Some("Check that the mesh command is installed and on PATH".to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TesseraError::MeshProcess {
                message: format!("{} exited with {}", self.program.display(), output.status),
                help: (!stderr.trim().is_empty()).then(|| stderr.trim().to_string()),
            });
        }

        Ok(())
    }
}

impl MeshProvider for ExternalMeshProvider {
    fn name(&self) -> &str {
        "external"
    }

    fn mesh(&self, source_path: &Path, _source: &RgbaImage) -> Result<Mesh> {
        self.run(source_path)?;

        let path = self.result_path();
        let json = fs::read_to_string(&path).map_err(|e| TesseraError::Io {
            path: path.clone(),
            message: format!("Failed to read mesh: {}", e),
        })?;

        Mesh::from_json(&json).map_err(|e| TesseraError::MeshFormat {
            path,
            message: e.to_string(),
        })
    }
}
