//! File-based wrappers
//!
//! The string-based [`Transpiler::convert`] is the core operation; the
//! functions here read the input file first, or write the generated units
//! out as one `.java` file per class.

use crate::nova::codegen::GeneratedProgram;
use crate::nova::pipeline::transpiler::{Conversion, Transpiler};
use crate::nova::rules::RuleError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors from file-based pipeline operations
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Io { path: String, message: String },
    Rules(RuleError),
}

impl PipelineError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io { path, message } => write!(f, "{}: {}", path, message),
            PipelineError::Rules(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<RuleError> for PipelineError {
    fn from(err: RuleError) -> Self {
        PipelineError::Rules(err)
    }
}

impl Transpiler {
    /// Read and convert a pseudocode file
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Conversion, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Ok(self.convert(&source))
    }
}

/// Write every unit of `program` into `dir`, creating it if needed.
///
/// Returns the written paths in unit order.
pub fn emit_units(
    program: &GeneratedProgram,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut written = Vec::with_capacity(program.units.len());
    for unit in &program.units {
        let path = dir.join(&unit.file_name);
        fs::write(&path, &unit.source).map_err(|e| PipelineError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "wrote unit");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_missing_file() {
        let err = Transpiler::default()
            .convert_file("/no/such/file.nova")
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_emit_units_writes_one_file_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let conversion = Transpiler::default().convert("class A\nclass B\nprint 1\n");
        let written = emit_units(&conversion.program, dir.path().join("out")).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("A.java"));
        let b = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(b, conversion.program.unit("B").unwrap().source);
    }
}
