//! Shader stages and programs.
//!
//! A [`Stage`] holds the source of one shader stage and compiles it. A [`Program`] links a vertex
//! stage, an optional geometry stage and a fragment stage together; it shares the ownership of its
//! stages, which then live as long as the longest-lived program using them.
//!
//! Errors are reported in two different ways. A stage failing to compile is an error
//! ([`StageError`]) carrying the compilation log: sources are usually fixed and retried. A program
//! failing to link is only reported by [`Program::link`] returning `false` and by its
//! [`Program::link_log`]. Setting a uniform that does not exist is a no-op.

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub mod program;
pub mod stage;
pub mod uniform;

pub use self::program::Program;
pub use self::stage::Stage;
pub use self::uniform::{UniformValue, Uniformable};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Geometry shader.
  GeometryShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::GeometryShader => f.write_str("geometry shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile; holds the compilation log.
  CompilationFailed(StageType, String),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageError::CompilationFailed(ref ty, ref log) => {
        write!(f, "{} compilation error: {}", ty, log)
      }
    }
  }
}

impl error::Error for StageError {}

/// Errors raised while building a program from files.
#[derive(Debug)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// A source file could not be read.
  FileNotFound(PathBuf, io::Error),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::FileNotFound(ref path, ref e) => {
        write!(f, "could not open {}: {}", path.display(), e)
      }
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::FileNotFound(_, e) => Some(e),
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stage_error_display() {
    let e = StageError::CompilationFailed(StageType::FragmentShader, "0:1: oops".to_owned());
    assert_eq!(e.to_string(), "fragment shader compilation error: 0:1: oops");
  }

  #[test]
  fn program_error_from_stage_error() {
    let e = StageError::CompilationFailed(StageType::VertexShader, String::new());

    match ProgramError::from(e.clone()) {
      ProgramError::StageError(inner) => assert_eq!(inner, e),
      other => panic!("unexpected error: {}", other),
    }
  }
}
