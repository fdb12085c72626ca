use crate::core::io::pdb::PdbError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error(
        "Segment lengths sum to {declared} residues but the structure contains {observed}"
    )]
    SegmentMismatch { declared: usize, observed: usize },

    #[error("Invalid segmentation plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid remap configuration: {0}")]
    InvalidRemap(String),

    #[error("Failed to write output '{path}': {source}", path = path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: impl Into<PdbError>) -> Self {
        Self::Input {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Short name of the violated precondition, for per-file status lines.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Input {
                source: PdbError::Io(_),
                ..
            } => "io",
            Self::Input {
                source: PdbError::MalformedRecord { .. },
                ..
            } => "malformed-record",
            Self::SegmentMismatch { .. } => "segment-mismatch",
            Self::InvalidPlan(_) => "invalid-plan",
            Self::InvalidRemap(_) => "invalid-remap",
            Self::Output { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::MalformedRecordKind;

    #[test]
    fn messages_name_the_file_and_the_precondition() {
        let err = EngineError::input(
            "model.pdb",
            PdbError::MalformedRecord {
                line: 12,
                kind: MalformedRecordKind::LineTooShort { len: 10, min: 26 },
            },
        );
        let message = err.to_string();
        assert!(message.contains("model.pdb"));
        assert_eq!(err.category(), "malformed-record");

        let err = EngineError::SegmentMismatch {
            declared: 40,
            observed: 41,
        };
        assert!(err.to_string().contains("40"));
        assert!(err.to_string().contains("41"));
        assert_eq!(err.category(), "segment-mismatch");
    }

    #[test]
    fn io_failures_share_a_category() {
        let read = EngineError::input("in.pdb", io::Error::from(io::ErrorKind::NotFound));
        let write = EngineError::Output {
            path: "out.pdb".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(read.category(), "io");
        assert_eq!(write.category(), "io");
    }
}
