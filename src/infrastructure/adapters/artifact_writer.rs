//! 결과 파일 기록 포트 구현 어댑터.

use std::path::Path;

use crate::application::ports::ArtifactWriter;
use crate::domain::error::ArtifactError;
use crate::infrastructure::artifact::write_artifact;

/// 임시 파일 + rename 방식의 파일 기록 어댑터.
pub struct AtomicFileWriter;

impl ArtifactWriter for AtomicFileWriter {
    fn write(&self, path: &Path, content: &str) -> Result<(), ArtifactError> {
        write_artifact(path, content)
    }
}
