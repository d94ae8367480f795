//! 패치 생성 흐름의 오류 종류.
//!
//! 유스케이스는 `anyhow::Result`로 전파하되, 호출자가 `downcast_ref`로
//! 실패 원인을 구분할 수 있도록 타입을 분리해 둔다.

use std::path::PathBuf;

use thiserror::Error;

/// 입력 검증 실패.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// 이슈 본문과 리뷰 코멘트가 모두 비어 있어 수정 지시를 만들 수 없다.
    #[error("either issue text or a review comment is required")]
    MissingInstruction,
}

/// 백엔드 호출 실패(네트워크 오류, 비정상 상태 코드, 응답 형식 불일치).
#[derive(Debug, Error)]
#[error("{backend}: failed to generate patch")]
pub struct GenerationError {
    pub backend: String,
    #[source]
    pub source: anyhow::Error,
}

impl GenerationError {
    pub fn new(backend: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            backend: backend.into(),
            source,
        }
    }
}

/// 결과 파일 기록 실패.
#[derive(Debug, Error)]
#[error("failed to write artifact at {}", .path.display())]
pub struct ArtifactError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
