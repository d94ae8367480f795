//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::error::ArtifactError;
use crate::domain::patch::{PatchConversation, ProviderResponse};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 텍스트 생성 백엔드(chat completion) 호출 포트.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// 내부 식별자
    fn id(&self) -> &'static str;
    /// 사용자 표시 이름
    fn name(&self) -> &'static str;
    fn model(&self) -> &str;
    /// 대화를 한 번 전송하고 첫 번째 응답 메시지를 반환한다. 재시도하지 않는다.
    async fn complete(&self, conversation: &PatchConversation) -> Result<ProviderResponse>;
}

/// 설정에 맞는 백엔드를 생성하는 팩토리 포트.
pub trait BackendFactory: Send + Sync {
    fn build(
        &self,
        config: &Config,
        model_override: Option<&str>,
    ) -> Result<Box<dyn CompletionBackend>>;
}

/// 결과 파일 기록 포트.
pub trait ArtifactWriter: Send + Sync {
    fn write(&self, path: &Path, content: &str) -> Result<(), ArtifactError>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
