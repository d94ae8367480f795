//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::generate_patch::GeneratePatchUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{
    AtomicFileWriter, ConsoleReporter, HttpBackendFactory, JsonConfigRepository,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    backend_factory: HttpBackendFactory,
    writer: AtomicFileWriter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AppComposition {
    /// `quiet`이면 진행 상황 출력을 숨긴다.
    pub fn new(quiet: bool) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            backend_factory: HttpBackendFactory,
            writer: AtomicFileWriter,
            reporter: ConsoleReporter::new(quiet),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 패치 생성 유스케이스를 생성한다.
    pub fn generate_patch_usecase(&self) -> GeneratePatchUseCase<'_> {
        GeneratePatchUseCase {
            config_repo: &self.config_repo,
            backend_factory: &self.backend_factory,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }
}
