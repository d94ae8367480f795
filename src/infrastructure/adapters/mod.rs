//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod artifact_writer;
mod backend_factory;
mod config_repository;
mod reporter;

pub use artifact_writer::AtomicFileWriter;
pub use backend_factory::HttpBackendFactory;
pub use config_repository::JsonConfigRepository;
pub use reporter::ConsoleReporter;
