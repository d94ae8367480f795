//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::prompt::PromptLanguage;

pub const DEFAULT_OUTPUT_PATH: &str = "patch.txt";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a code assistant that can produce code patches in diff format.";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 백엔드 provider 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 프롬프트 문구 언어(ja/en)
    pub prompt_language: Option<String>,
    /// 결과 파일 경로
    pub output_path: Option<String>,
    /// 시스템 메시지
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub openai: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자
    pub model: Option<String>,
    /// API 베이스 URL
    pub api_base: Option<String>,
    /// 인증 키(직접값)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    /// 요청 타임아웃(ms). 미지정이면 HTTP 클라이언트 기본값을 따른다.
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn prompt_language(&self) -> PromptLanguage {
        PromptLanguage::from_config(self.defaults.prompt_language.as_deref())
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(
            self.defaults
                .output_path
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_PATH),
        )
    }

    pub fn system_prompt(&self) -> String {
        self.defaults
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
    }

    /// 설정이 없으면 기본값으로 채운 OpenAI provider 설정을 반환한다.
    pub fn openai(&self) -> ProviderConfig {
        self.providers.openai.clone().unwrap_or_default()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.providers.merge_from(other.providers);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.prompt_language.is_some() {
            self.prompt_language = other.prompt_language;
        }
        if other.output_path.is_some() {
            self.output_path = other.output_path;
        }
        if other.system_prompt.is_some() {
            self.system_prompt = other.system_prompt;
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_OPENAI_API_KEY_ENV)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
    }
}

impl ProvidersConfig {
    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider_config(&mut self.openai, other.openai);
    }
}

fn merge_provider_config(target: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    match (target.as_mut(), incoming) {
        (Some(existing), Some(next)) => existing.merge_from(next),
        (None, Some(next)) => *target = Some(next),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        let config = Config::default();
        assert_eq!(config.output_path(), PathBuf::from("patch.txt"));
        assert_eq!(config.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.prompt_language(), PromptLanguage::Japanese);

        let openai = config.openai();
        assert!(openai.is_enabled());
        assert_eq!(openai.model(), "gpt-4");
        assert_eq!(openai.api_base(), "https://api.openai.com/v1");
        assert_eq!(openai.api_key_env(), "OPENAI_API_KEY");
    }

    #[test]
    fn later_config_overrides_individual_fields() {
        let mut base: Config = serde_json::from_str(
            r#"{
                "defaults": { "prompt_language": "en", "output_path": "a.txt" },
                "providers": { "openai": { "model": "gpt-4o", "api_key_env": "KEY_A" } }
            }"#,
        )
        .unwrap();
        let next: Config = serde_json::from_str(
            r#"{
                "defaults": { "output_path": "b.txt" },
                "providers": { "openai": { "api_key_env": "KEY_B", "timeout_ms": 5000 } }
            }"#,
        )
        .unwrap();

        base.merge_from(next);

        assert_eq!(base.prompt_language(), PromptLanguage::English);
        assert_eq!(base.output_path(), PathBuf::from("b.txt"));
        let openai = base.openai();
        assert_eq!(openai.model(), "gpt-4o");
        assert_eq!(openai.api_key_env(), "KEY_B");
        assert_eq!(openai.timeout_ms, Some(5000));
    }
}
