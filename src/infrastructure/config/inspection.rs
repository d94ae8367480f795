//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{DefaultsConfig, ProviderConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub providers: ProvidersInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub prompt_language: String,
    pub output_path: String,
    pub system_prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvidersInspection {
    pub openai: ProviderInspection,
}

/// API key 값은 담지 않고 출처만 표시한다.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub enabled: bool,
    pub model: String,
    pub api_base: String,
    pub timeout_ms: Option<u64>,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                prompt_language: config.prompt_language().code().to_string(),
                output_path: config.output_path().display().to_string(),
                system_prompt: config.system_prompt(),
            },
            providers: ProvidersInspection {
                openai: ProviderInspection::from_config(&config.openai()),
            },
        }
    }
}

impl ProviderInspection {
    fn from_config(cfg: &ProviderConfig) -> Self {
        let resolution = resolve_provider_api_key(cfg);
        Self {
            enabled: cfg.is_enabled(),
            model: cfg.model(),
            api_base: cfg.api_base(),
            timeout_ms: cfg.timeout_ms,
            api_key_source: resolution.source,
            api_key_resolved: resolution.credential.is_some(),
        }
    }
}
