//! 로그/디버그 출력에 노출되면 안 되는 인증 값 래퍼.

use std::fmt;

#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// 헤더 구성 등 실제 값이 필요한 곳에서만 호출한다.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}
