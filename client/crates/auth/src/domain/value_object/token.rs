//! Token Value Objects
//!
//! アクセストークンとリフレッシュトークン。
//! どちらもサーバーが発行する不透明な文字列で、クライアント側では
//! 内容を解釈しない。
//!
//! ## 不変条件
//! - 空文字列ではない（前後の空白は除去）
//! - `Debug` 出力ではマスクされる（ログへの漏洩防止）

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Error returned when a token value is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Token cannot be empty")]
pub struct EmptyTokenError;

fn normalize(raw: impl Into<String>) -> Result<String, EmptyTokenError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmptyTokenError);
    }
    Ok(if trimmed.len() == raw.len() {
        raw
    } else {
        trimmed.to_string()
    })
}

/// Short-lived bearer credential
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTokenError> {
        normalize(raw).map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Long-lived credential, only ever sent to the refresh endpoint
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTokenError> {
        normalize(raw).map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(AccessToken::new(""), Err(EmptyTokenError));
        assert_eq!(RefreshToken::new("   "), Err(EmptyTokenError));
    }

    #[test]
    fn test_trimmed() {
        let token = AccessToken::new(" tok1\n").unwrap();
        assert_eq!(token.as_str(), "tok1");
    }

    #[test]
    fn test_bearer() {
        let token = AccessToken::new("tok2").unwrap();
        assert_eq!(token.bearer(), "Bearer tok2");
    }

    #[test]
    fn test_debug_redacted() {
        let access = AccessToken::new("secret-access").unwrap();
        let refresh = RefreshToken::new("secret-refresh").unwrap();

        let debug = format!("{access:?} {refresh:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
