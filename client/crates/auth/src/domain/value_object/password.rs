//! Password Value Object
//!
//! 入力されたパスワードをサーバーへ送るまで保持する。
//! 強度ポリシーはサーバー側の責務なので、ここでは空でないことだけを確認し、
//! 入力はそのまま（正規化せず）送信する。
//!
//! ## Security
//! - `Zeroize` と `ZeroizeOnDrop` を実装
//! - `Clone` を実装しない（意図しない複製を防ぐ）
//! - `Debug` 出力はマスクされる

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Password cannot be empty")]
pub struct EmptyPasswordError;

/// Clear text password, zeroized on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyPasswordError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmptyPasswordError);
        }
        Ok(Self(raw))
    }

    /// Clear text for the request body
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    /// Constant-shape comparison of two inputs (confirmation check)
    pub fn matches(&self, other: &Password) -> bool {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert!(Password::new("").is_err());
        assert!(Password::new(" \t").is_err());
    }

    #[test]
    fn test_not_normalized() {
        let password = Password::new(" spaced ").unwrap();
        assert_eq!(password.expose(), " spaced ");
    }

    #[test]
    fn test_matches() {
        let a = Password::new("hunter22").unwrap();
        let b = Password::new("hunter22").unwrap();
        let c = Password::new("hunter23").unwrap();
        let d = Password::new("hunter2").unwrap();

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
    }

    #[test]
    fn test_debug_redacted() {
        let password = Password::new("hunter22").unwrap();
        assert!(!format!("{password:?}").contains("hunter"));
    }
}
