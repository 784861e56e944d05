//! Session Entity
//!
//! 「ログイン中」を表す三つ組（アクセストークン・リフレッシュトークン・
//! ユーザー情報）。三つは常にまとめて保存・削除され、一部だけが
//! 存在する状態は正当なセッションとして扱わない。

use crate::domain::value_object::{AccessToken, Identity, RefreshToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub identity: Identity,
}

impl Session {
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken, identity: Identity) -> Self {
        Self {
            access_token,
            refresh_token,
            identity,
        }
    }

    /// Same session with a freshly minted access token
    pub fn with_access_token(self, access_token: AccessToken) -> Self {
        Self {
            access_token,
            ..self
        }
    }
}
