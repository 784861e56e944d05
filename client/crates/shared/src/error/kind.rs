//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to classify every failure the
//! client can surface, whether it came back from the API as an HTTP
//! status or happened locally (network, storage, validation).

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアント側で発生するエラーの分類を定義します。
/// HTTP レスポンス由来の種別は対応するステータスコードを持ち、
/// ローカルで発生した種別（通信失敗・保存失敗など）はステータスコードを持ちません。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(401);
/// assert_eq!(kind, ErrorKind::Unauthorized);
/// assert_eq!(kind.status_code(), Some(401));
/// assert_eq!(ErrorKind::Network.status_code(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: リクエストが不正
    BadRequest,
    /// 401 - Unauthorized: 認証が必要・資格情報が無効
    Unauthorized,
    /// 403 - Forbidden: アクセス権限なし
    Forbidden,
    /// 404 - Not Found: リソースが見つからない
    NotFound,
    /// 409 - Conflict: 現在の状態と競合
    Conflict,
    /// 422 - Unprocessable Entity: 処理不可能なエンティティ
    UnprocessableEntity,
    /// 429 - Too Many Requests: レート制限超過
    TooManyRequests,
    /// 5xx - サーバー側のエラー（503 以外）
    ServerError,
    /// 503 - Service Unavailable: サービス利用不可
    ServiceUnavailable,
    /// その他の想定外ステータス
    UnexpectedStatus,
    /// 通信失敗（接続不可・DNS など）
    Network,
    /// タイムアウト
    Timeout,
    /// レスポンスの形式が不正
    Decode,
    /// ローカルストレージの読み書き失敗
    Storage,
    /// 送信前のローカル検証エラー
    Validation,
    /// セッション期限切れ（リフレッシュ失敗）
    SessionExpired,
    /// 設定値が不正
    Configuration,
}

impl ErrorKind {
    /// HTTP ステータスコードから種別を判定
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_status(502), ErrorKind::ServerError);
    /// ```
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::UnprocessableEntity,
            429 => ErrorKind::TooManyRequests,
            503 => ErrorKind::ServiceUnavailable,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::UnexpectedStatus,
        }
    }

    /// 代表的な HTTP ステータスコードを取得
    ///
    /// ## Returns
    /// HTTP 由来の種別であれば `Some(code)`、ローカル由来であれば `None`
    #[inline]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::BadRequest => Some(400),
            ErrorKind::Unauthorized => Some(401),
            ErrorKind::Forbidden => Some(403),
            ErrorKind::NotFound => Some(404),
            ErrorKind::Conflict => Some(409),
            ErrorKind::UnprocessableEntity => Some(422),
            ErrorKind::TooManyRequests => Some(429),
            ErrorKind::ServerError => Some(500),
            ErrorKind::ServiceUnavailable => Some(503),
            _ => None,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::ServerError => "Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::UnexpectedStatus => "Unexpected Status",
            ErrorKind::Network => "Network Error",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Decode => "Malformed Response",
            ErrorKind::Storage => "Storage Error",
            ErrorKind::Validation => "Validation Error",
            ErrorKind::SessionExpired => "Session Expired",
            ErrorKind::Configuration => "Configuration Error",
        }
    }

    /// 通信経路の失敗かどうか
    ///
    /// 資格情報の拒否と区別して表示するために使用します。
    #[inline]
    pub const fn is_transport(&self) -> bool {
        matches!(self, ErrorKind::Network | ErrorKind::Timeout)
    }

    /// サーバー側のエラーかどうかを判定
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, ErrorKind::ServerError | ErrorKind::ServiceUnavailable)
    }

    /// クライアント側（4xx）のエラーかどうかを判定
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        match self.status_code() {
            Some(code) => code >= 400 && code < 500,
            None => false,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::UnprocessableEntity);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::TooManyRequests);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::UnexpectedStatus);
    }

    #[test]
    fn test_local_kinds_have_no_status() {
        assert_eq!(ErrorKind::Network.status_code(), None);
        assert_eq!(ErrorKind::Timeout.status_code(), None);
        assert_eq!(ErrorKind::Storage.status_code(), None);
        assert_eq!(ErrorKind::SessionExpired.status_code(), None);
    }

    #[test]
    fn test_is_transport() {
        assert!(ErrorKind::Network.is_transport());
        assert!(ErrorKind::Timeout.is_transport());
        assert!(!ErrorKind::Unauthorized.is_transport());
    }

    #[test]
    fn test_is_client_error() {
        assert!(ErrorKind::BadRequest.is_client_error());
        assert!(ErrorKind::Unauthorized.is_client_error());
        assert!(!ErrorKind::ServerError.is_client_error());
        assert!(!ErrorKind::Network.is_client_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
    }
}
