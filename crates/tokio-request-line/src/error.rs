//! tokio-request-line エラー型

use std::fmt;

use shiguredo_request_line::ErrorKind;

/// tokio-request-line エラー
#[derive(Debug)]
pub enum Error {
    /// I/O エラー
    Io(std::io::Error),
    /// リクエストラインのパースエラー
    Parse(shiguredo_request_line::Error),
    /// 読み取り期限切れ
    Timeout,
    /// 1 バイトも受信せずに接続が閉じられた
    ConnectionClosed,
    /// 終端 CRLF を受信する前に接続が閉じられた
    IncompleteRequest { buffered: usize },
}

impl Error {
    /// エラー種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Parse(e) => e.kind(),
            Error::Timeout => ErrorKind::Timeout,
            Error::ConnectionClosed => ErrorKind::ConnectionClosed,
            Error::IncompleteRequest { .. } => ErrorKind::IncompleteRequest,
        }
    }

    /// パースエラーかどうか (トランスポートエラーと区別する)
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Timeout => write!(f, "read timeout"),
            Error::ConnectionClosed => write!(f, "connection closed"),
            Error::IncompleteRequest { buffered } => {
                write!(f, "incomplete request: {} bytes without CRLF", buffered)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<shiguredo_request_line::Error> for Error {
    fn from(e: shiguredo_request_line::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
