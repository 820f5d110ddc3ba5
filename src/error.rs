use std::fmt;

/// エラー種別
///
/// パーサーとストリームドライバーで共有する閉じた列挙。
/// `NeedMoreData` はエラーではなく「終端 CRLF がまだない」ことを表す制御シグナル。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 終端 CRLF がまだ届いていない
    NeedMoreData,
    /// リクエストラインの形式が不正
    MalformedRequestLine,
    /// サポートしていない HTTP バージョン
    UnsupportedVersion,
    /// 既に Error 状態のパーサーに feed した
    AlreadyInErrorState,
    /// リクエストラインが長すぎる
    LineTooLong,
    /// 終端 CRLF が届く前にストリームが終了した
    IncompleteRequest,
    /// 1 バイトも届かずにストリームが終了した
    ConnectionClosed,
    /// 読み取り期限切れ
    Timeout,
    /// I/O エラー
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NeedMoreData => "need more data",
            ErrorKind::MalformedRequestLine => "malformed request line",
            ErrorKind::UnsupportedVersion => "unsupported HTTP version",
            ErrorKind::AlreadyInErrorState => "parser already in error state",
            ErrorKind::LineTooLong => "request line too long",
            ErrorKind::IncompleteRequest => "incomplete request",
            ErrorKind::ConnectionClosed => "connection closed",
            ErrorKind::Timeout => "read timeout",
            ErrorKind::Io => "I/O error",
        };
        f.write_str(s)
    }
}

/// リクエストラインのパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// トークン構成が不正 (3 トークンでない、HTTP/x の形でない等)
    MalformedRequestLine(String),
    /// 形式は正しいがバージョンが 1.1 ではない
    UnsupportedVersion(String),
    /// Error 状態のパーサーに再度 feed した (ドライバー側の契約違反)
    AlreadyInErrorState,
    /// リクエストライン長超過
    ///
    /// 超過を検出した時点の長さは分割の仕方で変わるので上限だけを持つ。
    LineTooLong { limit: usize },
}

impl Error {
    /// エラー種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedRequestLine(_) => ErrorKind::MalformedRequestLine,
            Error::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Error::AlreadyInErrorState => ErrorKind::AlreadyInErrorState,
            Error::LineTooLong { .. } => ErrorKind::LineTooLong,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRequestLine(msg) => write!(f, "malformed request line: {}", msg),
            Error::UnsupportedVersion(version) => {
                write!(f, "unsupported HTTP version: {}", version)
            }
            Error::AlreadyInErrorState => write!(f, "parser already in error state"),
            Error::LineTooLong { limit } => {
                write!(f, "request line too long: exceeds {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for Error {}

/// ブロッキングドライバーのエラー
///
/// パースエラーとトランスポートエラーを区別して返す。
#[derive(Debug)]
pub enum ReadError {
    /// I/O エラー
    Io(std::io::Error),
    /// パースエラー
    Parse(Error),
    /// 読み取り期限切れ
    Timeout,
    /// 1 バイトも受信せずに接続が閉じられた
    ConnectionClosed,
    /// 終端 CRLF を受信する前に接続が閉じられた
    IncompleteRequest { buffered: usize },
}

impl ReadError {
    /// エラー種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadError::Io(_) => ErrorKind::Io,
            ReadError::Parse(e) => e.kind(),
            ReadError::Timeout => ErrorKind::Timeout,
            ReadError::ConnectionClosed => ErrorKind::ConnectionClosed,
            ReadError::IncompleteRequest { .. } => ErrorKind::IncompleteRequest,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "I/O error: {}", e),
            ReadError::Parse(e) => write!(f, "parse error: {}", e),
            ReadError::Timeout => write!(f, "read timeout"),
            ReadError::ConnectionClosed => write!(f, "connection closed"),
            ReadError::IncompleteRequest { buffered } => {
                write!(f, "incomplete request: {} bytes without CRLF", buffered)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

impl From<Error> for ReadError {
    fn from(e: Error) -> Self {
        ReadError::Parse(e)
    }
}
