use std::fmt;

/// HTTP リクエストライン
///
/// `METHOD SP TARGET SP HTTP/VERSION` の 3 要素。
/// パースに完全に成功した時点で一度だけ構築され、以後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    /// 新しいリクエストラインを作成
    ///
    /// `version` は "HTTP/" を除いた部分 (例: "1.1")。
    pub fn new(method: &str, target: &str, version: &str) -> Self {
        Self {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
        }
    }

    /// HTTP メソッド (GET, POST, etc.)
    pub fn method(&self) -> &str {
        &self.method
    }

    /// リクエストターゲット
    pub fn target(&self) -> &str {
        &self.target
    }

    /// HTTP バージョン ("HTTP/" を除いた部分)
    pub fn version(&self) -> &str {
        &self.version
    }

    /// ワイヤー形式 (CRLF 終端付き) にエンコード
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.method.len() + self.target.len() + self.version.len() + 9,
        );
        buf.extend_from_slice(self.method.as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.target.as_bytes());
        buf.extend_from_slice(b" HTTP/");
        buf.extend_from_slice(self.version.as_bytes());
        buf.extend_from_slice(b"\r\n");
        buf
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} HTTP/{}", self.method, self.target, self.version)
    }
}
