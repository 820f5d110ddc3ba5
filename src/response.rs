/// HTTP レスポンス
///
/// リクエストライン受信後に接続へ書き戻すための最小限の型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// ステータスコード (200, 400, etc.)
    pub status_code: u16,
    /// ステータスフレーズ (OK, Bad Request, etc.)
    pub reason_phrase: String,
    /// ヘッダー
    pub headers: Vec<(String, String)>,
    /// ボディ
    pub body: Vec<u8>,
}

impl Response {
    /// 新しいレスポンスを作成 (HTTP/1.1)
    pub fn new(status_code: u16, reason_phrase: &str) -> Self {
        Self {
            status_code,
            reason_phrase: reason_phrase.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// 400 Bad Request (ボディなし)
    pub fn bad_request() -> Self {
        Self::new(400, "Bad Request").header("Content-Length", "0")
    }

    /// ヘッダーを追加 (ビルダーパターン)
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// ボディを設定 (ビルダーパターン)
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// ヘッダーを追加
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// 同名のヘッダーをすべて削除 (大文字小文字を区別しない)
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// ヘッダーを取得 (大文字小文字を区別しない)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// ヘッダーが存在するか確認
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// レスポンスをバイト列にエンコード
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        // Status line: HTTP/1.1 SP STATUS-CODE SP REASON-PHRASE CRLF
        buf.extend_from_slice(b"HTTP/1.1 ");
        buf.extend_from_slice(self.status_code.to_string().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.reason_phrase.as_bytes());
        buf.extend_from_slice(b"\r\n");

        // Headers
        for (name, value) in &self.headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        // Content-Length (if body is present and not already set)
        if !self.body.is_empty() && !self.has_header("Content-Length") {
            buf.extend_from_slice(b"Content-Length: ");
            buf.extend_from_slice(self.body.len().to_string().as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        // End of headers
        buf.extend_from_slice(b"\r\n");

        buf.extend_from_slice(&self.body);

        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_with_body() {
        let response = Response::new(200, "OK")
            .header("Content-Type", "text/plain")
            .body(b"Hello, World!".to_vec());
        assert_eq!(
            response.encode(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 13\r\n\r\nHello, World!"
        );
    }

    #[test]
    fn encode_bad_request() {
        let mut response = Response::bad_request();
        response.add_header("Connection", "close");
        assert_eq!(
            response.encode(),
            b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn explicit_content_length_is_kept() {
        let response = Response::new(200, "OK")
            .header("content-length", "5")
            .body(b"hello".to_vec());
        assert_eq!(response.get_header("Content-Length"), Some("5"));
        let encoded = String::from_utf8(response.encode()).unwrap();
        assert_eq!(encoded.matches("ength: 5").count(), 1);
    }

    #[test]
    fn remove_header_ignores_case() {
        let mut response = Response::new(200, "OK")
            .header("connection", "keep-alive")
            .header("Content-Type", "text/plain")
            .header("CONNECTION", "upgrade");
        response.remove_header("Connection");
        assert!(!response.has_header("Connection"));
        assert_eq!(response.get_header("content-type"), Some("text/plain"));
        assert_eq!(response.headers.len(), 1);
    }
}
