//! リクエストラインパーサー (状態機械)

use crate::error::Error;
use crate::limits::ParserLimits;
use crate::line::try_parse_line_with_limits;
use crate::request_line::RequestLine;

/// パース状態
///
/// `Done` と `Error` は終端状態で、以後パースは行わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// リクエストライン待ち
    Init,
    /// リクエストラインのパース完了
    Done,
    /// パース失敗
    Error,
}

impl ParseState {
    /// 終端状態かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseState::Done | ParseState::Error)
    }
}

/// リクエストラインパーサー (Sans I/O)
///
/// 接続ごとに作成し、`feed()` だけが状態を変更する。
///
/// ```rust
/// use shiguredo_request_line::{ParseState, RequestLineParser};
///
/// let mut parser = RequestLineParser::new();
/// assert_eq!(parser.feed(b"GET / HT").unwrap(), 0);
/// assert_eq!(parser.state(), ParseState::Init);
///
/// // feed() は毎回、未消費のデータ全体を受け取る
/// let consumed = parser.feed(b"GET / HTTP/1.1\r\nHost: x\r\n").unwrap();
/// assert_eq!(consumed, 16);
/// assert_eq!(parser.state(), ParseState::Done);
/// assert_eq!(parser.request_line().unwrap().method(), "GET");
/// ```
#[derive(Debug, Clone)]
pub struct RequestLineParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    error: Option<Error>,
    limits: ParserLimits,
}

impl Default for RequestLineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLineParser {
    /// 新しいパーサーを作成
    pub fn new() -> Self {
        Self::with_limits(ParserLimits::default())
    }

    /// 制限付きでパーサーを作成
    pub fn with_limits(limits: ParserLimits) -> Self {
        Self {
            state: ParseState::Init,
            request_line: None,
            error: None,
            limits,
        }
    }

    /// 制限設定を取得
    pub fn limits(&self) -> &ParserLimits {
        &self.limits
    }

    /// 現在の状態
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// パース済みのリクエストライン (`Done` になるまでは `None`)
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// `Error` に遷移した原因
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    pub fn is_error(&self) -> bool {
        self.state == ParseState::Error
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// パース済みのリクエストラインを取り出す
    pub fn into_request_line(self) -> Option<RequestLine> {
        self.request_line
    }

    /// 未消費のデータを渡して状態を進める
    ///
    /// 消費したバイト数を返す。呼び出し側は消費分をバッファから取り除き、
    /// 残りに新しいデータを追記して次回渡す。
    ///
    /// - `Init` のまま 0 を返した場合はデータ不足
    /// - `Done` で呼んだ場合は何もせず 0 を返す
    /// - `Error` で呼んだ場合は `Error::AlreadyInErrorState` を返す
    ///
    /// I/O もブロックもしない。
    pub fn feed(&mut self, data: &[u8]) -> Result<usize, Error> {
        let mut consumed = 0;
        loop {
            match self.state {
                ParseState::Init => {
                    match try_parse_line_with_limits(&data[consumed..], &self.limits) {
                        Ok(Some((line, n))) => {
                            consumed += n;
                            self.request_line = Some(line);
                            self.state = ParseState::Done;
                        }
                        Ok(None) => return Ok(consumed),
                        Err(e) => {
                            self.error = Some(e.clone());
                            self.state = ParseState::Error;
                            return Err(e);
                        }
                    }
                }
                ParseState::Done => return Ok(consumed),
                ParseState::Error => return Err(Error::AlreadyInErrorState),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_to_done() {
        let mut parser = RequestLineParser::new();
        let consumed = parser.feed(b"GET /a HTTP/1.1\r\n").unwrap();
        assert_eq!(consumed, 17);
        assert!(parser.is_done());
        assert!(parser.is_terminal());
        assert!(parser.error().is_none());
        assert_eq!(
            parser.into_request_line(),
            Some(RequestLine::new("GET", "/a", "1.1"))
        );
    }

    #[test]
    fn init_stays_init_without_crlf() {
        let mut parser = RequestLineParser::new();
        assert_eq!(parser.feed(b"GET /a HTTP/1.1").unwrap(), 0);
        assert_eq!(parser.state(), ParseState::Init);
        assert!(parser.request_line().is_none());
    }

    #[test]
    fn init_to_error() {
        let mut parser = RequestLineParser::new();
        let err = parser.feed(b"GET HTTP/1.1\r\n\r\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRequestLine(_)));
        assert!(parser.is_error());
        assert_eq!(parser.error(), Some(&err));
        assert!(parser.request_line().is_none());
    }

    #[test]
    fn error_is_terminal() {
        let mut parser = RequestLineParser::new();
        assert!(parser.feed(b"GET / HTTP/2.0\r\n").is_err());
        assert_eq!(
            parser.feed(b"GET / HTTP/1.1\r\n"),
            Err(Error::AlreadyInErrorState)
        );
        // 最初のエラーは保持される
        assert_eq!(
            parser.error(),
            Some(&Error::UnsupportedVersion("2.0".to_string()))
        );
    }

    #[test]
    fn done_is_noop() {
        let mut parser = RequestLineParser::new();
        parser.feed(b"GET / HTTP/1.1\r\n").unwrap();
        assert_eq!(parser.feed(b"PUT /x HTTP/1.1\r\n").unwrap(), 0);
        assert_eq!(parser.feed(b"garbage\r\n").unwrap(), 0);
        assert!(parser.is_done());
        assert_eq!(parser.request_line().unwrap().method(), "GET");
    }

    #[test]
    fn line_too_long_enters_error() {
        let mut parser = RequestLineParser::with_limits(ParserLimits::with_max_line_size(4));
        assert_eq!(parser.feed(b"GET").unwrap(), 0);
        assert_eq!(
            parser.feed(b"GET /"),
            Err(Error::LineTooLong { limit: 4 })
        );
        assert!(parser.is_error());
    }

    #[test]
    fn line_too_long_same_for_any_chunking() {
        let data = b"GET /aaaaaaa HTTP/1.1\r\n";
        let limits = ParserLimits::with_max_line_size(8);

        let mut one_shot = RequestLineParser::with_limits(limits.clone());
        let expected = one_shot.feed(data).unwrap_err();
        assert_eq!(expected, Error::LineTooLong { limit: 8 });

        // 1 バイトずつ届いた場合も同じエラーになる
        let mut parser = RequestLineParser::with_limits(limits);
        let mut result = Ok(0);
        for end in 1..=data.len() {
            result = parser.feed(&data[..end]);
            if parser.is_terminal() {
                break;
            }
        }
        assert_eq!(result, Err(expected));
        assert_eq!(parser.error(), one_shot.error());
    }
}
