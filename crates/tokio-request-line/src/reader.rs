//! 非同期ストリームドライバー
//!
//! `AsyncRead` から読み取ったデータを `LineBuffer` に溜め、
//! `RequestLineParser` が終端状態になるまで feed と詰め直しを繰り返す。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_request_line::{ReaderConfig, RequestLineReader};
//!
//! let mut reader = RequestLineReader::with_config(stream, &ReaderConfig::default());
//! let line = reader.read_request_line().await?;
//! println!("{} {}", line.method(), line.target());
//! ```

use std::io::ErrorKind;
use std::time::Duration;

use shiguredo_request_line::{
    DEFAULT_BUFFER_SIZE, LineBuffer, ParserLimits, RequestLine, RequestLineParser,
};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::Instant;

use crate::error::{Error, Result};

/// リーダーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// 受信バッファの初期サイズ (デフォルト: 4KB)
    pub initial_buffer_size: usize,
    /// リクエストライン受信完了までの期限 (デフォルト: 2 秒)
    pub read_timeout: Duration,
    /// パーサーの制限
    pub limits: ParserLimits,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_BUFFER_SIZE,
            read_timeout: Duration::from_secs(2),
            limits: ParserLimits::default(),
        }
    }
}

impl ReaderConfig {
    /// 受信バッファの初期サイズを設定
    pub fn initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    /// 読み取り期限を設定
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// パーサーの制限を設定
    pub fn limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// リクエストラインリーダー (非同期)
///
/// 1 接続につき 1 つ作成し、他の接続とは共有しない。
#[derive(Debug)]
pub struct RequestLineReader<R> {
    inner: R,
    buf: LineBuffer,
    parser: RequestLineParser,
    read_timeout: Duration,
}

impl<R: AsyncRead + Unpin> RequestLineReader<R> {
    /// デフォルト設定でリーダーを作成
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &ReaderConfig::default())
    }

    /// 設定を指定してリーダーを作成
    pub fn with_config(inner: R, config: &ReaderConfig) -> Self {
        Self {
            inner,
            buf: LineBuffer::with_capacity(config.initial_buffer_size),
            parser: RequestLineParser::with_limits(config.limits.clone()),
            read_timeout: config.read_timeout,
        }
    }

    /// パーサーへの参照
    pub fn parser(&self) -> &RequestLineParser {
        &self.parser
    }

    /// リクエストラインの後ろに受信済みのバイト列
    pub fn remaining(&self) -> &[u8] {
        self.buf.filled()
    }

    /// 内部のストリームを取り出す
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// リクエストラインが揃うまで読み取る
    ///
    /// 期限は呼び出し時点から `read_timeout` 後で、途中の読み取りで延長されない。
    pub async fn read_request_line(&mut self) -> Result<RequestLine> {
        let deadline = Instant::now() + self.read_timeout;

        while !self.parser.is_terminal() {
            let read = self.inner.read(self.buf.unfilled_mut());
            let n = match tokio::time::timeout_at(deadline, read).await? {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            };

            if n == 0 {
                if self.buf.is_empty() {
                    return Err(Error::ConnectionClosed);
                }
                return Err(Error::IncompleteRequest {
                    buffered: self.buf.len(),
                });
            }
            self.buf.advance(n);
            let consumed = self.buf.feed_into(&mut self.parser)?;
            log::trace!(
                "read {} bytes, consumed {}, buffered {}",
                n,
                consumed,
                self.buf.len()
            );
        }

        self.parser
            .request_line()
            .cloned()
            .ok_or(Error::Parse(shiguredo_request_line::Error::AlreadyInErrorState))
    }
}

/// ストリームからリクエストラインを 1 つ読み取る
pub async fn read_request_line<R: AsyncRead + Unpin>(
    reader: R,
    config: &ReaderConfig,
) -> Result<RequestLine> {
    RequestLineReader::with_config(reader, config)
        .read_request_line()
        .await
}
