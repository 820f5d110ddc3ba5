//! ブロッキング I/O 用のストリームドライバー
//!
//! `std::io::Read` から読み取り、`RequestLineParser` にリクエストラインが
//! 揃うまで渡し続ける。読み取り期限は呼び出し側でトランスポートに設定する
//! (例: `TcpStream::set_read_timeout`)。

use std::io::{ErrorKind, Read};

use crate::buffer::LineBuffer;
use crate::error::{Error, ReadError};
use crate::limits::ParserLimits;
use crate::parser::RequestLineParser;
use crate::request_line::RequestLine;

/// リクエストラインリーダー (ブロッキング)
#[derive(Debug)]
pub struct RequestLineReader<R> {
    inner: R,
    buf: LineBuffer,
    parser: RequestLineParser,
}

impl<R: Read> RequestLineReader<R> {
    /// 新しいリーダーを作成
    pub fn new(inner: R) -> Self {
        Self::with_buffer_and_limits(inner, LineBuffer::default(), ParserLimits::default())
    }

    /// 初期バッファサイズと制限を指定して作成
    pub fn with_capacity_and_limits(inner: R, capacity: usize, limits: ParserLimits) -> Self {
        Self::with_buffer_and_limits(inner, LineBuffer::with_capacity(capacity), limits)
    }

    fn with_buffer_and_limits(inner: R, buf: LineBuffer, limits: ParserLimits) -> Self {
        Self {
            inner,
            buf,
            parser: RequestLineParser::with_limits(limits),
        }
    }

    /// パーサーへの参照
    pub fn parser(&self) -> &RequestLineParser {
        &self.parser
    }

    /// リクエストラインの後ろに受信済みのバイト列 (ヘッダーの先頭など)
    pub fn remaining(&self) -> &[u8] {
        self.buf.filled()
    }

    /// 内部のリーダーを取り出す
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// リクエストラインが揃うまで読み取る
    ///
    /// パーサーが既に `Done` の場合は読み取らずに結果を返す。
    pub fn read_request_line(&mut self) -> Result<RequestLine, ReadError> {
        while !self.parser.is_terminal() {
            let n = match self.inner.read(self.buf.unfilled_mut()) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(ReadError::Timeout);
                }
                Err(e) => return Err(ReadError::Io(e)),
            };

            if n == 0 {
                if self.buf.is_empty() {
                    return Err(ReadError::ConnectionClosed);
                }
                return Err(ReadError::IncompleteRequest {
                    buffered: self.buf.len(),
                });
            }
            self.buf.advance(n);
            self.buf.feed_into(&mut self.parser)?;
        }

        match self.parser.request_line() {
            Some(line) => Ok(line.clone()),
            None => Err(ReadError::Parse(Error::AlreadyInErrorState)),
        }
    }
}

/// ストリームからリクエストラインを 1 つ読み取る
pub fn read_request_line<R: Read>(reader: R) -> Result<RequestLine, ReadError> {
    RequestLineReader::new(reader).read_request_line()
}
