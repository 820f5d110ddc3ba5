//! # shiguredo_request_line
//!
//! 依存なしの HTTP/1.1 リクエストラインパーサー (Sans I/O)
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用
//! - **Sans I/O**: パーサーは I/O を行わず、任意の分割で届くデータを受け付ける
//! - **終端状態**: `Done` / `Error` に到達したら以後パースしない
//!
//! ## 使い方
//!
//! ### パーサーを直接使う
//!
//! ```rust
//! use shiguredo_request_line::{LineBuffer, RequestLineParser};
//!
//! let mut parser = RequestLineParser::new();
//! let mut buf = LineBuffer::with_capacity(64);
//!
//! for chunk in [&b"GET /in"[..], b"dex.html HTTP/1", b".1\r\nHost: x\r\n"] {
//!     // 受信データを空き領域に書き込む (実際にはソケットから読む)
//!     buf.unfilled_mut()[..chunk.len()].copy_from_slice(chunk);
//!     buf.advance(chunk.len());
//!     buf.feed_into(&mut parser).unwrap();
//! }
//!
//! let line = parser.request_line().unwrap();
//! assert_eq!(line.method(), "GET");
//! assert_eq!(line.target(), "/index.html");
//! assert_eq!(line.version(), "1.1");
//! assert_eq!(buf.filled(), b"Host: x\r\n");
//! ```
//!
//! ### ブロッキング I/O から読む
//!
//! ```rust
//! use shiguredo_request_line::read_request_line;
//!
//! let line = read_request_line(&b"GET / HTTP/1.1\r\n\r\n"[..]).unwrap();
//! assert_eq!(line.target(), "/");
//! ```

mod buffer;
mod error;
mod limits;
mod line;
mod parser;
mod reader;
mod request_line;
mod response;

pub use buffer::{DEFAULT_BUFFER_SIZE, LineBuffer};
pub use error::{Error, ErrorKind, ReadError};
pub use limits::ParserLimits;
pub use line::{try_parse_line, try_parse_line_with_limits};
pub use parser::{ParseState, RequestLineParser};
pub use reader::{RequestLineReader, read_request_line};
pub use request_line::RequestLine;
pub use response::Response;
