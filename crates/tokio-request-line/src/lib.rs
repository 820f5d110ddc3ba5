//! tokio_request_line - Tokio integration for shiguredo_request_line
//!
//! tokio を使用して TCP などの非同期ストリームから HTTP/1.1 リクエストラインを読み取る。
//!
//! ## Features
//!
//! - `server` - リクエストラインを読むだけの HTTP サーバー (デフォルト有効)
//! - `full` - すべての機能を有効化
//!
//! ## 特徴
//!
//! - **shiguredo_request_line ベース**: Sans I/O パーサーをベースにした設計
//! - **読み取り期限**: 接続ごとにリクエストライン受信の期限を設ける
//! - **1 接続 1 タスク**: 接続間で共有する可変状態はない
//!
//! ## リーダー
//!
//! ```ignore
//! use tokio_request_line::{ReaderConfig, read_request_line};
//!
//! let line = read_request_line(&mut stream, &ReaderConfig::default()).await?;
//! ```
//!
//! ## サーバー
//!
//! ```ignore
//! use tokio_request_line::{RequestLine, Response, Server};
//!
//! async fn handler(line: RequestLine) -> Response {
//!     Response::new(200, "OK").body(b"Hello, World!".to_vec())
//! }
//!
//! let server = Server::bind("0.0.0.0:42069").await?;
//! server.serve(handler).await?;
//! ```

pub mod error;
pub mod reader;
#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use reader::{ReaderConfig, RequestLineReader, read_request_line};
#[cfg(feature = "server")]
pub use server::{Handler, Server};

// shiguredo_request_line の型を re-export
pub use shiguredo_request_line::{ParseState, ParserLimits, RequestLine, Response};
