//! リクエストラインを読むだけの HTTP サーバー
//!
//! 接続ごとにタスクを 1 つ起動し、リクエストラインを読み取ってハンドラーに渡す。
//! ヘッダーとボディは読まず、レスポンスを書き込んだら接続を閉じる。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_request_line::{RequestLine, Response, Server};
//!
//! async fn handler(line: RequestLine) -> Response {
//!     Response::new(200, "OK")
//!         .header("Content-Type", "text/plain")
//!         .body(format!("{} {}", line.method(), line.target()).into_bytes())
//! }
//!
//! let server = Server::bind("0.0.0.0:42069").await?;
//! server.serve(handler).await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use shiguredo_request_line::{ParserLimits, RequestLine, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

use crate::error::Result;
use crate::reader::{ReaderConfig, RequestLineReader};

/// レスポンス送信後に未読データを読み捨てる最大時間
const LINGER_TIMEOUT: Duration = Duration::from_millis(500);

/// リクエストラインハンドラー
pub trait Handler: Send + Sync + 'static {
    /// リクエストラインを処理してレスポンスを返す
    fn handle(&self, line: RequestLine) -> impl Future<Output = Response> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(RequestLine) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    fn handle(&self, line: RequestLine) -> impl Future<Output = Response> + Send {
        (self)(line)
    }
}

/// HTTP サーバー
pub struct Server {
    listener: TcpListener,
    config: ReaderConfig,
}

impl Server {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            config: ReaderConfig::default(),
        })
    }

    /// リクエストライン受信の期限を設定
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// 読み取りバッファの初期サイズを設定
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.initial_buffer_size = size;
        self
    }

    /// パーサーの制限を設定
    pub fn limits(mut self, limits: ParserLimits) -> Self {
        self.config.limits = limits;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// サーバーを起動
    ///
    /// accept に失敗してもループは止めない。
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let config = Arc::new(self.config);
        let handler = Arc::new(handler);

        loop {
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::error!("accept error: {}", e);
                    continue;
                }
            };
            let config = config.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, config, handler).await {
                    log::warn!("connection error from {}: {}", peer_addr, e);
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        handle_connection(stream, peer_addr, Arc::new(self.config), Arc::new(handler)).await
    }
}

/// 接続を処理
///
/// リクエストラインの読み取りに失敗した場合は 400 を返してからエラーを返す。
async fn handle_connection<H: Handler>(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ReaderConfig>,
    handler: Arc<H>,
) -> Result<()> {
    let result = RequestLineReader::with_config(&mut stream, &config)
        .read_request_line()
        .await;

    let mut response = match result {
        Ok(line) => {
            log::debug!("{} from {}", line, peer_addr);
            handler.handle(line).await
        }
        Err(e) => {
            let mut response = Response::bad_request();
            response.add_header("Connection", "close");
            // 相手が既に閉じている場合もあるので書き込みエラーは無視する
            let _ = stream.write_all(&response.encode()).await;
            let _ = stream.shutdown().await;
            linger_close(&mut stream).await;
            return Err(e);
        }
    };

    // 接続は必ず閉じるので、ハンドラーが指定した Connection は上書きする
    response.remove_header("Connection");
    response.add_header("Connection", "close");
    stream.write_all(&response.encode()).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    linger_close(&mut stream).await;
    Ok(())
}

/// 相手が閉じるか期限が来るまで受信データを読み捨てる
///
/// 未読データを残したまま閉じると RST が送られ、相手が読み終えていない
/// レスポンスが失われることがある。
async fn linger_close(stream: &mut TcpStream) {
    let deadline = Instant::now() + LINGER_TIMEOUT;
    let mut scratch = [0u8; 1024];
    loop {
        match tokio::time::timeout_at(deadline, stream.read(&mut scratch)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => break,
            Ok(Ok(n)) => log::trace!("discarded {} unread bytes", n),
        }
    }
}
