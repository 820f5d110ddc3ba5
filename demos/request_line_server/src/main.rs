//! リクエストラインを読むだけの HTTP サーバーの例
//!
//! 使い方:
//!   RUST_LOG=debug cargo run -p request_line_server
//!
//!   # 読み取り期限を 500ms にする
//!   cargo run -p request_line_server -- --read-timeout-ms 500
//!
//! 動作確認:
//!   printf 'GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n' | nc localhost 42069
//!   curl -v http://localhost:42069/hello

use std::time::Duration;

use tokio_request_line::{ParserLimits, RequestLine, Response, Server};

struct ServerOptions {
    port: u16,
    read_timeout: Duration,
    max_line_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args()?;

    let addr = format!("0.0.0.0:{}", options.port);
    let server = Server::bind(&addr)
        .await?
        .read_timeout(options.read_timeout)
        .limits(ParserLimits::with_max_line_size(options.max_line_size));

    log::info!("server listening on http://{}", server.local_addr()?);
    server.serve(handle).await?;
    Ok(())
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "request_line_server";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("42069")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --read-timeout-ms オプション
    let read_timeout_ms: u64 = noargs::opt("read-timeout-ms")
        .doc("Deadline for receiving the request line in milliseconds")
        .default("2000")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --max-line-size オプション
    let max_line_size: usize = noargs::opt("max-line-size")
        .doc("Maximum request line length in bytes")
        .default("8192")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ServerOptions {
        port,
        read_timeout: Duration::from_millis(read_timeout_ms),
        max_line_size,
    })
}

async fn handle(line: RequestLine) -> Response {
    log::info!("{} {} HTTP/{}", line.method(), line.target(), line.version());

    let body = format!(
        "Method: {}\nTarget: {}\nVersion: {}\n",
        line.method(),
        line.target(),
        line.version()
    );
    Response::new(200, "OK")
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Server", concat!("request_line_server/", env!("CARGO_PKG_VERSION")))
        .body(body.into_bytes())
}
