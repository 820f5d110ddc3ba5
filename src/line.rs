//! リクエストラインのパース (ステートレス)

use crate::error::Error;
use crate::limits::ParserLimits;
use crate::request_line::RequestLine;

/// 行終端
const CRLF: &[u8] = b"\r\n";

/// サポートする唯一の HTTP バージョン
const SUPPORTED_VERSION: &str = "1.1";

/// CRLF の位置を探す
pub(crate) fn find_line(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

/// バッファからリクエストラインを 1 つ取り出す (デフォルト制限)
///
/// - CRLF がまだない場合は `Ok(None)` (データ不足であり失敗ではない)
/// - 成功時は `(RequestLine, 消費バイト数)` を返す。消費バイト数は CRLF を含む
///
/// 副作用はなく、同じ入力に対して何度呼んでも同じ結果を返す。
pub fn try_parse_line(buf: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
    try_parse_line_with_limits(buf, &ParserLimits::default())
}

/// バッファからリクエストラインを 1 つ取り出す (制限付き)
pub fn try_parse_line_with_limits(
    buf: &[u8],
    limits: &ParserLimits,
) -> Result<Option<(RequestLine, usize)>, Error> {
    let Some(pos) = find_line(buf) else {
        // 末尾の CR は終端の前半かもしれないので行長に含めない
        let pending = if buf.ends_with(b"\r") {
            buf.len() - 1
        } else {
            buf.len()
        };
        if pending > limits.max_line_size {
            return Err(Error::LineTooLong {
                limit: limits.max_line_size,
            });
        }
        return Ok(None);
    };

    if pos > limits.max_line_size {
        return Err(Error::LineTooLong {
            limit: limits.max_line_size,
        });
    }

    let line = parse_start_line(&buf[..pos])?;
    Ok(Some((line, pos + CRLF.len())))
}

/// CRLF を除いたスタートラインを検証して RequestLine を構築
fn parse_start_line(raw: &[u8]) -> Result<RequestLine, Error> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| Error::MalformedRequestLine(format!("invalid UTF-8: {e}")))?;
    if line.contains('\r') || line.contains('\n') {
        return Err(Error::MalformedRequestLine("contains CR/LF".to_string()));
    }

    // METHOD SP TARGET SP VERSION
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(format!(
            "expected 3 tokens, got {}: {:?}",
            parts.len(),
            line
        )));
    }
    let (method, target, version) = (parts[0], parts[1], parts[2]);
    if method.is_empty() {
        return Err(Error::MalformedRequestLine("empty method".to_string()));
    }
    if target.is_empty() {
        return Err(Error::MalformedRequestLine("empty request-target".to_string()));
    }

    // HTTP/VERSION
    let version_parts: Vec<&str> = version.split('/').collect();
    if version_parts.len() != 2 || version_parts[0] != "HTTP" {
        return Err(Error::MalformedRequestLine(format!(
            "invalid HTTP version: {:?}",
            version
        )));
    }
    if version_parts[1] != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion(version_parts[1].to_string()));
    }

    Ok(RequestLine::new(method, target, version_parts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_complete_line() {
        let (line, consumed) = try_parse_line(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n")
            .unwrap()
            .unwrap();
        assert_eq!(line.method(), "GET");
        assert_eq!(line.target(), "/");
        assert_eq!(line.version(), "1.1");
        assert_eq!(consumed, 16);
    }

    #[test]
    fn need_more_data() {
        assert_eq!(try_parse_line(b"").unwrap(), None);
        assert_eq!(try_parse_line(b"GET / HTTP/1.1").unwrap(), None);
        assert_eq!(try_parse_line(b"GET / HTTP/1.1\r").unwrap(), None);
    }

    #[test]
    fn bare_lf_is_not_a_terminator() {
        assert_eq!(try_parse_line(b"GET / HTTP/1.1\n").unwrap(), None);
    }

    #[test]
    fn empty_line_is_malformed() {
        assert!(matches!(
            try_parse_line(b"\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn wrong_token_count_is_malformed() {
        for data in [
            &b"GET HTTP/1.1\r\n"[..],
            b"GET / HTTP/1.1 extra\r\n",
            b"GET  / HTTP/1.1\r\n",
            b"GET / HTTP/1.1 \r\n",
        ] {
            assert!(
                matches!(try_parse_line(data), Err(Error::MalformedRequestLine(_))),
                "{:?}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn empty_tokens_are_malformed() {
        assert!(matches!(
            try_parse_line(b" / HTTP/1.1\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
        assert!(matches!(
            try_parse_line(b"GET  HTTP/1.1\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn bad_version_shape_is_malformed() {
        for data in [
            &b"GET / HTTP1.1\r\n"[..],
            b"GET / HTTPS/1.1\r\n",
            b"GET / HTTP/1/1\r\n",
            b"GET / http/1.1\r\n",
        ] {
            assert!(
                matches!(try_parse_line(data), Err(Error::MalformedRequestLine(_))),
                "{:?}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn unsupported_version() {
        assert_eq!(
            try_parse_line(b"GET / HTTP/2.0\r\n\r\n"),
            Err(Error::UnsupportedVersion("2.0".to_string()))
        );
        assert_eq!(
            try_parse_line(b"GET / HTTP/1.0\r\n"),
            Err(Error::UnsupportedVersion("1.0".to_string()))
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(matches!(
            try_parse_line(b"GET /\xff HTTP/1.1\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn embedded_cr_is_malformed() {
        assert!(matches!(
            try_parse_line(b"GET /\r HTTP/1.1\r\n"),
            Err(Error::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn idempotent() {
        let data = b"DELETE /items/1 HTTP/1.1\r\n";
        assert_eq!(try_parse_line(data), try_parse_line(data));
    }

    #[test]
    fn line_too_long_without_crlf() {
        let limits = ParserLimits::with_max_line_size(8);
        assert_eq!(
            try_parse_line_with_limits(b"GET / HT", &limits).unwrap(),
            None
        );
        assert_eq!(
            try_parse_line_with_limits(b"GET / HT\r", &limits).unwrap(),
            None
        );
        assert_eq!(
            try_parse_line_with_limits(b"GET / HTT", &limits),
            Err(Error::LineTooLong { limit: 8 })
        );
    }

    #[test]
    fn line_too_long_with_crlf() {
        let limits = ParserLimits::with_max_line_size(8);
        assert_eq!(
            try_parse_line_with_limits(b"GET / HTTP/1.1\r\n", &limits),
            Err(Error::LineTooLong { limit: 8 })
        );
    }

    #[test]
    fn unlimited() {
        let target = format!("/{}", "a".repeat(100_000));
        let data = format!("GET {} HTTP/1.1\r\n", target);
        let (line, consumed) =
            try_parse_line_with_limits(data.as_bytes(), &ParserLimits::unlimited())
                .unwrap()
                .unwrap();
        assert_eq!(line.target(), target);
        assert_eq!(consumed, data.len());
    }
}
