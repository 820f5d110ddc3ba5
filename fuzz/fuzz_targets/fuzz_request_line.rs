#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_request_line::{
    LineBuffer, ParseState, ParserLimits, RequestLineParser, try_parse_line_with_limits,
};

fuzz_target!(|data: &[u8]| {
    // 行長制限にも届くよう小さめの上限にする
    let limits = ParserLimits::with_max_line_size(64);

    // データを一度にパース
    let one_shot = try_parse_line_with_limits(data, &limits);

    // データを分割して feed (ストリーミングシナリオ)
    let mut parser = RequestLineParser::with_limits(limits);
    let mut buf = LineBuffer::with_capacity(1);
    for chunk in data.chunks(7) {
        let mut rest = chunk;
        while !rest.is_empty() {
            let dst = buf.unfilled_mut();
            let n = dst.len().min(rest.len());
            dst[..n].copy_from_slice(&rest[..n]);
            buf.advance(n);
            rest = &rest[n..];
        }
        if buf.feed_into(&mut parser).is_err() || parser.is_terminal() {
            break;
        }
    }

    // 分割しても結果は変わらない
    match one_shot {
        Ok(Some((line, _))) => assert_eq!(parser.request_line(), Some(&line)),
        Ok(None) => assert_eq!(parser.state(), ParseState::Init),
        Err(e) => assert_eq!(parser.error(), Some(&e)),
    }
});
