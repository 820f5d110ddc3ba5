//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// リクエストライン要素の生成
// ========================================

/// HTTP トークン文字 (RFC 9110 tchar の一部)
pub fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
        Just('!'),
        Just('~'),
    ]
}

/// HTTP メソッド: 既知のメソッドか任意のトークン
pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        Just("HEAD".to_string()),
        Just("OPTIONS".to_string()),
        Just("PATCH".to_string()),
        proptest::collection::vec(token_char(), 1..=16)
            .prop_map(|chars| chars.into_iter().collect()),
    ]
}

/// リクエストターゲット: origin-form / asterisk-form / absolute-form
pub fn request_target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("*".to_string()),
        "/[a-zA-Z0-9/_.~%-]{1,64}".prop_map(|s| s),
        "/[a-z]{1,16}\\?[a-z]{1,8}=[a-zA-Z0-9]{0,8}".prop_map(|s| s),
        "http://[a-z]{1,16}\\.example/[a-z]{0,16}".prop_map(|s| s),
    ]
}

/// 1.1 以外の HTTP バージョン
pub fn unsupported_version() -> impl Strategy<Value = String> {
    "[0-9]\\.[0-9]".prop_filter("1.1 is supported", |v| v != "1.1")
}

/// ヘッダー部 (リクエストラインの後ろに続くバイト列)
pub fn trailing_headers() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(("[A-Za-z-]{1,16}", "[ -~]{0,32}"), 0..4).prop_map(|headers| {
        let mut buf = Vec::new();
        for (name, value) in headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");
        buf
    })
}
