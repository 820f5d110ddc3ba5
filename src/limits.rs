/// パーサーの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserLimits {
    /// 最大リクエストライン長 (CRLF を含まない、デフォルト: 8KB)
    ///
    /// ストリームドライバーのバッファはこの長さ + 2 バイトまでしか伸びない。
    pub max_line_size: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_line_size: 8 * 1024, // 8KB
        }
    }
}

impl ParserLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_line_size: usize::MAX,
        }
    }

    /// 最大リクエストライン長を指定して作成
    pub fn with_max_line_size(max_line_size: usize) -> Self {
        Self { max_line_size }
    }
}
