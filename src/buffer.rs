//! ストリームドライバー用の受信バッファ

use crate::error::Error;
use crate::parser::RequestLineParser;

/// デフォルトの初期容量
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// 受信バッファ (Sans I/O)
///
/// `[0, filled)` が未だパーサーに消費されていないバイト列で、到着順に並ぶ。
/// 読み取りは `unfilled_mut()` に書き込んでから `advance()` で確定する。
/// 空きがない状態で `unfilled_mut()` を呼ぶと容量を倍にする。
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    filled: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }
}

impl LineBuffer {
    /// 初期容量を指定して作成 (0 の場合は 1 バイト)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.max(1)],
            filled: 0,
        }
    }

    /// 未消費のデータ
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// 未消費のバイト数
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// 現在の容量
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// 読み取り先の空き領域
    ///
    /// 空きがなければ容量を倍にしてから返すため、戻り値は常に空でない。
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        if self.filled == self.buf.len() {
            let new_len = self.buf.len() * 2;
            self.buf.resize(new_len, 0);
        }
        &mut self.buf[self.filled..]
    }

    /// `unfilled_mut()` に書き込んだ `n` バイトを確定する
    ///
    /// # Panics
    ///
    /// 空き領域を超える `n` を渡した場合
    pub fn advance(&mut self, n: usize) {
        assert!(
            self.filled + n <= self.buf.len(),
            "advance beyond buffer capacity"
        );
        self.filled += n;
    }

    /// 先頭 `n` バイトを捨てて残りを前に詰める
    fn consume(&mut self, n: usize) {
        self.buf.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    /// 未消費データをパーサーに渡し、消費分を詰める
    ///
    /// 消費したバイト数を返す。
    pub fn feed_into(&mut self, parser: &mut RequestLineParser) -> Result<usize, Error> {
        let consumed = parser.feed(self.filled())?;
        self.consume(consumed);
        Ok(consumed)
    }
}
