//! トークン生成用の単語リスト

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use super::WordListError;

/// クレートに同梱されるデフォルトの単語リスト
const EMBEDDED_WORDS: &str = include_str!("../../assets/words.txt");

/// トークンの元になる固定の単語辞書
///
/// 起動時に一度だけ読み込まれ、以後は不変として扱われます。
/// 1 行 1 単語のテキスト形式で、空行と `#` で始まる行は無視されます。
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// テキストから単語リストを構築
    ///
    /// トークンは大文字に正規化して照合されるため、大小違いだけの重複語は
    /// 最初の 1 語に畳みます。`len` は発行可能な相異なるトークン数に
    /// 一致します。
    ///
    /// # Errors
    ///
    /// 有効な単語が 1 つもない場合は `WordListError::Empty` を返します。
    /// 空の辞書は起動時の致命的な設定エラーとして扱われます。
    pub fn parse(text: &str) -> Result<Self, WordListError> {
        let mut seen = HashSet::new();
        let words: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter(|line| seen.insert(line.to_uppercase()))
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self { words })
    }

    /// ファイルから単語リストを読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// クレート同梱のデフォルト単語リストを読み込む
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_WORDS).expect("embedded word list must not be empty")
    }

    /// 単語数を取得
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// 単語リストが空かどうか
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 一様ランダムに単語を 1 つ引く
    pub fn sample(&self, rng: &mut impl Rng) -> &str {
        &self.words[rng.random_range(0..self.words.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines_and_comments() {
        // テスト項目: 空行とコメント行は単語として扱われない
        // given (前提条件):
        let text = "bamboo\n\n# comment\n  river  \n";

        // when (操作):
        let words = WordList::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_parse_collapses_case_variant_duplicates() {
        // テスト項目: 大小違いだけの重複語は 1 語として数えられる
        // given (前提条件):
        let text = "alpha\nAlpha\nALPHA\nbravo\nbravo\n";

        // when (操作):
        let words = WordList::parse(text).unwrap();

        // then (期待する結果): 相異なるトークンは alpha と bravo の 2 つ
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_empty_word_list_is_a_configuration_error() {
        // テスト項目: 有効な単語が無いリストはエラー
        let result = WordList::parse("\n# only a comment\n");
        assert!(matches!(result, Err(WordListError::Empty)));
    }

    #[test]
    fn test_embedded_word_list_is_usable() {
        // テスト項目: 同梱の単語リストが読み込めて空でない
        let words = WordList::embedded();
        assert!(!words.is_empty());
    }

    #[test]
    fn test_sample_returns_a_listed_word() {
        // テスト項目: sample はリスト中の単語を返す
        // given (前提条件):
        let words = WordList::parse("alpha\nbravo\ncharlie\n").unwrap();
        let mut rng = rand::rng();

        // when (操作) / then (期待する結果):
        for _ in 0..20 {
            let word = words.sample(&mut rng);
            assert!(["alpha", "bravo", "charlie"].contains(&word));
        }
    }
}
