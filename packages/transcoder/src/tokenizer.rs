use logos::Logos;

/// Opening structural delimiter.
pub const OPEN: char = '(';
/// Closing structural delimiter.
pub const CLOSE: char = ')';

/// Whether `c` is reserved for structure and therefore barred from labels.
pub fn is_reserved(c: char) -> bool {
    c == OPEN || c == CLOSE
}

/// Token types for serialized tree text.
///
/// No skip patterns: whitespace is label content.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    #[token("(")]
    Open,

    #[token(")")]
    Close,

    // Maximal run of non-delimiter text
    #[regex(r"[^()]+", |lex| lex.slice())]
    Label(&'src str),
}

/// Tokenize a serialized form.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let lexer = Token::lexer(source);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}
