//! Single left-to-right tokeniser for step patterns.
//!
//! Every consumer (regex compiler, argument extractor, text resolver,
//! segment parser, display formatter) walks the same token stream, so the
//! arguments one of them sees are the arguments all of them see. Tokens
//! partition the input: concatenating every `raw` slice reproduces the
//! pattern.

use super::handlers::{Anchor, HANDLERS, LiteralText, OptionalClose, Piece, Scan};

/// A construct together with the pattern text it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub piece: Piece,
    pub raw: &'a str,
}

/// Byte offsets of the body between an optional leading `^` and an optional
/// trailing `$`.
fn body_bounds(pattern: &str) -> (usize, usize) {
    let start = usize::from(pattern.starts_with('^'));
    let mut end = pattern.len();
    if end > start && pattern.ends_with('$') && !pattern.ends_with("\\$") {
        end -= 1;
    }
    (start, end)
}

struct Lexer<'a> {
    pattern: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Push the token covering `pattern[start..end]`.
    fn push(&mut self, piece: Piece, start: usize, end: usize) {
        self.tokens.push(Token {
            piece,
            raw: self.pattern.get(start..end).unwrap_or_default(),
        });
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if start < end {
            let text = self.pattern.get(start..end).unwrap_or_default();
            self.push(Piece::Text(LiteralText(text.to_string())), start, end);
        }
    }

    /// Tokenise `pattern[offset..end]`. Optional groups recurse into their
    /// body, which cannot itself hold a group.
    fn lex_body(&mut self, offset: usize, end: usize, in_group: bool) {
        let body = self.pattern.get(offset..end).unwrap_or_default();
        let mut text_start = 0;
        let mut pos = 0;
        while pos < body.len() {
            let scan = if in_group {
                Scan::in_group(body, pos)
            } else {
                Scan::new(body, pos)
            };
            let Some((len, piece)) = HANDLERS.iter().find_map(|detect| detect(&scan)) else {
                pos += scan.rest().chars().next().map_or(1, char::len_utf8);
                continue;
            };
            self.push_text(offset + text_start, offset + pos);
            let group_len = match &piece {
                Piece::OptionalOpen(open) => Some(open.group_len),
                _ => None,
            };
            self.push(piece, offset + pos, offset + pos + len);
            if let Some(group_len) = group_len {
                let close = pos + group_len - 1;
                self.lex_body(offset + pos + len, offset + close, true);
                self.push(Piece::OptionalClose(OptionalClose), offset + close, offset + close + 1);
                pos = close + 1;
            } else {
                pos += len;
            }
            text_start = pos;
        }
        self.push_text(offset + text_start, end);
    }
}

/// Split `pattern` into tokens. Never fails: anything no handler recognises
/// is literal text.
pub(crate) fn lex_pattern(pattern: &str) -> Vec<Token<'_>> {
    let (body_start, body_end) = body_bounds(pattern);
    let mut lexer = Lexer {
        pattern,
        tokens: Vec::new(),
    };
    if body_start > 0 {
        lexer.push(Piece::Anchor(Anchor), 0, body_start);
    }
    lexer.lex_body(body_start, body_end, false);
    if body_end < pattern.len() {
        lexer.push(Piece::Anchor(Anchor), body_end, pattern.len());
    }
    lexer.tokens
}

/// Whether the pattern ends in a data-table declaration.
pub(crate) fn ends_with_table(tokens: &[Token<'_>]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|token| !matches!(token.piece, Piece::Anchor(_)))
        .is_some_and(|token| matches!(token.piece, Piece::Table(_)))
}
