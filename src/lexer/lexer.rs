use std::collections::VecDeque;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::ErrorImpl, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    directives::{Directive, DIRECTIVE_LOOKUP},
    tokens::{Token, TokenKind},
};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref TRAILING_WORD: Regex = Regex::new(r"([a-zA-Z_][a-zA-Z0-9_]*)\s*$").unwrap();

    /// Tried in order, the first pattern matching at the cursor wins. Longer
    /// operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: whitespace_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: line_comment_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new(r"^#string\b").unwrap(), handler: here_string_handler },
        RegexPattern { regex: Regex::new(r"^#asm\b").unwrap(), handler: asm_handler },
        RegexPattern { regex: Regex::new(r"^#[a-zA-Z_][a-zA-Z0-9_]*(,[a-zA-Z_][a-zA-Z0-9_]*)?").unwrap(), handler: directive_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^(0b[01_]+|0x[0-9a-fA-F_]+|[0-9][0-9_]*\.?[0-9]*([eE][+-]?[0-9]+)?)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<=") },
        RegexPattern { regex: Regex::new(r"^>>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals, ">>=") },
        RegexPattern { regex: Regex::new(r"^---").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Uninitialized, "---") },
        RegexPattern { regex: Regex::new(r"^::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::") },
        RegexPattern { regex: Regex::new(r"^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new(r"^\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..") },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new(r"^\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new(r"^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new(r"^\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=") },
        RegexPattern { regex: Regex::new(r"^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=") },
        RegexPattern { regex: Regex::new(r"^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=") },
        RegexPattern { regex: Regex::new(r"^&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=") },
        RegexPattern { regex: Regex::new(r"^\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=") },
        RegexPattern { regex: Regex::new(r"^\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new(r"^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
        RegexPattern { regex: Regex::new(r"^\$").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dollar, "$") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
    ];
}

/// Cursor over one source text. Handlers may queue several tokens at once
/// (string pieces, here-strings, asm bodies), `next_token` hands them out one
/// at a time.
pub struct Lexer {
    source: String,
    pos: usize,
    pending: VecDeque<Token>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Queues the next `len` bytes as one token of `kind`.
    fn emit(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        let value = self.source[start..start + len].to_string();
        self.push(MK_TOKEN!(kind, value, Span::new(start, start + len)));
        self.advance_n(len);
    }

    /// Queues `start..end` as an error token and moves the cursor to `end`.
    fn push_error(&mut self, error: ErrorImpl, start: usize, end: usize) {
        trace!("lexical error at {}..{}: {}", start, end, error);
        let mut token = MK_TOKEN!(
            TokenKind::Error,
            self.source[start..end].to_string(),
            Span::new(start, end)
        );
        token.error = Some(error);
        self.push(token);
        self.pos = end;
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }

    /// Returns the next token, `EOF` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }

            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(self.pos, self.pos));
            }

            self.step();
        }
    }

    fn step(&mut self) {
        let start = self.pos;
        let queued = self.pending.len();

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                (pattern.handler)(self, &pattern.regex);
                break;
            }
        }

        if self.pos == start && self.pending.len() == queued {
            let width = self.remainder().chars().next().map(char::len_utf8).unwrap_or(1);
            let token = self.source[start..start + width].to_string();
            self.push_error(ErrorImpl::UnrecognisedToken { token }, start, start + width);
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the single `EOF`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.finished = true;
        }

        Some(token)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Byte offset of the first occurrence of `word` in `text` that is not part
/// of a longer identifier.
fn find_word(text: &str, word: &str) -> Option<usize> {
    text.match_indices(word).map(|(offset, _)| offset).find(|&offset| {
        let before = text[..offset].chars().next_back();
        let after = text[offset + word.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

fn whitespace_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.emit(TokenKind::Whitespace, len);
}

fn line_comment_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.emit(TokenKind::CommentLine, len);
}

fn block_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let rest = lexer.remainder();
    let markdown = rest.starts_with("/**") && !rest.starts_with("/**/");
    let closing = rest[2..].find("*/");

    match closing {
        Some(offset) => {
            let kind = if markdown {
                TokenKind::CommentMarkdownBlock
            } else {
                TokenKind::CommentBlock
            };
            lexer.emit(kind, offset + 4);
        }
        None => {
            let (start, end) = (lexer.pos(), lexer.source.len());
            lexer.push_error(ErrorImpl::UnterminatedBlockComment, start, end);
        }
    }
}

fn here_string_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.pos();
    let keyword_len = lexer.matched_len(regex);
    let rest = &lexer.remainder()[keyword_len..];
    let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();

    let Some(delimiter) = IDENTIFIER.find(&rest[gap..]).map(|m| m.as_str().to_string()) else {
        // The parser reports the missing delimiter.
        lexer.emit(TokenKind::Directive(Directive::String), keyword_len);
        return;
    };

    let body_start = keyword_len + gap + delimiter.len();
    let body = &lexer.remainder()[body_start..];
    let closing = find_word(body, &delimiter);
    let first_line = body.split('\n').next().unwrap_or_default();
    let first_line_len = first_line.len();
    let last_word = TRAILING_WORD
        .captures(first_line)
        .and_then(|captures| captures.get(1))
        .map(|word| word.as_str().to_string());

    match closing {
        Some(offset) => {
            lexer.emit(TokenKind::Directive(Directive::String), keyword_len);
            if gap > 0 {
                lexer.emit(TokenKind::Whitespace, gap);
            }
            lexer.emit(TokenKind::Identifier, delimiter.len());
            if offset > 0 {
                lexer.emit(TokenKind::HereStringContent, offset);
            }
            lexer.emit(TokenKind::Identifier, delimiter.len());
        }
        None => {
            let later = lone_word_line(&body[first_line_len..]);
            let (error, end) = match (last_word, later) {
                (Some(found), _) if found != delimiter => (
                    ErrorImpl::HereStringDelimiterMismatch {
                        expected: delimiter,
                        found,
                    },
                    first_line_len,
                ),
                (_, Some((found, end))) => (
                    ErrorImpl::HereStringDelimiterMismatch {
                        expected: delimiter,
                        found,
                    },
                    first_line_len + end,
                ),
                _ => (ErrorImpl::UnterminatedHereString { delimiter }, first_line_len),
            };
            lexer.push_error(error, start, start + body_start + end);
        }
    }
}

/// The last line of `text` holding a single identifier and nothing else,
/// taken as a mistyped here-string closer. Returns the word and the offset
/// just past it.
fn lone_word_line(text: &str) -> Option<(String, usize)> {
    let mut line_start = 0;
    let mut found = None;

    for line in text.split_inclusive('\n') {
        let word = line.trim();
        let is_lone_word = IDENTIFIER
            .find(word)
            .is_some_and(|m| m.end() == word.len());

        if is_lone_word {
            found = Some((word.to_string(), line_start + line.trim_end().len()));
        }
        line_start += line.len();
    }

    found
}

fn asm_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.emit(TokenKind::Directive(Directive::Asm), len);

    // Feature list, then the raw body up to the first `}`.
    loop {
        let rest = lexer.remainder();
        let Some(ch) = rest.chars().next() else {
            return;
        };

        if ch == '{' {
            let closing = rest[1..].find('}');
            let start = lexer.pos();
            match closing {
                Some(offset) => {
                    lexer.emit(TokenKind::OpenCurly, 1);
                    if offset > 0 {
                        lexer.emit(TokenKind::AsmContent, offset);
                    }
                    lexer.emit(TokenKind::CloseCurly, 1);
                }
                None => {
                    let end = lexer.source.len();
                    lexer.push_error(ErrorImpl::UnterminatedAsmBlock, start, end);
                }
            }
            return;
        } else if ch == ',' {
            lexer.emit(TokenKind::Comma, 1);
        } else if ch.is_whitespace() {
            let width = rest.len() - rest.trim_start().len();
            lexer.emit(TokenKind::Whitespace, width);
        } else if let Some(width) = IDENTIFIER.find(rest).map(|m| m.end()) {
            lexer.emit(TokenKind::Identifier, width);
        } else {
            return;
        }
    }
}

fn directive_handler(lexer: &mut Lexer, regex: &Regex) {
    let start = lexer.pos();
    let len = lexer.matched_len(regex);
    let text = lexer.remainder()[..len].to_string();

    if let Some(directive) = DIRECTIVE_LOOKUP.get(text.as_str()) {
        lexer.emit(TokenKind::Directive(*directive), len);
        return;
    }

    // `#code,x` where `,x` is not a known suffix: the comma belongs to the
    // surrounding list.
    let base = text.split(',').next().unwrap_or_default();
    match DIRECTIVE_LOOKUP.get(base) {
        Some(directive) => lexer.emit(TokenKind::Directive(*directive), base.len()),
        None => lexer.push_error(
            ErrorImpl::UnknownDirective {
                directive: base.to_string(),
            },
            start,
            start + base.len(),
        ),
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched_len(regex);
    lexer.emit(TokenKind::Identifier, len);
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let mut len = lexer.matched_len(regex);

    // `0..10` is a range, not the float `0.` followed by `.10`.
    let rest = lexer.remainder();
    if let Some(dot) = rest[..len].find('.') {
        if rest[dot + 1..].starts_with('.') {
            len = dot;
        }
    }

    lexer.emit(TokenKind::Number, len);
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let start = lexer.pos();
    let rest = lexer.remainder();
    let bytes = rest.as_bytes();

    let mut pieces: Vec<(TokenKind, usize)> = vec![(TokenKind::DoubleQuote, 1)];
    let mut i = 1;
    let mut closed = false;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                pieces.push((TokenKind::DoubleQuote, 1));
                closed = true;
                break;
            }
            b'\\' => match rest[i + 1..].chars().next() {
                Some(escaped) => {
                    let width = 1 + escaped.len_utf8();
                    pieces.push((TokenKind::EscapeSequence, width));
                    i += width;
                }
                None => break,
            },
            b'%' => {
                let digits = rest[i + 1..].bytes().take_while(|b| b.is_ascii_digit()).count();
                pieces.push((TokenKind::StringPlaceholder, 1 + digits));
                i += 1 + digits;
            }
            _ => {
                let run = rest[i..]
                    .find(|ch: char| matches!(ch, '"' | '\\' | '%'))
                    .unwrap_or(rest.len() - i);
                pieces.push((TokenKind::StringContent, run));
                i += run;
            }
        }
    }

    if !closed {
        let end = start + rest.len();
        lexer.push_error(ErrorImpl::UnterminatedString, start, end);
        return;
    }

    for (kind, len) in pieces {
        lexer.emit(kind, len);
    }
}

/// Lexes the whole source, trivia included, ending with one `EOF` token.
pub fn tokenize(source: impl Into<String>) -> Vec<Token> {
    Lexer::new(source).collect()
}
