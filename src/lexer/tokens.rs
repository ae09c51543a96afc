use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::{errors::errors::ErrorImpl, Span};

use super::directives::Directive;

lazy_static! {
    /// Words that act as keywords in some grammar position. The lexer never
    /// turns them into anything but `Identifier`, the parser asks for them
    /// through [`Token::keyword`] where a rule expects one.
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("if", Keyword::If);
        map.insert("ifx", Keyword::Ifx);
        map.insert("then", Keyword::Then);
        map.insert("else", Keyword::Else);
        map.insert("while", Keyword::While);
        map.insert("for", Keyword::For);
        map.insert("return", Keyword::Return);
        map.insert("break", Keyword::Break);
        map.insert("continue", Keyword::Continue);
        map.insert("defer", Keyword::Defer);
        map.insert("remove", Keyword::Remove);
        map.insert("using", Keyword::Using);
        map.insert("case", Keyword::Case);
        map.insert("struct", Keyword::Struct);
        map.insert("union", Keyword::Union);
        map.insert("enum", Keyword::Enum);
        map.insert("enum_flags", Keyword::EnumFlags);
        map.insert("cast", Keyword::Cast);
        map.insert("xx", Keyword::Xx);
        map.insert("inline", Keyword::Inline);
        map.insert("no_inline", Keyword::NoInline);
        map.insert("operator", Keyword::Operator);
        map.insert("true", Keyword::True);
        map.insert("false", Keyword::False);
        map.insert("null", Keyword::Null);
        map.insert("it", Keyword::It);
        map.insert("it_index", Keyword::ItIndex);
        map.insert("context", Keyword::Context);
        map.insert("temp", Keyword::Temp);
        map.insert("main", Keyword::Main);
        map.insert("for_expansion", Keyword::ForExpansion);
        map.insert("map", Keyword::Map);
        map.insert("except", Keyword::Except);
        map.insert("only", Keyword::Only);
        map.insert("trunc", Keyword::Trunc);
        map.insert("no_check", Keyword::NoCheck);
        map
    };

    pub static ref PRIMITIVE_TYPES: HashSet<&'static str> = [
        "int", "u8", "u16", "u32", "u64", "s8", "s16", "s32", "s64", "float", "float32",
        "float64", "bool", "string", "void", "Code", "Type",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    If,
    Ifx,
    Then,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Defer,
    Remove,
    Using,
    Case,
    Struct,
    Union,
    Enum,
    EnumFlags,
    Cast,
    Xx,
    Inline,
    NoInline,
    Operator,
    True,
    False,
    Null,
    It,
    ItIndex,
    Context,
    Temp,
    Main,
    ForExpansion,
    Map,
    Except,
    Only,
    Trunc,
    NoCheck,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// A malformed run of input, the token carries the diagnostic.
    Error,

    // Trivia
    Whitespace,
    CommentLine,
    CommentBlock,
    CommentMarkdownBlock,

    Identifier,
    Number,
    Directive(Directive),

    // String pieces
    DoubleQuote,
    StringContent,
    EscapeSequence,
    StringPlaceholder,
    HereStringContent,
    AsmContent,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Pipe,
    Ampersand,
    Caret,
    Tilde,
    ShiftLeft,
    ShiftRight,

    Dot,
    DotDot,
    Uninitialized, // ---
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Arrow,
    At,
    Dollar,

    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    ShiftLeftEquals,
    ShiftRightEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::CommentLine
                | TokenKind::CommentBlock
                | TokenKind::CommentMarkdownBlock
        )
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::AmpersandEquals
                | TokenKind::PipeEquals
                | TokenKind::CaretEquals
                | TokenKind::ShiftLeftEquals
                | TokenKind::ShiftRightEquals
        )
    }

    /// Operators that may follow `operator` in an overload declaration.
    pub fn is_overloadable(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEquals
                | TokenKind::GreaterEquals
                | TokenKind::Ampersand
                | TokenKind::Pipe
                | TokenKind::Caret
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::OpenBracket
                | TokenKind::Tilde
        )
    }

    /// The fixed spelling of punctuation, used in diagnostics.
    pub fn lexeme(&self) -> Option<&'static str> {
        let lexeme = match self {
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Pipe => "|",
            TokenKind::Ampersand => "&",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Uninitialized => "---",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::At => "@",
            TokenKind::Dollar => "$",
            TokenKind::DoubleQuote => "\"",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::StarEquals => "*=",
            TokenKind::SlashEquals => "/=",
            TokenKind::PercentEquals => "%=",
            TokenKind::AmpersandEquals => "&=",
            TokenKind::PipeEquals => "|=",
            TokenKind::CaretEquals => "^=",
            TokenKind::ShiftLeftEquals => "<<=",
            TokenKind::ShiftRightEquals => ">>=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Directive(directive) => directive.lexeme(),
            _ => return None,
        };

        Some(lexeme)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lexeme() {
            Some(lexeme) => write!(f, "{}", lexeme),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub value: String,
    pub span: Span,
    /// Whitespace and comments directly before this token.
    pub leading: Vec<Token>,
    /// Set on `TokenKind::Error` tokens only.
    pub error: Option<ErrorImpl>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// The keyword this identifier spells, if any. Whether it acts as one is
    /// up to the grammar position.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Identifier {
            return None;
        }

        KEYWORD_LOOKUP.get(self.value.as_str()).copied()
    }

    pub fn directive(&self) -> Option<Directive> {
        match self.kind {
            TokenKind::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    pub fn is_primitive_type(&self) -> bool {
        self.kind == TokenKind::Identifier && PRIMITIVE_TYPES.contains(self.value.as_str())
    }

    /// True when a line break separates this token from whatever came before.
    pub fn starts_line(&self) -> bool {
        self.leading.iter().any(|trivia| trivia.value.contains('\n'))
    }
}
