//! Unit tests for the lexer module.
//!
//! Covers identifiers and contextual keywords, number forms, string pieces,
//! here-strings, directives, asm bodies, comments and the lexical error
//! tokens, plus the trivia pass.

use crate::errors::errors::ErrorImpl;

use super::{
    directives::Directive,
    lexer::tokenize,
    tokens::{Keyword, TokenKind},
    trivia::attach_trivia,
};

fn significant_kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .into_iter()
        .filter(|token| !token.is_trivia())
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_identifiers_and_keywords() {
    let tokens = attach_trivia(tokenize("if for struct foo it _under Camel9"));

    assert!(tokens[..7].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].keyword(), Some(Keyword::If));
    assert_eq!(tokens[1].keyword(), Some(Keyword::For));
    assert_eq!(tokens[2].keyword(), Some(Keyword::Struct));
    assert_eq!(tokens[3].keyword(), None);
    assert_eq!(tokens[4].keyword(), Some(Keyword::It));
    assert_eq!(tokens[5].value, "_under");
    assert_eq!(tokens[6].value, "Camel9");
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = attach_trivia(tokenize("42 3.14 0x1F_FF 0b1010 1e10 2.5e-3 1_000"));
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();

    assert!(tokens[..7].iter().all(|t| t.kind == TokenKind::Number));
    assert_eq!(
        values,
        vec!["42", "3.14", "0x1F_FF", "0b1010", "1e10", "2.5e-3", "1_000", ""]
    );
}

#[test]
fn test_range_is_not_a_float() {
    let tokens = attach_trivia(tokenize("0..10 1.5..2"));
    let pairs: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.value.as_str())).collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Number, "0"),
            (TokenKind::DotDot, ".."),
            (TokenKind::Number, "10"),
            (TokenKind::Number, "1.5"),
            (TokenKind::DotDot, ".."),
            (TokenKind::Number, "2"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_maximal_munch_operators() {
    assert_eq!(
        significant_kinds("<<= << < :: : .. . --- -> >>= == = != !"),
        vec![
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftLeft,
            TokenKind::Less,
            TokenKind::ColonColon,
            TokenKind::Colon,
            TokenKind::DotDot,
            TokenKind::Dot,
            TokenKind::Uninitialized,
            TokenKind::Arrow,
            TokenKind::ShiftRightEquals,
            TokenKind::Equals,
            TokenKind::Assignment,
            TokenKind::NotEquals,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        significant_kinds("+= -= *= /= %= &= |= ^="),
        vec![
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_string_pieces() {
    let tokens = tokenize(r#""a\nb %1 %""#);
    let pairs: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.value.as_str())).collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::DoubleQuote, "\""),
            (TokenKind::StringContent, "a"),
            (TokenKind::EscapeSequence, "\\n"),
            (TokenKind::StringContent, "b "),
            (TokenKind::StringPlaceholder, "%1"),
            (TokenKind::StringContent, " "),
            (TokenKind::StringPlaceholder, "%"),
            (TokenKind::DoubleQuote, "\""),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_escaped_quote_does_not_close_string() {
    let tokens = tokenize(r#""say \"hi\"""#);

    assert_eq!(tokens[2].kind, TokenKind::EscapeSequence);
    assert_eq!(tokens[2].value, "\\\"");
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::DoubleQuote).count(), 2);
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("x := \"abc\ndef");
    let error = &tokens[tokens.len() - 2];

    assert_eq!(error.kind, TokenKind::Error);
    assert_eq!(error.value, "\"abc\ndef");
    assert_eq!(error.error, Some(ErrorImpl::UnterminatedString));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
}

#[test]
fn test_comments() {
    let tokens = tokenize("// hi\n/* block */ /** doc */ /**/");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::CommentLine,
            TokenKind::Whitespace,
            TokenKind::CommentBlock,
            TokenKind::Whitespace,
            TokenKind::CommentMarkdownBlock,
            TokenKind::Whitespace,
            TokenKind::CommentBlock,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[0].value, "// hi");
    assert_eq!(tokens[4].value, "/** doc */");
}

#[test]
fn test_block_comments_do_not_nest() {
    let tokens = tokenize("/* a /* b */ c */");

    assert_eq!(tokens[0].kind, TokenKind::CommentBlock);
    assert_eq!(tokens[0].value, "/* a /* b */");
}

#[test]
fn test_unterminated_block_comment() {
    let tokens = tokenize("a /* never closed");

    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].value, "/* never closed");
    assert_eq!(tokens[2].error, Some(ErrorImpl::UnterminatedBlockComment));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_here_string() {
    let tokens = tokenize("#string END\nhello\nEND");
    let pairs: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.value.as_str())).collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Directive(Directive::String), "#string"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "END"),
            (TokenKind::HereStringContent, "\nhello\n"),
            (TokenKind::Identifier, "END"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_here_string_needs_whole_word_delimiter() {
    let tokens = tokenize("#string DONE\nnot DONEYET\nDONE");

    assert_eq!(tokens[3].kind, TokenKind::HereStringContent);
    assert_eq!(tokens[3].value, "\nnot DONEYET\n");
}

#[test]
fn test_here_string_delimiter_mismatch() {
    let tokens = tokenize("#string A abc B");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "#string A abc B");
    assert_eq!(
        tokens[0].error,
        Some(ErrorImpl::HereStringDelimiterMismatch {
            expected: "A".to_string(),
            found: "B".to_string(),
        })
    );
}

#[test]
fn test_here_string_mismatch_on_a_later_line() {
    let tokens = tokenize("#string A\nabc\nB\n");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "#string A\nabc\nB");
    assert_eq!(
        tokens[0].error,
        Some(ErrorImpl::HereStringDelimiterMismatch {
            expected: "A".to_string(),
            found: "B".to_string(),
        })
    );
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_here_string() {
    let tokens = tokenize("#string X\nabc def");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].value, "#string X");
    assert_eq!(
        tokens[0].error,
        Some(ErrorImpl::UnterminatedHereString {
            delimiter: "X".to_string(),
        })
    );
}

#[test]
fn test_directives_with_suffixes() {
    assert_eq!(
        significant_kinds("#import,file #code,typed #run #insert,scope #type,isa #type"),
        vec![
            TokenKind::Directive(Directive::ImportFile),
            TokenKind::Directive(Directive::CodeTyped),
            TokenKind::Directive(Directive::Run),
            TokenKind::Directive(Directive::InsertScope),
            TokenKind::Directive(Directive::TypeIsa),
            TokenKind::Directive(Directive::Type),
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unknown_suffix_falls_back_to_base_directive() {
    assert_eq!(
        significant_kinds("#code,x"),
        vec![
            TokenKind::Directive(Directive::Code),
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_every_directive_round_trips_through_the_lexer() {
    for directive in Directive::ALL {
        if directive == Directive::String || directive == Directive::Asm {
            continue;
        }

        let tokens = tokenize(directive.lexeme());
        assert_eq!(tokens[0].kind, TokenKind::Directive(directive), "{}", directive.lexeme());
        assert_eq!(tokens[0].value, directive.lexeme());
    }
}

#[test]
fn test_unknown_directive() {
    let tokens = tokenize("#nope 1");

    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(
        tokens[0].error,
        Some(ErrorImpl::UnknownDirective {
            directive: "#nope".to_string(),
        })
    );
    assert_eq!(tokens[2].kind, TokenKind::Number);
}

#[test]
fn test_asm_block() {
    let tokens = tokenize("#asm AVX, SSE { mov a, b; }");
    let pairs: Vec<(TokenKind, &str)> = tokens
        .iter()
        .filter(|t| !t.is_trivia())
        .map(|t| (t.kind, t.value.as_str()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Directive(Directive::Asm), "#asm"),
            (TokenKind::Identifier, "AVX"),
            (TokenKind::Comma, ","),
            (TokenKind::Identifier, "SSE"),
            (TokenKind::OpenCurly, "{"),
            (TokenKind::AsmContent, " mov a, b; "),
            (TokenKind::CloseCurly, "}"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_unterminated_asm_block() {
    let tokens = tokenize("#asm { mov a, b;");
    let error = &tokens[tokens.len() - 2];

    assert_eq!(error.kind, TokenKind::Error);
    assert_eq!(error.value, "{ mov a, b;");
    assert_eq!(error.error, Some(ErrorImpl::UnterminatedAsmBlock));
}

#[test]
fn test_unrecognised_characters() {
    let tokens = attach_trivia(tokenize("a ? é"));

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "?");
    assert_eq!(
        tokens[1].error,
        Some(ErrorImpl::UnrecognisedToken {
            token: "?".to_string(),
        })
    );
    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].value, "é");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_single_trailing_eof() {
    let source = "x := 1; // done\n";
    let tokens = tokenize(source);

    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.value, "");
    assert_eq!(eof.span.start.0 as usize, source.len());
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_tokens_are_lossless() {
    let source = "f :: (a: *u8) -> int #c_call { /* x */ return \"%1\\t\" + 0..2 ? `; }\n#string E\nraw\nE";
    let rebuilt: String = tokenize(source).iter().map(|t| t.value.as_str()).collect();

    assert_eq!(rebuilt, source);
}

#[test]
fn test_spans_match_values() {
    let source = "foo.bar(1, \"s\")";

    for token in tokenize(source) {
        let (start, end) = (token.span.start.0 as usize, token.span.end.0 as usize);
        assert_eq!(&source[start..end], token.value);
    }
}

#[test]
fn test_attach_trivia() {
    let tokens = attach_trivia(tokenize("a // c\n b"));

    assert_eq!(tokens.len(), 3);
    assert!(tokens[0].leading.is_empty());
    assert!(!tokens[0].starts_line());

    let leading: Vec<TokenKind> = tokens[1].leading.iter().map(|t| t.kind).collect();
    assert_eq!(
        leading,
        vec![TokenKind::Whitespace, TokenKind::CommentLine, TokenKind::Whitespace]
    );
    assert!(tokens[1].starts_line());
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_trailing_trivia_goes_to_eof() {
    let tokens = attach_trivia(tokenize("x /* tail */"));

    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert_eq!(tokens[1].leading.len(), 2);
    assert_eq!(tokens[1].leading[1].kind, TokenKind::CommentBlock);
}
