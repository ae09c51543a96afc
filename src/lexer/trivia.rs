use log::trace;

use super::tokens::Token;

/// Folds whitespace and comment tokens into the `leading` trivia of the next
/// significant token, so the grammar only ever sees significant tokens.
/// Trailing trivia ends up on `EOF`.
pub struct TriviaAttacher<I: Iterator<Item = Token>> {
    inner: I,
}

impl<I: Iterator<Item = Token>> TriviaAttacher<I> {
    pub fn new(inner: I) -> Self {
        TriviaAttacher { inner }
    }
}

impl<I: Iterator<Item = Token>> Iterator for TriviaAttacher<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut leading = Vec::new();

        loop {
            let mut token = self.inner.next()?;
            if token.is_trivia() {
                leading.push(token);
                continue;
            }

            if !leading.is_empty() {
                trace!("attached {} trivia token(s) to {:?}", leading.len(), token.kind);
            }
            token.leading = leading;
            return Some(token);
        }
    }
}

pub fn attach_trivia<T: IntoIterator<Item = Token>>(tokens: T) -> Vec<Token> {
    TriviaAttacher::new(tokens.into_iter()).collect()
}
