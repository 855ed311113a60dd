/// A whitespace-delimited word with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
}

/// Splits STL text into whitespace-separated words, tracking lines.
pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current line, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next word, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = Token {
            text: &rest[..len],
            line: self.line,
            column: self.column,
        };
        self.pos += len;
        self.column += token.text.chars().count();
        Some(token)
    }

    /// Consumes the remainder of the current line and returns it trimmed.
    pub fn rest_of_line(&mut self) -> &'a str {
        let rest = &self.src[self.pos..];
        let len = rest.find('\n').unwrap_or(rest.len());
        self.pos += len;
        self.column += rest[..len].chars().count();
        rest[..len].trim()
    }

    fn skip_whitespace(&mut self) {
        for (offset, c) in self.src[self.pos..].char_indices() {
            if !c.is_whitespace() {
                self.pos += offset;
                return;
            }
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = self.src.len();
    }
}
