//! Tokenizer for GermanScript.
//!
//! The tokenizer pulls files off an [`ImportQueue`] and converts them into
//! a lazy stream of tokens, one physical line at a time. Every line that
//! produces tokens ends with a [`TokenKind::NewLine`]. Past the end of the
//! last file it returns an EOF token forever.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use germanscript_foundation::{Error, ErrorContext, ErrorKind, Result, Span};
use tracing::{debug, trace};

use crate::determiner::DeterminerKind;
use crate::source::{ImportQueue, SourceFile};
use crate::token::{Keyword, Operator, Token, TokenKind};

/// A file currently being tokenized.
struct OpenFile {
    path: Arc<Path>,
    lines: Vec<String>,
    next_line: usize,
}

impl OpenFile {
    fn new(source: SourceFile) -> Self {
        Self {
            lines: source.text.lines().map(str::to_owned).collect(),
            path: source.path,
            next_line: 0,
        }
    }
}

/// Tokenizer for GermanScript source files.
pub struct Tokenizer {
    /// Files waiting to be tokenized.
    imports: ImportQueue,
    /// The file being tokenized.
    current: Option<OpenFile>,
    /// Tokens of the current line not yet handed out.
    buffer: VecDeque<Token>,
    /// True while inside a `/* … */` comment that spans lines.
    in_comment: bool,
    /// The EOF token, once every file is exhausted.
    eof: Option<Token>,
    /// File and line of the last line read, for positioning EOF.
    last_location: (Arc<Path>, u32),
}

impl Tokenizer {
    /// Creates a tokenizer over the files in an import queue.
    #[must_use]
    pub fn new(imports: ImportQueue) -> Self {
        Self {
            imports,
            current: None,
            buffer: VecDeque::new(),
            in_comment: false,
            eof: None,
            last_location: (Arc::from(Path::new("")), 0),
        }
    }

    /// Creates a tokenizer over a single in-memory source.
    ///
    /// Imports found in the source are still read from disk, relative to its path.
    #[must_use]
    pub fn from_source(source: SourceFile) -> Self {
        let mut imports = ImportQueue::new();
        imports.mark_visited(&source.path);
        let mut tokenizer = Self::new(imports);
        tokenizer.last_location = (Arc::clone(&source.path), 0);
        tokenizer.current = Some(OpenFile::new(source));
        tokenizer
    }

    /// Convenience constructor for tokenizing a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_source(SourceFile::in_memory("<eingabe>", text))
    }

    /// Returns the next token.
    ///
    /// # Errors
    /// Returns a lexical error for invalid characters, malformed literals,
    /// unreadable files and cyclic imports. The tokenizer does not recover.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if let Some(token) = self.buffer.pop_front() {
                return Ok(token);
            }
            if let Some(eof) = &self.eof {
                return Ok(eof.clone());
            }
            if !self.fill()? {
                let (file, line) = &self.last_location;
                self.eof = Some(Token::eof(Arc::clone(file), Span::on_line(line + 1, 1, 1)));
            }
        }
    }

    /// Tokenizes everything, including the first EOF token.
    ///
    /// # Errors
    /// Returns the first lexical error.
    pub fn tokenize_all(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Reads lines until the buffer holds tokens. Returns false once every file is exhausted.
    fn fill(&mut self) -> Result<bool> {
        loop {
            if self.current.is_none() {
                let Some(path) = self.imports.dequeue() else {
                    return Ok(false);
                };
                let source = SourceFile::read(&path)?;
                debug!(file = %path.display(), "tokenizing source file");
                self.last_location = (Arc::clone(&source.path), 0);
                self.current = Some(OpenFile::new(source));
                self.in_comment = false;
            }
            let Some(file) = self.current.as_mut() else {
                continue;
            };
            if file.next_line >= file.lines.len() {
                self.current = None;
                continue;
            }

            let line = u32::try_from(file.next_line + 1).unwrap_or(u32::MAX);
            let path = Arc::clone(&file.path);
            let lexer = LineLexer::new(&file.lines[file.next_line], line, &path);
            file.next_line += 1;
            self.last_location = (Arc::clone(&path), line);

            let tokens = lexer.lex(&mut self.in_comment)?;
            if tokens.is_empty() {
                continue;
            }
            if let Some(import) = import_target(&tokens) {
                let target = resolve_import(&path, import);
                trace!(target = %target.display(), "import statement");
                self.imports.enqueue(&target, Some(tokens[0].context()))?;
                continue;
            }

            let end = tokens.last().map_or(1, |token| token.span.end.column);
            self.buffer.extend(tokens);
            self.buffer.push_back(Token::new(
                TokenKind::NewLine,
                "\n",
                path,
                Span::on_line(line, end, end),
            ));
            return Ok(true);
        }
    }
}

/// Returns the imported path if the line is exactly `importiere "pfad"`.
fn import_target(tokens: &[Token]) -> Option<&str> {
    match tokens {
        [keyword, path] if keyword.is_keyword(Keyword::Import) => match &path.kind {
            TokenKind::Text(text) => Some(text),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves an import relative to the importing file.
fn resolve_import(importer: &Path, import: &str) -> PathBuf {
    match importer.parent() {
        Some(dir) => dir.join(import),
        None => PathBuf::from(import),
    }
}

fn column(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Lexer for a single physical line.
struct LineLexer<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    file: &'a Arc<Path>,
    tokens: Vec<Token>,
}

impl<'a> LineLexer<'a> {
    fn new(text: &str, line: u32, file: &'a Arc<Path>) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line,
            file,
            tokens: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn text(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn span(&self, start: usize) -> Span {
        Span::on_line(self.line, column(start), column(self.pos))
    }

    fn error(&self, kind: ErrorKind, start: usize) -> Error {
        let end = self.pos.max(start + 1).min(self.chars.len());
        Error::at(
            kind,
            ErrorContext::new()
                .with_file(self.file.to_path_buf())
                .with_span(Span::on_line(self.line, column(start), column(end)))
                .with_token(self.chars[start.min(end)..end].iter().collect::<String>()),
        )
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let token = Token::new(kind, self.text(start), Arc::clone(self.file), self.span(start));
        self.tokens.push(token);
    }

    fn lex(mut self, in_comment: &mut bool) -> Result<Vec<Token>> {
        while self.pos < self.chars.len() {
            if *in_comment {
                self.skip_block_comment(in_comment);
                continue;
            }
            let c = self.chars[self.pos];
            match c {
                c if c.is_whitespace() => self.pos += 1,
                '/' if self.peek(1) == Some('/') => break,
                '/' if self.peek(1) == Some('*') => {
                    self.pos += 2;
                    *in_comment = true;
                }
                '"' => self.scan_string()?,
                c if c.is_ascii_digit() => self.scan_number()?,
                c if c.is_alphabetic() => self.scan_word(),
                _ => self.scan_symbol()?,
            }
        }
        Ok(self.tokens)
    }

    fn skip_block_comment(&mut self, in_comment: &mut bool) {
        while self.pos < self.chars.len() {
            if self.chars[self.pos] == '*' && self.peek(1) == Some('/') {
                self.pos += 2;
                *in_comment = false;
                return;
            }
            self.pos += 1;
        }
    }

    fn scan_symbol(&mut self) -> Result<()> {
        let start = self.pos;
        let c = self.chars[self.pos];
        let (kind, width) = match (c, self.peek(1)) {
            ('=', Some('=')) => (TokenKind::Operator(Operator::Equal), 2),
            ('!', Some('=')) => (TokenKind::Operator(Operator::NotEqual), 2),
            ('>', Some('=')) => (TokenKind::Operator(Operator::GreaterEqual), 2),
            ('<', Some('=')) => (TokenKind::Operator(Operator::LessEqual), 2),
            ('&', Some('&')) => (TokenKind::Operator(Operator::And), 2),
            ('|', Some('|')) => (TokenKind::Operator(Operator::Or), 2),
            (':', Some(':')) => (TokenKind::DoubleColon, 2),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            (',', _) => (TokenKind::Comma, 1),
            (':', _) => (TokenKind::Colon, 1),
            ('.', _) => (TokenKind::Period, 1),
            ('!', _) => (TokenKind::Bang, 1),
            ('+', _) => (TokenKind::Operator(Operator::Plus), 1),
            ('-', _) => (TokenKind::Operator(Operator::Minus), 1),
            ('*', _) => (TokenKind::Operator(Operator::Times), 1),
            ('/', _) => (TokenKind::Operator(Operator::Divide), 1),
            ('%', _) => (TokenKind::Operator(Operator::Modulo), 1),
            ('^', _) => (TokenKind::Operator(Operator::Power), 1),
            ('>', _) => (TokenKind::Operator(Operator::Greater), 1),
            ('<', _) => (TokenKind::Operator(Operator::Less), 1),
            _ => return Err(self.error(ErrorKind::InvalidCharacter(c), start)),
        };
        self.pos += width;
        self.push(kind, start);
        Ok(())
    }

    fn digit_follows(&self) -> bool {
        self.peek(1).is_some_and(|c| c.is_ascii_digit())
    }

    fn skip_digits(&mut self) {
        while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    /// Numbers use `.` for digit grouping and `,` for decimals.
    fn scan_number(&mut self) -> Result<()> {
        let start = self.pos;
        self.skip_digits();
        while self.peek(0) == Some('.') && self.digit_follows() {
            self.pos += 1;
            self.skip_digits();
        }
        if self.peek(0) == Some(',') && self.digit_follows() {
            self.pos += 1;
            self.skip_digits();
        }

        let text = self.text(start);
        let normalized = text.replace('.', "").replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| self.error(ErrorKind::InvalidNumber(text.clone()), start))?;
        self.push(TokenKind::Number(value), start);
        Ok(())
    }

    fn scan_string(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.peek(0) else {
                return Err(self.error(ErrorKind::UnterminatedString, start));
            };
            self.pos += 1;
            match c {
                '"' => break,
                '\\' => {
                    let Some(escaped) = self.peek(0) else {
                        return Err(self.error(ErrorKind::UnterminatedString, start));
                    };
                    self.pos += 1;
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(self.error(ErrorKind::InvalidEscape(other), self.pos - 2));
                        }
                    });
                }
                c => value.push(c),
            }
        }
        self.push(TokenKind::Text(value), start);
        Ok(())
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn scan_word(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(Self::is_word_char) {
            self.pos += 1;
        }
        let word = self.text(start);

        let kind = if let Some(op) = Operator::from_word(&word) {
            TokenKind::Operator(self.continue_comparison(op))
        } else if word == "wahr" || word == "falsch" {
            TokenKind::Boolean(word == "wahr")
        } else if let Some(keyword) = Keyword::from_word(&word) {
            TokenKind::Keyword(keyword)
        } else if let Some(kind) = DeterminerKind::classify(&word) {
            TokenKind::Determiner(kind)
        } else if word.chars().next().is_some_and(char::is_uppercase) {
            TokenKind::Noun(word)
        } else {
            TokenKind::Word(word)
        };
        self.push(kind, start);
    }

    /// `größer gleich` and `kleiner gleich` are one operator. The following
    /// word is only consumed if it is `gleich`.
    fn continue_comparison(&mut self, op: Operator) -> Operator {
        let compound = match op {
            Operator::Greater => Operator::GreaterEqual,
            Operator::Less => Operator::LessEqual,
            other => return other,
        };
        let mut cursor = self.pos;
        while self.chars.get(cursor).is_some_and(|c| *c == ' ' || *c == '\t') {
            cursor += 1;
        }
        let word_start = cursor;
        while self.chars.get(cursor).is_some_and(|c| Self::is_word_char(*c)) {
            cursor += 1;
        }
        let next: String = self.chars[word_start..cursor].iter().collect();
        if word_start > self.pos && next == "gleich" {
            self.pos = cursor;
            compound
        } else {
            op
        }
    }
}
