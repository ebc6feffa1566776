//! Token types for GermanScript.
//!
//! Tokens are the output of the tokenizer and input to the parser. Every
//! token remembers the file it came from so that errors raised in later
//! passes can still point at the offending source position.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use germanscript_foundation::{Case, Error, ErrorContext, ErrorKind, Gender, Span};

use crate::determiner::DeterminerKind;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// The raw source text of this token.
    pub text: String,
    /// The file this token was read from.
    pub file: Arc<Path>,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, file: Arc<Path>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            file,
            span,
        }
    }

    /// Creates an end-of-file token.
    #[must_use]
    pub fn eof(file: Arc<Path>, span: Span) -> Self {
        Self::new(TokenKind::Eof, "", file, span)
    }

    /// Returns the error context pointing at this token.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_file(self.file.to_path_buf())
            .with_span(self.span)
            .with_token(self.text.clone())
    }

    /// Creates an error located at this token.
    #[must_use]
    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.context())
    }

    /// Creates an "unexpected token" error located at this token.
    #[must_use]
    pub fn unexpected(&self, expected: impl Into<String>) -> Error {
        self.error(ErrorKind::UnexpectedToken {
            expected: expected.into(),
            found: self.describe(),
        })
    }

    /// Describes this token for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::NewLine => "end of line".to_string(),
            _ => format!("'{}'", self.text),
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns the determiner kind if this token is a determiner.
    #[must_use]
    pub fn determiner(&self) -> Option<DeterminerKind> {
        match self.kind {
            TokenKind::Determiner(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns the operator if this token is one.
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

/// Token types for GermanScript.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Symbols
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:` opens a block
    Colon,
    /// `::`
    DoubleColon,
    /// `.` closes a block
    Period,
    /// `!` closes a method block
    Bang,
    /// End of a source line
    NewLine,
    /// A symbolic or word operator
    Operator(Operator),

    // Literals
    /// Number literal in German notation like `1.000,5`
    Number(f64),
    /// String literal like `"Hallo"`
    Text(String),
    /// `wahr` or `falsch`
    Boolean(bool),

    // Words
    /// A reserved word
    Keyword(Keyword),
    /// An article, possessive or quantifier
    Determiner(DeterminerKind),
    /// An uppercase-initial identifier
    Noun(String),
    /// A lowercase-initial identifier
    Word(String),

    // Meta
    /// End of input, repeated forever
    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Period => "'.'",
            Self::Bang => "'!'",
            Self::NewLine => "end of line",
            Self::Operator(_) => "operator",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Keyword(_) => "keyword",
            Self::Determiner(_) => "determiner",
            Self::Noun(_) => "noun",
            Self::Word(_) => "word",
            Self::Eof => "end of file",
        }
    }

    /// Returns true for literal tokens.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Text(_) | Self::Boolean(_))
    }
}

/// Reserved words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `Verb` starts a function or method definition
    Verb,
    /// `Nomen` starts a class definition
    Nomen,
    /// `Implementiere` starts a block of methods and conversions
    Implement,
    /// `Deklination` starts a declension declaration
    Declension,
    /// `Duden` asks the external dictionary for a declension
    Duden,
    /// `Als` starts a conversion definition
    ConversionDefinition,
    /// `als` converts an expression
    As,
    /// `Maskulinum`, `Femininum` or `Neutrum`
    Gender(Gender),
    /// `Singular`
    Singular,
    /// `Plural`
    Plural,
    /// `wenn`
    If,
    /// `sonst`
    Else,
    /// `solange`
    While,
    /// `für`
    For,
    /// `gebe`
    Give,
    /// `zurück`
    Back,
    /// `fortfahren`
    Continue,
    /// `abbrechen`
    Break,
    /// `intern` marks a natively implemented body
    Intern,
    /// `ist`
    Is,
    /// `sind`
    Are,
    /// `mit`
    With,
    /// `ich`
    I,
    /// `du`
    You,
    /// `mich`
    Myself,
    /// `dich`
    Yourself,
    /// `importiere`
    Import,
}

impl Keyword {
    /// Looks up a reserved word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "Verb" => Self::Verb,
            "Nomen" => Self::Nomen,
            "Implementiere" => Self::Implement,
            "Deklination" => Self::Declension,
            "Duden" => Self::Duden,
            "Als" => Self::ConversionDefinition,
            "als" => Self::As,
            "Singular" => Self::Singular,
            "Plural" => Self::Plural,
            "wenn" => Self::If,
            "sonst" => Self::Else,
            "solange" => Self::While,
            "für" => Self::For,
            "gebe" => Self::Give,
            "zurück" => Self::Back,
            "fortfahren" => Self::Continue,
            "abbrechen" => Self::Break,
            "intern" => Self::Intern,
            "ist" => Self::Is,
            "sind" => Self::Are,
            "mit" => Self::With,
            "ich" => Self::I,
            "du" => Self::You,
            "mich" => Self::Myself,
            "dich" => Self::Yourself,
            "importiere" => Self::Import,
            other => return Gender::from_keyword(other).map(Self::Gender),
        };
        Some(keyword)
    }

    /// The spelling of this keyword in source.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Verb => "Verb",
            Self::Nomen => "Nomen",
            Self::Implement => "Implementiere",
            Self::Declension => "Deklination",
            Self::Duden => "Duden",
            Self::ConversionDefinition => "Als",
            Self::As => "als",
            Self::Gender(gender) => gender.keyword(),
            Self::Singular => "Singular",
            Self::Plural => "Plural",
            Self::If => "wenn",
            Self::Else => "sonst",
            Self::While => "solange",
            Self::For => "für",
            Self::Give => "gebe",
            Self::Back => "zurück",
            Self::Continue => "fortfahren",
            Self::Break => "abbrechen",
            Self::Intern => "intern",
            Self::Is => "ist",
            Self::Are => "sind",
            Self::With => "mit",
            Self::I => "ich",
            Self::You => "du",
            Self::Myself => "mich",
            Self::Yourself => "dich",
            Self::Import => "importiere",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// The grammatical class of an operator decides the case of its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorClass {
    /// `plus`, `minus`, `mal`, `durch`, `modulo`, `hoch`
    Arithmetic,
    /// `gleich`, `ungleich`, `größer`, `kleiner` and their compounds
    Comparison,
    /// `und`, `oder`
    Logical,
}

impl OperatorClass {
    /// The case operands of this class take.
    ///
    /// "die Zahl plus *die* Zahl" is accusative, "die Zahl gleich *der* Zahl" is dative.
    #[must_use]
    pub const fn case(self) -> Case {
        match self {
            Self::Arithmetic | Self::Logical => Case::Accusative,
            Self::Comparison => Case::Dative,
        }
    }
}

/// Binary operators, written either as symbols or as German words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `plus` or `+`
    Plus,
    /// `minus` or `-`
    Minus,
    /// `mal` or `*`
    Times,
    /// `durch` or `/`
    Divide,
    /// `modulo` or `%`
    Modulo,
    /// `hoch` or `^`
    Power,
    /// `gleich` or `==`
    Equal,
    /// `ungleich` or `!=`
    NotEqual,
    /// `größer` or `>`
    Greater,
    /// `kleiner` or `<`
    Less,
    /// `größer gleich` or `>=`
    GreaterEqual,
    /// `kleiner gleich` or `<=`
    LessEqual,
    /// `und` or `&&`
    And,
    /// `oder` or `||`
    Or,
}

impl Operator {
    /// Looks up a word operator. The two-word comparisons are assembled by the tokenizer.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "plus" => Self::Plus,
            "minus" => Self::Minus,
            "mal" => Self::Times,
            "durch" => Self::Divide,
            "modulo" => Self::Modulo,
            "hoch" => Self::Power,
            "gleich" => Self::Equal,
            "ungleich" => Self::NotEqual,
            "größer" => Self::Greater,
            "kleiner" => Self::Less,
            "und" => Self::And,
            "oder" => Self::Or,
            _ => return None,
        })
    }

    /// The German spelling of this operator.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "mal",
            Self::Divide => "durch",
            Self::Modulo => "modulo",
            Self::Power => "hoch",
            Self::Equal => "gleich",
            Self::NotEqual => "ungleich",
            Self::Greater => "größer",
            Self::Less => "kleiner",
            Self::GreaterEqual => "größer gleich",
            Self::LessEqual => "kleiner gleich",
            Self::And => "und",
            Self::Or => "oder",
        }
    }

    /// The grammatical class of this operator.
    #[must_use]
    pub const fn class(self) -> OperatorClass {
        match self {
            Self::Plus | Self::Minus | Self::Times | Self::Divide | Self::Modulo | Self::Power => {
                OperatorClass::Arithmetic
            }
            Self::Equal
            | Self::NotEqual
            | Self::Greater
            | Self::Less
            | Self::GreaterEqual
            | Self::LessEqual => OperatorClass::Comparison,
            Self::And | Self::Or => OperatorClass::Logical,
        }
    }

    /// Returns true for right-associative operators.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Power)
    }

    /// Left and right binding power for precedence climbing.
    ///
    /// The side an operator associates to binds 0.1 weaker.
    #[must_use]
    pub fn binding_power(self) -> (f32, f32) {
        let precedence: f32 = match self {
            Self::Or => 1.0,
            Self::And => 2.0,
            Self::Equal
            | Self::NotEqual
            | Self::Greater
            | Self::Less
            | Self::GreaterEqual
            | Self::LessEqual => 3.0,
            Self::Plus | Self::Minus => 4.0,
            Self::Times | Self::Divide | Self::Modulo => 5.0,
            Self::Power => 6.0,
        };
        if self.is_right_associative() {
            (precedence + 0.1, precedence)
        } else {
            (precedence, precedence + 0.1)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
