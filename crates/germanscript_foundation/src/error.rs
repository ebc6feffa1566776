//! Error types for the GermanScript front end.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error a compilation can raise belongs to one [`ErrorCategory`];
//! the first error raised aborts the compilation attempt.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::grammar::CaseSet;
use crate::span::Span;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for GermanScript compilation.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error located at the given context.
    #[must_use]
    pub fn at(kind: ErrorKind, context: ErrorContext) -> Self {
        Self::new(kind).with_context(context)
    }

    /// Creates an internal error (a bug in the front end, never a user error).
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the category this error belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Renders the single line shown to users: `file:line:column: category error: message`.
    #[must_use]
    pub fn report(&self) -> String {
        match &self.context {
            Some(context) => format!("{context}: {} error: {}", self.category(), self.kind),
            None => format!("{} error: {}", self.category(), self.kind),
        }
    }
}

/// The taxonomy of user-facing errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid characters, unterminated strings, import problems.
    Lexical,
    /// Unexpected tokens, constructs outside their required context.
    Syntax,
    /// Case, number and determiner agreement.
    Grammar,
    /// Words missing from the declension dictionary.
    Lookup,
    /// Duplicate or reserved definitions.
    Definition,
    /// Undefined functions, methods, types and conversions.
    Resolution,
    /// Bugs in the front end itself.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Grammar => "grammar",
            Self::Lookup => "lookup",
            Self::Definition => "definition",
            Self::Resolution => "resolution",
            Self::Internal => "internal",
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    // Lexical
    /// A character outside the symbol table.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    /// A string literal without a closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// An unknown escape sequence inside a string literal.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    /// A number literal that does not fit.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// An import of a file that was already tokenized.
    #[error("cyclic import of '{}'", .0.display())]
    CyclicImport(PathBuf),

    /// A source file could not be read.
    #[error("cannot read '{}': {message}", path.display())]
    SourceUnreadable {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O message.
        message: String,
    },

    // Syntax
    /// A token that does not fit the grammar at this point.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// A context-sensitive construct used outside its required enclosing construct.
    #[error("'{construct}' may only be used inside {required}")]
    MisplacedConstruct {
        /// The construct that was used.
        construct: String,
        /// Description of the enclosing construct it needs.
        required: String,
    },

    // Grammar
    /// A determiner that does not agree with the noun's case, gender and number.
    #[error("wrong determiner '{found}', expected '{expected}'")]
    WrongDeterminer {
        /// The determiner as written.
        found: String,
        /// The determiner the position requires.
        expected: String,
    },

    /// A noun inflected for a case the position does not accept.
    #[error("wrong form '{found}' ({cases} expected), expected '{expected}'")]
    WrongNounForm {
        /// The noun as written.
        found: String,
        /// The correctly inflected form.
        expected: String,
        /// The cases the position accepts.
        cases: CaseSet,
    },

    /// A noun in the wrong grammatical number.
    #[error("wrong number for '{found}', expected '{expected}'")]
    WrongNumber {
        /// The noun as written.
        found: String,
        /// The form in the expected number.
        expected: String,
    },

    /// `ist` used with a plural target or `sind` with a singular one.
    #[error("wrong assignment form '{found}', expected '{expected}'")]
    WrongAssignmentForm {
        /// The assignment verb as written.
        found: String,
        /// The verb agreeing with the target.
        expected: String,
    },

    // Lookup
    /// A word missing from the declension dictionary.
    #[error("unknown word '{0}': no declension is known for it")]
    UnknownWord(String),

    /// The external declension service does not know the word.
    #[error("word '{0}' not found in the external dictionary")]
    ExternalWordNotFound(String),

    /// The external declension service is unreachable.
    #[error("no network connectivity while looking up '{0}'")]
    NoConnectivity(String),

    /// A failure of the external service that propagates unmodified.
    #[error(transparent)]
    External(LookupFailure),

    /// Two declensions with the same nominative singular.
    #[error("duplicate declension for '{0}'")]
    DuplicateDeclension(String),

    /// A resolved declension could not be written back into its source file.
    #[error("cannot rewrite '{}': {message}", path.display())]
    SourceRewrite {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O message.
        message: String,
    },

    // Definition
    /// A definition whose key is already taken.
    #[error("duplicate {what} '{signature}', first defined at {original}")]
    DuplicateDefinition {
        /// What kind of definition collided.
        what: &'static str,
        /// The canonical key.
        signature: String,
        /// Where the first definition is.
        original: ErrorContext,
    },

    /// A class named like a built-in type.
    #[error("'{0}' is a reserved type name")]
    ReservedTypeName(String),

    // Resolution
    /// No function with this signature.
    #[error("undefined function '{0}'")]
    UndefinedFunction(String),

    /// No method with this signature on the class.
    #[error("undefined method '{signature}' for '{class}'")]
    UndefinedMethod {
        /// The class searched.
        class: String,
        /// The attempted signature.
        signature: String,
    },

    /// No class with this name.
    #[error("undefined type '{0}'")]
    UndefinedType(String),

    /// No conversion from the class to the target type.
    #[error("undefined conversion from '{class}' to '{target}'")]
    UndefinedConversion {
        /// The class converted from.
        class: String,
        /// The target type.
        target: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns the category this kind belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCharacter(_)
            | Self::UnterminatedString
            | Self::InvalidEscape(_)
            | Self::InvalidNumber(_)
            | Self::CyclicImport(_)
            | Self::SourceUnreadable { .. } => ErrorCategory::Lexical,
            Self::UnexpectedToken { .. } | Self::MisplacedConstruct { .. } => {
                ErrorCategory::Syntax
            }
            Self::WrongDeterminer { .. }
            | Self::WrongNounForm { .. }
            | Self::WrongNumber { .. }
            | Self::WrongAssignmentForm { .. } => ErrorCategory::Grammar,
            Self::UnknownWord(_)
            | Self::ExternalWordNotFound(_)
            | Self::NoConnectivity(_)
            | Self::External(_)
            | Self::DuplicateDeclension(_)
            | Self::SourceRewrite { .. } => ErrorCategory::Lookup,
            Self::DuplicateDefinition { .. } | Self::ReservedTypeName(_) => {
                ErrorCategory::Definition
            }
            Self::UndefinedFunction(_)
            | Self::UndefinedMethod { .. }
            | Self::UndefinedType(_)
            | Self::UndefinedConversion { .. } => ErrorCategory::Resolution,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Failures of the external declension service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupFailure {
    /// The service has no entry for the word.
    #[error("'{0}' not found")]
    NotFound(String),
    /// The service answered with something that is not a declension table.
    #[error("could not parse the declension of '{0}'")]
    ParseFailure(String),
    /// The service could not be reached.
    #[error("no connectivity")]
    NoConnectivity,
    /// The request exceeded its connection/read timeout.
    #[error("declension lookup of '{0}' timed out")]
    Timeout(String),
    /// The service answered with an error.
    #[error("declension service error: {0}")]
    ServerError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file.
    pub file: Option<PathBuf>,
    /// Position of the offending token.
    pub span: Option<Span>,
    /// Text of the offending token.
    pub token: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            span: None,
            token: None,
        }
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Sets the offending token text.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, &self.span) {
            (Some(file), Some(span)) => write!(f, "{}:{span}", file.display()),
            (Some(file), None) => write!(f, "{}", file.display()),
            (None, Some(span)) => write!(f, "{span}"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}
