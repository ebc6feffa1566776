//! Parser for GermanScript.
//!
//! Statements and definitions are parsed by recursive descent, expressions
//! by precedence climbing. Noun phrases are left grammatically unresolved;
//! the parser only decides their structural shape from the determiner kind
//! and the next token (see [`Parser::parse_noun_expression`]).
//!
//! Context-sensitive constructs are validated against an explicit stack of
//! enclosing node kinds instead of parent pointers: every construct pushes
//! its kind while it is being parsed, and e.g. `zurück` is only accepted
//! while a function, method or conversion is on the stack.

mod definitions;
mod expressions;
mod statements;

use std::collections::VecDeque;

use germanscript_foundation::{ErrorKind, Result};
use tracing::debug;

use crate::ast::{Block, NodeId, NounPhrase, Program};
use crate::determiner::DeterminerKind;
use crate::lexer::Tokenizer;
use crate::token::{Keyword, Token, TokenKind};

/// Kinds of constructs that can enclose other constructs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The whole program.
    Program,
    /// A `Verb` definition at top level.
    Function,
    /// A `Verb` definition inside `Implementiere`.
    Method,
    /// A `Nomen` definition and its constructor.
    Class,
    /// An `Implementiere` block.
    Implementation,
    /// An `Als` definition.
    Conversion,
    /// A `Deklination` statement.
    Declension,
    /// A declaration or property assignment.
    Declaration,
    /// `wenn`
    Conditional,
    /// `solange`
    While,
    /// `für`
    ForEach,
    /// `gebe … zurück`
    Return,
    /// `Expr: … !`
    MethodBlock,
    /// A call site.
    Call,
    /// A call or instantiation argument.
    Argument,
    /// A precedence-climbing expression parse.
    Binary,
}

/// Kinds in which `gebe … zurück`, `zurück` and `intern` are legal.
const RETURN_CONTEXT: &[NodeKind] = &[NodeKind::Function, NodeKind::Method, NodeKind::Conversion];
/// Kinds in which `mein …`, `ich` and `mich` are legal.
const SELF_CONTEXT: &[NodeKind] = &[NodeKind::Method, NodeKind::Conversion, NodeKind::Class];
/// Kinds in which `dein …` and `du` are legal.
const METHOD_BLOCK_CONTEXT: &[NodeKind] = &[NodeKind::MethodBlock];
/// Kinds in which `fortfahren` and `abbrechen` are legal.
const LOOP_CONTEXT: &[NodeKind] = &[NodeKind::While, NodeKind::ForEach];

/// Parser for GermanScript source.
pub struct Parser {
    /// The token source.
    tokenizer: Tokenizer,
    /// Tokens peeked but not yet consumed.
    lookahead: VecDeque<Token>,
    /// Kinds of the constructs currently being parsed, innermost last.
    ancestors: Vec<NodeKind>,
    /// Next node identity to hand out.
    next_id: u32,
}

impl Parser {
    /// Creates a parser reading from a tokenizer.
    #[must_use]
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            lookahead: VecDeque::new(),
            ancestors: Vec::new(),
            next_id: 0,
        }
    }

    /// Parses the whole token stream.
    ///
    /// # Errors
    /// Returns the first lexical or syntax error.
    pub fn parse_program(&mut self) -> Result<Program> {
        self.within(NodeKind::Program, |parser| {
            let mut program = Program::default();
            loop {
                parser.skip_newlines()?;
                match parser.peek_kind()? {
                    TokenKind::Eof => break,
                    TokenKind::Keyword(
                        Keyword::Verb | Keyword::Nomen | Keyword::Implement | Keyword::Declension,
                    ) => program.definitions.push(parser.parse_definition()?),
                    _ => program.statements.push(parser.parse_statement()?),
                }
                parser.end_statement(None)?;
            }
            debug!(
                definitions = program.definitions.len(),
                statements = program.statements.len(),
                "parsed program"
            );
            Ok(program)
        })
    }

    // =========================================================================
    // Ancestor stack
    // =========================================================================

    /// Runs `f` with `kind` pushed on the ancestor stack.
    fn within<T>(&mut self, kind: NodeKind, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.ancestors.push(kind);
        let result = f(self);
        self.ancestors.pop();
        result
    }

    /// Fails unless one of `kinds` encloses the current position.
    fn require(&self, token: &Token, kinds: &[NodeKind], required: &str) -> Result<()> {
        if self.ancestors.iter().any(|kind| kinds.contains(kind)) {
            Ok(())
        } else {
            Err(token.error(ErrorKind::MisplacedConstruct {
                construct: token.text.clone(),
                required: required.to_string(),
            }))
        }
    }

    fn require_self_context(&self, token: &Token) -> Result<()> {
        self.require(token, SELF_CONTEXT, "a method, conversion or constructor")
    }

    fn require_method_block(&self, token: &Token) -> Result<()> {
        self.require(token, METHOD_BLOCK_CONTEXT, "a method block")
    }

    /// True while the innermost construct is a precedence-climbing parse.
    fn in_binary(&self) -> bool {
        self.ancestors.last() == Some(&NodeKind::Binary)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn fill(&mut self, n: usize) -> Result<()> {
        while self.lookahead.len() <= n {
            let token = self.tokenizer.next_token()?;
            self.lookahead.push_back(token);
        }
        Ok(())
    }

    fn peek_nth(&mut self, n: usize) -> Result<&Token> {
        self.fill(n)?;
        Ok(&self.lookahead[n])
    }

    fn peek(&mut self) -> Result<&Token> {
        self.peek_nth(0)
    }

    fn peek_kind(&mut self) -> Result<TokenKind> {
        Ok(self.peek()?.kind.clone())
    }

    fn advance(&mut self) -> Result<Token> {
        self.fill(0)?;
        self.lookahead
            .pop_front()
            .ok_or_else(|| germanscript_foundation::Error::internal("empty token buffer"))
    }

    fn at(&mut self, kind: &TokenKind) -> Result<bool> {
        Ok(&self.peek()?.kind == kind)
    }

    fn at_keyword(&mut self, keyword: Keyword) -> Result<bool> {
        Ok(self.peek()?.is_keyword(keyword))
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<Option<Token>> {
        if self.at(kind)? {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token> {
        if self.at(kind)? {
            self.advance()
        } else {
            Err(self.peek()?.unexpected(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token> {
        if self.at_keyword(keyword)? {
            self.advance()
        } else {
            Err(self.peek()?.unexpected(format!("'{keyword}'")))
        }
    }

    fn expect_noun(&mut self) -> Result<Token> {
        if matches!(self.peek()?.kind, TokenKind::Noun(_)) {
            self.advance()
        } else {
            Err(self.peek()?.unexpected("a noun"))
        }
    }

    fn expect_word(&mut self) -> Result<Token> {
        if matches!(self.peek()?.kind, TokenKind::Word(_)) {
            self.advance()
        } else {
            Err(self.peek()?.unexpected("a verb"))
        }
    }

    fn expect_determiner(&mut self) -> Result<(Token, DeterminerKind)> {
        let token = self.peek()?;
        match token.determiner() {
            Some(kind) => Ok((self.advance()?, kind)),
            None => Err(token.unexpected("an article")),
        }
    }

    fn peek_is_determiner(&mut self, n: usize) -> Result<bool> {
        Ok(self.peek_nth(n)?.determiner().is_some())
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.eat(&TokenKind::NewLine)?.is_some() {}
        Ok(())
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn noun_phrase(&mut self, determiner: Option<Token>, noun: Token) -> NounPhrase {
        NounPhrase {
            id: self.next_node_id(),
            determiner,
            noun,
        }
    }

    /// Parses `Det Noun`.
    fn parse_determined_noun(&mut self) -> Result<NounPhrase> {
        let (determiner, _) = self.expect_determiner()?;
        let noun = self.expect_noun()?;
        Ok(self.noun_phrase(Some(determiner), noun))
    }

    /// Consumes the end of a statement: a line break, or nothing if the
    /// enclosing block's closing symbol follows directly.
    fn end_statement(&mut self, close: Option<&TokenKind>) -> Result<()> {
        let token = self.peek()?;
        if token.kind == TokenKind::NewLine {
            self.advance()?;
            return Ok(());
        }
        if token.kind == TokenKind::Eof && close.is_none() {
            return Ok(());
        }
        if close.is_some_and(|close| &token.kind == close) {
            return Ok(());
        }
        Err(token.unexpected("end of line"))
    }

    /// Parses `:` followed by statements up to `.`.
    fn parse_block(&mut self) -> Result<Block> {
        self.expect(&TokenKind::Colon, "':'")?;
        self.parse_statements_until(&TokenKind::Period, "'.'")
    }

    /// Parses statements up to and including `close`.
    fn parse_statements_until(&mut self, close: &TokenKind, expected: &str) -> Result<Block> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.eat(close)?.is_some() {
                return Ok(statements);
            }
            if self.at(&TokenKind::Eof)? {
                return Err(self.peek()?.unexpected(expected));
            }
            statements.push(self.parse_statement()?);
            self.end_statement(Some(close))?;
        }
    }
}
