use germanscript_foundation::{ErrorKind, Result};

use super::{LOOP_CONTEXT, NodeKind, Parser, RETURN_CONTEXT};
use crate::ast::{
    Conditional, ConditionalBranch, Declaration, Expression, ForEach, LoopControl,
    LoopControlKind, MethodBlock, Return, Statement, While,
};
use crate::determiner::DeterminerKind;
use crate::token::{Keyword, TokenKind};

impl Parser {
    /// Parses one statement, without its line break.
    pub(super) fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::If) => self.parse_conditional(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_each(),
            TokenKind::Keyword(Keyword::Give | Keyword::Back) => self.parse_return(),
            TokenKind::Keyword(Keyword::Continue | Keyword::Break) => self.parse_loop_control(),
            TokenKind::Keyword(Keyword::Intern) => {
                let token = self.advance()?;
                self.require(&token, RETURN_CONTEXT, "a function, method or conversion")?;
                Ok(Statement::Intern(token))
            }
            TokenKind::Keyword(
                Keyword::Verb | Keyword::Nomen | Keyword::Implement | Keyword::Declension,
            ) => {
                let token = self.advance()?;
                Err(token.error(ErrorKind::MisplacedConstruct {
                    construct: token.text.clone(),
                    required: "the top level of a program".to_string(),
                }))
            }
            TokenKind::Keyword(Keyword::ConversionDefinition) => {
                let token = self.advance()?;
                Err(token.error(ErrorKind::MisplacedConstruct {
                    construct: token.text.clone(),
                    required: "an 'Implementiere' block".to_string(),
                }))
            }
            TokenKind::Determiner(kind) => self.parse_noun_statement(kind),
            _ => {
                let expression = self.parse_expression()?;
                self.finish_expression_statement(expression)
            }
        }
    }

    /// A statement starting with a determiner: a declaration, a property
    /// assignment, or a method block on a noun expression.
    fn parse_noun_statement(&mut self, kind: DeterminerKind) -> Result<Statement> {
        if kind == DeterminerKind::Quantifier {
            let token = self.advance()?;
            return Err(token.error(ErrorKind::MisplacedConstruct {
                construct: token.text.clone(),
                required: "the header of a 'für' loop".to_string(),
            }));
        }
        let determiner = self.advance()?;
        let noun = self.expect_noun()?;

        if self.at_assignment_verb()? {
            match kind {
                DeterminerKind::FirstPossessive => self.require_self_context(&determiner)?,
                DeterminerKind::SecondPossessive => self.require_method_block(&determiner)?,
                _ => {}
            }
            let target = self.noun_phrase(Some(determiner), noun);
            return self.within(NodeKind::Declaration, |parser| {
                let verb = parser.advance()?;
                let value = parser.parse_expression()?;
                Ok(Statement::Declaration(Declaration {
                    target,
                    owner: None,
                    verb,
                    value,
                }))
            });
        }

        let expression = self.parse_noun_expression(determiner, kind, noun)?;
        if let Expression::Property { property, owner } = expression {
            if self.at_assignment_verb()? {
                return self.within(NodeKind::Declaration, |parser| {
                    let verb = parser.advance()?;
                    let value = parser.parse_expression()?;
                    Ok(Statement::Declaration(Declaration {
                        target: property,
                        owner: Some(*owner),
                        verb,
                        value,
                    }))
                });
            }
            return self.finish_expression_statement(Expression::Property { property, owner });
        }
        self.finish_expression_statement(expression)
    }

    fn at_assignment_verb(&mut self) -> Result<bool> {
        Ok(self.at_keyword(Keyword::Is)? || self.at_keyword(Keyword::Are)?)
    }

    /// An expression used as a statement must be a call or the subject of a method block.
    fn finish_expression_statement(&mut self, expression: Expression) -> Result<Statement> {
        if self.at(&TokenKind::Colon)? {
            return self.parse_method_block(expression);
        }
        match expression {
            Expression::Call(call) => Ok(Statement::Call(*call)),
            other => Err(other.first_token().unexpected("a statement")),
        }
    }

    fn parse_method_block(&mut self, subject: Expression) -> Result<Statement> {
        self.within(NodeKind::MethodBlock, |parser| {
            parser.expect(&TokenKind::Colon, "':'")?;
            let body = parser.parse_statements_until(&TokenKind::Bang, "'!'")?;
            Ok(Statement::MethodBlock(MethodBlock { subject, body }))
        })
    }

    fn parse_conditional(&mut self) -> Result<Statement> {
        self.within(NodeKind::Conditional, |parser| {
            let token = parser.expect_keyword(Keyword::If)?;
            let mut branches = vec![parser.parse_branch()?];
            let mut otherwise = None;

            while parser.at_else()? {
                parser.skip_newlines()?;
                parser.expect_keyword(Keyword::Else)?;
                if parser.at_keyword(Keyword::If)? {
                    parser.advance()?;
                    branches.push(parser.parse_branch()?);
                } else {
                    otherwise = Some(parser.parse_block()?);
                    break;
                }
            }

            Ok(Statement::Conditional(Conditional {
                token,
                branches,
                otherwise,
            }))
        })
    }

    fn parse_branch(&mut self) -> Result<ConditionalBranch> {
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(ConditionalBranch { condition, body })
    }

    /// `sonst` may continue a conditional on the same or on the next line.
    fn at_else(&mut self) -> Result<bool> {
        if self.at_keyword(Keyword::Else)? {
            return Ok(true);
        }
        Ok(self.at(&TokenKind::NewLine)? && self.peek_nth(1)?.is_keyword(Keyword::Else))
    }

    fn parse_while(&mut self) -> Result<Statement> {
        self.within(NodeKind::While, |parser| {
            let token = parser.expect_keyword(Keyword::While)?;
            let condition = parser.parse_expression()?;
            let body = parser.parse_block()?;
            Ok(Statement::While(While {
                token,
                condition,
                body,
            }))
        })
    }

    fn parse_for_each(&mut self) -> Result<Statement> {
        self.within(NodeKind::ForEach, |parser| {
            let token = parser.expect_keyword(Keyword::For)?;
            let (determiner, kind) = parser.expect_determiner()?;
            if kind != DeterminerKind::Quantifier {
                return Err(determiner.unexpected("'jeder', 'jede', 'jedes' or 'alle'"));
            }
            let noun = parser.expect_noun()?;
            let binder = parser.noun_phrase(Some(determiner), noun);

            let source = if parser.at(&TokenKind::Word("in".to_string()))? {
                parser.advance()?;
                Some(parser.parse_expression()?)
            } else {
                None
            };
            let body = parser.parse_block()?;
            Ok(Statement::ForEach(ForEach {
                token,
                binder,
                source,
                body,
            }))
        })
    }

    fn parse_return(&mut self) -> Result<Statement> {
        self.within(NodeKind::Return, |parser| {
            let token = parser.advance()?;
            parser.require(&token, RETURN_CONTEXT, "a function, method or conversion")?;
            if token.is_keyword(Keyword::Back) {
                return Ok(Statement::Return(Return { token, value: None }));
            }
            let value = parser.parse_expression()?;
            parser.expect_keyword(Keyword::Back)?;
            Ok(Statement::Return(Return {
                token,
                value: Some(value),
            }))
        })
    }

    fn parse_loop_control(&mut self) -> Result<Statement> {
        let token = self.advance()?;
        self.require(&token, LOOP_CONTEXT, "a 'solange' or 'für' loop")?;
        let kind = if token.is_keyword(Keyword::Continue) {
            LoopControlKind::Continue
        } else {
            LoopControlKind::Break
        };
        Ok(Statement::LoopControl(LoopControl { token, kind }))
    }
}
