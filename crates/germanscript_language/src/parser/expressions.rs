use germanscript_foundation::{ErrorKind, Result};

use super::{NodeKind, Parser};
use crate::ast::{Argument, Call, Expression, ObjectRole, PrepositionGroup};
use crate::determiner::DeterminerKind;
use crate::token::{Keyword, Operator, Token, TokenKind};

/// Binding power of prefix `-`/`minus`: tighter than `mal`, looser than `hoch`.
const PREFIX_BINDING_POWER: f32 = 5.5;

impl Parser {
    /// Parses an expression.
    pub(super) fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_binary(0.0)
    }

    fn parse_binary(&mut self, min_power: f32) -> Result<Expression> {
        self.within(NodeKind::Binary, |parser| {
            let left = parser.parse_unary()?;
            parser.continue_binary(left, min_power)
        })
    }

    /// The precedence-climbing loop, continuing from an already parsed left operand.
    fn continue_binary(&mut self, mut left: Expression, min_power: f32) -> Result<Expression> {
        loop {
            let Some(operator) = self.peek()?.operator() else {
                return Ok(left);
            };
            let (left_power, right_power) = operator.binding_power();
            if left_power < min_power {
                return Ok(left);
            }
            let token = self.advance()?;
            let right = self.parse_binary(right_power)?;
            left = Expression::Binary {
                token,
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if self.peek()?.operator() == Some(Operator::Minus) {
            let token = self.advance()?;
            let operand = self.parse_binary(PREFIX_BINDING_POWER)?;
            return Ok(Expression::Minus {
                token,
                operand: Box::new(operand),
            });
        }
        let primary = self.parse_primary()?;
        self.parse_conversion_suffix(primary)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.peek()?.clone();
        match token.kind {
            TokenKind::Number(_) | TokenKind::Text(_) | TokenKind::Boolean(_) => {
                Ok(Expression::Literal(self.advance()?))
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Word(_) => self.parse_call().map(|call| Expression::Call(Box::new(call))),
            TokenKind::Noun(_) => {
                let noun = self.advance()?;
                Ok(Expression::Variable(self.noun_phrase(None, noun)))
            }
            TokenKind::Keyword(Keyword::I) => {
                self.require_self_context(&token)?;
                Ok(Expression::SelfReference(self.advance()?))
            }
            TokenKind::Keyword(Keyword::You) => {
                self.require_method_block(&token)?;
                Ok(Expression::MethodBlockReference(self.advance()?))
            }
            TokenKind::Determiner(kind) => {
                let determiner = self.advance()?;
                let noun = self.expect_noun()?;
                self.parse_noun_expression(determiner, kind, noun)
            }
            _ => Err(token.unexpected("an expression")),
        }
    }

    /// Wraps `expression` in conversions for every trailing `als Noun`.
    fn parse_conversion_suffix(&mut self, mut expression: Expression) -> Result<Expression> {
        while self.at_keyword(Keyword::As)? {
            let token = self.advance()?;
            let noun = self.expect_noun()?;
            let target = self.noun_phrase(None, noun);
            expression = Expression::Conversion {
                token,
                value: Box::new(expression),
                target,
            };
        }
        Ok(expression)
    }

    /// Decides the shape of a determiner-led noun phrase whose determiner and
    /// noun were already consumed.
    ///
    /// - definite + `[`: list index
    /// - definite + genitive determiner: property of the following phrase
    /// - definite otherwise: variable
    /// - indefinite + `[`: list literal
    /// - indefinite otherwise: instantiation, with fields after `mit`
    /// - quantifier: rejected
    /// - first/second person possessive: property of `ich`/`du`
    ///
    /// A trailing `als Noun` wraps the result in a conversion. If an operator
    /// follows and this phrase is not already an operand of a precedence-climbing
    /// parse, the result becomes the left operand of a binary expression.
    pub(super) fn parse_noun_expression(
        &mut self,
        determiner: Token,
        kind: DeterminerKind,
        noun: Token,
    ) -> Result<Expression> {
        let expression = self.dispatch_noun_phrase(determiner, kind, noun)?;
        let expression = self.parse_conversion_suffix(expression)?;
        if !self.in_binary() && self.peek()?.operator().is_some() {
            return self.within(NodeKind::Binary, |parser| {
                parser.continue_binary(expression, 0.0)
            });
        }
        Ok(expression)
    }

    fn dispatch_noun_phrase(
        &mut self,
        determiner: Token,
        kind: DeterminerKind,
        noun: Token,
    ) -> Result<Expression> {
        match kind {
            DeterminerKind::Definite => {
                let phrase = self.noun_phrase(Some(determiner), noun);
                if self.eat(&TokenKind::LBracket)?.is_some() {
                    let index = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    Ok(Expression::ListIndex {
                        list: phrase,
                        index: Box::new(index),
                    })
                } else if self.at_genitive_continuation()? {
                    let owner = self.parse_owner()?;
                    Ok(Expression::Property {
                        property: phrase,
                        owner: Box::new(owner),
                    })
                } else {
                    Ok(Expression::Variable(phrase))
                }
            }
            DeterminerKind::Indefinite => {
                let phrase = self.noun_phrase(Some(determiner), noun);
                if self.eat(&TokenKind::LBracket)?.is_some() {
                    let items = self.parse_list_items()?;
                    Ok(Expression::List {
                        noun: phrase,
                        items,
                    })
                } else {
                    let fields = self.parse_field_assignments()?;
                    Ok(Expression::Instantiation {
                        class: phrase,
                        fields,
                    })
                }
            }
            DeterminerKind::Quantifier => Err(determiner.error(ErrorKind::MisplacedConstruct {
                construct: determiner.text.clone(),
                required: "the header of a 'für' loop".to_string(),
            })),
            DeterminerKind::FirstPossessive => {
                self.require_self_context(&determiner)?;
                Ok(Expression::SelfProperty(self.noun_phrase(Some(determiner), noun)))
            }
            DeterminerKind::SecondPossessive => {
                self.require_method_block(&determiner)?;
                Ok(Expression::MethodBlockProperty(
                    self.noun_phrase(Some(determiner), noun),
                ))
            }
        }
    }

    /// True if the next token is a determiner that can start a genitive owner.
    pub(super) fn at_genitive_continuation(&mut self) -> Result<bool> {
        let token = self.peek()?;
        Ok(token.determiner().is_some()
            && DeterminerKind::is_genitive_continuation(&token.text))
    }

    /// Parses the owner of a property: only the structural dispatch, without
    /// conversion suffix or operator promotion.
    fn parse_owner(&mut self) -> Result<Expression> {
        let (determiner, kind) = self.expect_determiner()?;
        let noun = self.expect_noun()?;
        self.dispatch_noun_phrase(determiner, kind, noun)
    }

    /// Parses list elements after `[` up to and including `]`.
    fn parse_list_items(&mut self) -> Result<Vec<Expression>> {
        let mut items = Vec::new();
        if self.eat(&TokenKind::RBracket)?.is_some() {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if self.eat(&TokenKind::Comma)?.is_none() {
                self.expect(&TokenKind::RBracket, "',' or ']'")?;
                return Ok(items);
            }
        }
    }

    /// Parses `mit Argument {, Argument}` after an instantiated class.
    fn parse_field_assignments(&mut self) -> Result<Vec<Argument>> {
        if !(self.at_keyword(Keyword::With)? && self.peek_is_determiner(1)?) {
            return Ok(Vec::new());
        }
        self.advance()?;
        self.parse_argument_list()
    }

    fn parse_argument_list(&mut self) -> Result<Vec<Argument>> {
        let mut arguments = vec![self.parse_argument()?];
        while self.eat(&TokenKind::Comma)?.is_some() {
            arguments.push(self.parse_argument()?);
        }
        Ok(arguments)
    }

    /// Parses `Det Noun [Value]`.
    fn parse_argument(&mut self) -> Result<Argument> {
        self.within(NodeKind::Argument, |parser| {
            let (determiner, kind) = parser.expect_determiner()?;
            match kind {
                DeterminerKind::Quantifier => {
                    return Err(determiner.unexpected("an article"));
                }
                DeterminerKind::FirstPossessive => parser.require_self_context(&determiner)?,
                DeterminerKind::SecondPossessive => parser.require_method_block(&determiner)?,
                DeterminerKind::Definite | DeterminerKind::Indefinite => {}
            }
            let noun = parser.expect_noun()?;

            if kind == DeterminerKind::Definite && parser.at_genitive_continuation()? {
                let value = parser.parse_noun_expression(determiner, kind, noun)?;
                let Expression::Property { property, .. } = first_operand(&value) else {
                    return Err(germanscript_foundation::Error::internal(
                        "genitive argument did not parse as a property",
                    ));
                };
                return Ok(Argument {
                    noun: property.clone(),
                    value: Some(Box::new(value)),
                });
            }

            let phrase = parser.noun_phrase(Some(determiner), noun);
            let value = if parser.at_argument_value()? {
                Some(Box::new(parser.parse_expression()?))
            } else {
                None
            };
            Ok(Argument {
                noun: phrase,
                value,
            })
        })
    }

    /// An argument value starts with a literal, a name, `(`, `-`, `ich` or `du`.
    fn at_argument_value(&mut self) -> Result<bool> {
        let token = self.peek()?;
        Ok(match &token.kind {
            kind if kind.is_literal() => true,
            TokenKind::Noun(_) | TokenKind::LParen => true,
            TokenKind::Operator(Operator::Minus) => true,
            TokenKind::Keyword(Keyword::I | Keyword::You) => true,
            _ => false,
        })
    }

    /// True if the next token introduces a preposition group: a lowercase
    /// word, `mit` or `für`, followed by a determiner.
    pub(super) fn at_preposition(&mut self) -> Result<bool> {
        let is_candidate = matches!(
            self.peek()?.kind,
            TokenKind::Word(_) | TokenKind::Keyword(Keyword::With | Keyword::For)
        );
        Ok(is_candidate && self.peek_is_determiner(1)?)
    }

    /// Parses `verb [Object] {Preposition Argument {, Argument}} [suffix]`.
    pub(super) fn parse_call(&mut self) -> Result<Call> {
        self.within(NodeKind::Call, |parser| {
            let id = parser.next_node_id();
            let verb = parser.expect_word()?;

            let object = match parser.peek_kind()? {
                TokenKind::Determiner(_) => Some(ObjectRole::Argument(parser.parse_argument()?)),
                TokenKind::Keyword(Keyword::Myself) => {
                    let token = parser.advance()?;
                    parser.require_self_context(&token)?;
                    Some(ObjectRole::Reflexive(token))
                }
                TokenKind::Keyword(Keyword::Yourself) => {
                    let token = parser.advance()?;
                    parser.require_method_block(&token)?;
                    Some(ObjectRole::Reflexive(token))
                }
                _ => None,
            };

            let mut prepositions = Vec::new();
            while parser.at_preposition()? {
                let preposition = parser.advance()?;
                let items = parser.parse_argument_list()?;
                prepositions.push(PrepositionGroup { preposition, items });
            }

            let suffix = if matches!(parser.peek()?.kind, TokenKind::Word(_)) {
                Some(parser.advance()?)
            } else {
                None
            };

            Ok(Call {
                id,
                verb,
                object,
                prepositions,
                suffix,
            })
        })
    }
}

/// The leftmost operand of a binary tree, looking through conversions.
fn first_operand(expression: &Expression) -> &Expression {
    match expression {
        Expression::Binary { left, .. } | Expression::Conversion { value: left, .. } => {
            first_operand(left)
        }
        other => other,
    }
}
