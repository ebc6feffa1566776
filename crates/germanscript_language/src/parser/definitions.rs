use germanscript_foundation::Result;

use super::{NodeKind, Parser};
use crate::ast::{
    ClassDef, ConversionDef, DeclensionDef, DeclensionSource, Definition, FunctionDef,
    FunctionSignature, ImplementationDef, ObjectRole, Parameter, PrepositionGroup,
};
use crate::token::{Keyword, TokenKind};

impl Parser {
    /// Parses a top-level definition.
    pub(super) fn parse_definition(&mut self) -> Result<Definition> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::Verb) => self
                .parse_function(NodeKind::Function)
                .map(Definition::Function),
            TokenKind::Keyword(Keyword::Nomen) => self.parse_class(),
            TokenKind::Keyword(Keyword::Implement) => self.parse_implementation(),
            TokenKind::Keyword(Keyword::Declension) => self.parse_declension(),
            _ => Err(self.peek()?.unexpected("a definition")),
        }
    }

    /// Parses `Verb [(Noun)] verb …: … .` as a function or a method.
    fn parse_function(&mut self, kind: NodeKind) -> Result<FunctionDef> {
        self.within(kind, |parser| {
            parser.expect_keyword(Keyword::Verb)?;
            let return_type = if parser.eat(&TokenKind::LParen)?.is_some() {
                let noun = parser.expect_noun()?;
                parser.expect(&TokenKind::RParen, "')'")?;
                Some(parser.noun_phrase(None, noun))
            } else {
                None
            };
            let verb = parser.expect_word()?;

            let object = match parser.peek_kind()? {
                TokenKind::Determiner(_) => Some(ObjectRole::Argument(parser.parse_parameter()?)),
                TokenKind::Keyword(Keyword::Myself | Keyword::Yourself) => {
                    let token = parser.advance()?;
                    parser.require(&token, &[NodeKind::Method], "a method definition")?;
                    Some(ObjectRole::Reflexive(token))
                }
                _ => None,
            };

            let mut prepositions = Vec::new();
            while parser.at_preposition()? {
                let preposition = parser.advance()?;
                let mut items = vec![parser.parse_parameter()?];
                while parser.eat(&TokenKind::Comma)?.is_some() {
                    items.push(parser.parse_parameter()?);
                }
                prepositions.push(PrepositionGroup { preposition, items });
            }

            let suffix = if matches!(parser.peek()?.kind, TokenKind::Word(_)) {
                Some(parser.advance()?)
            } else {
                None
            };
            let body = parser.parse_block()?;

            Ok(FunctionDef {
                signature: FunctionSignature {
                    verb,
                    return_type,
                    object,
                    prepositions,
                    suffix,
                },
                body,
            })
        })
    }

    /// Parses `Det Noun [Name]`.
    fn parse_parameter(&mut self) -> Result<Parameter> {
        let noun = self.parse_determined_noun()?;
        let name = if matches!(self.peek()?.kind, TokenKind::Noun(_)) {
            Some(self.advance()?)
        } else {
            None
        };
        Ok(Parameter { noun, name })
    }

    /// Parses `Nomen Noun [mit Param {, Param}]: … .`.
    fn parse_class(&mut self) -> Result<Definition> {
        self.within(NodeKind::Class, |parser| {
            let token = parser.expect_keyword(Keyword::Nomen)?;
            let noun = parser.expect_noun()?;
            let name = parser.noun_phrase(None, noun);

            let mut fields = Vec::new();
            if parser.eat(&TokenKind::Keyword(Keyword::With))?.is_some() {
                fields.push(parser.parse_parameter()?);
                while parser.eat(&TokenKind::Comma)?.is_some() {
                    fields.push(parser.parse_parameter()?);
                }
            }
            let constructor = parser.parse_block()?;

            Ok(Definition::Class(ClassDef {
                token,
                name,
                fields,
                constructor,
            }))
        })
    }

    /// Parses `Implementiere Det Noun: { Verb … | Als … } .`.
    fn parse_implementation(&mut self) -> Result<Definition> {
        self.within(NodeKind::Implementation, |parser| {
            let token = parser.expect_keyword(Keyword::Implement)?;
            let class = parser.parse_determined_noun()?;
            parser.expect(&TokenKind::Colon, "':'")?;

            let mut methods = Vec::new();
            let mut conversions = Vec::new();
            loop {
                parser.skip_newlines()?;
                match parser.peek_kind()? {
                    TokenKind::Period => {
                        parser.advance()?;
                        break;
                    }
                    TokenKind::Keyword(Keyword::Verb) => {
                        methods.push(parser.parse_function(NodeKind::Method)?);
                    }
                    TokenKind::Keyword(Keyword::ConversionDefinition) => {
                        conversions.push(parser.parse_conversion()?);
                    }
                    _ => return Err(parser.peek()?.unexpected("'Verb', 'Als' or '.'")),
                }
                parser.end_statement(Some(&TokenKind::Period))?;
            }

            Ok(Definition::Implementation(ImplementationDef {
                token,
                class,
                methods,
                conversions,
            }))
        })
    }

    fn parse_conversion(&mut self) -> Result<ConversionDef> {
        self.within(NodeKind::Conversion, |parser| {
            let token = parser.expect_keyword(Keyword::ConversionDefinition)?;
            let noun = parser.expect_noun()?;
            let target = parser.noun_phrase(None, noun);
            let body = parser.parse_block()?;
            Ok(ConversionDef {
                token,
                target,
                body,
            })
        })
    }

    /// Parses `Deklination Gender Singular(…) Plural(…)` or `Deklination Duden(Wort)`.
    fn parse_declension(&mut self) -> Result<Definition> {
        self.within(NodeKind::Declension, |parser| {
            let token = parser.expect_keyword(Keyword::Declension)?;

            if parser.eat(&TokenKind::Keyword(Keyword::Duden))?.is_some() {
                parser.expect(&TokenKind::LParen, "'('")?;
                let word = parser.expect_noun()?;
                parser.expect(&TokenKind::RParen, "')'")?;
                return Ok(Definition::Declension(DeclensionDef {
                    token,
                    source: DeclensionSource::External { word },
                }));
            }

            let gender = match parser.peek_kind()? {
                TokenKind::Keyword(Keyword::Gender(gender)) => {
                    parser.advance()?;
                    gender
                }
                _ => {
                    return Err(parser
                        .peek()?
                        .unexpected("'Maskulinum', 'Femininum', 'Neutrum' or 'Duden'"));
                }
            };
            parser.expect_keyword(Keyword::Singular)?;
            let singular = parser.parse_forms()?;
            parser.expect_keyword(Keyword::Plural)?;
            let plural = parser.parse_forms()?;

            Ok(Definition::Declension(DeclensionDef {
                token,
                source: DeclensionSource::Inline {
                    gender,
                    singular,
                    plural,
                },
            }))
        })
    }

    /// Parses `(Form, Form, Form, Form)`.
    fn parse_forms(&mut self) -> Result<[String; 4]> {
        self.expect(&TokenKind::LParen, "'('")?;
        let mut forms: [String; 4] = Default::default();
        for (index, form) in forms.iter_mut().enumerate() {
            if index > 0 {
                self.expect(&TokenKind::Comma, "','")?;
            }
            *form = self.expect_noun()?.text;
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(forms)
    }
}
