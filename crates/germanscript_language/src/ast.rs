//! Abstract Syntax Tree for GermanScript.
//!
//! The parser leaves every noun phrase grammatically unresolved: it only
//! records the determiner and head word tokens. Case, number, gender and
//! the canonical determiner spelling are resolved later by the grammar
//! checker and stored in a side table keyed by [`NodeId`], so the tree
//! itself is never mutated after parsing.

use germanscript_foundation::{ErrorContext, Gender, Span};

use crate::determiner::DeterminerKind;
use crate::token::{Operator, Token};

/// Identity of a noun phrase or call site, unique within one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A determiner and head word, e.g. "den Baum".
#[derive(Clone, Debug, PartialEq)]
pub struct NounPhrase {
    /// Side-table key for the resolved annotations.
    pub id: NodeId,
    /// The article, possessive or quantifier, if any.
    pub determiner: Option<Token>,
    /// The head word.
    pub noun: Token,
}

impl NounPhrase {
    /// The head word as written.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.noun.text
    }

    /// The kind of the determiner, if there is one.
    #[must_use]
    pub fn determiner_kind(&self) -> Option<DeterminerKind> {
        self.determiner.as_ref().and_then(Token::determiner)
    }

    /// Single-letter head words are symbols and are never declined.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        self.word().chars().count() == 1
    }

    /// Variables declared with a definite article (or none) cannot be reassigned.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        self.determiner_kind()
            .is_none_or(DeterminerKind::makes_immutable)
    }

    /// The first token of the phrase.
    #[must_use]
    pub fn first_token(&self) -> &Token {
        self.determiner.as_ref().unwrap_or(&self.noun)
    }

    /// Span from the determiner to the head word.
    #[must_use]
    pub fn span(&self) -> Span {
        self.first_token().span.to(self.noun.span)
    }

    /// Error context pointing at the head word.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        self.noun.context()
    }
}

/// A parsed program: every definition and top-level statement of every file, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// Top-level definitions.
    pub definitions: Vec<Definition>,
    /// Top-level statements.
    pub statements: Vec<Statement>,
}

/// A sequence of statements between `:` and `.` (or `!`).
pub type Block = Vec<Statement>;

// =============================================================================
// Definitions
// =============================================================================

/// A top-level definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    /// `Verb …`
    Function(FunctionDef),
    /// `Nomen …`
    Class(ClassDef),
    /// `Implementiere …`
    Implementation(ImplementationDef),
    /// `Deklination …`
    Declension(DeclensionDef),
}

/// A named parameter of a definition: `den Baum` or `die Zahl X`.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    /// The grammatical role of the parameter.
    pub noun: NounPhrase,
    /// An explicit variable name, not part of the signature.
    pub name: Option<Token>,
}

impl Parameter {
    /// The name the body refers to this parameter by.
    #[must_use]
    pub fn variable_name(&self) -> &str {
        self.name.as_ref().map_or(self.noun.word(), |name| &name.text)
    }
}

/// The direct object of a verb: a noun phrase or a reflexive pronoun.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectRole<T> {
    /// `den Baum`
    Argument(T),
    /// `mich` or `dich`
    Reflexive(Token),
}

/// A preposition and the comma-separated items it governs.
#[derive(Clone, Debug, PartialEq)]
pub struct PrepositionGroup<T> {
    /// The preposition word.
    pub preposition: Token,
    /// The items, in source order.
    pub items: Vec<T>,
}

/// The declared shape of a function or method.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSignature {
    /// The verb.
    pub verb: Token,
    /// `Verb (Zahl) …` declares a return type.
    pub return_type: Option<NounPhrase>,
    /// The direct object.
    pub object: Option<ObjectRole<Parameter>>,
    /// Preposition groups in source order.
    pub prepositions: Vec<PrepositionGroup<Parameter>>,
    /// A trailing word such as "auf" in "räume das Zimmer auf".
    pub suffix: Option<Token>,
}

impl FunctionSignature {
    /// Iterates every parameter, object first.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        let object = match &self.object {
            Some(ObjectRole::Argument(param)) => Some(param),
            _ => None,
        };
        object
            .into_iter()
            .chain(self.prepositions.iter().flat_map(|group| group.items.iter()))
    }
}

/// A function or method definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    /// The declared shape.
    pub signature: FunctionSignature,
    /// The body.
    pub body: Block,
}

/// A class definition, whose block is its constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    /// The `Nomen` keyword.
    pub token: Token,
    /// The class noun, without determiner.
    pub name: NounPhrase,
    /// Fields introduced by `mit`.
    pub fields: Vec<Parameter>,
    /// The constructor body.
    pub constructor: Block,
}

/// A conversion from a class to another type: `Als Zeichenfolge: … .`
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionDef {
    /// The `Als` keyword.
    pub token: Token,
    /// The target type.
    pub target: NounPhrase,
    /// The body.
    pub body: Block,
}

/// Methods and conversions of a class.
#[derive(Clone, Debug, PartialEq)]
pub struct ImplementationDef {
    /// The `Implementiere` keyword.
    pub token: Token,
    /// The implemented class, with its determiner.
    pub class: NounPhrase,
    /// Method definitions.
    pub methods: Vec<FunctionDef>,
    /// Conversion definitions.
    pub conversions: Vec<ConversionDef>,
}

/// Where a declension comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclensionSource {
    /// All eight forms written out.
    Inline {
        /// The noun's gender.
        gender: Gender,
        /// Nominative, genitive, dative, accusative singular.
        singular: [String; 4],
        /// Nominative, genitive, dative, accusative plural.
        plural: [String; 4],
    },
    /// `Duden(Wort)`: ask the external dictionary.
    External {
        /// The word to look up.
        word: Token,
    },
}

/// A `Deklination` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclensionDef {
    /// The `Deklination` keyword; its line is rewritten after an external lookup.
    pub token: Token,
    /// The forms or the word to look up.
    pub source: DeclensionSource,
}

// =============================================================================
// Statements
// =============================================================================

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `der Baum ist …` or `die Farbe der Blume ist …`
    Declaration(Declaration),
    /// `wenn … sonst …`
    Conditional(Conditional),
    /// `solange …`
    While(While),
    /// `für jeden Baum in …`
    ForEach(ForEach),
    /// `gebe … zurück` or `zurück`
    Return(Return),
    /// `fortfahren` or `abbrechen`
    LoopControl(LoopControl),
    /// `Expr: … !`
    MethodBlock(MethodBlock),
    /// A call used as a statement.
    Call(Call),
    /// `intern`: the body is provided by the runtime.
    Intern(Token),
}

/// A variable declaration or property assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    /// The variable or property being assigned.
    pub target: NounPhrase,
    /// The owner, when assigning a property of another object.
    pub owner: Option<Expression>,
    /// `ist` or `sind`.
    pub verb: Token,
    /// The assigned value.
    pub value: Expression,
}

/// A condition and the block it guards.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalBranch {
    /// The condition.
    pub condition: Expression,
    /// The guarded block.
    pub body: Block,
}

/// `wenn … : … . sonst wenn … : … . sonst: … .`
#[derive(Clone, Debug, PartialEq)]
pub struct Conditional {
    /// The `wenn` keyword.
    pub token: Token,
    /// Branches in source order.
    pub branches: Vec<ConditionalBranch>,
    /// The `sonst` block.
    pub otherwise: Option<Block>,
}

/// `solange …: … .`
#[derive(Clone, Debug, PartialEq)]
pub struct While {
    /// The `solange` keyword.
    pub token: Token,
    /// The condition.
    pub condition: Expression,
    /// The loop body.
    pub body: Block,
}

/// `für jede Zahl in den Zahlen: … .`
#[derive(Clone, Debug, PartialEq)]
pub struct ForEach {
    /// The `für` keyword.
    pub token: Token,
    /// The loop variable, with its quantifier.
    pub binder: NounPhrase,
    /// The iterated list; without `in` the list named by the binder's plural is used.
    pub source: Option<Expression>,
    /// The loop body.
    pub body: Block,
}

/// `gebe … zurück` or a bare `zurück`.
#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    /// The first keyword.
    pub token: Token,
    /// The returned value.
    pub value: Option<Expression>,
}

/// Which loop control statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControlKind {
    /// `fortfahren`
    Continue,
    /// `abbrechen`
    Break,
}

/// `fortfahren` or `abbrechen`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopControl {
    /// The keyword.
    pub token: Token,
    /// Which one.
    pub kind: LoopControlKind,
}

/// A block whose calls default to methods of the subject: `der Baum: wachse! `
#[derive(Clone, Debug, PartialEq)]
pub struct MethodBlock {
    /// The object the block talks to.
    pub subject: Expression,
    /// The statements.
    pub body: Block,
}

/// A call of a function or method.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    /// Key for the call's cached signature.
    pub id: NodeId,
    /// The verb.
    pub verb: Token,
    /// The direct object.
    pub object: Option<ObjectRole<Argument>>,
    /// Preposition groups in source order.
    pub prepositions: Vec<PrepositionGroup<Argument>>,
    /// A trailing word such as "auf".
    pub suffix: Option<Token>,
}

impl Call {
    /// Iterates every argument, object first.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        let object = match &self.object {
            Some(ObjectRole::Argument(arg)) => Some(arg),
            _ => None,
        };
        object
            .into_iter()
            .chain(self.prepositions.iter().flat_map(|group| group.items.iter()))
    }
}

/// An argument: `die Zahl 5`, or `die Zahl` passing the variable of that name.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    /// The grammatical role.
    pub noun: NounPhrase,
    /// The passed value, if given explicitly.
    pub value: Option<Box<Expression>>,
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Number, string or boolean literal.
    Literal(Token),
    /// `die Zahl` or a bare name.
    Variable(NounPhrase),
    /// `einige Zahlen[1, 2, 3]`
    List {
        /// The plural noun naming the element type.
        noun: NounPhrase,
        /// The elements.
        items: Vec<Expression>,
    },
    /// `die Zahlen[2]`
    ListIndex {
        /// The list variable.
        list: NounPhrase,
        /// The index.
        index: Box<Expression>,
    },
    /// A call used as a value.
    Call(Box<Call>),
    /// `a plus b`
    Binary {
        /// The operator token.
        token: Token,
        /// The operator.
        operator: Operator,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// `-a` or `minus a`
    Minus {
        /// The operator token.
        token: Token,
        /// The negated operand.
        operand: Box<Expression>,
    },
    /// `… als Zeichenfolge`
    Conversion {
        /// The `als` keyword.
        token: Token,
        /// The converted value.
        value: Box<Expression>,
        /// The target type.
        target: NounPhrase,
    },
    /// `ein Baum mit der Höhe 5`
    Instantiation {
        /// The class, with its indefinite article.
        class: NounPhrase,
        /// Field assignments.
        fields: Vec<Argument>,
    },
    /// `die Höhe des Baumes`
    Property {
        /// The property name.
        property: NounPhrase,
        /// The owning object.
        owner: Box<Expression>,
    },
    /// `meine Höhe`
    SelfProperty(NounPhrase),
    /// `deine Höhe`
    MethodBlockProperty(NounPhrase),
    /// `ich`
    SelfReference(Token),
    /// `du`
    MethodBlockReference(Token),
}

impl Expression {
    /// The first token of this expression, used for positioning errors.
    #[must_use]
    pub fn first_token(&self) -> &Token {
        match self {
            Self::Literal(token)
            | Self::Minus { token, .. }
            | Self::SelfReference(token)
            | Self::MethodBlockReference(token) => token,
            Self::Variable(noun)
            | Self::List { noun, .. }
            | Self::ListIndex { list: noun, .. }
            | Self::Instantiation { class: noun, .. }
            | Self::Property { property: noun, .. }
            | Self::SelfProperty(noun)
            | Self::MethodBlockProperty(noun) => noun.first_token(),
            Self::Call(call) => &call.verb,
            Self::Binary { left, .. } | Self::Conversion { value: left, .. } => left.first_token(),
        }
    }
}

// =============================================================================
// Children
// =============================================================================

/// A borrowed reference to any node that can have children.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    /// A definition.
    Definition(&'a Definition),
    /// A statement.
    Statement(&'a Statement),
    /// An expression.
    Expression(&'a Expression),
    /// A call, either as statement or as expression.
    Call(&'a Call),
}

fn block_children(block: &Block) -> impl Iterator<Item = Node<'_>> {
    block.iter().map(Node::Statement)
}

fn argument_children(arguments: &[Argument]) -> impl Iterator<Item = Node<'_>> {
    arguments
        .iter()
        .filter_map(|arg| arg.value.as_deref())
        .map(Node::Expression)
}

impl Definition {
    /// The statements and expressions directly owned by this definition.
    #[must_use]
    pub fn children(&self) -> Vec<Node<'_>> {
        match self {
            Self::Function(function) => block_children(&function.body).collect(),
            Self::Class(class) => block_children(&class.constructor).collect(),
            Self::Implementation(implementation) => implementation
                .methods
                .iter()
                .flat_map(|method| block_children(&method.body))
                .chain(
                    implementation
                        .conversions
                        .iter()
                        .flat_map(|conversion| block_children(&conversion.body)),
                )
                .collect(),
            Self::Declension(_) => Vec::new(),
        }
    }
}

impl Call {
    /// The argument values of this call.
    #[must_use]
    pub fn children(&self) -> Vec<Node<'_>> {
        self.arguments()
            .filter_map(|arg| arg.value.as_deref())
            .map(Node::Expression)
            .collect()
    }
}

impl Statement {
    /// The statements and expressions directly owned by this statement.
    #[must_use]
    pub fn children(&self) -> Vec<Node<'_>> {
        match self {
            Self::Declaration(declaration) => declaration
                .owner
                .iter()
                .chain(std::iter::once(&declaration.value))
                .map(Node::Expression)
                .collect(),
            Self::Conditional(conditional) => conditional
                .branches
                .iter()
                .flat_map(|branch| {
                    std::iter::once(Node::Expression(&branch.condition))
                        .chain(block_children(&branch.body))
                })
                .chain(conditional.otherwise.iter().flat_map(|block| block_children(block)))
                .collect(),
            Self::While(while_loop) => std::iter::once(Node::Expression(&while_loop.condition))
                .chain(block_children(&while_loop.body))
                .collect(),
            Self::ForEach(for_each) => for_each
                .source
                .iter()
                .map(Node::Expression)
                .chain(block_children(&for_each.body))
                .collect(),
            Self::Return(ret) => ret.value.iter().map(Node::Expression).collect(),
            Self::MethodBlock(block) => std::iter::once(Node::Expression(&block.subject))
                .chain(block_children(&block.body))
                .collect(),
            Self::Call(call) => vec![Node::Call(call)],
            Self::LoopControl(_) | Self::Intern(_) => Vec::new(),
        }
    }
}

impl Expression {
    /// The expressions directly owned by this expression.
    #[must_use]
    pub fn children(&self) -> Vec<Node<'_>> {
        match self {
            Self::List { items, .. } => items.iter().map(Node::Expression).collect(),
            Self::ListIndex { index, .. } => vec![Node::Expression(index)],
            Self::Call(call) => vec![Node::Call(call)],
            Self::Binary { left, right, .. } => {
                vec![Node::Expression(left), Node::Expression(right)]
            }
            Self::Minus { operand, .. } => vec![Node::Expression(operand)],
            Self::Conversion { value, .. } => vec![Node::Expression(value)],
            Self::Instantiation { fields, .. } => argument_children(fields).collect(),
            Self::Property { owner, .. } => vec![Node::Expression(owner)],
            Self::Literal(_)
            | Self::Variable(_)
            | Self::SelfProperty(_)
            | Self::MethodBlockProperty(_)
            | Self::SelfReference(_)
            | Self::MethodBlockReference(_) => Vec::new(),
        }
    }
}
