//! The grammar checker.
//!
//! One traversal over the program resolves every noun phrase against the
//! declension dictionary: the case set its surface form and determiner
//! allow in its position, its number and gender, and the canonical
//! determiner spelling. The position decides which cases are acceptable;
//! the first disagreement aborts the check.

use germanscript_declension::{Declension, DeclensionDictionary};
use germanscript_foundation::{
    Case, CaseSet, Error, ErrorKind, Number, NumberSet, Result,
};
use germanscript_language::DeterminerKind;
use germanscript_language::ast::{
    Argument, Block, Call, Definition, Expression, FunctionDef, ObjectRole, PrepositionGroup,
    Program, Statement,
};
use germanscript_language::NounPhrase;
use tracing::{debug, trace};

use crate::annotations::{Annotations, NounAnnotation};
use crate::prepositions;

const NOMINATIVE: CaseSet = CaseSet::single(Case::Nominative);
const GENITIVE: CaseSet = CaseSet::single(Case::Genitive);
const DATIVE: CaseSet = CaseSet::single(Case::Dative);
const ACCUSATIVE: CaseSet = CaseSet::single(Case::Accusative);

/// Checks a whole program and returns the resolved annotations.
///
/// # Errors
/// Returns the first unknown word or agreement error.
pub fn check_program(program: &Program, dictionary: &DeclensionDictionary) -> Result<Annotations> {
    GrammarChecker::new(dictionary).check(program)
}

/// Resolves noun phrases against a declension dictionary.
pub struct GrammarChecker<'d> {
    dictionary: &'d DeclensionDictionary,
    annotations: Annotations,
}

impl<'d> GrammarChecker<'d> {
    /// Creates a checker with an empty annotation table.
    #[must_use]
    pub fn new(dictionary: &'d DeclensionDictionary) -> Self {
        Self {
            dictionary,
            annotations: Annotations::new(),
        }
    }

    /// The annotations resolved so far.
    #[must_use]
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Checks every definition, then every top-level statement.
    ///
    /// # Errors
    /// Returns the first unknown word or agreement error.
    pub fn check(mut self, program: &Program) -> Result<Annotations> {
        debug!(
            definitions = program.definitions.len(),
            statements = program.statements.len(),
            "checking grammar"
        );
        for definition in &program.definitions {
            self.check_definition(definition)?;
        }
        self.check_block(&program.statements)?;
        debug!(phrases = self.annotations.len(), "grammar checked");
        Ok(self.annotations)
    }

    // =========================================================================
    // Noun phrases
    // =========================================================================

    /// Resolves a noun phrase in a position accepting `cases` and `numbers`.
    ///
    /// A phrase that was already resolved keeps its first annotation.
    ///
    /// # Errors
    /// - `UnknownWord` if the dictionary has no entry for the head word
    /// - `WrongNumber` if the word is in none of the accepted numbers
    /// - `WrongNounForm` if the word is in none of the accepted cases
    /// - `WrongDeterminer` if the determiner agrees with none of the remaining cases
    pub fn resolve(
        &mut self,
        noun: &NounPhrase,
        cases: CaseSet,
        numbers: NumberSet,
    ) -> Result<NounAnnotation> {
        if let Some(existing) = self.annotations.get(noun.id) {
            return Ok(existing.clone());
        }
        let annotation = if noun.is_symbol() {
            NounAnnotation {
                cases,
                number: Number::Singular,
                gender: None,
                nominative: None,
                determiner: noun.determiner.as_ref().map(|token| token.text.clone()),
                immutable: noun.is_immutable(),
            }
        } else {
            self.decline(noun, cases, numbers)?
        };
        trace!(word = noun.word(), cases = %annotation.cases, number = %annotation.number, "resolved");
        Ok(self.annotations.record(noun.id, annotation).clone())
    }

    /// Resolves a declined noun against its dictionary entry.
    ///
    /// A form present in both numbers ("Zimmer") is tried as singular, then
    /// as plural; the first number that agrees wins. When neither agrees the
    /// singular failure is reported, not the plural one.
    fn decline(
        &self,
        noun: &NounPhrase,
        cases: CaseSet,
        numbers: NumberSet,
    ) -> Result<NounAnnotation> {
        let word = noun.word();
        let entry = self
            .dictionary
            .lookup(word)
            .map_err(|err| err.with_context(noun.context()))?;

        let own_numbers = entry.numbers_of(word);
        let candidates = own_numbers.intersection(numbers);
        if candidates.is_empty() {
            return Err(wrong_number(noun, entry, own_numbers, cases, numbers));
        }

        let mut first_failure = None;
        for number in candidates.iter() {
            match agree(noun, entry, cases, number) {
                Ok(annotation) => return Ok(annotation),
                Err(err) => {
                    first_failure.get_or_insert(err);
                }
            }
        }
        Err(first_failure.unwrap_or_else(|| Error::internal("no number candidate was tried")))
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    fn check_definition(&mut self, definition: &Definition) -> Result<()> {
        match definition {
            Definition::Function(function) => self.check_function(function),
            Definition::Class(class) => {
                self.resolve(&class.name, NOMINATIVE, NumberSet::SINGULAR)?;
                for field in &class.fields {
                    self.resolve(&field.noun, DATIVE, NumberSet::ALL)?;
                }
                self.check_block(&class.constructor)
            }
            Definition::Implementation(implementation) => {
                self.resolve(&implementation.class, ACCUSATIVE, NumberSet::SINGULAR)?;
                for method in &implementation.methods {
                    self.check_function(method)?;
                }
                for conversion in &implementation.conversions {
                    self.resolve(&conversion.target, NOMINATIVE, NumberSet::SINGULAR)?;
                    self.check_block(&conversion.body)?;
                }
                Ok(())
            }
            Definition::Declension(_) => Ok(()),
        }
    }

    fn check_function(&mut self, function: &FunctionDef) -> Result<()> {
        let signature = &function.signature;
        if let Some(return_type) = &signature.return_type {
            self.resolve(return_type, NOMINATIVE, NumberSet::SINGULAR)?;
        }
        if let Some(ObjectRole::Argument(object)) = &signature.object {
            self.resolve(&object.noun, ACCUSATIVE, NumberSet::ALL)?;
        }
        for group in &signature.prepositions {
            self.check_preposition_group(group, |checker, parameter, case| {
                checker
                    .resolve(&parameter.noun, CaseSet::single(case), NumberSet::ALL)
                    .map(|_| ())
            })?;
        }
        self.check_block(&function.body)
    }

    /// Checks the items of a preposition group with each candidate case in
    /// turn. The first candidate under which every item agrees wins; if none
    /// does, only the last candidate's failure is raised.
    fn check_preposition_group<T>(
        &mut self,
        group: &PrepositionGroup<T>,
        mut check: impl FnMut(&mut Self, &T, Case) -> Result<()>,
    ) -> Result<()> {
        let candidates = prepositions::cases(&group.preposition.text)
            .ok_or_else(|| group.preposition.unexpected("a preposition"))?;

        let mut last_failure = None;
        for &case in candidates {
            let checkpoint = self.annotations.checkpoint();
            match group.items.iter().try_for_each(|item| check(self, item, case)) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    self.annotations.rollback(checkpoint);
                    last_failure = Some(err);
                }
            }
        }
        Err(last_failure.unwrap_or_else(|| Error::internal("preposition without cases")))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn check_block(&mut self, block: &Block) -> Result<()> {
        block
            .iter()
            .try_for_each(|statement| self.check_statement(statement))
    }

    fn check_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Declaration(declaration) => {
                let target = self.resolve(&declaration.target, NOMINATIVE, NumberSet::ALL)?;
                let expected = target.number.assignment_verb();
                if declaration.verb.text != expected {
                    return Err(declaration.verb.error(ErrorKind::WrongAssignmentForm {
                        found: declaration.verb.text.clone(),
                        expected: expected.to_string(),
                    }));
                }
                if let Some(owner) = &declaration.owner {
                    self.check_expression(owner, GENITIVE, NumberSet::ALL)?;
                }
                self.check_expression(&declaration.value, NOMINATIVE, NumberSet::ALL)
            }
            Statement::Conditional(conditional) => {
                for branch in &conditional.branches {
                    self.check_expression(&branch.condition, NOMINATIVE, NumberSet::ALL)?;
                    self.check_block(&branch.body)?;
                }
                match &conditional.otherwise {
                    Some(block) => self.check_block(block),
                    None => Ok(()),
                }
            }
            Statement::While(while_loop) => {
                self.check_expression(&while_loop.condition, NOMINATIVE, NumberSet::ALL)?;
                self.check_block(&while_loop.body)
            }
            Statement::ForEach(for_each) => {
                self.resolve(&for_each.binder, ACCUSATIVE, NumberSet::SINGULAR)?;
                if let Some(source) = &for_each.source {
                    self.check_expression(source, DATIVE, NumberSet::ALL)?;
                }
                self.check_block(&for_each.body)
            }
            Statement::Return(ret) => match &ret.value {
                Some(value) => self.check_expression(value, ACCUSATIVE, NumberSet::ALL),
                None => Ok(()),
            },
            Statement::MethodBlock(block) => {
                self.check_expression(&block.subject, NOMINATIVE, NumberSet::ALL)?;
                self.check_block(&block.body)
            }
            Statement::Call(call) => self.check_call(call),
            Statement::LoopControl(_) | Statement::Intern(_) => Ok(()),
        }
    }

    fn check_call(&mut self, call: &Call) -> Result<()> {
        if let Some(ObjectRole::Argument(object)) = &call.object {
            self.check_argument(object, ACCUSATIVE)?;
        }
        for group in &call.prepositions {
            self.check_preposition_group(group, |checker, argument, case| {
                checker.check_argument(argument, CaseSet::single(case))
            })?;
        }
        Ok(())
    }

    /// The value of an argument takes the cases its noun resolved to.
    fn check_argument(&mut self, argument: &Argument, cases: CaseSet) -> Result<()> {
        let resolved = self.resolve(&argument.noun, cases, NumberSet::ALL)?;
        match &argument.value {
            Some(value) => self.check_expression(value, resolved.cases, NumberSet::ALL),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn check_expression(
        &mut self,
        expression: &Expression,
        cases: CaseSet,
        numbers: NumberSet,
    ) -> Result<()> {
        match expression {
            Expression::Literal(_)
            | Expression::SelfReference(_)
            | Expression::MethodBlockReference(_) => Ok(()),
            Expression::Variable(noun)
            | Expression::SelfProperty(noun)
            | Expression::MethodBlockProperty(noun) => {
                self.resolve(noun, cases, numbers).map(|_| ())
            }
            Expression::List { noun, items } => {
                self.resolve(noun, cases, NumberSet::PLURAL)?;
                items
                    .iter()
                    .try_for_each(|item| self.check_expression(item, NOMINATIVE, NumberSet::ALL))
            }
            Expression::ListIndex { list, index } => {
                self.resolve(list, cases, NumberSet::PLURAL)?;
                self.check_expression(index, NOMINATIVE, NumberSet::ALL)
            }
            Expression::Call(call) => self.check_call(call),
            Expression::Binary { .. } => self.check_operand(expression, cases, true),
            Expression::Minus { operand, .. } => {
                self.check_expression(operand, cases, NumberSet::ALL)
            }
            Expression::Conversion { value, target, .. } => {
                self.check_expression(value, cases, numbers)?;
                self.resolve(target, NOMINATIVE, NumberSet::SINGULAR).map(|_| ())
            }
            Expression::Instantiation { class, fields } => {
                self.resolve(class, cases, NumberSet::SINGULAR)?;
                fields
                    .iter()
                    .try_for_each(|field| self.check_argument(field, DATIVE))
            }
            Expression::Property { property, owner } => {
                self.resolve(property, cases, numbers)?;
                self.check_expression(owner, GENITIVE, NumberSet::ALL)
            }
        }
    }

    /// Checks one operand of a binary expression tree.
    ///
    /// Only operands on the leftmost spine inherit the caller's cases; every
    /// other operand takes the case of its operator's class.
    fn check_operand(
        &mut self,
        expression: &Expression,
        cases: CaseSet,
        leftmost: bool,
    ) -> Result<()> {
        match expression {
            Expression::Binary {
                operator,
                left,
                right,
                ..
            } => {
                let operand_cases = CaseSet::single(operator.class().case());
                let left_cases = if leftmost { cases } else { operand_cases };
                self.check_operand(left, left_cases, leftmost)?;
                self.check_operand(right, operand_cases, false)
            }
            other => self.check_expression(other, cases, NumberSet::ALL),
        }
    }
}

/// Matches a noun and its determiner against one number of its declension.
fn agree(
    noun: &NounPhrase,
    entry: &Declension,
    cases: CaseSet,
    number: Number,
) -> Result<NounAnnotation> {
    let word = noun.word();
    let gender = entry.gender();
    let first_case = cases.first().unwrap_or(Case::Nominative);

    let mut matched = entry.cases_of(word, number).intersection(cases);
    if matched.is_empty() {
        return Err(noun.noun.error(ErrorKind::WrongNounForm {
            found: word.to_string(),
            expected: entry.form(first_case, number).to_string(),
            cases,
        }));
    }

    let determiner = match (&noun.determiner, noun.determiner_kind()) {
        (Some(token), Some(kind)) => {
            let spelled = |case: Case| DeterminerKind::form(kind, case, gender, number);
            matched = matched
                .iter()
                .filter(|case| spelled(*case) == token.text)
                .collect();
            let Some(case) = matched.first() else {
                return Err(token.error(ErrorKind::WrongDeterminer {
                    found: token.text.clone(),
                    expected: spelled(first_case).to_string(),
                }));
            };
            Some(spelled(case).to_string())
        }
        _ => None,
    };

    Ok(NounAnnotation {
        cases: matched,
        number,
        gender: Some(gender),
        nominative: Some(entry.nominative().to_string()),
        determiner,
        immutable: noun.is_immutable(),
    })
}

/// Builds the error for a noun in the wrong number, suggesting the form in
/// the first accepted number and, where possible, the word's own case.
fn wrong_number(
    noun: &NounPhrase,
    entry: &Declension,
    own_numbers: NumberSet,
    cases: CaseSet,
    numbers: NumberSet,
) -> Error {
    let word = noun.word();
    let own_cases = own_numbers
        .iter()
        .next()
        .map_or(CaseSet::EMPTY, |number| entry.cases_of(word, number));
    let case = own_cases
        .intersection(cases)
        .first()
        .or_else(|| own_cases.first())
        .or_else(|| cases.first())
        .unwrap_or(Case::Nominative);
    let number = numbers.iter().next().unwrap_or(Number::Singular);
    noun.noun.error(ErrorKind::WrongNumber {
        found: word.to_string(),
        expected: entry.form(case, number).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use germanscript_foundation::Gender;
    use germanscript_language::parse_text;

    fn dictionary() -> DeclensionDictionary {
        let mut dictionary = DeclensionDictionary::new();
        for entry in [
            Declension::from_forms(
                Gender::Masculine,
                ["Baum", "Baums", "Baum", "Baum"],
                ["Bäume", "Bäume", "Bäumen", "Bäume"],
            ),
            Declension::from_forms(
                Gender::Feminine,
                ["Zahl", "Zahl", "Zahl", "Zahl"],
                ["Zahlen", "Zahlen", "Zahlen", "Zahlen"],
            ),
            Declension::from_forms(
                Gender::Neuter,
                ["Zimmer", "Zimmers", "Zimmer", "Zimmer"],
                ["Zimmer", "Zimmer", "Zimmern", "Zimmer"],
            ),
            Declension::from_forms(
                Gender::Feminine,
                ["Höhe", "Höhe", "Höhe", "Höhe"],
                ["Höhen", "Höhen", "Höhen", "Höhen"],
            ),
        ] {
            dictionary.insert(entry).unwrap();
        }
        dictionary
    }

    fn check(text: &str) -> Result<Annotations> {
        check_program(&parse_text(text).unwrap(), &dictionary())
    }

    fn declaration_target(text: &str) -> NounPhrase {
        match parse_text(text).unwrap().statements.remove(0) {
            Statement::Declaration(declaration) => declaration.target,
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn accusative_object() {
        let dictionary = dictionary();
        let mut checker = GrammarChecker::new(&dictionary);
        let noun = declaration_target("den Baum ist 1");
        let resolved = checker.resolve(&noun, ACCUSATIVE, NumberSet::ALL).unwrap();
        assert_eq!(resolved.cases, ACCUSATIVE);
        assert_eq!(resolved.number, Number::Singular);
        assert_eq!(resolved.determiner.as_deref(), Some("den"));
        assert_eq!(resolved.nominative.as_deref(), Some("Baum"));
    }

    #[test]
    fn wrong_determiner_suggests_agreeing_one() {
        let dictionary = dictionary();
        let mut checker = GrammarChecker::new(&dictionary);
        let noun = declaration_target("der Baum ist 1");
        let err = checker.resolve(&noun, ACCUSATIVE, NumberSet::ALL).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongDeterminer { ref found, ref expected } if found == "der" && expected == "den"
        ));
        assert!(checker.annotations().is_empty());
    }

    #[test]
    fn wrong_noun_form() {
        let err = check("der Baums ist 1").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongNounForm { ref found, ref expected, .. } if found == "Baums" && expected == "Baum"
        ));
    }

    #[test]
    fn wrong_number() {
        let err = check("für jeden Bäume in den Bäumen:\n  abbrechen\n.").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongNumber { ref found, ref expected } if found == "Bäume" && expected == "Baum"
        ));
    }

    #[test]
    fn unknown_word() {
        let err = check("das Haus ist 1").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownWord(ref word) if word == "Haus"));
        assert_eq!(err.context.unwrap().span.unwrap().column(), 5);
    }

    #[test]
    fn assignment_verb_agrees_with_number() {
        assert!(check("die Bäume sind 1").is_ok());
        let err = check("der Baum sind 1").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongAssignmentForm { ref found, ref expected } if found == "sind" && expected == "ist"
        ));
    }

    #[test]
    fn ambiguous_number_resolved_by_determiner() {
        let annotations = check("die Zimmer sind 2").unwrap();
        assert_eq!(annotations.len(), 1);
        let singular = check("das Zimmer ist 1").unwrap();
        assert_eq!(singular.len(), 1);
    }

    #[test]
    fn symbols_are_not_declined() {
        let program = parse_text("schreibe die Zahl X").unwrap();
        let annotations = check_program(&program, &dictionary()).unwrap();
        let Some(Statement::Call(call)) = program.statements.first() else {
            panic!("expected call");
        };
        let Some(ObjectRole::Argument(argument)) = &call.object else {
            panic!("expected object");
        };
        let Some(Expression::Variable(symbol)) = argument.value.as_deref() else {
            panic!("expected symbol value");
        };
        let resolved = annotations.noun(symbol).unwrap();
        assert!(resolved.is_symbol());
        assert_eq!(resolved.cases, ACCUSATIVE);
        assert_eq!(resolved.number, Number::Singular);
    }

    #[test]
    fn comparison_operands_are_dative() {
        assert!(check("wenn die Zahl größer der Zahl:\n  schreibe die Zahl\n.").is_ok());
        let err = check("wenn die Zahl größer die Zahl:\n  schreibe die Zahl\n.").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::WrongDeterminer { ref expected, .. } if expected == "der"));
    }

    #[test]
    fn arithmetic_operands_are_accusative() {
        assert!(check("die Zahl ist die Zahl plus die Zahl mal die Zahl").is_ok());
        assert!(check("die Höhe ist den Baum plus 1").is_err());
    }

    #[test]
    fn two_way_preposition_tries_dative_then_accusative() {
        assert!(check("lege die Zahl in den Baum").is_ok());
        assert!(check("lege die Zahl in dem Baum").is_ok());
        let err = check("lege die Zahl in des Baums").unwrap_err();
        // only the accusative attempt is reported
        assert!(matches!(err.kind, ErrorKind::WrongNounForm { cases, .. } if cases == ACCUSATIVE));
    }

    #[test]
    fn unknown_preposition() {
        let err = check("lege die Zahl hinein den Baum").unwrap_err();
        assert_eq!(err.to_string(), "expected a preposition, found 'hinein'");
    }

    #[test]
    fn genitive_owner() {
        assert!(check("die Höhe des Baums ist 5").is_ok());
        assert!(check("die Höhe der Bäume ist 5").is_ok());
        let err = check("die Höhe des Baum ist 5").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongNounForm { ref found, ref expected, cases }
                if found == "Baum" && expected == "Baums" && cases == GENITIVE
        ));
    }

    #[test]
    fn form_shared_by_both_numbers_reports_singular_failure() {
        let dictionary = dictionary();
        let mut checker = GrammarChecker::new(&dictionary);
        let noun = declaration_target("den Zimmer ist 1");
        let err = checker.resolve(&noun, ACCUSATIVE, NumberSet::ALL).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::WrongDeterminer { ref found, ref expected } if found == "den" && expected == "das"
        ));
        let plural = declaration_target("die Zimmer ist 1");
        let resolved = checker.resolve(&plural, ACCUSATIVE, NumberSet::ALL).unwrap();
        assert_eq!(resolved.number, Number::Plural);
    }
}
