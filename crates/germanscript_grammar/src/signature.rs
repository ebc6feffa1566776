//! Canonical signatures of declarations and call sites.
//!
//! A signature is the verb followed by the grammatical roles it takes:
//! `addiere die Zahl mit der Zahl`, `räume das Zimmer auf`. Each role is
//! written with the definite article of its resolved case, gender and
//! number, so variable names, values and the article used at the call
//! site do not matter. Reflexive objects are written as `sich`.

use germanscript_foundation::Result;
use germanscript_language::DeterminerKind;
use germanscript_language::ast::{
    Argument, Call, FunctionSignature, ObjectRole, Parameter, PrepositionGroup,
};
use germanscript_language::{NounPhrase, Token};

use crate::annotations::Annotations;

/// Canonical spelling of a reflexive object.
pub const REFLEXIVE: &str = "sich";

/// A definition parameter or a call argument: anything with a grammatical role.
pub trait Role {
    /// The noun phrase carrying the role.
    fn phrase(&self) -> &NounPhrase;
}

impl Role for Parameter {
    fn phrase(&self) -> &NounPhrase {
        &self.noun
    }
}

impl Role for Argument {
    fn phrase(&self) -> &NounPhrase {
        &self.noun
    }
}

/// The signature of a function or method declaration.
///
/// # Errors
/// Returns an internal error if a parameter was not grammar checked.
pub fn of_declaration(signature: &FunctionSignature, annotations: &Annotations) -> Result<String> {
    build(
        &signature.verb,
        signature.object.as_ref(),
        &signature.prepositions,
        signature.suffix.as_ref(),
        annotations,
    )
}

/// The signature of a call site.
///
/// # Errors
/// Returns an internal error if an argument was not grammar checked.
pub fn of_call(call: &Call, annotations: &Annotations) -> Result<String> {
    build(
        &call.verb,
        call.object.as_ref(),
        &call.prepositions,
        call.suffix.as_ref(),
        annotations,
    )
}

/// A noun phrase with the definite article of its resolved grammar.
///
/// # Errors
/// Returns an internal error if the phrase was not grammar checked.
pub fn canonical_phrase(noun: &NounPhrase, annotations: &Annotations) -> Result<String> {
    let annotation = annotations.noun(noun)?;
    Ok(match (annotation.gender, annotation.case()) {
        (Some(gender), Some(case)) => format!(
            "{} {}",
            DeterminerKind::Definite.form(case, gender, annotation.number),
            noun.word()
        ),
        _ => match &noun.determiner {
            Some(determiner) => format!("{} {}", determiner.text, noun.word()),
            None => noun.word().to_string(),
        },
    })
}

fn build<T: Role>(
    verb: &Token,
    object: Option<&ObjectRole<T>>,
    prepositions: &[PrepositionGroup<T>],
    suffix: Option<&Token>,
    annotations: &Annotations,
) -> Result<String> {
    let mut parts = vec![verb.text.clone()];
    match object {
        Some(ObjectRole::Argument(role)) => {
            parts.push(canonical_phrase(role.phrase(), annotations)?);
        }
        Some(ObjectRole::Reflexive(_)) => parts.push(REFLEXIVE.to_string()),
        None => {}
    }
    for group in prepositions {
        let items = group
            .items
            .iter()
            .map(|item| canonical_phrase(item.phrase(), annotations))
            .collect::<Result<Vec<_>>>()?;
        parts.push(format!("{} {}", group.preposition.text, items.join(", ")));
    }
    if let Some(suffix) = suffix {
        parts.push(suffix.text.clone());
    }
    Ok(parts.join(" "))
}
