//! The compilation pipeline.
//!
//! Stages run strictly in order and the first error aborts the attempt:
//! tokenizing and parsing every queued file, populating the declension
//! dictionary (inline entries and concurrent external lookups), grammar
//! checking, registering definitions and verifying every call site.

use std::sync::Arc;

use germanscript_declension::{DeclensionDictionary, DeclensionService, DictionaryLoader};
use germanscript_foundation::{Error, Result};
use germanscript_grammar::{Annotations, Definitions, check_program};
use germanscript_language::ast::{Call, ClassDef, ConversionDef, Definition, FunctionDef};
use germanscript_language::{ImportQueue, NounPhrase, Program, parse_queue};
use tracing::{debug, info};

use crate::config::CompilerConfig;

/// Compiles the standard library and the entry file named by `config`.
///
/// # Errors
/// Returns the first error of any stage.
pub async fn compile<S: DeclensionService>(
    config: &CompilerConfig,
    service: Arc<S>,
) -> Result<CompiledProgram> {
    let imports = ImportQueue::seeded(config.sources())?;
    let program = parse_queue(imports)?;
    debug!(
        definitions = program.definitions.len(),
        statements = program.statements.len(),
        "parsed"
    );

    let dictionary = DictionaryLoader::new(service)
        .with_timeout(config.lookup_timeout)
        .with_source_rewrite(config.rewrite_sources)
        .load(&program)
        .await?;
    debug!(entries = dictionary.len(), "dictionary populated");

    let compiled = analyze(program, dictionary)?;
    info!(entry = %config.entry.display(), "compiled");
    Ok(compiled)
}

/// Runs the stages after dictionary population on an already parsed program.
///
/// # Errors
/// Returns the first grammar, definition or resolution error.
pub fn analyze(program: Program, dictionary: DeclensionDictionary) -> Result<CompiledProgram> {
    let annotations = check_program(&program, &dictionary)?;
    debug!(phrases = annotations.len(), "grammar checked");

    let definitions = Definitions::define(&program, &annotations)?;
    debug!(
        functions = definitions.function_signatures().len(),
        classes = definitions.classes().len(),
        "definitions registered"
    );

    definitions.verify_calls(&program)?;
    debug!("calls verified");

    Ok(CompiledProgram {
        program,
        dictionary,
        annotations,
        definitions,
    })
}

/// A program that passed every stage, with everything downstream consumers need.
#[derive(Debug)]
pub struct CompiledProgram {
    program: Program,
    dictionary: DeclensionDictionary,
    annotations: Annotations,
    definitions: Definitions,
}

impl CompiledProgram {
    /// The syntax tree.
    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The populated declension dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &DeclensionDictionary {
        &self.dictionary
    }

    /// The resolved case, number and gender of every noun phrase.
    #[must_use]
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// The declaration tables.
    #[must_use]
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// The function a call site names.
    ///
    /// # Errors
    /// Returns `UndefinedFunction` naming the attempted signature.
    pub fn resolve_call(&self, call: &Call) -> Result<&FunctionDef> {
        let callable = self.definitions.resolve_call(call)?;
        callable
            .definition(&self.program)
            .ok_or_else(|| dangling(&call.verb.text))
    }

    /// The method of the class of `instance` that a call site names.
    ///
    /// # Errors
    /// Returns `UndefinedType` or `UndefinedMethod`.
    pub fn resolve_method(&self, instance: &NounPhrase, call: &Call) -> Result<&FunctionDef> {
        let class = self.annotations.type_name(instance)?;
        let callable = self.definitions.resolve_method(class, call)?;
        callable
            .definition(&self.program)
            .ok_or_else(|| dangling(&call.verb.text))
    }

    /// The class a noun phrase refers to.
    ///
    /// # Errors
    /// Returns `UndefinedType` if no class has the phrase's nominative.
    pub fn resolve_type(&self, noun: &NounPhrase) -> Result<&ClassDef> {
        let name = self.annotations.type_name(noun)?;
        self.definitions
            .resolve_type(name, noun)?
            .class(&self.program)
            .ok_or_else(|| dangling(name))
    }

    /// The conversion of the class of `instance` to the type `target`.
    ///
    /// # Errors
    /// Returns `UndefinedType` or `UndefinedConversion`.
    pub fn resolve_conversion(
        &self,
        instance: &NounPhrase,
        target: &NounPhrase,
    ) -> Result<&ConversionDef> {
        let class = self.annotations.type_name(instance)?;
        let target_name = self.annotations.type_name(target)?;
        let conversion = self
            .definitions
            .resolve_conversion(class, target_name, target)?;
        match self.program.definitions.get(conversion.definition) {
            Some(Definition::Implementation(implementation)) => implementation
                .conversions
                .get(conversion.conversion)
                .ok_or_else(|| dangling(target_name)),
            _ => Err(dangling(target_name)),
        }
    }

    /// Every canonical signature, one per line: functions first, then each
    /// class with its methods and conversions.
    #[must_use]
    pub fn signatures(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .definitions
            .function_signatures()
            .into_iter()
            .map(|signature| format!("Verb {signature}"))
            .collect();
        for (name, class) in self.definitions.classes() {
            lines.push(format!("Nomen {name}"));
            lines.extend(
                class
                    .method_signatures()
                    .into_iter()
                    .map(|signature| format!("  Verb {signature}")),
            );
            lines.extend(
                class
                    .conversion_targets()
                    .into_iter()
                    .map(|target| format!("  Als {target}")),
            );
        }
        lines
    }
}

fn dangling(name: &str) -> Error {
    Error::internal(format!("definition table entry for '{name}' points outside the program"))
}
