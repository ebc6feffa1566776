//! The definer: declaration tables and call resolution.
//!
//! Functions are keyed by their canonical signature, classes by the
//! nominative singular of their name. Methods and conversions live inside
//! their class, keyed by signature and by target type. Definitions are
//! addressed by their position in the program, so the tables never borrow
//! the syntax tree.

use std::collections::HashMap;

use germanscript_foundation::{Error, ErrorContext, ErrorKind, Result};
use germanscript_language::ast::{
    Call, ClassDef, Definition, FunctionDef, ImplementationDef, Program, Statement,
};
use germanscript_language::visitor::{AstVisitor, walk_call, walk_definition, walk_program, walk_statement};
use germanscript_language::{NodeId, NounPhrase};
use tracing::{debug, trace};

use crate::annotations::Annotations;
use crate::signature;

/// Class names taken by the built-in types.
pub const RESERVED_TYPE_NAMES: [&str; 3] = ["Zahl", "Zeichenfolge", "Boolean"];

/// Where a callable definition lives in the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Callable {
    /// `program.definitions[definition]` is a function.
    Function {
        /// Index of the definition.
        definition: usize,
    },
    /// Method `method` of the implementation at `program.definitions[definition]`.
    Method {
        /// Index of the implementation definition.
        definition: usize,
        /// Index of the method inside the implementation.
        method: usize,
    },
}

impl Callable {
    /// The function or method definition this points to.
    #[must_use]
    pub fn definition<'p>(&self, program: &'p Program) -> Option<&'p FunctionDef> {
        match *self {
            Self::Function { definition } => match program.definitions.get(definition)? {
                Definition::Function(function) => Some(function),
                _ => None,
            },
            Self::Method { definition, method } => match program.definitions.get(definition)? {
                Definition::Implementation(implementation) => implementation.methods.get(method),
                _ => None,
            },
        }
    }
}

/// A conversion of a class to another type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionRef {
    /// Index of the implementation definition.
    pub definition: usize,
    /// Index of the conversion inside the implementation.
    pub conversion: usize,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    target: T,
    origin: ErrorContext,
}

/// A class and everything implemented for it.
#[derive(Clone, Debug)]
pub struct ClassEntry {
    /// Index of the `Nomen` definition.
    pub definition: usize,
    origin: ErrorContext,
    methods: HashMap<String, Entry<Callable>>,
    conversions: HashMap<String, Entry<ConversionRef>>,
}

impl ClassEntry {
    /// Canonical signatures of the class's methods, sorted.
    #[must_use]
    pub fn method_signatures(&self) -> Vec<&str> {
        sorted_keys(&self.methods)
    }

    /// Target types of the class's conversions, sorted.
    #[must_use]
    pub fn conversion_targets(&self) -> Vec<&str> {
        sorted_keys(&self.conversions)
    }

    /// The class definition.
    #[must_use]
    pub fn class<'p>(&self, program: &'p Program) -> Option<&'p ClassDef> {
        match program.definitions.get(self.definition)? {
            Definition::Class(class) => Some(class),
            _ => None,
        }
    }
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// Inserts unless the key is taken, in which case the first definition wins.
fn register<T>(
    map: &mut HashMap<String, Entry<T>>,
    what: &'static str,
    key: String,
    target: T,
    origin: ErrorContext,
) -> Result<()> {
    if let Some(existing) = map.get(&key) {
        return Err(Error::at(
            ErrorKind::DuplicateDefinition {
                what,
                signature: key,
                original: existing.origin.clone(),
            },
            origin,
        ));
    }
    trace!(what, signature = %key, "registered");
    map.insert(key, Entry { target, origin });
    Ok(())
}

/// The declaration tables of a program.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    functions: HashMap<String, Entry<Callable>>,
    classes: HashMap<String, ClassEntry>,
    calls: HashMap<NodeId, String>,
}

impl Definitions {
    /// Registers every definition and computes the signature of every call site.
    ///
    /// Classes are registered first, so an implementation may precede its class.
    ///
    /// # Errors
    /// - `ReservedTypeName` for a class named like a built-in type
    /// - `DuplicateDefinition` for a second class, function, method or conversion with a taken key
    /// - `UndefinedType` for an implementation of an unknown class
    pub fn define(program: &Program, annotations: &Annotations) -> Result<Self> {
        let mut definitions = Self::default();

        for (index, definition) in program.definitions.iter().enumerate() {
            if let Definition::Class(class) = definition {
                definitions.define_class(index, class, annotations)?;
            }
        }
        for (index, definition) in program.definitions.iter().enumerate() {
            match definition {
                Definition::Function(function) => {
                    let key = signature::of_declaration(&function.signature, annotations)?;
                    register(
                        &mut definitions.functions,
                        "function",
                        key,
                        Callable::Function { definition: index },
                        function.signature.verb.context(),
                    )?;
                }
                Definition::Implementation(implementation) => {
                    definitions.define_implementation(index, implementation, annotations)?;
                }
                Definition::Class(_) | Definition::Declension(_) => {}
            }
        }

        let mut collector = CallCollector {
            annotations,
            calls: HashMap::new(),
            error: None,
        };
        walk_program(&mut collector, program);
        if let Some(err) = collector.error {
            return Err(err);
        }
        definitions.calls = collector.calls;

        debug!(
            functions = definitions.functions.len(),
            classes = definitions.classes.len(),
            calls = definitions.calls.len(),
            "definitions registered"
        );
        Ok(definitions)
    }

    fn define_class(&mut self, index: usize, class: &ClassDef, annotations: &Annotations) -> Result<()> {
        let name = annotations.type_name(&class.name)?;
        if RESERVED_TYPE_NAMES.contains(&name) {
            return Err(class.name.noun.error(ErrorKind::ReservedTypeName(name.to_string())));
        }
        if let Some(existing) = self.classes.get(name) {
            return Err(class.name.noun.error(ErrorKind::DuplicateDefinition {
                what: "class",
                signature: name.to_string(),
                original: existing.origin.clone(),
            }));
        }
        trace!(class = name, "registered");
        self.classes.insert(
            name.to_string(),
            ClassEntry {
                definition: index,
                origin: class.name.context(),
                methods: HashMap::new(),
                conversions: HashMap::new(),
            },
        );
        Ok(())
    }

    fn define_implementation(
        &mut self,
        index: usize,
        implementation: &ImplementationDef,
        annotations: &Annotations,
    ) -> Result<()> {
        let name = annotations.type_name(&implementation.class)?;
        let class = self.classes.get_mut(name).ok_or_else(|| {
            implementation
                .class
                .noun
                .error(ErrorKind::UndefinedType(name.to_string()))
        })?;

        for (position, method) in implementation.methods.iter().enumerate() {
            let key = signature::of_declaration(&method.signature, annotations)?;
            register(
                &mut class.methods,
                "method",
                key,
                Callable::Method {
                    definition: index,
                    method: position,
                },
                method.signature.verb.context(),
            )?;
        }
        for (position, conversion) in implementation.conversions.iter().enumerate() {
            let target = annotations.type_name(&conversion.target)?;
            register(
                &mut class.conversions,
                "conversion",
                target.to_string(),
                ConversionRef {
                    definition: index,
                    conversion: position,
                },
                conversion.token.context(),
            )?;
        }
        Ok(())
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The computed signature of a call site.
    #[must_use]
    pub fn call_signature(&self, call: &Call) -> Option<&str> {
        self.calls.get(&call.id).map(String::as_str)
    }

    fn signature_of(&self, call: &Call) -> Result<&str> {
        self.call_signature(call).ok_or_else(|| {
            Error::internal(format!("no signature computed for '{}'", call.verb.text))
                .with_context(call.verb.context())
        })
    }

    /// Resolves a call site to a function.
    ///
    /// # Errors
    /// Returns `UndefinedFunction` naming the attempted signature.
    pub fn resolve_call(&self, call: &Call) -> Result<Callable> {
        let signature = self.signature_of(call)?;
        self.functions
            .get(signature)
            .map(|entry| entry.target)
            .ok_or_else(|| call.verb.error(ErrorKind::UndefinedFunction(signature.to_string())))
    }

    /// Resolves a call site to a method of `class`.
    ///
    /// # Errors
    /// Returns `UndefinedType` for an unknown class and `UndefinedMethod`
    /// if the class has no method with the call's signature.
    pub fn resolve_method(&self, class: &str, call: &Call) -> Result<Callable> {
        let signature = self.signature_of(call)?;
        let entry = self
            .classes
            .get(class)
            .ok_or_else(|| call.verb.error(ErrorKind::UndefinedType(class.to_string())))?;
        entry
            .methods
            .get(signature)
            .map(|method| method.target)
            .ok_or_else(|| {
                call.verb.error(ErrorKind::UndefinedMethod {
                    class: class.to_string(),
                    signature: signature.to_string(),
                })
            })
    }

    /// Resolves a call site to a method of any class.
    #[must_use]
    pub fn resolve_any_method(&self, call: &Call) -> Option<Callable> {
        let signature = self.call_signature(call)?;
        let mut candidates: Vec<_> = self
            .classes
            .iter()
            .filter_map(|(name, class)| Some((name, class.methods.get(signature)?.target)))
            .collect();
        candidates.sort_unstable_by(|left, right| left.0.cmp(right.0));
        candidates.first().map(|(_, callable)| *callable)
    }

    /// The class registered under a nominative singular.
    ///
    /// # Errors
    /// Returns `UndefinedType` if there is no such class.
    pub fn resolve_type(&self, name: &str, noun: &NounPhrase) -> Result<&ClassEntry> {
        self.classes
            .get(name)
            .ok_or_else(|| noun.noun.error(ErrorKind::UndefinedType(name.to_string())))
    }

    /// The conversion of `class` to `target`.
    ///
    /// # Errors
    /// Returns `UndefinedType` for an unknown class and
    /// `UndefinedConversion` if the class cannot be converted to `target`.
    pub fn resolve_conversion(
        &self,
        class: &str,
        target: &str,
        noun: &NounPhrase,
    ) -> Result<ConversionRef> {
        let entry = self.resolve_type(class, noun)?;
        entry
            .conversions
            .get(target)
            .map(|conversion| conversion.target)
            .ok_or_else(|| {
                noun.noun.error(ErrorKind::UndefinedConversion {
                    class: class.to_string(),
                    target: target.to_string(),
                })
            })
    }

    /// Checks that every call site resolves.
    ///
    /// Outside methods a call must name a function. Inside a method
    /// definition, conversion or method block it may also name a method of
    /// any class.
    ///
    /// # Errors
    /// Returns `UndefinedFunction` for the first call that resolves to nothing.
    pub fn verify_calls(&self, program: &Program) -> Result<()> {
        let mut verifier = CallVerifier {
            definitions: self,
            method_depth: 0,
            error: None,
        };
        walk_program(&mut verifier, program);
        verifier.error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Function signatures, sorted.
    #[must_use]
    pub fn function_signatures(&self) -> Vec<&str> {
        sorted_keys(&self.functions)
    }

    /// Class names with their entries, sorted by name.
    #[must_use]
    pub fn classes(&self) -> Vec<(&str, &ClassEntry)> {
        let mut classes: Vec<_> = self
            .classes
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        classes.sort_unstable_by_key(|(name, _)| *name);
        classes
    }
}

// =============================================================================
// Visitors
// =============================================================================

/// Computes the signature of every call site.
struct CallCollector<'a> {
    annotations: &'a Annotations,
    calls: HashMap<NodeId, String>,
    error: Option<Error>,
}

impl AstVisitor for CallCollector<'_> {
    fn visit_call(&mut self, call: &Call) {
        if self.error.is_none() {
            match signature::of_call(call, self.annotations) {
                Ok(key) => {
                    self.calls.insert(call.id, key);
                }
                Err(err) => self.error = Some(err),
            }
        }
        walk_call(self, call);
    }
}

/// Finds the first call site that resolves to nothing.
struct CallVerifier<'a> {
    definitions: &'a Definitions,
    method_depth: usize,
    error: Option<Error>,
}

impl AstVisitor for CallVerifier<'_> {
    fn visit_definition(&mut self, definition: &Definition) {
        let is_method = matches!(definition, Definition::Implementation(_));
        self.method_depth += usize::from(is_method);
        walk_definition(self, definition);
        self.method_depth -= usize::from(is_method);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        let is_block = matches!(statement, Statement::MethodBlock(_));
        self.method_depth += usize::from(is_block);
        walk_statement(self, statement);
        self.method_depth -= usize::from(is_block);
    }

    fn visit_call(&mut self, call: &Call) {
        if self.error.is_none() {
            let resolved = self.definitions.resolve_call(call);
            if let Err(err) = resolved {
                let is_method = self.method_depth > 0
                    && self.definitions.resolve_any_method(call).is_some();
                if !is_method {
                    self.error = Some(err);
                }
            }
        }
        walk_call(self, call);
    }
}
