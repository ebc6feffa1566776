//! AST visitor for read-only traversal of programs.
//!
//! Implement the `visit_*` methods of interest. Every default
//! implementation descends into the node's children through the matching
//! `walk_*` function; an override that still wants the children visited
//! calls that function itself.
//!
//! # Example
//!
//! ```
//! use germanscript_language::ast::Call;
//! use germanscript_language::visitor::{AstVisitor, walk_call, walk_program};
//! use germanscript_language::parse_text;
//!
//! struct CallCounter(usize);
//!
//! impl AstVisitor for CallCounter {
//!     fn visit_call(&mut self, call: &Call) {
//!         self.0 += 1;
//!         walk_call(self, call);
//!     }
//! }
//!
//! let program = parse_text("schreibe die Zahl 5\nlies").unwrap();
//! let mut counter = CallCounter(0);
//! walk_program(&mut counter, &program);
//! assert_eq!(counter.0, 2);
//! ```

use crate::ast::{Call, Definition, Expression, Node, Program, Statement};

// =============================================================================
// Read-Only Visitor
// =============================================================================

/// Trait for read-only AST visitors.
pub trait AstVisitor {
    /// Visit a top-level definition.
    fn visit_definition(&mut self, definition: &Definition) {
        walk_definition(self, definition);
    }

    /// Visit a statement.
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    /// Visit an expression.
    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    /// Visit a call site.
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
    }
}

/// Visits every definition, then every top-level statement.
pub fn walk_program<V: AstVisitor + ?Sized>(visitor: &mut V, program: &Program) {
    for definition in &program.definitions {
        visitor.visit_definition(definition);
    }
    for statement in &program.statements {
        visitor.visit_statement(statement);
    }
}

/// Dispatches a child node to the matching `visit_*` method.
pub fn walk_node<V: AstVisitor + ?Sized>(visitor: &mut V, node: Node<'_>) {
    match node {
        Node::Definition(definition) => visitor.visit_definition(definition),
        Node::Statement(statement) => visitor.visit_statement(statement),
        Node::Expression(expression) => visitor.visit_expression(expression),
        Node::Call(call) => visitor.visit_call(call),
    }
}

/// Visits the children of a definition.
pub fn walk_definition<V: AstVisitor + ?Sized>(visitor: &mut V, definition: &Definition) {
    for child in definition.children() {
        walk_node(visitor, child);
    }
}

/// Visits the children of a statement.
pub fn walk_statement<V: AstVisitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    for child in statement.children() {
        walk_node(visitor, child);
    }
}

/// Visits the children of an expression.
pub fn walk_expression<V: AstVisitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    for child in expression.children() {
        walk_node(visitor, child);
    }
}

/// Visits the argument values of a call.
pub fn walk_call<V: AstVisitor + ?Sized>(visitor: &mut V, call: &Call) {
    for child in call.children() {
        walk_node(visitor, child);
    }
}
