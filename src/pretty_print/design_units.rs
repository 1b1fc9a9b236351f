//! Design unit → Doc rules: library/use clauses, entity, architecture,
//! package, and package body.

use crate::ast::design_units::{
    Architecture, ContextClause, DesignUnit, EndClause, Entity, LibraryClause, LibraryUnit,
    Package, PackageBody, UseClause,
};
use crate::config::Config;
use crate::doc::{self, Doc};
use crate::pretty_print::clauses::{visit_generic_clause, visit_port_clause};
use crate::pretty_print::declarations::visit_declaration;
use crate::pretty_print::statements::concurrent::visit_concurrent_statement;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_design_unit(unit: &DesignUnit, config: &Config) -> Doc {
    let context = doc::join(unit.context.iter().map(visit_context_clause), Doc::soft_line());
    let body = visit_library_unit(&unit.unit, config);
    if context.is_empty() {
        body
    } else {
        context.concat(Doc::hard_line()).concat(body)
    }
}

fn visit_context_clause(clause: &ContextClause) -> Doc {
    let core = match clause {
        ContextClause::Library(c) => visit_library_clause(c),
        ContextClause::Use(c) => visit_use_clause(c),
    };
    with_trivia(core, clause.trivia(), false)
}

fn visit_library_clause(c: &LibraryClause) -> Doc {
    (Doc::keyword("library") & Doc::text(c.names.join(", "))).concat(Doc::text(";"))
}

fn visit_use_clause(c: &UseClause) -> Doc {
    (Doc::keyword("use") & Doc::text(c.names.join(", "))).concat(Doc::text(";"))
}

fn visit_library_unit(unit: &LibraryUnit, config: &Config) -> Doc {
    let core = match unit {
        LibraryUnit::Entity(e) => visit_entity(e, config),
        LibraryUnit::Architecture(a) => visit_architecture(a, config),
        LibraryUnit::Package(p) => visit_package(p, config),
        LibraryUnit::PackageBody(p) => visit_package_body(p, config),
    };
    with_trivia(core, unit.trivia(), false)
}

fn visit_end_clause(kind: &str, end: &EndClause) -> Doc {
    let mut doc = Doc::keyword("end");
    if end.has_end_keyword {
        doc = doc & Doc::keyword(kind.to_string());
    }
    if let Some(label) = &end.label {
        doc = doc & Doc::text(label.clone());
    }
    doc.concat(Doc::text(";"))
}

fn visit_entity(e: &Entity, config: &Config) -> Doc {
    let mut head = Doc::keyword("entity") & Doc::text(e.name.clone()) & Doc::keyword("is");
    if let Some(generics) = &e.generics {
        head = head.hard_indent(visit_generic_clause(generics, config), config.indent as i32);
    }
    if let Some(ports) = &e.ports {
        head = head.hard_indent(visit_port_clause(ports, config), config.indent as i32);
    }
    let declarations = doc::join(e.declarations.iter().map(|d| visit_declaration(d, config)), Doc::hard_line());
    let declarations_empty = declarations.is_empty();
    let declarations = if config.align_signals.signal { declarations.align() } else { declarations };
    let body = if declarations_empty {
        head
    } else {
        head.hard_indent(declarations, config.indent as i32)
    };
    body.concat(Doc::hard_line()).concat(visit_end_clause("entity", &e.end))
}

fn visit_architecture(a: &Architecture, config: &Config) -> Doc {
    let head = Doc::keyword("architecture") & Doc::text(a.name.clone()) & Doc::keyword("of") & Doc::text(a.entity_name.clone()) & Doc::keyword("is");
    let declarations = doc::join(a.declarations.iter().map(|d| visit_declaration(d, config)), Doc::hard_line());
    let declarations_empty = declarations.is_empty();
    let declarations = if config.align_signals.signal { declarations.align() } else { declarations };
    let head = if declarations_empty { head } else { head.hard_indent(declarations, config.indent as i32) };
    let statements = doc::join(a.statements.iter().map(|s| visit_concurrent_statement(s, config)), Doc::hard_line());
    let begin_block = head.concat(Doc::hard_line()).concat(Doc::keyword("begin"));
    let body = if statements.is_empty() {
        begin_block
    } else {
        begin_block.hard_indent(statements, config.indent as i32)
    };
    body.concat(Doc::hard_line()).concat(visit_end_clause("architecture", &a.end))
}

fn visit_package(p: &Package, config: &Config) -> Doc {
    let head = Doc::keyword("package") & Doc::text(p.name.clone()) & Doc::keyword("is");
    let declarations = doc::join(p.declarations.iter().map(|d| visit_declaration(d, config)), Doc::hard_line());
    let declarations_empty = declarations.is_empty();
    let declarations = if config.align_signals.signal { declarations.align() } else { declarations };
    let body = if declarations_empty { head } else { head.hard_indent(declarations, config.indent as i32) };
    body.concat(Doc::hard_line()).concat(visit_end_clause("package", &p.end))
}

fn visit_package_body(p: &PackageBody, config: &Config) -> Doc {
    let head = Doc::keyword("package") & Doc::keyword("body") & Doc::text(p.name.clone()) & Doc::keyword("is");
    let declarations = doc::join(p.declarations.iter().map(|d| visit_declaration(d, config)), Doc::hard_line());
    let declarations_empty = declarations.is_empty();
    let declarations = if config.align_signals.signal { declarations.align() } else { declarations };
    let body = if declarations_empty { head } else { head.hard_indent(declarations, config.indent as i32) };
    body.concat(Doc::hard_line()).concat(visit_end_clause("body", &p.end))
}
