//! Declaration → Doc rules, including component declarations.

use crate::ast::declarations::{
    AliasDecl, AttributeDecl, ComponentDecl, Constraint, Declaration, IndexConstraint,
    PassthroughDecl, RangeConstraint, SignalDecl, SubtypeDecl, SubtypeIndication, TypeDecl,
    TypeDefinition, VariableDecl,
};
use crate::ast::expressions::Expr;
use crate::config::Config;
use crate::doc::{self, align_level, Doc};
use crate::pretty_print::clauses::{visit_generic_clause, visit_port_clause};
use crate::pretty_print::expressions::visit_expr;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_declaration(decl: &Declaration, config: &Config) -> Doc {
    let core = match decl {
        Declaration::Signal(d) => visit_signal(d),
        Declaration::Variable(d) => visit_variable(d),
        Declaration::Constant(d) => visit_constant(d),
        Declaration::Type(d) => visit_type(d),
        Declaration::Subtype(d) => visit_subtype(d),
        Declaration::Alias(d) => visit_alias(d),
        Declaration::Attribute(d) => visit_attribute(d),
        Declaration::Component(d) => visit_component(d, config),
        Declaration::Passthrough(d) => visit_passthrough(d),
    };
    with_trivia(core, decl.trivia(), false)
}

pub fn visit_default(expr: &Expr) -> Doc {
    Doc::text(":=") & visit_expr(expr)
}

fn with_default(core: Doc, default: &Option<Expr>) -> Doc {
    match default {
        Some(e) => core & visit_default(e),
        None => core,
    }
}

fn visit_signal(d: &SignalDecl) -> Doc {
    let names = Doc::text_level(d.names.join(", "), align_level::NAME);
    let mut core = Doc::keyword("signal") & names & Doc::text(":") & visit_subtype_indication(&d.subtype);
    if d.bus {
        core = core & Doc::keyword("bus");
    }
    with_default(core, &d.default).concat(Doc::text(";"))
}

fn visit_variable(d: &VariableDecl) -> Doc {
    let shared = if d.shared { Doc::keyword("shared") & Doc::keyword("variable") } else { Doc::keyword("variable") };
    let core = shared & Doc::text(d.names.join(", ")) & Doc::text(":") & visit_subtype_indication(&d.subtype);
    with_default(core, &d.default).concat(Doc::text(";"))
}

fn visit_constant(d: &crate::ast::declarations::ConstantDecl) -> Doc {
    let core = Doc::keyword("constant") & Doc::text(d.names.join(", ")) & Doc::text(":") & visit_subtype_indication(&d.subtype);
    with_default(core, &d.default).concat(Doc::text(";"))
}

fn visit_type(d: &TypeDecl) -> Doc {
    let head = Doc::keyword("type") & Doc::text(d.name.clone()) & Doc::keyword("is");
    let def = match &d.definition {
        TypeDefinition::Enumeration(values) => {
            let items = doc::join(values.iter().cloned().map(Doc::text), Doc::text(",").concat(Doc::soft_line()));
            Doc::bracket_tight(Doc::text("("), items, Doc::text(")"))
        }
        TypeDefinition::Record(fields) => {
            let items = doc::join_map(fields, Doc::text(";").concat(Doc::soft_line()), false, |(names, subtype)| {
                Doc::text(names.join(", ")) & Doc::text(":") & visit_subtype_indication(subtype)
            });
            Doc::keyword("record")
                .hard_indent(items, 2)
                .concat(Doc::hard_line())
                .concat(Doc::keyword("end"))
                .concat(Doc::keyword("record"))
        }
        TypeDefinition::Other(text) => Doc::text(text.clone()),
    };
    (head & def).concat(Doc::text(";"))
}

fn visit_subtype(d: &SubtypeDecl) -> Doc {
    let core = Doc::keyword("subtype") & Doc::text(d.name.clone()) & Doc::keyword("is") & visit_subtype_indication(&d.subtype);
    core.concat(Doc::text(";"))
}

fn visit_alias(d: &AliasDecl) -> Doc {
    let head = Doc::keyword("alias") & Doc::text(d.name.clone());
    let head = match &d.subtype {
        Some(s) => head & Doc::text(":") & visit_subtype_indication(s),
        None => head,
    };
    (head & Doc::keyword("is") & Doc::text(d.target.clone())).concat(Doc::text(";"))
}

fn visit_attribute(d: &AttributeDecl) -> Doc {
    (Doc::keyword("attribute") & Doc::text(d.name.clone()) & Doc::text(d.rest.clone())).concat(Doc::text(";"))
}

fn visit_passthrough(d: &PassthroughDecl) -> Doc {
    (Doc::keyword(d.keyword.clone()) & Doc::text(d.rest.clone())).concat(Doc::text(";"))
}

fn visit_component(d: &ComponentDecl, config: &Config) -> Doc {
    let mut head = Doc::keyword("component") & Doc::text(d.name.clone());
    if d.is_keyword_present {
        head = head & Doc::keyword("is");
    }
    let mut body = Doc::empty();
    if let Some(generics) = &d.generics {
        body = body.concat(Doc::hard_line()).concat(visit_generic_clause(generics, config));
    }
    if let Some(ports) = &d.ports {
        body = body.concat(Doc::hard_line()).concat(visit_port_clause(ports, config));
    }
    let end = Doc::keyword("end") & Doc::keyword("component");
    let end = match &d.end_name {
        Some(name) => end & Doc::text(name.clone()),
        None => end,
    };
    head.concat(body.nest(config.indent as i32))
        .concat(Doc::hard_line())
        .concat(end)
        .concat(Doc::text(";"))
}

pub fn visit_subtype_indication(s: &SubtypeIndication) -> Doc {
    let mut core = Doc::empty();
    if let Some(res) = &s.resolution_function {
        core = core.concat(Doc::text(res.clone())).concat(Doc::text(" "));
    }
    core = core.concat(Doc::text(s.type_mark.clone()));
    if let Some(constraint) = &s.constraint {
        core = core & visit_constraint(constraint);
    }
    core
}

fn visit_constraint(c: &Constraint) -> Doc {
    match c {
        Constraint::Index(IndexConstraint { ranges }) => {
            let items = doc::join(ranges.iter().map(visit_expr), Doc::text(",").concat(Doc::soft_line()));
            Doc::bracket_tight(Doc::text("("), items, Doc::text(")"))
        }
        Constraint::Range(RangeConstraint { range }) => Doc::keyword("range") & visit_expr(range),
    }
}
