//! Generic/port clause rendering with optional column alignment (spec
//! §4.4.2 "Generic/Port clause").

use crate::ast::interface::{GenericClause, GenericParam, Port, PortClause};
use crate::config::Config;
use crate::doc::{self, align_level, Doc};
use crate::pretty_print::declarations::visit_subtype_indication;
use crate::pretty_print::expressions::visit_expr;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_generic_clause(clause: &GenericClause, config: &Config) -> Doc {
    let items = doc::join_map(&clause.params, semicolon_break(), false, visit_generic_param);
    let items = if config.align_signals.generic { items.align() } else { items };
    (Doc::keyword("generic") & Doc::bracket(Doc::text("("), items, Doc::text(")")))
        .concat(Doc::text(";"))
}

pub fn visit_port_clause(clause: &PortClause, config: &Config) -> Doc {
    let items = doc::join_map(&clause.ports, semicolon_break(), false, visit_port);
    let items = if config.align_signals.port { items.align() } else { items };
    (Doc::keyword("port") & Doc::bracket(Doc::text("("), items, Doc::text(")")))
        .concat(Doc::text(";"))
}

fn semicolon_break() -> Doc {
    Doc::text(";").concat(Doc::soft_line())
}

fn visit_generic_param(param: &GenericParam) -> Doc {
    let names = Doc::text_level(param.names.join(", "), align_level::NAME);
    let core = (names & Doc::text(":")) & visit_subtype_indication(&param.subtype);
    let core = match &param.default {
        Some(d) => core & Doc::text(":=") & visit_expr(d),
        None => core,
    };
    with_trivia(core, param.trivia(), false)
}

fn visit_port(port: &Port) -> Doc {
    let names = Doc::text_level(port.names.join(", "), align_level::NAME);
    let mode = Doc::keyword_level(port.mode.as_str().to_string(), align_level::MODE);
    let core = (names & Doc::text(":")) & mode & visit_subtype_indication(&port.subtype);
    let core = match &port.default {
        Some(d) => core & Doc::text(":=") & visit_expr(d),
        None => core,
    };
    with_trivia(core, port.trivia(), false)
}
