//! A small, intentionally unambitious recursive-descent VHDL parser.
//! Covers design files, entities, architectures, packages, package bodies,
//! generic/port clauses, the declaration and statement catalogue, and the
//! expression grammar — not VHDL's full grammar (generate statements,
//! block statements, and the like are out of scope). Trivia is bound onto
//! each node as soon as its span is known, via the same [`TriviaBinder`]
//! the pretty-printer consumes.

use crate::ast::declarations::{
    AliasDecl, AttributeDecl, ComponentDecl, ConstantDecl, Constraint, Declaration,
    IndexConstraint, PassthroughDecl, RangeConstraint, SignalDecl, SubtypeDecl, SubtypeIndication,
    TypeDecl, TypeDefinition, VariableDecl,
};
use crate::ast::design_file::DesignFile;
use crate::ast::design_units::{
    Architecture, ContextClause, DesignUnit, EndClause, Entity, LibraryClause, LibraryUnit,
    Package, PackageBody, UseClause,
};
use crate::ast::expressions::{
    AggregateElement, AggregateExpr, AllocatorExpr, AttributeExpr, BinaryExpr, CallExpr, Expr,
    ParenExpr, PhysicalLiteral, QualifiedExpr, TokenExpr, UnaryExpr,
};
use crate::ast::interface::{GenericClause, GenericParam, Mode, Port, PortClause};
use crate::ast::statements::concurrent::{
    ConcurrentStatement, ConditionalConcurrentAssign, Process, SelectedConcurrentAssign,
};
use crate::ast::statements::sequential::{
    CaseArm, CaseStatement, ElsifArm, IfStatement, LoopScheme, LoopStatement, NullStatement,
    SequentialStatement, SignalAssign, VariableAssign,
};
use crate::ast::statements::waveform::{Waveform, WaveformElement};
use crate::error::{FmtError, Result};
use crate::lexer;
use crate::token::TokenStream;
use crate::trivia::NodeTrivia;
use crate::trivia_binder::{Span, TriviaBinder};

/// Words that must never be swallowed by the "number followed by an
/// identifier is a physical literal" heuristic in [`Parser::parse_primary`].
const NOT_A_UNIT: &[&str] = &[
    "to", "downto", "others", "when", "else", "then", "end", "loop", "generate", "range", "units",
    "after", "select", "with", "is", "begin", "elsif", "and", "or", "xor", "nand", "nor", "xnor",
    "mod", "rem", "sll", "srl", "sla", "sra", "rol", "ror",
];

pub fn parse(source: &str) -> Result<DesignFile> {
    let tokens = lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    parser.parse_design_file()
}

struct Parser<'a> {
    tokens: &'a TokenStream,
    binder: TriviaBinder<'a>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenStream) -> Self {
        Self { tokens, binder: TriviaBinder::new(tokens), pos: 0 }
    }

    // -----------------------------------------------------------------
    // Token cursor helpers
    // -----------------------------------------------------------------

    fn peek_at(&self, offset: usize) -> Option<&str> {
        self.tokens.get(self.pos + offset).map(|t| t.text.as_str())
    }

    fn peek_text(&self) -> Option<&str> {
        self.peek_at(0)
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.peek_text().is_some_and(|t| t.eq_ignore_ascii_case(kw))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.size()
    }

    fn advance(&mut self) -> Result<crate::token::Token> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect_kw(&mut self, kw: &str) -> Result<()> {
        if self.at_keyword(kw) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(&format!("expected `{kw}`, found {:?}", self.peek_text())))
        }
    }

    fn expect_sym(&mut self, sym: &str) -> Result<()> {
        if self.peek_text() == Some(sym) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(&format!("expected `{sym}`, found {:?}", self.peek_text())))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        let tok = self.advance()?;
        if tok.text.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
            Ok(tok.text)
        } else {
            Err(self.error(&format!("expected identifier, found {:?}", tok.text)))
        }
    }

    fn error(&self, msg: &str) -> FmtError {
        FmtError::Parse(format!("{msg} (near default token {})", self.pos))
    }

    fn bind(&mut self, start: usize) -> Option<NodeTrivia> {
        let stop = self.pos.saturating_sub(1).max(start);
        self.binder.bind(Span::new(start, stop))
    }

    /// Consumes a possible `label:` prefix shared by every statement.
    fn parse_label(&mut self) -> Option<String> {
        let is_label = self.peek_text().is_some_and(|t| t.chars().next().is_some_and(char::is_alphabetic))
            && self.peek_at(1) == Some(":");
        if is_label {
            let label = self.advance().ok()?.text;
            let _ = self.advance();
            Some(label)
        } else {
            None
        }
    }

    fn consume_until_semicolon_as_text(&mut self) -> Result<String> {
        let mut parts = Vec::new();
        while self.peek_text() != Some(";") {
            parts.push(self.advance()?.text);
        }
        Ok(parts.join(" "))
    }

    fn parse_dotted_name(&mut self) -> Result<String> {
        let mut name = self.advance()?.text;
        while self.peek_text() == Some(".") {
            self.advance()?;
            name.push('.');
            name.push_str(&self.advance()?.text);
        }
        Ok(name)
    }

    fn parse_name_list(&mut self) -> Result<Vec<String>> {
        let mut names = vec![self.parse_dotted_name()?];
        while self.peek_text() == Some(",") {
            self.advance()?;
            names.push(self.parse_dotted_name()?);
        }
        Ok(names)
    }

    fn parse_simple_name_list(&mut self) -> Result<Vec<String>> {
        let mut names = vec![self.expect_identifier()?];
        while self.peek_text() == Some(",") {
            self.advance()?;
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    // -----------------------------------------------------------------
    // Design file / design unit / library unit
    // -----------------------------------------------------------------

    fn parse_design_file(&mut self) -> Result<DesignFile> {
        let mut units = Vec::new();
        while !self.at_end() {
            units.push(self.parse_design_unit()?);
        }
        let orphans = self.binder.unclaimed_comments();
        if !orphans.is_empty() {
            if cfg!(debug_assertions) {
                return Err(FmtError::TriviaExhaustion(format!(
                    "{} comment(s) never claimed by any node: {:?}",
                    orphans.len(),
                    orphans.iter().map(|c| &c.text).collect::<Vec<_>>()
                )));
            }
            tracing::warn!(count = orphans.len(), "orphan comments appended to design file trailing trivia");
        }
        Ok(DesignFile { units, orphan_trailing: orphans })
    }

    fn parse_design_unit(&mut self) -> Result<DesignUnit> {
        let mut context = Vec::new();
        while self.at_keyword("library") || self.at_keyword("use") {
            context.push(self.parse_context_clause()?);
        }
        let unit = self.parse_library_unit()?;
        Ok(DesignUnit { context, unit })
    }

    fn parse_context_clause(&mut self) -> Result<ContextClause> {
        let start = self.pos;
        if self.at_keyword("library") {
            self.advance()?;
            let names = self.parse_name_list()?;
            self.expect_sym(";")?;
            let trivia = self.bind(start);
            Ok(ContextClause::Library(LibraryClause { names, trivia }))
        } else {
            self.expect_kw("use")?;
            let names = self.parse_name_list()?;
            self.expect_sym(";")?;
            let trivia = self.bind(start);
            Ok(ContextClause::Use(UseClause { names, trivia }))
        }
    }

    fn parse_library_unit(&mut self) -> Result<LibraryUnit> {
        if self.at_keyword("entity") {
            Ok(LibraryUnit::Entity(self.parse_entity()?))
        } else if self.at_keyword("architecture") {
            Ok(LibraryUnit::Architecture(self.parse_architecture()?))
        } else if self.at_keyword("package") {
            if self.peek_at(1).is_some_and(|t| t.eq_ignore_ascii_case("body")) {
                Ok(LibraryUnit::PackageBody(self.parse_package_body()?))
            } else {
                Ok(LibraryUnit::Package(self.parse_package()?))
            }
        } else {
            Err(self.error(&format!("expected a design unit, found {:?}", self.peek_text())))
        }
    }

    fn parse_end_clause(&mut self, kind: &str) -> Result<EndClause> {
        self.expect_kw("end")?;
        let mut has_end_keyword = false;
        if self.at_keyword(kind) {
            self.advance()?;
            has_end_keyword = true;
        }
        let label = if self.peek_text() != Some(";") {
            Some(self.advance()?.text)
        } else {
            None
        };
        self.expect_sym(";")?;
        Ok(EndClause { has_end_keyword, label })
    }

    fn parse_entity(&mut self) -> Result<Entity> {
        let start = self.pos;
        self.expect_kw("entity")?;
        let name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let generics = if self.at_keyword("generic") { Some(self.parse_generic_clause()?) } else { None };
        let ports = if self.at_keyword("port") { Some(self.parse_port_clause()?) } else { None };
        let declarations = self.parse_declarations_until(|p| p.at_keyword("end"))?;
        let end = self.parse_end_clause("entity")?;
        let trivia = self.bind(start);
        Ok(Entity { name, generics, ports, declarations, end, trivia })
    }

    fn parse_architecture(&mut self) -> Result<Architecture> {
        let start = self.pos;
        self.expect_kw("architecture")?;
        let name = self.expect_identifier()?;
        self.expect_kw("of")?;
        let entity_name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let declarations = self.parse_declarations_until(|p| p.at_keyword("begin"))?;
        self.expect_kw("begin")?;
        let statements = self.parse_concurrent_statements_until(|p| p.at_keyword("end"))?;
        let end = self.parse_end_clause("architecture")?;
        let trivia = self.bind(start);
        Ok(Architecture { name, entity_name, declarations, statements, end, trivia })
    }

    fn parse_package(&mut self) -> Result<Package> {
        let start = self.pos;
        self.expect_kw("package")?;
        let name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let declarations = self.parse_declarations_until(|p| p.at_keyword("end"))?;
        let end = self.parse_end_clause("package")?;
        let trivia = self.bind(start);
        Ok(Package { name, declarations, end, trivia })
    }

    fn parse_package_body(&mut self) -> Result<PackageBody> {
        let start = self.pos;
        self.expect_kw("package")?;
        self.expect_kw("body")?;
        let name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let declarations = self.parse_declarations_until(|p| p.at_keyword("end"))?;
        let end = self.parse_end_clause("body")?;
        let trivia = self.bind(start);
        Ok(PackageBody { name, declarations, end, trivia })
    }

    // -----------------------------------------------------------------
    // Generic / port clauses
    // -----------------------------------------------------------------

    fn parse_generic_clause(&mut self) -> Result<GenericClause> {
        self.expect_kw("generic")?;
        self.expect_sym("(")?;
        let mut params = Vec::new();
        loop {
            params.push(self.parse_generic_param()?);
            if self.peek_text() == Some(";") {
                self.advance()?;
                continue;
            }
            break;
        }
        self.expect_sym(")")?;
        self.expect_sym(";")?;
        Ok(GenericClause { params })
    }

    fn parse_generic_param(&mut self) -> Result<GenericParam> {
        let start = self.pos;
        let names = self.parse_simple_name_list()?;
        self.expect_sym(":")?;
        let subtype = self.parse_subtype_indication()?;
        let default = if self.peek_text() == Some(":=") {
            self.advance()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        let trivia = self.bind(start);
        Ok(GenericParam { names, subtype, default, trivia })
    }

    fn parse_port_clause(&mut self) -> Result<PortClause> {
        self.expect_kw("port")?;
        self.expect_sym("(")?;
        let mut ports = Vec::new();
        loop {
            ports.push(self.parse_port()?);
            if self.peek_text() == Some(";") {
                self.advance()?;
                continue;
            }
            break;
        }
        self.expect_sym(")")?;
        self.expect_sym(";")?;
        Ok(PortClause { ports })
    }

    fn parse_port(&mut self) -> Result<Port> {
        let start = self.pos;
        let names = self.parse_simple_name_list()?;
        self.expect_sym(":")?;
        let mode = self.parse_mode()?;
        let subtype = self.parse_subtype_indication()?;
        let default = if self.peek_text() == Some(":=") {
            self.advance()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        let trivia = self.bind(start);
        Ok(Port { names, mode, subtype, default, trivia })
    }

    fn parse_mode(&mut self) -> Result<Mode> {
        let tok = self.advance()?.text.to_lowercase();
        match tok.as_str() {
            "in" => Ok(Mode::In),
            "out" => Ok(Mode::Out),
            "inout" => Ok(Mode::Inout),
            "buffer" => Ok(Mode::Buffer),
            "linkage" => Ok(Mode::Linkage),
            other => Err(self.error(&format!("expected a port mode, found `{other}`"))),
        }
    }

    fn parse_subtype_indication(&mut self) -> Result<SubtypeIndication> {
        let type_mark = self.parse_dotted_name()?;
        let constraint = if self.peek_text() == Some("(") {
            Some(Constraint::Index(self.parse_index_constraint()?))
        } else if self.at_keyword("range") {
            self.advance()?;
            let range = self.parse_expr()?;
            Some(Constraint::Range(RangeConstraint { range }))
        } else {
            None
        };
        Ok(SubtypeIndication { resolution_function: None, type_mark, constraint })
    }

    fn parse_index_constraint(&mut self) -> Result<IndexConstraint> {
        self.expect_sym("(")?;
        let mut ranges = vec![self.parse_expr()?];
        while self.peek_text() == Some(",") {
            self.advance()?;
            ranges.push(self.parse_expr()?);
        }
        self.expect_sym(")")?;
        Ok(IndexConstraint { ranges })
    }

    // -----------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------

    fn parse_declarations_until(&mut self, done: impl Fn(&Self) -> bool) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        while !done(self) {
            declarations.push(self.parse_declaration()?);
        }
        Ok(declarations)
    }

    fn parse_declaration(&mut self) -> Result<Declaration> {
        if self.at_keyword("signal") {
            Ok(Declaration::Signal(self.parse_signal_decl()?))
        } else if self.at_keyword("variable") || self.at_keyword("shared") {
            Ok(Declaration::Variable(self.parse_variable_decl()?))
        } else if self.at_keyword("constant") {
            Ok(Declaration::Constant(self.parse_constant_decl()?))
        } else if self.at_keyword("type") {
            Ok(Declaration::Type(self.parse_type_decl()?))
        } else if self.at_keyword("subtype") {
            Ok(Declaration::Subtype(self.parse_subtype_decl()?))
        } else if self.at_keyword("alias") {
            Ok(Declaration::Alias(self.parse_alias_decl()?))
        } else if self.at_keyword("attribute") {
            Ok(Declaration::Attribute(self.parse_attribute_decl()?))
        } else if self.at_keyword("component") {
            Ok(Declaration::Component(self.parse_component_decl()?))
        } else if self.at_keyword("disconnect") || self.at_keyword("group") {
            Ok(Declaration::Passthrough(self.parse_passthrough_decl()?))
        } else {
            Err(self.error(&format!("expected a declaration, found {:?}", self.peek_text())))
        }
    }

    fn parse_signal_decl(&mut self) -> Result<SignalDecl> {
        let start = self.pos;
        self.expect_kw("signal")?;
        let names = self.parse_simple_name_list()?;
        self.expect_sym(":")?;
        let subtype = self.parse_subtype_indication()?;
        let bus = if self.at_keyword("bus") {
            self.advance()?;
            true
        } else {
            false
        };
        let default = self.parse_optional_default()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(SignalDecl { names, subtype, bus, default, trivia })
    }

    fn parse_variable_decl(&mut self) -> Result<VariableDecl> {
        let start = self.pos;
        let shared = if self.at_keyword("shared") {
            self.advance()?;
            true
        } else {
            false
        };
        self.expect_kw("variable")?;
        let names = self.parse_simple_name_list()?;
        self.expect_sym(":")?;
        let subtype = self.parse_subtype_indication()?;
        let default = self.parse_optional_default()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(VariableDecl { shared, names, subtype, default, trivia })
    }

    fn parse_constant_decl(&mut self) -> Result<ConstantDecl> {
        let start = self.pos;
        self.expect_kw("constant")?;
        let names = self.parse_simple_name_list()?;
        self.expect_sym(":")?;
        let subtype = self.parse_subtype_indication()?;
        let default = self.parse_optional_default()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(ConstantDecl { names, subtype, default, trivia })
    }

    fn parse_optional_default(&mut self) -> Result<Option<Expr>> {
        if self.peek_text() == Some(":=") {
            self.advance()?;
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_type_decl(&mut self) -> Result<TypeDecl> {
        let start = self.pos;
        self.expect_kw("type")?;
        let name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let definition = if self.peek_text() == Some("(") {
            self.advance()?;
            let mut values = vec![self.expect_identifier()?];
            while self.peek_text() == Some(",") {
                self.advance()?;
                values.push(self.expect_identifier()?);
            }
            self.expect_sym(")")?;
            TypeDefinition::Enumeration(values)
        } else if self.at_keyword("record") {
            self.advance()?;
            let mut fields = Vec::new();
            while !self.at_keyword("end") {
                let names = self.parse_simple_name_list()?;
                self.expect_sym(":")?;
                let subtype = self.parse_subtype_indication()?;
                self.expect_sym(";")?;
                fields.push((names, subtype));
            }
            self.expect_kw("end")?;
            self.expect_kw("record")?;
            TypeDefinition::Record(fields)
        } else {
            TypeDefinition::Other(self.consume_until_semicolon_as_text()?)
        };
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(TypeDecl { name, definition, trivia })
    }

    fn parse_subtype_decl(&mut self) -> Result<SubtypeDecl> {
        let start = self.pos;
        self.expect_kw("subtype")?;
        let name = self.expect_identifier()?;
        self.expect_kw("is")?;
        let subtype = self.parse_subtype_indication()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(SubtypeDecl { name, subtype, trivia })
    }

    fn parse_alias_decl(&mut self) -> Result<AliasDecl> {
        let start = self.pos;
        self.expect_kw("alias")?;
        let name = self.expect_identifier()?;
        let subtype = if self.peek_text() == Some(":") {
            self.advance()?;
            Some(self.parse_subtype_indication()?)
        } else {
            None
        };
        self.expect_kw("is")?;
        let target = self.parse_dotted_name()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(AliasDecl { name, subtype, target, trivia })
    }

    fn parse_attribute_decl(&mut self) -> Result<AttributeDecl> {
        let start = self.pos;
        self.expect_kw("attribute")?;
        let name = self.expect_identifier()?;
        let rest = self.consume_until_semicolon_as_text()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(AttributeDecl { name, rest, trivia })
    }

    fn parse_passthrough_decl(&mut self) -> Result<PassthroughDecl> {
        let start = self.pos;
        let keyword = self.advance()?.text;
        let rest = self.consume_until_semicolon_as_text()?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(PassthroughDecl { keyword, rest, trivia })
    }

    fn parse_component_decl(&mut self) -> Result<ComponentDecl> {
        let start = self.pos;
        self.expect_kw("component")?;
        let name = self.expect_identifier()?;
        let is_keyword_present = if self.at_keyword("is") {
            self.advance()?;
            true
        } else {
            false
        };
        let generics = if self.at_keyword("generic") { Some(self.parse_generic_clause()?) } else { None };
        let ports = if self.at_keyword("port") { Some(self.parse_port_clause()?) } else { None };
        self.expect_kw("end")?;
        self.expect_kw("component")?;
        let end_name = if self.peek_text() != Some(";") { Some(self.advance()?.text) } else { None };
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(ComponentDecl { name, is_keyword_present, generics, ports, end_name, trivia })
    }

    // -----------------------------------------------------------------
    // Concurrent statements
    // -----------------------------------------------------------------

    fn parse_concurrent_statements_until(
        &mut self,
        done: impl Fn(&Self) -> bool,
    ) -> Result<Vec<ConcurrentStatement>> {
        let mut statements = Vec::new();
        while !done(self) {
            statements.push(self.parse_concurrent_statement()?);
        }
        Ok(statements)
    }

    fn parse_concurrent_statement(&mut self) -> Result<ConcurrentStatement> {
        let start = self.pos;
        let label = self.parse_label();
        if self.at_keyword("process") {
            Ok(ConcurrentStatement::Process(self.parse_process(label, start)?))
        } else if self.at_keyword("with") {
            Ok(ConcurrentStatement::SelectedAssign(self.parse_selected_assign(label, start)?))
        } else {
            Ok(ConcurrentStatement::ConditionalAssign(self.parse_conditional_assign(label, start)?))
        }
    }

    fn parse_conditional_assign(
        &mut self,
        label: Option<String>,
        start: usize,
    ) -> Result<ConditionalConcurrentAssign> {
        let target = self.parse_expr()?;
        self.expect_sym("<=")?;
        let mut alternatives = Vec::new();
        loop {
            let waveform = self.parse_waveform()?;
            if self.at_keyword("when") {
                self.advance()?;
                let condition = self.parse_expr()?;
                alternatives.push((waveform, Some(condition)));
                if self.at_keyword("else") {
                    self.advance()?;
                    continue;
                }
                break;
            }
            alternatives.push((waveform, None));
            break;
        }
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(ConditionalConcurrentAssign { label, target, alternatives, trivia })
    }

    fn parse_selected_assign(
        &mut self,
        label: Option<String>,
        start: usize,
    ) -> Result<SelectedConcurrentAssign> {
        self.expect_kw("with")?;
        let selector = self.parse_expr()?;
        self.expect_kw("select")?;
        let target = self.parse_expr()?;
        self.expect_sym("<=")?;
        let mut selections = Vec::new();
        loop {
            let waveform = self.parse_waveform()?;
            self.expect_kw("when")?;
            let choice = self.parse_expr()?;
            selections.push((waveform, choice));
            if self.peek_text() == Some(",") {
                self.advance()?;
                continue;
            }
            break;
        }
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(SelectedConcurrentAssign { label, selector, target, selections, trivia })
    }

    fn parse_process(&mut self, label: Option<String>, start: usize) -> Result<Process> {
        self.expect_kw("process")?;
        let mut sensitivity_list = Vec::new();
        if self.peek_text() == Some("(") {
            self.advance()?;
            sensitivity_list.push(self.parse_dotted_name()?);
            while self.peek_text() == Some(",") {
                self.advance()?;
                sensitivity_list.push(self.parse_dotted_name()?);
            }
            self.expect_sym(")")?;
        }
        if self.at_keyword("is") {
            self.advance()?;
        }
        let declarations = self.parse_declarations_until(|p| p.at_keyword("begin"))?;
        self.expect_kw("begin")?;
        let statements = self.parse_sequential_statements_until(|p| p.at_keyword("end"))?;
        self.expect_kw("end")?;
        self.expect_kw("process")?;
        if self.peek_text() != Some(";") {
            // A trailing process label is accepted but not retained: `Process`
            // has no field for it, matching the visitor, which always emits
            // an unlabelled `end process;`.
            self.advance()?;
        }
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(Process { label, sensitivity_list, declarations, statements, trivia })
    }

    // -----------------------------------------------------------------
    // Sequential statements
    // -----------------------------------------------------------------

    fn parse_sequential_statements_until(
        &mut self,
        done: impl Fn(&Self) -> bool,
    ) -> Result<Vec<SequentialStatement>> {
        let mut statements = Vec::new();
        while !done(self) {
            statements.push(self.parse_sequential_statement()?);
        }
        Ok(statements)
    }

    fn parse_sequential_statement(&mut self) -> Result<SequentialStatement> {
        let start = self.pos;
        let label = self.parse_label();
        if self.at_keyword("if") {
            Ok(SequentialStatement::If(self.parse_if(label, start)?))
        } else if self.at_keyword("case") {
            Ok(SequentialStatement::Case(self.parse_case(label, start)?))
        } else if self.at_keyword("for") || self.at_keyword("while") || self.at_keyword("loop") {
            Ok(SequentialStatement::Loop(self.parse_loop(label, start)?))
        } else if self.at_keyword("null") {
            Ok(SequentialStatement::Null(self.parse_null(label, start)?))
        } else {
            self.parse_assign(label, start)
        }
    }

    fn parse_assign(&mut self, label: Option<String>, start: usize) -> Result<SequentialStatement> {
        let target = self.parse_expr()?;
        if self.peek_text() == Some("<=") {
            self.advance()?;
            let waveform = self.parse_waveform()?;
            self.expect_sym(";")?;
            let trivia = self.bind(start);
            Ok(SequentialStatement::SignalAssign(SignalAssign { label, target, waveform, trivia }))
        } else if self.peek_text() == Some(":=") {
            self.advance()?;
            let value = self.parse_expr()?;
            self.expect_sym(";")?;
            let trivia = self.bind(start);
            Ok(SequentialStatement::VariableAssign(VariableAssign { label, target, value, trivia }))
        } else {
            Err(self.error(&format!("expected `<=` or `:=`, found {:?}", self.peek_text())))
        }
    }

    fn parse_null(&mut self, label: Option<String>, start: usize) -> Result<NullStatement> {
        self.expect_kw("null")?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(NullStatement { label, trivia })
    }

    fn parse_if(&mut self, label: Option<String>, start: usize) -> Result<IfStatement> {
        self.expect_kw("if")?;
        let condition = self.parse_expr()?;
        self.expect_kw("then")?;
        let then_body = self.parse_sequential_statements_until(|p| {
            p.at_keyword("elsif") || p.at_keyword("else") || p.at_keyword("end")
        })?;
        let mut elsif_arms = Vec::new();
        while self.at_keyword("elsif") {
            self.advance()?;
            let cond = self.parse_expr()?;
            self.expect_kw("then")?;
            let body = self.parse_sequential_statements_until(|p| {
                p.at_keyword("elsif") || p.at_keyword("else") || p.at_keyword("end")
            })?;
            elsif_arms.push(ElsifArm { condition: cond, body });
        }
        let else_body = if self.at_keyword("else") {
            self.advance()?;
            Some(self.parse_sequential_statements_until(|p| p.at_keyword("end"))?)
        } else {
            None
        };
        self.expect_kw("end")?;
        self.expect_kw("if")?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(IfStatement { label, condition, then_body, elsif_arms, else_body, trivia })
    }

    fn parse_case(&mut self, label: Option<String>, start: usize) -> Result<CaseStatement> {
        self.expect_kw("case")?;
        let selector = self.parse_expr()?;
        self.expect_kw("is")?;
        let mut arms = Vec::new();
        while self.at_keyword("when") {
            self.advance()?;
            let mut choices = vec![self.parse_expr()?];
            while self.peek_text() == Some("|") {
                self.advance()?;
                choices.push(self.parse_expr()?);
            }
            self.expect_sym("=>")?;
            let body = self.parse_sequential_statements_until(|p| p.at_keyword("when") || p.at_keyword("end"))?;
            arms.push(CaseArm { choices, body });
        }
        self.expect_kw("end")?;
        self.expect_kw("case")?;
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(CaseStatement { label, selector, arms, trivia })
    }

    fn parse_loop(&mut self, label: Option<String>, start: usize) -> Result<LoopStatement> {
        let scheme = if self.at_keyword("for") {
            self.advance()?;
            let iterator = self.expect_identifier()?;
            self.expect_kw("in")?;
            let range = self.parse_expr()?;
            LoopScheme::For { iterator, range }
        } else if self.at_keyword("while") {
            self.advance()?;
            LoopScheme::While(self.parse_expr()?)
        } else {
            LoopScheme::Plain
        };
        self.expect_kw("loop")?;
        let body = self.parse_sequential_statements_until(|p| p.at_keyword("end"))?;
        self.expect_kw("end")?;
        self.expect_kw("loop")?;
        if self.peek_text() != Some(";") {
            self.advance()?;
        }
        self.expect_sym(";")?;
        let trivia = self.bind(start);
        Ok(LoopStatement { label, scheme, body, trivia })
    }

    fn parse_waveform(&mut self) -> Result<Waveform> {
        if self.at_keyword("unaffected") {
            self.advance()?;
            return Ok(Waveform::Unaffected);
        }
        let mut elements = Vec::new();
        loop {
            let value = self.parse_expr()?;
            let after_delay = if self.at_keyword("after") {
                self.advance()?;
                Some(self.parse_expr()?)
            } else {
                None
            };
            elements.push(WaveformElement { value, after_delay });
            if self.peek_text() == Some(",") {
                self.advance()?;
                continue;
            }
            break;
        }
        Ok(Waveform::Elements(elements))
    }

    // -----------------------------------------------------------------
    // Expressions (precedence-climbing, roughly following the VHDL LRM's
    // logical < relational < shift < adding < unary-sign < multiplying <
    // miscellaneous (**, abs, not) ladder)
    // -----------------------------------------------------------------

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> Result<Expr> {
        let mut left = self.parse_relational()?;
        while self.peek_text().is_some_and(|t| {
            matches!(t.to_lowercase().as_str(), "and" | "or" | "xor" | "nand" | "nor" | "xnor")
        }) {
            let op = self.advance()?.text.to_lowercase();
            let right = self.parse_relational()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let mut left = self.parse_shift()?;
        while self.peek_text().is_some_and(|t| matches!(t, "=" | "/=" | "<" | "<=" | ">" | ">=")) {
            // `<=` only reads as relational here; callers that need the
            // signal-assignment arrow parse the target with `parse_expr`
            // and then look for `<=` themselves, so this is unambiguous:
            // by the time a caller checks for `<=` post-target, the target
            // expression has already been fully consumed.
            let op = self.advance()?.text;
            let right = self.parse_shift()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    fn parse_shift(&mut self) -> Result<Expr> {
        let mut left = self.parse_range()?;
        while self.peek_text().is_some_and(|t| {
            matches!(t.to_lowercase().as_str(), "sll" | "srl" | "sla" | "sra" | "rol" | "ror")
        }) {
            let op = self.advance()?.text.to_lowercase();
            let right = self.parse_range()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    /// `to`/`downto` sit between shift and adding in this simplified ladder;
    /// the VHDL LRM treats them as a separate "range" production, but
    /// folding them in here lets a bare `parse_expr()` call parse a
    /// discrete range directly.
    fn parse_range(&mut self) -> Result<Expr> {
        let mut left = self.parse_adding()?;
        while self.at_keyword("to") || self.at_keyword("downto") {
            let op = self.advance()?.text.to_lowercase();
            let right = self.parse_adding()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    fn parse_adding(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        while self.peek_text().is_some_and(|t| matches!(t, "+" | "-" | "&")) {
            let op = self.advance()?.text;
            let right = self.parse_term()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;
        while self.peek_text().is_some_and(|t| matches!(t, "*" | "/"))
            || self.at_keyword("mod")
            || self.at_keyword("rem")
        {
            let op = self.advance()?.text.to_lowercase();
            let right = self.parse_factor()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right, trivia: None }));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        if self.at_keyword("abs") || self.at_keyword("not") {
            let op = self.advance()?.text.to_lowercase();
            let operand = self.parse_factor()?;
            return Ok(Expr::Unary(Box::new(UnaryExpr { op, operand, trivia: None })));
        }
        let base = self.parse_unary()?;
        if self.peek_text() == Some("**") {
            self.advance()?;
            let right = self.parse_factor()?;
            return Ok(Expr::Binary(Box::new(BinaryExpr { left: base, op: "**".into(), right, trivia: None })));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.peek_text().is_some_and(|t| matches!(t, "+" | "-")) {
            let op = self.advance()?.text;
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(Box::new(UnaryExpr { op, operand, trivia: None })));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut primary = self.parse_primary()?;
        loop {
            match self.peek_text() {
                Some("(") => {
                    self.advance()?;
                    let mut args = vec![self.parse_expr()?];
                    while self.peek_text() == Some(",") {
                        self.advance()?;
                        args.push(self.parse_expr()?);
                    }
                    self.expect_sym(")")?;
                    primary = Expr::Call(Box::new(CallExpr { callee: primary, args, trivia: None }));
                }
                Some("'") => {
                    self.advance()?;
                    if self.peek_text() == Some("(") {
                        let type_mark = match &primary {
                            Expr::Token(t) => t.text.clone(),
                            _ => String::new(),
                        };
                        let operand = self.parse_aggregate_or_paren()?;
                        primary = Expr::Qualified(Box::new(QualifiedExpr { type_mark, operand, trivia: None }));
                    } else {
                        let designator = self.advance()?.text;
                        let arg = if self.peek_text() == Some("(") {
                            self.advance()?;
                            let e = self.parse_expr()?;
                            self.expect_sym(")")?;
                            Some(e)
                        } else {
                            None
                        };
                        primary = Expr::Attribute(Box::new(AttributeExpr { prefix: primary, designator, arg, trivia: None }));
                    }
                }
                _ => break,
            }
        }
        Ok(primary)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek_text() {
            Some("(") => self.parse_aggregate_or_paren(),
            Some(t) if t.eq_ignore_ascii_case("new") => {
                self.advance()?;
                let subtype = self.parse_subtype_indication()?;
                Ok(Expr::Allocator(Box::new(AllocatorExpr { subtype, trivia: None })))
            }
            Some(t) if t.chars().next().is_some_and(|c| c.is_ascii_digit()) => {
                let value = self.advance()?.text;
                let can_be_unit = self
                    .peek_text()
                    .is_some_and(|u| u.chars().next().is_some_and(char::is_alphabetic))
                    && !NOT_A_UNIT.iter().any(|kw| self.at_keyword(kw));
                if can_be_unit {
                    let unit = self.advance()?.text;
                    Ok(Expr::Physical(PhysicalLiteral { value, unit, trivia: None }))
                } else {
                    Ok(Expr::Token(TokenExpr { text: value, trivia: None }))
                }
            }
            Some(_) => Ok(Expr::Token(TokenExpr { text: self.advance()?.text, trivia: None })),
            None => Err(self.error("unexpected end of input while parsing an expression")),
        }
    }

    /// `( expr [, expr]* )` or `( choice => value [, ...]* )`. A single bare
    /// positional element folds back into [`Expr::Paren`]; anything else —
    /// multiple elements or any named association — is an aggregate (spec
    /// §3.4 "Expressions", aggregate vs. parenthesized expression).
    fn parse_aggregate_or_paren(&mut self) -> Result<Expr> {
        self.expect_sym("(")?;
        let mut elements = Vec::new();
        loop {
            let first = self.parse_expr()?;
            if self.peek_text() == Some("=>") {
                self.advance()?;
                let value = self.parse_expr()?;
                elements.push(AggregateElement::Named { choice: first, value });
            } else {
                elements.push(AggregateElement::Positional(first));
            }
            if self.peek_text() == Some(",") {
                self.advance()?;
                continue;
            }
            break;
        }
        self.expect_sym(")")?;
        if elements.len() == 1 && matches!(elements[0], AggregateElement::Positional(_)) {
            let AggregateElement::Positional(inner) = elements.pop().expect("len checked above") else {
                unreachable!()
            };
            Ok(Expr::Paren(Box::new(ParenExpr { inner, trivia: None })))
        } else {
            Ok(Expr::Aggregate(AggregateExpr { elements, trivia: None }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_entity() {
        let file = parse("entity E is\nend;\n").unwrap();
        assert_eq!(file.units.len(), 1);
        match &file.units[0].unit {
            LibraryUnit::Entity(e) => assert_eq!(e.name, "E"),
            _ => panic!("expected an entity"),
        }
    }

    #[test]
    fn parses_ports_and_generics() {
        let src = "entity E is\n  generic (W : integer := 8);\n  port (clk : in std_logic; q : out std_logic_vector(7 downto 0));\nend entity E;\n";
        let file = parse(src).unwrap();
        let LibraryUnit::Entity(e) = &file.units[0].unit else { panic!("expected entity") };
        assert!(e.generics.is_some());
        assert_eq!(e.ports.as_ref().unwrap().ports.len(), 2);
        assert!(e.end.has_end_keyword);
        assert_eq!(e.end.label.as_deref(), Some("E"));
    }

    #[test]
    fn parses_conditional_and_process_architecture() {
        let src = "architecture rtl of E is\nbegin\n  y <= a when sel = '1' else b;\n  process (clk)\n  begin\n    if rising_edge(clk) then\n      q <= d;\n    end if;\n  end process;\nend architecture;\n";
        let file = parse(src).unwrap();
        let LibraryUnit::Architecture(a) = &file.units[0].unit else { panic!("expected architecture") };
        assert_eq!(a.statements.len(), 2);
    }

    #[test]
    fn preserves_a_leading_comment_as_trivia() {
        let src = "-- a header comment\nentity E is\nend;\n";
        let file = parse(src).unwrap();
        let LibraryUnit::Entity(e) = &file.units[0].unit else { panic!("expected entity") };
        use crate::trivia::TriviaHost;
        assert!(e.has_trivia());
    }
}
