//! The layout engine: turns a [`Doc`] plus a [`Config`] into a rendered
//! `String`.
//!
//! Implements the classic Wadler/Prettier "group fits flat?" algorithm: the
//! renderer walks the Doc left to right carrying an explicit work-list of
//! `(indent, mode, Doc)` triples, and whenever it meets a `Group` in broken
//! mode it probes whether rendering that group's content flat — plus
//! everything still queued after it, up to the next unconditional newline —
//! would fit in the remaining width. This is a bounded probe at decision
//! time rather than a precomputed width attribute; either is a valid way to
//! decide flat-fit, this one just doesn't need a pre-pass over the tree.

use std::collections::HashMap;

use crate::config::Config;
use crate::doc::{Doc, DocView, TextKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

#[derive(Clone)]
struct Cmd {
    indent: usize,
    mode: Mode,
    doc: Doc,
}

/// One active `Align` scope: the maximum unpadded width observed for each
/// level tag, computed in a measurement pre-pass.
type AlignScope = HashMap<i32, usize>;

/// Render `doc` under `config`, producing output with only `\n` line
/// terminators and no trailing whitespace on any line.
pub fn render(doc: &Doc, config: &Config) -> String {
    let mut out = String::new();
    let mut column: usize = 0;
    let mut stack: Vec<Cmd> = vec![Cmd {
        indent: 0,
        mode: Mode::Break,
        doc: doc.clone(),
    }];
    let mut align_stack: Vec<AlignScope> = Vec::new();
    // Parallel stack of `stack` depths at which each `Align` scope closes
    // (popped when `stack.len()` returns to that recorded floor).
    let mut align_floors: Vec<usize> = Vec::new();

    while let Some(cmd) = stack.pop() {
        while let Some(&floor) = align_floors.last() {
            if stack.len() < floor {
                align_floors.pop();
                align_stack.pop();
            } else {
                break;
            }
        }

        match cmd.doc.view() {
            DocView::Empty => {}
            DocView::Text { text, kind, level } => {
                let rendered = match kind {
                    TextKind::Keyword => config.keyword_case.apply(text),
                    TextKind::Plain => text.to_string(),
                };
                let unpadded_width = rendered.chars().count();
                out.push_str(&rendered);
                column += unpadded_width;

                if let Some(level) = level {
                    if let Some(scope) = align_stack.last() {
                        if let Some(&target) = scope.get(&level) {
                            if target > unpadded_width {
                                let pad = target - unpadded_width;
                                out.push_str(&" ".repeat(pad));
                                column += pad;
                            }
                        }
                    }
                }
            }
            DocView::SoftLine => match cmd.mode {
                Mode::Flat => {
                    out.push(' ');
                    column += 1;
                }
                Mode::Break => {
                    emit_newline(&mut out, 1, cmd.indent);
                    column = cmd.indent;
                }
            },
            DocView::HardLine(n) => {
                if n > 0 {
                    emit_newline(&mut out, n, cmd.indent);
                    column = cmd.indent;
                }
            }
            DocView::Concat(a, b) => {
                stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: b.clone() });
                stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: a.clone() });
            }
            DocView::Nest(inner, delta) => {
                stack.push(Cmd {
                    indent: nest_indent(cmd.indent, delta),
                    mode: cmd.mode,
                    doc: inner.clone(),
                });
            }
            DocView::Hang(inner) => {
                stack.push(Cmd { indent: column, mode: cmd.mode, doc: inner.clone() });
            }
            DocView::Group(inner) => {
                let mode = match cmd.mode {
                    Mode::Flat => Mode::Flat,
                    Mode::Break => {
                        let probe = Cmd { indent: cmd.indent, mode: Mode::Flat, doc: inner.clone() };
                        let width = config.line_length as isize - column as isize;
                        if fits(width, probe, &stack) {
                            Mode::Flat
                        } else {
                            Mode::Break
                        }
                    }
                };
                tracing::trace!(?mode, column, "group decision");
                stack.push(Cmd { indent: cmd.indent, mode, doc: inner.clone() });
            }
            DocView::Align(inner) => {
                align_stack.push(measure_align_levels(inner));
                align_floors.push(stack.len());
                stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: inner.clone() });
            }
            DocView::InlineComment(inner) => {
                stack.push(Cmd { indent: cmd.indent, mode: Mode::Flat, doc: inner.clone() });
            }
        }
    }

    if config.trailing_newline {
        strip_trailing_whitespace_per_line(&out) + "\n"
    } else {
        strip_trailing_whitespace_per_line(&out)
    }
}

fn nest_indent(base: usize, delta: i32) -> usize {
    if delta >= 0 {
        base + delta as usize
    } else {
        base.saturating_sub((-delta) as usize)
    }
}

fn emit_newline(out: &mut String, count: u32, indent: usize) {
    rstrip_in_place(out);
    for _ in 0..count {
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
}

fn rstrip_in_place(out: &mut String) {
    while out.ends_with(' ') || out.ends_with('\t') {
        out.pop();
    }
}

/// Can `next` — plus everything still queued in `rest` — be rendered flat
/// within `width` columns before the next unconditional newline?
fn fits(width: isize, next: Cmd, rest: &[Cmd]) -> bool {
    let mut width = width;
    let mut rest_idx = rest.len();
    let mut cmds = vec![next];

    loop {
        if width < 0 {
            return false;
        }
        let Some(cmd) = cmds.pop() else {
            if rest_idx == 0 {
                return true;
            }
            rest_idx -= 1;
            cmds.push(rest[rest_idx].clone());
            continue;
        };

        match cmd.doc.view() {
            DocView::Empty => {}
            DocView::Text { text, .. } => {
                width -= text.chars().count() as isize;
            }
            DocView::SoftLine => match cmd.mode {
                Mode::Flat => width -= 1,
                Mode::Break => return true,
            },
            DocView::HardLine(n) => {
                if n > 0 {
                    return true;
                }
            }
            DocView::Concat(a, b) => {
                cmds.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: b.clone() });
                cmds.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: a.clone() });
            }
            DocView::Nest(inner, delta) => {
                cmds.push(Cmd {
                    indent: nest_indent(cmd.indent, delta),
                    mode: cmd.mode,
                    doc: inner.clone(),
                });
            }
            DocView::Hang(inner) | DocView::Align(inner) => {
                cmds.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: inner.clone() });
            }
            DocView::Group(inner) => {
                // Once probing flat-fit, nested groups are measured flat
                // too: a group fits only if everything inside it, including
                // its own sub-groups, fits on one line.
                cmds.push(Cmd { indent: cmd.indent, mode: Mode::Flat, doc: inner.clone() });
            }
            DocView::InlineComment(inner) => {
                cmds.push(Cmd { indent: cmd.indent, mode: Mode::Flat, doc: inner.clone() });
            }
        }
    }
}

/// Measurement pass for an `Align` scope: collect the maximum unpadded
/// width of every level-tagged `Text`/`Keyword` reachable from `doc`
/// without crossing into a nested `Align` (a nested scope's levels are
/// independent).
fn measure_align_levels(doc: &Doc) -> AlignScope {
    let mut widths: AlignScope = HashMap::new();
    measure_align_levels_into(doc, &mut widths);
    widths
}

fn measure_align_levels_into(doc: &Doc, widths: &mut AlignScope) {
    match doc.view() {
        DocView::Empty | DocView::SoftLine | DocView::HardLine(_) => {}
        DocView::Text { text, level, .. } => {
            if let Some(level) = level {
                let width = text.chars().count();
                let entry = widths.entry(level).or_insert(0);
                if width > *entry {
                    *entry = width;
                }
            }
        }
        DocView::Concat(a, b) => {
            measure_align_levels_into(a, widths);
            measure_align_levels_into(b, widths);
        }
        DocView::Nest(inner, _) | DocView::Hang(inner) | DocView::InlineComment(inner) => {
            measure_align_levels_into(inner, widths);
        }
        DocView::Group(inner) => measure_align_levels_into(inner, widths),
        DocView::Align(_) => {
            // A nested Align scope measures and pads independently; do not
            // fold its levels into this (outer) scope.
        }
    }
}

fn strip_trailing_whitespace_per_line(s: &str) -> String {
    s.lines()
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Doc;

    fn cfg(line_length: usize) -> Config {
        Config {
            line_length,
            ..Config::default()
        }
    }

    #[test]
    fn group_stays_flat_when_it_fits() {
        let d = (Doc::text("a") & Doc::text("b")).group();
        assert_eq!(render(&d, &cfg(80)), "a b\n");
    }

    #[test]
    fn group_breaks_when_it_does_not_fit() {
        let d = (Doc::text("one").soft(Doc::text("two"))).group();
        assert_eq!(render(&d, &cfg(3)), "one\ntwo\n");
    }

    #[test]
    fn no_trailing_whitespace_on_broken_lines() {
        let d = Doc::text("x").concat(Doc::soft_line()).group();
        let out = render(&d, &cfg(0));
        assert!(!out.lines().any(|l| l.ends_with(' ')));
    }

    #[test]
    fn keyword_case_lower_applies_at_emission() {
        let d = Doc::keyword("ENTITY");
        let mut c = Config::default();
        c.keyword_case = crate::config::KeywordCase::Lower;
        assert_eq!(render(&d, &c), "entity\n");
    }

    #[test]
    fn hard_line_zero_forces_broken_group_without_emitting_newline() {
        let d = (Doc::text("a").concat(Doc::hard_lines(0)).concat(Doc::text("b"))).group();
        assert_eq!(render(&d, &cfg(80)), "ab\n");
    }

    #[test]
    fn align_pads_level_zero_texts_to_shared_column() {
        let row1 = Doc::text_level("clk", crate::doc::align_level::NAME) & Doc::text(":");
        let row2 = Doc::text_level("data_valid", crate::doc::align_level::NAME) & Doc::text(":");
        let d = row1.soft(row2).align();
        let out = render(&d, &cfg(80));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "clk        :");
        assert_eq!(lines[1], "data_valid :");
    }
}
