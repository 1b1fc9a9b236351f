//! Waveform → Doc rule.

use crate::ast::statements::waveform::{Waveform, WaveformElement};
use crate::doc::{self, Doc};
use crate::pretty_print::expressions::visit_expr;

pub fn visit_waveform(w: &Waveform) -> Doc {
    match w {
        Waveform::Unaffected => Doc::keyword("unaffected"),
        Waveform::Elements(elements) => {
            doc::join(elements.iter().map(visit_waveform_element), Doc::text(",").concat(Doc::soft_line()))
        }
    }
}

fn visit_waveform_element(e: &WaveformElement) -> Doc {
    let value = visit_expr(&e.value);
    match &e.after_delay {
        Some(delay) => value & Doc::keyword("after") & visit_expr(delay),
        None => value,
    }
}
