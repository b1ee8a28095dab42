//! Allow-list gate in front of the parser
//!
//! Runs before tokenizing: glyph normalization, allow-list filtering,
//! percent rewriting and the leading-operator check. The parser only ever
//! sees text built from `0-9 + - * / ( ) . space`.

use crate::core::{CalcResult, InvalidReason};

/// Characters kept by [`sanitize`]
const ALLOWED: &str = "0123456789+-*/().% ";

/// Characters the parser accepts once percent has been rewritten
const GRAMMAR: &str = "0123456789+-*/(). ";

/// Normalizes `×`/`÷` to `*`/`/` and drops everything outside the allow-list
#[must_use]
pub fn sanitize(expression: &str) -> String {
    expression
        .chars()
        .map(|ch| match ch {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .filter(|ch| ALLOWED.contains(*ch))
        .collect()
}

/// Rewrites every `%` as `/100`, so `X%` reads as `X/100`
#[must_use]
pub fn rewrite_percent(expression: &str) -> String {
    expression.replace('%', "/100")
}

/// Produces the parser input for a raw expression, or rejects it
pub fn prepare(expression: &str) -> CalcResult<String> {
    let sanitized = sanitize(expression);
    if sanitized.trim().is_empty() {
        return Err(InvalidReason::Empty.into());
    }

    let rewritten = rewrite_percent(&sanitized);
    if let Some(ch) = rewritten.chars().find(|ch| !GRAMMAR.contains(*ch)) {
        return Err(InvalidReason::UnexpectedCharacter(ch).into());
    }

    match rewritten.trim_start().chars().next() {
        Some(op @ ('+' | '*' | '/')) => Err(InvalidReason::LeadingOperator(op).into()),
        _ => Ok(rewritten),
    }
}
