//! AST evaluator
//!
//! Every intermediate value is checked for finiteness, so `5/0` and
//! overflowing products are rejected at the operation that produced them
//! rather than leaking `inf` or `NaN` into a later step.

use crate::core::format::format_number;
use crate::core::parser::{AstNode, Parser};
use crate::core::sanitize::prepare;
use crate::core::{CalcResult, InvalidReason};

/// Evaluates an AST node
pub fn evaluate_ast(node: &AstNode) -> CalcResult<f64> {
    let value = match node {
        AstNode::Number(n) => *n,
        AstNode::Negate(inner) => -evaluate_ast(inner)?,
        AstNode::BinaryOp { left, op, right } => {
            let left_val = evaluate_ast(left)?;
            let right_val = evaluate_ast(right)?;
            op.apply(left_val, right_val)
        }
    };
    check_finite(value)
}

/// Sanitizes, parses and evaluates raw expression text
pub fn evaluate_value(expression: &str) -> CalcResult<f64> {
    let prepared = prepare(expression)?;
    let ast = Parser::parse_str(&prepared)?;
    evaluate_ast(&ast)
}

/// Evaluates raw expression text and renders the result as canonical text
///
/// # Example
///
/// ```rust
/// use keypad_calculator::core::evaluator::evaluate;
///
/// assert_eq!(evaluate("5+3").unwrap(), "8");
/// assert_eq!(evaluate("8%").unwrap(), "0.08");
/// assert!(evaluate("5/0").is_err());
/// ```
pub fn evaluate(expression: &str) -> CalcResult<String> {
    evaluate_value(expression).map(format_number)
}

fn check_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidReason::NonFinite.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::BinaryOp;
    use crate::core::CalcError;

    // ===== AST evaluation =====

    #[test]
    fn test_evaluate_ast_nested() {
        // (1 + 2) * (3 + 4) = 21
        let ast = AstNode::binary(
            AstNode::binary(AstNode::Number(1.0), BinaryOp::Add, AstNode::Number(2.0)),
            BinaryOp::Multiply,
            AstNode::binary(AstNode::Number(3.0), BinaryOp::Add, AstNode::Number(4.0)),
        );
        assert_eq!(evaluate_ast(&ast), Ok(21.0));
    }

    #[test]
    fn test_evaluate_ast_double_negative() {
        let ast = AstNode::negate(AstNode::negate(AstNode::Number(5.0)));
        assert_eq!(evaluate_ast(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_ast_division_by_zero() {
        let ast = AstNode::binary(AstNode::Number(10.0), BinaryOp::Divide, AstNode::Number(0.0));
        assert_eq!(
            evaluate_ast(&ast),
            Err(CalcError::from(InvalidReason::NonFinite))
        );
    }

    #[test]
    fn test_evaluate_ast_zero_over_zero() {
        let ast = AstNode::binary(AstNode::Number(0.0), BinaryOp::Divide, AstNode::Number(0.0));
        assert!(evaluate_ast(&ast).is_err());
    }

    #[test]
    fn test_evaluate_ast_error_in_nested_operand() {
        // 1 / (1 / 0): the inner infinity is rejected before it can become 0
        let ast = AstNode::binary(
            AstNode::Number(1.0),
            BinaryOp::Divide,
            AstNode::binary(AstNode::Number(1.0), BinaryOp::Divide, AstNode::Number(0.0)),
        );
        assert!(evaluate_ast(&ast).is_err());
    }

    // ===== String evaluation =====

    #[test]
    fn test_evaluate_basic_operations() {
        assert_eq!(evaluate("10+5").unwrap(), "15");
        assert_eq!(evaluate("10-3").unwrap(), "7");
        assert_eq!(evaluate("6*7").unwrap(), "42");
        assert_eq!(evaluate("20/4").unwrap(), "5");
        assert_eq!(evaluate("7/2").unwrap(), "3.5");
    }

    #[test]
    fn test_evaluate_precedence_and_grouping() {
        assert_eq!(evaluate("2+3*4").unwrap(), "14");
        assert_eq!(evaluate("(2+3)*4").unwrap(), "20");
        assert_eq!(evaluate("42*(3+7)").unwrap(), "420");
        assert_eq!(evaluate("2*(3+(4-1))/3").unwrap(), "4");
    }

    #[test]
    fn test_evaluate_percent() {
        assert_eq!(evaluate("8%").unwrap(), "0.08");
        assert_eq!(evaluate("50+10%").unwrap(), "50.1");
        assert_eq!(evaluate("200*5%").unwrap(), "10");
    }

    #[test]
    fn test_evaluate_signs() {
        assert_eq!(evaluate("-5+10").unwrap(), "5");
        assert_eq!(evaluate("3+-4").unwrap(), "-1");
        assert_eq!(evaluate("3--4").unwrap(), "7");
        assert_eq!(evaluate("-(2+3)").unwrap(), "-5");
    }

    #[test]
    fn test_evaluate_glyphs_and_spaces() {
        assert_eq!(evaluate("6 × 7").unwrap(), "42");
        assert_eq!(evaluate("9 ÷ 2").unwrap(), "4.5");
    }

    #[test]
    fn test_evaluate_float_noise_is_kept() {
        assert_eq!(evaluate("0.1+0.2").unwrap(), "0.30000000000000004");
    }

    #[test]
    fn test_evaluate_negative_zero_prints_zero() {
        assert_eq!(evaluate("-0").unwrap(), "0");
        assert_eq!(evaluate("0*-1").unwrap(), "0");
    }

    #[test]
    fn test_evaluate_rejections() {
        assert!(matches!(
            evaluate(""),
            Err(CalcError::InvalidExpression(InvalidReason::Empty))
        ));
        assert!(matches!(
            evaluate("*3"),
            Err(CalcError::InvalidExpression(InvalidReason::LeadingOperator('*')))
        ));
        assert!(matches!(
            evaluate("5/0"),
            Err(CalcError::InvalidExpression(InvalidReason::NonFinite))
        ));
        assert!(matches!(
            evaluate("2+"),
            Err(CalcError::InvalidExpression(InvalidReason::Syntax(_)))
        ));
        assert!(matches!(
            evaluate("(2+3"),
            Err(CalcError::InvalidExpression(InvalidReason::Syntax(_)))
        ));
    }

    #[test]
    fn test_evaluate_overflow() {
        let big = "9".repeat(300);
        assert!(matches!(
            evaluate(&format!("{big}*{big}")),
            Err(CalcError::InvalidExpression(InvalidReason::NonFinite))
        ));
    }

    #[test]
    fn test_evaluate_strips_injection() {
        // Only "(1)" survives the allow-list
        assert_eq!(evaluate("alert(1)").unwrap(), "1");
        assert!(evaluate("process.exit()").is_err());
    }

    #[test]
    fn test_evaluate_result_is_idempotent() {
        for expr in ["1/3", "2*(3.5-10)", "0.1+0.2", "8%", "-7/4"] {
            let once = evaluate(expr).unwrap();
            assert_eq!(evaluate(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_evaluate_value() {
        assert_eq!(evaluate_value("9"), Ok(9.0));
        assert_eq!(evaluate_value("1.5*2"), Ok(3.0));
    }

    #[test]
    fn test_evaluate_deep_nesting_is_invalid() {
        let parens = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        let signs = "-".repeat(200_000) + "1";
        let sum = format!("1{}", "+1".repeat(200_000));
        for expr in [parens, signs, sum] {
            assert!(matches!(
                evaluate(&expr),
                Err(CalcError::InvalidExpression(InvalidReason::Syntax(_)))
            ));
        }
    }

    #[test]
    fn test_evaluate_long_sum_within_limit() {
        let sum = format!("1{}", "+1".repeat(500));
        assert_eq!(evaluate(&sum).unwrap(), "501");
    }
}
