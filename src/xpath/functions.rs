//! Built-in function dispatch: `last`, `position`, `text`, `count`, `data`.

use super::error::XPathError;
use super::evaluator::XPathExpression;
use super::value::XPathValue;
use crate::dom::DomElement;

/// Evaluates the function call at `tokens[from]` (whose argument list closes
/// at `close`) against `values`.
///
/// Every function emits once per source value. `count` and `data` evaluate
/// their argument inside that loop, against the full source list each time;
/// the evaluator is pure, so this matters only for error timing, but it is
/// what the reference engine does and `data(..)` at a path tail depends on
/// the per-source emission.
pub(super) fn evaluate_function<'a, N: DomElement<'a>>(
    expr: &XPathExpression,
    values: &[XPathValue<N>],
    from: usize,
    close: usize,
    position: usize,
    last: usize,
    in_filter: bool,
) -> Result<Vec<XPathValue<N>>, XPathError> {
    let name = expr.token(from).trim();
    let size = values.len();
    let mut result = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match name {
            "last" => {
                let n = if in_filter { last } else { size };
                result.push(XPathValue::Number(n as f64));
            }
            "position" => {
                let n = if in_filter { position } else { index + 1 };
                result.push(XPathValue::Number(n as f64));
            }
            "text" => match value {
                XPathValue::Element(e) => result.push(XPathValue::String(e.text_content())),
                XPathValue::String(s) => result.push(XPathValue::String(s.clone())),
                _ => {}
            },
            "count" => {
                let argument = expr.eval_range(
                    values.to_vec(),
                    from + 2,
                    close - 1,
                    false,
                    position,
                    0,
                    in_filter,
                    None,
                )?;
                result.push(XPathValue::Number(argument.len() as f64));
            }
            "data" => {
                let argument = expr.eval_range(
                    values.to_vec(),
                    from + 2,
                    close - 1,
                    false,
                    position,
                    0,
                    in_filter,
                    None,
                )?;
                result.extend(argument);
            }
            other => {
                return Err(XPathError::new(format!("unknown function '{other}'")));
            }
        }
    }
    Ok(result)
}
