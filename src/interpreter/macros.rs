//! Built-in macros shared by both interpreters
//!
//! `defined(X)` is always understood. With Linux macro handling enabled the
//! Kconfig helpers are expanded as well:
//!
//! | Call            | Formula                 |
//! |-----------------|-------------------------|
//! | `defined(X)`    | `X`                     |
//! | `IS_ENABLED(X)` | `X \|\| X_MODULE`       |
//! | `IS_MODULE(X)`  | `X_MODULE`              |
//! | `IS_BUILTIN(X)` | `X`                     |

use crate::error::{ExpressionFormatError, Result};
use crate::formula::Formula;
use crate::parser::ast::{CppExpression, DEFINED};

const IS_ENABLED: &str = "IS_ENABLED";
const IS_MODULE: &str = "IS_MODULE";
const IS_BUILTIN: &str = "IS_BUILTIN";

/// Suffix Kconfig appends to options built as modules
const MODULE_SUFFIX: &str = "_MODULE";

/// Expand a call to one of the known macros.
///
/// Returns `Ok(None)` when `name` is not a macro this configuration knows,
/// leaving the decision to the caller. A known macro must have exactly one
/// variable as its argument.
pub fn expand_known_call(
    name: &str,
    arg: Option<&CppExpression>,
    handle_linux_macros: bool,
) -> Result<Option<Formula>> {
    let known = name == DEFINED
        || (handle_linux_macros && matches!(name, IS_ENABLED | IS_MODULE | IS_BUILTIN));
    if !known {
        return Ok(None);
    }

    let variable = match arg {
        Some(CppExpression::Variable(variable)) => variable,
        Some(other) => {
            return Err(ExpressionFormatError::semantic(format!(
                "Can't handle {}() on other elements than variables: {}",
                name, other
            )));
        }
        None => {
            return Err(ExpressionFormatError::semantic(format!(
                "Can't handle {}() without argument",
                name
            )));
        }
    };

    let formula = match name {
        IS_ENABLED => Formula::or(
            Formula::var(variable.as_str()),
            Formula::var(format!("{}{}", variable, MODULE_SUFFIX)),
        ),
        IS_MODULE => Formula::var(format!("{}{}", variable, MODULE_SUFFIX)),
        _ => Formula::var(variable.as_str()),
    };
    Ok(Some(formula))
}
