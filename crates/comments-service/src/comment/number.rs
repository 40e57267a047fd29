//! Comment number templates.
//!
//! A template holds one or more `{0}` placeholders. `{0:000}` pads the
//! number with zeros to the width of the zero run.

use comments_core::error::AppError;
use comments_core::result::AppResult;

/// Render `value` into `template`.
pub fn format_number(template: &str, value: i64) -> AppResult<String> {
    let mut output = String::with_capacity(template.len() + 8);
    let mut rest = template;
    let mut placeholders = 0;

    while let Some(start) = rest.find("{0") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| invalid(template))?;
        let spec = &after[..end];
        let width = match spec.strip_prefix(':') {
            None if spec.is_empty() => 0,
            Some(zeros) if !zeros.is_empty() && zeros.chars().all(|c| c == '0') => zeros.len(),
            _ => return Err(invalid(template)),
        };
        output.push_str(&format!("{value:0width$}"));
        rest = &after[end + 1..];
        placeholders += 1;
    }

    if placeholders == 0 {
        return Err(invalid(template));
    }
    output.push_str(rest);
    Ok(output)
}

fn invalid(template: &str) -> AppError {
    AppError::configuration(format!(
        "comment number template '{template}' must contain {{0}} or {{0:000}}"
    ))
}

#[cfg(test)]
mod tests {
    use comments_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_plain_placeholder() {
        assert_eq!(format_number("#{0}", 42).unwrap(), "#42");
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_number("!{0:000}", 7).unwrap(), "!007");
        assert_eq!(format_number("!{0:000}", 1234).unwrap(), "!1234");
        assert_eq!(format_number("R-{0:00}-{0}", 5).unwrap(), "R-05-5");
    }

    #[test]
    fn test_invalid_templates() {
        for template in ["!", "{0", "{0:abc}", "{0:}"] {
            assert_eq!(
                format_number(template, 1).unwrap_err().kind,
                ErrorKind::Configuration,
                "{template}"
            );
        }
    }
}
