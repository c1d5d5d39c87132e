//! Positional placeholder substitution for message templates
//!
//! Supports `{}` (auto-numbered), `{N}` (explicit index) and the `{{` / `}}`
//! escapes. Values beyond the last placeholder are ignored.

use super::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unset,
    Automatic,
    Manual,
}

/// Fill `template` with `values` by position
pub fn format_positional<S: AsRef<str>>(
    template: &str,
    values: &[S],
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut numbering = Numbering::Unset;
    let mut next_auto = 0usize;

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    output.push('{');
                    continue;
                }

                let mut field = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    if inner == '{' {
                        return Err(TemplateError::UnbalancedBrace { position });
                    }
                    field.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnbalancedBrace { position });
                }

                let index = field_index(&field, &mut numbering, &mut next_auto)?;
                let value = values.get(index).ok_or(TemplateError::MissingValue {
                    index,
                    supplied: values.len(),
                })?;
                output.push_str(value.as_ref());
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                    output.push('}');
                } else {
                    return Err(TemplateError::UnbalancedBrace { position });
                }
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

/// Number of values a template needs to resolve
pub fn required_values(template: &str) -> Result<usize, TemplateError> {
    // Count by formatting against an endless supply of empty values.
    let mut needed = 0usize;
    loop {
        let values = vec![""; needed];
        match format_positional(template, &values) {
            Ok(_) => return Ok(needed),
            Err(TemplateError::MissingValue { index, .. }) => needed = index + 1,
            Err(other) => return Err(other),
        }
    }
}

fn field_index(
    field: &str,
    numbering: &mut Numbering,
    next_auto: &mut usize,
) -> Result<usize, TemplateError> {
    if field.contains(':') || field.contains('!') {
        return Err(TemplateError::UnsupportedSpec {
            field: field.to_string(),
        });
    }

    if field.is_empty() {
        if *numbering == Numbering::Manual {
            return Err(TemplateError::MixedNumbering);
        }
        *numbering = Numbering::Automatic;
        let index = *next_auto;
        *next_auto += 1;
        return Ok(index);
    }

    match field.parse::<usize>() {
        Ok(index) => {
            if *numbering == Numbering::Automatic {
                return Err(TemplateError::MixedNumbering);
            }
            *numbering = Numbering::Manual;
            Ok(index)
        }
        Err(_) => Err(TemplateError::NamedPlaceholder {
            name: field.to_string(),
        }),
    }
}
