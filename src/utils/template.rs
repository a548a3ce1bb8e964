use std::io::Error;
use std::io::ErrorKind;

/// Substitutes `suffix` for each `{0}` or `{}` field. `{{` and `}}` are literal braces.
pub fn format_template(template: &str, suffix: &str) -> Result<String, Error> {
    let mut formatted = String::with_capacity(template.len() + suffix.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    formatted.push('{');
                    continue;
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(f) => field.push(f),
                        None => return Err(template_error(template, "unterminated '{'")),
                    }
                }
                if field.is_empty() || field == "0" {
                    formatted.push_str(suffix);
                } else {
                    return Err(template_error(
                        template,
                        &format!("unsupported field {{{}}}", field),
                    ));
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    formatted.push('}');
                } else {
                    return Err(template_error(template, "single '}'"));
                }
            }
            _ => formatted.push(c),
        }
    }
    Ok(formatted)
}

pub fn validate_template(template: &str) -> Result<(), Error> {
    format_template(template, "").map(|_| ())
}

fn template_error(template: &str, reason: &str) -> Error {
    Error::new(
        ErrorKind::InvalidInput,
        format!("invalid template [{}]: {}", template, reason),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_field() {
        let path = format_template("extract_recograph_{0}.cfg", "sp1235").unwrap();
        assert_eq!(path, "extract_recograph_sp1235.cfg");

        let path = format_template("populate_graph_tables_{0}.sql", "sp1235").unwrap();
        assert_eq!(path, "populate_graph_tables_sp1235.sql");
    }

    #[test]
    fn test_auto_field_and_repeats() {
        let path = format_template("{}/{0}.cfg", "data").unwrap();
        assert_eq!(path, "data/data.cfg");
    }

    #[test]
    fn test_escaped_braces() {
        let path = format_template("{{literal}}_{0}", "sigmc").unwrap();
        assert_eq!(path, "{literal}_sigmc");
    }

    #[test]
    fn test_no_field() {
        assert_eq!(format_template("fixed.sql", "sp998").unwrap(), "fixed.sql");
    }

    #[test]
    fn test_invalid_templates() {
        for template in ["cfg_{1}.cfg", "cfg_{name}.cfg", "cfg_{0", "cfg_}.cfg"] {
            let err = format_template(template, "sp1005").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{}", template);
            assert!(validate_template(template).is_err());
        }
    }
}
