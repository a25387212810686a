//! Currency display template (`"{name} ({symbol})"`).

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrencyField {
    Code,
    Name,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(CurrencyField),
}

/// A parsed currency display template.
///
/// Supports the named fields `{code}`, `{name}` and `{symbol}`; literal braces
/// are written `{{` and `}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyNameTemplate {
    segments: Vec<Segment>,
}

impl CurrencyNameTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => bail!("unclosed '{{' in template"),
                        }
                    }
                    let field = match name.as_str() {
                        "code" => CurrencyField::Code,
                        "name" => CurrencyField::Name,
                        "symbol" => CurrencyField::Symbol,
                        other => bail!(
                            "unknown field '{{{}}}', expected {{code}}, {{name}} or {{symbol}}",
                            other
                        ),
                    };
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => bail!("single '}}' in template"),
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    pub fn render(&self, code: &str, name: &str, symbol: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.as_str(),
                Segment::Field(CurrencyField::Code) => code,
                Segment::Field(CurrencyField::Name) => name,
                Segment::Field(CurrencyField::Symbol) => symbol,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = CurrencyNameTemplate::parse("{name} ({symbol})").unwrap();
        assert_eq!(template.render("USD", "US Dollar", "$"), "US Dollar ($)");
    }

    #[test]
    fn test_all_fields_and_escapes() {
        let template = CurrencyNameTemplate::parse("{{{code}}} {symbol} {name}").unwrap();
        assert_eq!(template.render("EUR", "Euro", "€"), "{EUR} € Euro");
    }

    #[test]
    fn test_repeated_field() {
        let template = CurrencyNameTemplate::parse("{code}/{code}").unwrap();
        assert_eq!(template.render("JPY", "Yen", "¥"), "JPY/JPY");
    }

    #[test]
    fn test_invalid_templates() {
        assert!(CurrencyNameTemplate::parse("{price}").is_err());
        assert!(CurrencyNameTemplate::parse("{name").is_err());
        assert!(CurrencyNameTemplate::parse("name}").is_err());
    }
}
