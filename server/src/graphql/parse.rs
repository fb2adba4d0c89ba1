//! Recursive descent parser for the executable GraphQL query subset.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::{Map, Number, Value};

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

/// One parsed query operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: Option<String>,
    pub variable_defs: Vec<VariableDef>,
    pub selections: Vec<Field>,
}

/// `$name: Type = default` from the operation header.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub type_text: String,
    pub default: Option<Value>,
}

/// One requested field with its arguments and sub-selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub arguments: Vec<(String, ArgValue)>,
    pub selections: Vec<Field>,
}

/// Argument value before variable substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Literal(Value),
    Variable(String),
    List(Vec<ArgValue>),
    Object(Vec<(String, ArgValue)>),
}

/// Parse one executable document into its single query operation.
///
/// # Errors
///
/// Returns a descriptive error string for syntax outside the supported
/// subset (mutations, fragments, directives, aliases, multiple operations)
/// and for malformed input.
pub fn parse_document(source: &str) -> Result<Operation, String> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let operation = parser.parse_operation()?;
    if parser.pos != parser.tokens.len() {
        return Err("expected a single operation per document".to_owned());
    }
    Ok(operation)
}

// =============================================================================
// TOKENIZER
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Punct(char),
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            // Commas are insignificant, like whitespace.
            c if c.is_whitespace() || c == ',' => {
                chars.next();
            }
            '#' => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' | '}' | '(' | ')' | '[' | ']' | ':' | '$' | '=' | '!' => {
                tokens.push(Token::Punct(c));
                chars.next();
            }
            '@' => return Err("directives are not supported".to_owned()),
            '.' => return Err("fragments are not supported".to_owned()),
            '"' => {
                chars.next();
                tokens.push(Token::Str(read_string(&mut chars)?));
            }
            c if c == '-' || c.is_ascii_digit() => tokens.push(read_number(&mut chars)?),
            c if c == '_' || c.is_ascii_alphabetic() => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Name(name));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }
    Ok(tokens)
}

fn read_string(chars: &mut Peekable<Chars>) -> Result<String, String> {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(out),
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('/') => out.push('/'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('u') => {
                    let mut code = String::new();
                    for _ in 0..4 {
                        code.push(chars.next().ok_or_else(|| "unterminated unicode escape".to_owned())?);
                    }
                    let scalar = u32::from_str_radix(&code, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or_else(|| format!("invalid unicode escape \\u{code}"))?;
                    out.push(scalar);
                }
                Some(other) => return Err(format!("unsupported escape '\\{other}'")),
                None => return Err("unterminated string".to_owned()),
            },
            other => out.push(other),
        }
    }
    Err("unterminated string".to_owned())
}

fn read_number(chars: &mut Peekable<Chars>) -> Result<Token, String> {
    let mut text = String::new();
    if chars.peek() == Some(&'-') {
        text.push('-');
        chars.next();
    }
    let mut is_float = false;
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_ascii_digit() => {
                text.push(c);
                chars.next();
            }
            '.' | 'e' | 'E' => {
                is_float = true;
                text.push(c);
                chars.next();
                // Exponent sign belongs to the number.
                if (c == 'e' || c == 'E') && matches!(chars.peek(), Some('-' | '+')) {
                    if let Some(sign) = chars.next() {
                        text.push(sign);
                    }
                }
            }
            _ => break,
        }
    }
    if is_float {
        text.parse::<f64>().map(Token::Float).map_err(|_| format!("invalid number '{text}'"))
    } else {
        text.parse::<i64>().map(Token::Int).map_err(|_| format!("invalid number '{text}'"))
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_punct(&mut self, expected: char) -> Result<(), String> {
        match self.next() {
            Some(Token::Punct(c)) if c == expected => Ok(()),
            other => Err(format!("expected '{expected}', found {other:?}")),
        }
    }

    fn take_name(&mut self) -> Result<String, String> {
        match self.next() {
            Some(Token::Name(name)) => Ok(name),
            other => Err(format!("expected a name, found {other:?}")),
        }
    }

    fn parse_operation(&mut self) -> Result<Operation, String> {
        let mut name = None;
        let mut variable_defs = Vec::new();

        match self.peek() {
            Some(Token::Name(keyword)) => match keyword.as_str() {
                "query" => {
                    self.pos += 1;
                    if let Some(Token::Name(op_name)) = self.peek() {
                        name = Some(op_name.clone());
                        self.pos += 1;
                    }
                    if self.peek() == Some(&Token::Punct('(')) {
                        variable_defs = self.parse_variable_defs()?;
                    }
                }
                "mutation" | "subscription" => {
                    return Err(format!("{keyword} operations are not supported"));
                }
                other => return Err(format!("unexpected '{other}' at document start")),
            },
            // Anonymous shorthand: a bare selection set.
            Some(Token::Punct('{')) => {}
            _ => return Err("empty document".to_owned()),
        }

        let selections = self.parse_selection_set()?;
        Ok(Operation { name, variable_defs, selections })
    }

    fn parse_variable_defs(&mut self) -> Result<Vec<VariableDef>, String> {
        self.expect_punct('(')?;
        let mut defs = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Punct(')')) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Punct('$')) => {
                    self.pos += 1;
                    let name = self.take_name()?;
                    self.expect_punct(':')?;
                    let type_text = self.parse_type_text()?;
                    let default = if self.peek() == Some(&Token::Punct('=')) {
                        self.pos += 1;
                        Some(const_value(self.parse_arg_value()?)?)
                    } else {
                        None
                    };
                    defs.push(VariableDef { name, type_text, default });
                }
                _ => return Err("expected '$' or ')' in variable definitions".to_owned()),
            }
        }
        Ok(defs)
    }

    fn parse_type_text(&mut self) -> Result<String, String> {
        let mut text = String::new();
        if self.peek() == Some(&Token::Punct('[')) {
            self.pos += 1;
            text.push('[');
            text.push_str(&self.parse_type_text()?);
            self.expect_punct(']')?;
            text.push(']');
        } else {
            text.push_str(&self.take_name()?);
        }
        if self.peek() == Some(&Token::Punct('!')) {
            self.pos += 1;
            text.push('!');
        }
        Ok(text)
    }

    fn parse_selection_set(&mut self) -> Result<Vec<Field>, String> {
        self.expect_punct('{')?;
        let mut fields = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Punct('}')) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Name(_)) => fields.push(self.parse_field()?),
                Some(other) => return Err(format!("unexpected token in selection set: {other:?}")),
                None => return Err("unterminated selection set".to_owned()),
            }
        }
        if fields.is_empty() {
            return Err("selection set cannot be empty".to_owned());
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<Field, String> {
        let name = self.take_name()?;
        if self.peek() == Some(&Token::Punct(':')) {
            return Err("aliases are not supported".to_owned());
        }

        let mut arguments = Vec::new();
        if self.peek() == Some(&Token::Punct('(')) {
            self.pos += 1;
            loop {
                match self.peek() {
                    Some(Token::Punct(')')) => {
                        self.pos += 1;
                        break;
                    }
                    Some(Token::Name(_)) => {
                        let arg_name = self.take_name()?;
                        self.expect_punct(':')?;
                        arguments.push((arg_name, self.parse_arg_value()?));
                    }
                    _ => return Err("expected an argument name or ')'".to_owned()),
                }
            }
        }

        let selections = if self.peek() == Some(&Token::Punct('{')) {
            self.parse_selection_set()?
        } else {
            Vec::new()
        };

        Ok(Field { name, arguments, selections })
    }

    fn parse_arg_value(&mut self) -> Result<ArgValue, String> {
        match self.next() {
            Some(Token::Punct('$')) => Ok(ArgValue::Variable(self.take_name()?)),
            Some(Token::Int(n)) => Ok(ArgValue::Literal(Value::from(n))),
            Some(Token::Float(f)) => {
                Ok(ArgValue::Literal(Number::from_f64(f).map_or(Value::Null, Value::Number)))
            }
            Some(Token::Str(s)) => Ok(ArgValue::Literal(Value::String(s))),
            Some(Token::Name(name)) => Ok(ArgValue::Literal(name_literal(&name))),
            Some(Token::Punct('[')) => {
                let mut items = Vec::new();
                while self.peek() != Some(&Token::Punct(']')) {
                    if self.peek().is_none() {
                        return Err("unterminated list value".to_owned());
                    }
                    items.push(self.parse_arg_value()?);
                }
                self.pos += 1;
                Ok(ArgValue::List(items))
            }
            Some(Token::Punct('{')) => {
                let mut fields = Vec::new();
                loop {
                    match self.peek() {
                        Some(Token::Punct('}')) => {
                            self.pos += 1;
                            break;
                        }
                        Some(Token::Name(_)) => {
                            let field_name = self.take_name()?;
                            self.expect_punct(':')?;
                            fields.push((field_name, self.parse_arg_value()?));
                        }
                        _ => return Err("expected a field name or '}' in object value".to_owned()),
                    }
                }
                Ok(ArgValue::Object(fields))
            }
            other => Err(format!("expected a value, found {other:?}")),
        }
    }
}

/// `true` / `false` / `null` keywords; any other bare name is an enum value.
fn name_literal(name: &str) -> Value {
    match name {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        other => Value::String(other.to_owned()),
    }
}

/// Reduce a parsed value to a constant (default values cannot reference
/// variables).
fn const_value(value: ArgValue) -> Result<Value, String> {
    match value {
        ArgValue::Literal(v) => Ok(v),
        ArgValue::Variable(name) => Err(format!("variable ${name} not allowed in a default value")),
        ArgValue::List(items) => items
            .into_iter()
            .map(const_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        ArgValue::Object(fields) => {
            let mut map = Map::new();
            for (name, field) in fields {
                map.insert(name, const_value(field)?);
            }
            Ok(Value::Object(map))
        }
    }
}
