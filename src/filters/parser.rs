//! Filter parser for one-shot catalog searches.
//!
//! Turns `field:value` arguments into a [`FilterExpr`] that maps onto the catalog form.
//!
//! # Syntax
//!
//! ```text
//! filter_expr := field_filter*
//! field_filter := field_name:value | field_name:"quoted value"
//! field_name := category | brand | age | species | type | purpose | price_min | price_max
//! ```
//!
//! Field names are case-insensitive. Repeating a field selects several values for it.
//!
//! # Examples
//!
//! ```rust
//! # use petshop_storefront::filters::parser::parse_filter;
//! // Two species and a brand
//! let expr = parse_filter("species:1 species:2 brand:4").unwrap();
//! assert_eq!(expr.filters.len(), 3);
//!
//! // Price bounds
//! let expr = parse_filter("price_min:100 price_max:\"2500.50\"").unwrap();
//! assert_eq!(expr.filters[1].value, "2500.50");
//! ```
//!
//! # Validation
//!
//! The product search rejects anything it cannot use, so the parser does too:
//!
//! - facet values must be positive integer ids
//! - price bounds must be non-negative numbers
//! - empty field names or values are rejected

use anyhow::{Context, Result, anyhow};

use super::ast::{FieldFilter, FilterExpr, FilterField};

/// field:value pair produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    field: String,
    value: String,
}

/// Tokenize filter input string into field:value tokens
///
/// Supports:
/// - field:value patterns
/// - field:"quoted value" with spaces
/// - Whitespace separation
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        let Some(colon_pos) = word.find(':') else {
            return Err(anyhow!("Invalid token: '{}' (expected field:value)", word));
        };

        let field = word[..colon_pos].to_string();
        let mut value = word[colon_pos + 1..].to_string();

        if value.starts_with('"') {
            value = read_quoted_value(&mut chars, &value)?;
        }

        if field.is_empty() || value.trim().is_empty() {
            return Err(anyhow!("Invalid field:value format: {}", word));
        }

        tokens.push(Token { field, value: value.trim().to_string() });
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value, handling the case where word already contains the opening quote
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    FilterField::from_name(field).ok_or_else(|| {
        let valid: Vec<&str> = FilterField::ALL.iter().map(|f| f.as_str()).collect();
        anyhow!("Unknown field: '{}' (valid fields: {})", field, valid.join(", "))
    })
}

/// Parse filter string into FilterExpr
///
/// Examples:
/// - "species:1" → single filter
/// - "species:1 brand:2" → filters on two fields
/// - "species:1 species:2" → two accepted values for one field
/// - "price_min:\"99.90\"" → quoted value
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    if input.trim().is_empty() {
        return Ok(FilterExpr::new());
    }

    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut expr = FilterExpr::new();
    for token in tokens {
        let field = parse_field(&token.field)?;
        validate_value(field, &token.value)?;
        expr.add_filter(FieldFilter::new(field, token.value));
    }

    Ok(expr)
}

/// Parse several command-line arguments as one filter expression
pub fn parse_filter_args(args: &[String]) -> Result<FilterExpr> {
    let quoted: Vec<String> = args
        .iter()
        .map(|arg| match arg.split_once(':') {
            Some((field, value)) if value.contains(char::is_whitespace) => {
                format!("{}:\"{}\"", field, value)
            }
            _ => arg.clone(),
        })
        .collect();
    parse_filter(&quoted.join(" "))
}

/// Validate filter value based on field type
fn validate_value(field: FilterField, value: &str) -> Result<()> {
    if field.is_facet() {
        match value.parse::<u64>() {
            Ok(id) if id > 0 => Ok(()),
            _ => Err(anyhow!("Invalid {} id: '{}' (expected a positive integer)", field, value)),
        }
    } else {
        match value.parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => Ok(()),
            Ok(_) => Err(anyhow!("Invalid {}: '{}' (price cannot be negative)", field, value)),
            Err(_) => Err(anyhow!("Invalid {}: '{}' (expected a number)", field, value)),
        }
    }
}
