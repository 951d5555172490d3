use std::fmt::{Display, Formatter};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Ticker symbol as sent to the remote API.
///
/// Exchange suffixes such as `SHOP.TRT` or `BRK-B` are accepted; the first
/// character may be a digit because some listings (`0700.HK`) start with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" msft ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "MSFT");
    }

    #[test]
    fn accepts_exchange_suffixes() {
        assert_eq!(Symbol::parse("shop.trt").expect("valid").as_str(), "SHOP.TRT");
        assert_eq!(Symbol::parse("0700.HK").expect("valid").as_str(), "0700.HK");
    }

    #[test]
    fn rejects_query_metacharacters() {
        let err = Symbol::parse("IBM&apikey=x").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolInvalidChar { ch: '&', index: 3 });
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }
}
