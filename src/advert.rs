// JSON-backed advert with attribute-style access and colored rendering.
//
// An `Advert` wraps a JSON object. Nested objects come back as adverts of
// their own, so `ad.get("location")` then `.get("address")` walks the tree.
// The price is the one mutable field and can never go negative.
//
// Rendering joins every value with " | " behind an ANSI color code chosen
// by the `ReprColor` type parameter.

use std::fmt;
use std::marker::PhantomData;

use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};

/// Words that can't be used as plain field names in calling code; a
/// trailing underscore (`class_`) is stripped before lookup.
pub const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// ANSI foreground code used when rendering an advert.
pub trait ReprColor {
    const CODE: u8;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Red;

impl ReprColor for Red {
    const CODE: u8 = 31;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Green;

impl ReprColor for Green {
    const CODE: u8 = 32;
}

/// A JSON object with attribute-style access.
#[derive(Debug, Clone, PartialEq)]
pub struct Advert<C: ReprColor = Red> {
    data: Map<String, Value>,
    color: PhantomData<C>,
}

/// Result of looking up a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<C: ReprColor = Red> {
    /// A nested object, wrapped as an advert
    Nested(Advert<C>),
    /// Any other JSON value
    Value(Value),
}

impl<C: ReprColor> Field<C> {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(v) => Some(v),
            Field::Nested(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn into_advert(self) -> Option<Advert<C>> {
        match self {
            Field::Nested(ad) => Some(ad),
            Field::Value(_) => None,
        }
    }
}

impl<C: ReprColor> Advert<C> {
    /// Parse a root advert from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Advert is not valid JSON")?;
        Self::from_value(value)
    }

    /// Wrap a root advert. The object must carry a `title`.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(data) = value else {
            anyhow::bail!("Advert must be a JSON object");
        };
        if !data.contains_key("title") {
            anyhow::bail!("title is required");
        }
        Self::wrap(data)
    }

    /// Wrap a nested object; no `title` required. Prices are checked at
    /// every depth so later lookups can't meet a bad one.
    fn wrap(data: Map<String, Value>) -> Result<Self> {
        validate_prices(&data)?;
        Ok(Self {
            data,
            color: PhantomData,
        })
    }

    /// The price, or 0 when the advert has none.
    pub fn price(&self) -> f64 {
        self.data
            .get("price")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Replace the price. Negative prices are rejected and leave the
    /// advert untouched.
    pub fn set_price(&mut self, price: f64) -> Result<()> {
        if price < 0.0 {
            anyhow::bail!("price must be >= 0");
        }
        let number = if price.fract() == 0.0 && price < 9_007_199_254_740_992.0 {
            Number::from(price as u64)
        } else {
            Number::from_f64(price).context("price must be a finite number")?
        };
        self.data.insert("price".to_string(), Value::Number(number));
        Ok(())
    }

    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(Value::as_str)
    }

    /// Look up a field by name. Nested objects come back as adverts.
    pub fn get(&self, name: &str) -> Option<Field<C>> {
        let key = resolve_key(name);
        match self.data.get(key)? {
            Value::Object(inner) => Self::wrap(inner.clone()).ok().map(Field::Nested),
            other => Some(Field::Value(other.clone())),
        }
    }

    /// Follow a dotted path such as `location.address`.
    pub fn path(&self, dotted: &str) -> Option<Field<C>> {
        let mut parts = dotted.split('.');
        let mut field = self.get(parts.next()?)?;
        for part in parts {
            field = field.into_advert()?.get(part)?;
        }
        Some(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Re-render with another color.
    pub fn recolor<D: ReprColor>(self) -> Advert<D> {
        Advert {
            data: self.data,
            color: PhantomData,
        }
    }
}

fn validate_prices(data: &Map<String, Value>) -> Result<()> {
    if let Some(price) = data.get("price") {
        let price = price.as_f64().context("price must be a number")?;
        if price < 0.0 {
            anyhow::bail!("price must be >= 0");
        }
    }
    for value in data.values() {
        if let Value::Object(inner) = value {
            validate_prices(inner)?;
        }
    }
    Ok(())
}

fn resolve_key(name: &str) -> &str {
    match name.strip_suffix('_') {
        Some(stem) if RESERVED_WORDS.contains(&stem) => stem,
        _ => name,
    }
}

impl<C: ReprColor> fmt::Display for Advert<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m", C::CODE)?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            match value {
                Value::Object(inner) => {
                    let nested: Advert<C> = Advert {
                        data: inner.clone(),
                        color: PhantomData,
                    };
                    write!(f, "{nested}")?;
                }
                _ if key == "price" => write!(f, "{value} \u{20bd}")?,
                Value::String(s) => f.write_str(s)?,
                _ => write!(f, "{value}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_price_defaults_to_zero() {
        let ad: Advert = Advert::from_value(json!({"title": "Вельш-корги", "class": "dogs"}))
            .unwrap();
        assert_eq!(ad.price(), 0.0);
    }

    #[test]
    fn reserved_word_suffix_is_stripped() {
        let ad: Advert = Advert::from_value(json!({"title": "t", "class": "dogs"})).unwrap();
        assert_eq!(ad.get("class_").unwrap().as_str(), Some("dogs"));
        // Not a reserved word: the underscore is part of the key
        assert!(ad.get("title_").is_none());
    }

    #[test]
    fn renders_with_color_and_ruble() {
        let ad: Advert = Advert::from_value(json!({"title": "python", "price": 10})).unwrap();
        assert_eq!(ad.to_string(), "\x1b[31mpython | 10 \u{20bd}");
        let green: Advert<Green> = ad.recolor();
        assert!(green.to_string().starts_with("\x1b[32m"));
    }
}
