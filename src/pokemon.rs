// Toy Pokémon hierarchy.
//
// `BasePokemon` renders its type by name; `Pokemon` picks up the emoji
// rendering from the `EmojiDisplay` trait, which works for anything that
// exposes a name and a type.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

/// The elemental types the emoji table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokeType {
    Electric,
    Grass,
    Water,
}

impl PokeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PokeType::Electric => "electric",
            PokeType::Grass => "grass",
            PokeType::Water => "water",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PokeType::Electric => "\u{26a1}\u{fe0f}",
            PokeType::Grass => "\u{1f33f}",
            PokeType::Water => "\u{1f4a7}",
        }
    }
}

impl FromStr for PokeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "electric" => Ok(PokeType::Electric),
            "grass" => Ok(PokeType::Grass),
            "water" => Ok(PokeType::Water),
            other => anyhow::bail!("Unknown pokemon type: {other:?}"),
        }
    }
}

impl fmt::Display for PokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything with a name and an elemental type.
pub trait Creature {
    fn name(&self) -> &str;
    fn poketype(&self) -> PokeType;
}

/// Renders a creature as `name/emoji`.
pub trait EmojiDisplay: Creature {
    fn emoji_label(&self) -> String {
        format!("{}/{}", self.name(), self.poketype().emoji())
    }
}

/// Plain creature, rendered as `name/type`.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePokemon {
    pub name: String,
    pub poketype: PokeType,
}

impl BasePokemon {
    pub fn new(name: impl Into<String>, poketype: PokeType) -> Self {
        Self {
            name: name.into(),
            poketype,
        }
    }
}

impl Creature for BasePokemon {
    fn name(&self) -> &str {
        &self.name
    }

    fn poketype(&self) -> PokeType {
        self.poketype
    }
}

impl fmt::Display for BasePokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.poketype)
    }
}

/// A `BasePokemon` that displays its type as an emoji.
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon(BasePokemon);

impl Pokemon {
    pub fn new(name: impl Into<String>, poketype: PokeType) -> Self {
        Self(BasePokemon::new(name, poketype))
    }

    /// Parse the type from its name, failing on types without an emoji.
    pub fn parse(name: impl Into<String>, poketype: &str) -> Result<Self> {
        Ok(Self::new(name, poketype.parse()?))
    }

    pub fn base(&self) -> &BasePokemon {
        &self.0
    }
}

impl Creature for Pokemon {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn poketype(&self) -> PokeType {
        self.0.poketype()
    }
}

impl EmojiDisplay for Pokemon {}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.emoji_label())
    }
}
