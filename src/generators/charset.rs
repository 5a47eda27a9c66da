// src/generators/charset.rs
use serde::{Deserialize, Serialize};

/// The semantic category a password character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassKind::Uppercase => write!(f, "uppercase"),
            ClassKind::Lowercase => write!(f, "lowercase"),
            ClassKind::Digit => write!(f, "digit"),
            ClassKind::Special => write!(f, "special"),
        }
    }
}

/// A fixed alphabet for one class. Alphabets are ASCII only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterClass {
    pub kind: ClassKind,
    pub alphabet: &'static [u8],
}

// I and O are left out, they read as 1/l and 0
pub const UPPERCASE: CharacterClass = CharacterClass {
    kind: ClassKind::Uppercase,
    alphabet: b"ABCDEFGHJKLMNPQRSTUVWXYZ",
};

// no l
pub const LOWERCASE: CharacterClass = CharacterClass {
    kind: ClassKind::Lowercase,
    alphabet: b"abcdefghijkmnopqrstuvwxyz",
};

// no 0 or 1
pub const DIGITS: CharacterClass = CharacterClass {
    kind: ClassKind::Digit,
    alphabet: b"23456789",
};

pub const SPECIAL: CharacterClass = CharacterClass {
    kind: ClassKind::Special,
    alphabet: b"!@#$%^&*",
};

/// Mandatory classes, in the order their guaranteed characters are drawn.
pub const CLASSES: [CharacterClass; 4] = [UPPERCASE, LOWERCASE, DIGITS, SPECIAL];

impl CharacterClass {
    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.alphabet.contains(&(c as u8))
    }
}

/// Concatenation of every class alphabet, used for the uniform fill.
pub fn union_alphabet() -> Vec<u8> {
    CLASSES
        .iter()
        .flat_map(|class| class.alphabet.iter().copied())
        .collect()
}

/// Which class a character falls into, if any.
pub fn classify(c: char) -> Option<ClassKind> {
    CLASSES
        .iter()
        .find(|class| class.contains(c))
        .map(|class| class.kind)
}

/// True when `password` has at least one character from every class.
pub fn covers_all_classes(password: &str) -> bool {
    CLASSES
        .iter()
        .all(|class| password.chars().any(|c| class.contains(c)))
}
