//! Key combination value object
//!
//! A key combination is a set of modifiers plus exactly one key. Parsing is
//! whitespace-, case- and modifier-order-insensitive, so `"Ctrl+E"`,
//! `"ctrl + e"` and `"e+ctrl"` all normalize to `ctrl+e`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::KeyComboParseError;

/// Modifier keys, ordered canonically for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Super,
}

impl Modifier {
    /// Get the canonical token
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Super => "super",
        }
    }

    /// Resolve a lowercase token (including aliases) to a modifier
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "ctrl" | "control" | "ctl" => Some(Self::Ctrl),
            "alt" | "option" | "opt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "super" | "win" | "windows" | "meta" | "cmd" | "command" => Some(Self::Super),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical spelling for keys that have common aliases
fn canonical_key(token: &str) -> &str {
    match token {
        "return" => "enter",
        "escape" => "esc",
        "del" => "delete",
        "ins" => "insert",
        "pgup" => "pageup",
        "pgdn" | "pgdown" => "pagedown",
        "spacebar" => "space",
        other => other,
    }
}

/// Normalized key combination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    modifiers: BTreeSet<Modifier>,
    key: String,
}

impl KeyCombination {
    /// Create a combination from parts, normalizing the key token
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: &str) -> Self {
        let key = key.trim().to_lowercase();
        Self {
            modifiers: modifiers.into_iter().collect(),
            key: canonical_key(&key).to_string(),
        }
    }

    /// Modifiers in canonical order
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    /// Whether the given modifier is part of this combination
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// The non-modifier key (lowercase, canonical spelling)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical string form, e.g. `ctrl+shift+e`
    pub fn normalized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyCombination {
    type Err = KeyComboParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(KeyComboParseError::Empty);
        }

        let lower = compact.to_lowercase();

        // A trailing "+" means the key itself is the plus sign
        let (body, plus_key) = match lower.strip_suffix("++") {
            Some(rest) => (rest.to_string(), true),
            None if lower == "+" => (String::new(), true),
            None => (lower, false),
        };

        let mut modifiers = BTreeSet::new();
        let mut key: Option<String> = plus_key.then(|| "+".to_string());

        for token in body.split('+').filter(|t| !t.is_empty()) {
            if let Some(modifier) = Modifier::from_token(token) {
                modifiers.insert(modifier);
                continue;
            }
            if let Some(existing) = key.replace(canonical_key(token).to_string()) {
                return Err(KeyComboParseError::MultipleKeys {
                    input: s.to_string(),
                    first: existing,
                    second: token.to_string(),
                });
            }
        }

        let key = key.ok_or_else(|| KeyComboParseError::MissingKey {
            input: s.to_string(),
        })?;

        Ok(Self { modifiers, key })
    }
}
