use crate::error::{MorseError, MorseResult};
use crate::patterns::{get_morse_pattern, CHARACTERS, PROSIGNS};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    pub plain: String,
    pub code: String,
}

/// Validated bidirectional plain/code table.
///
/// Built once from [`CHARACTERS`] and [`PROSIGNS`]. Single characters claim
/// the reverse map first, in table order; a prosign only claims a code that
/// nothing has claimed before it.
#[derive(Debug)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    plain_to_code: HashMap<String, usize>,
    code_to_plain: HashMap<String, usize>,
}

static STANDARD: OnceLock<Dictionary> = OnceLock::new();

impl Dictionary {
    /// The built-in table.
    ///
    /// # Panics
    /// Panics if the compiled-in table fails validation, which the test
    /// suite rules out.
    pub fn standard() -> &'static Dictionary {
        STANDARD.get_or_init(|| {
            Dictionary::build(CHARACTERS, PROSIGNS)
                .unwrap_or_else(|e| panic!("built-in morse table is invalid: {}", e))
        })
    }

    pub fn build(characters: &[(char, &str)], prosigns: &[&str]) -> MorseResult<Self> {
        let mut dictionary = Dictionary {
            entries: Vec::with_capacity(characters.len() + prosigns.len()),
            plain_to_code: HashMap::new(),
            code_to_plain: HashMap::new(),
        };

        for &(ch, code) in characters {
            if code.is_empty() || !code.chars().all(|c| matches!(c, '.' | '-' | '/')) {
                return Err(MorseError::Dictionary(format!(
                    "code {:?} for {:?} is not a dot-dash sequence",
                    code, ch
                )));
            }
            let plain = ch.to_string();
            if let Some(&other) = dictionary.code_to_plain.get(code) {
                return Err(MorseError::Dictionary(format!(
                    "{:?} and {:?} share code {}",
                    dictionary.entries[other].plain, plain, code
                )));
            }
            let index = dictionary.push(plain, code.to_string())?;
            dictionary.code_to_plain.insert(code.to_string(), index);
        }

        for name in prosigns {
            let code = prosign_code(characters, name)?;
            let plain = format!("<{}>", name);
            let index = dictionary.push(plain, code.clone())?;
            let owner = dictionary.code_to_plain.get(&code).copied();
            match owner {
                Some(owner) => debug!(
                    prosign = %dictionary.entries[index].plain,
                    code = %code,
                    decodes_as = %dictionary.entries[owner].plain,
                    "prosign code already claimed"
                ),
                None => {
                    dictionary.code_to_plain.insert(code, index);
                }
            }
        }

        debug!(
            entries = dictionary.entries.len(),
            codes = dictionary.code_to_plain.len(),
            "built morse dictionary"
        );
        Ok(dictionary)
    }

    fn push(&mut self, plain: String, code: String) -> MorseResult<usize> {
        if self.plain_to_code.contains_key(&plain) {
            return Err(MorseError::Dictionary(format!(
                "duplicate plain token {:?}",
                plain
            )));
        }
        let index = self.entries.len();
        self.plain_to_code.insert(plain.clone(), index);
        self.entries.push(DictionaryEntry { plain, code });
        Ok(index)
    }

    /// Code for a plain token: a single upper-case character or a bracketed
    /// prosign such as `<SK>`.
    pub fn code_for(&self, plain: &str) -> Option<&str> {
        self.plain_to_code
            .get(plain)
            .map(|&i| self.entries[i].code.as_str())
    }

    pub fn plain_for(&self, code: &str) -> Option<&str> {
        self.code_to_plain
            .get(code)
            .map(|&i| self.entries[i].plain.as_str())
    }

    /// Every (plain, code) pair in reference order: characters, then prosigns.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }
}

fn prosign_code(characters: &[(char, &str)], name: &str) -> MorseResult<String> {
    if name.is_empty() {
        return Err(MorseError::Dictionary("empty prosign name".to_string()));
    }
    name.chars()
        .map(|ch| {
            characters
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, code)| *code)
                .filter(|code| *code != "/")
                .ok_or_else(|| {
                    MorseError::Dictionary(format!(
                        "prosign <{}> uses unmapped character {:?}",
                        name, ch
                    ))
                })
        })
        .collect()
}

/// Full reference table of the built-in dictionary.
pub fn reference_table() -> &'static [DictionaryEntry] {
    Dictionary::standard().entries()
}

/// Code for a single character using the direct lookup table.
pub(crate) fn char_code(ch: char) -> Option<&'static str> {
    get_morse_pattern(ch)
}
