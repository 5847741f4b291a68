// Text <-> code translation.
//
// Neither direction fails: unmappable characters encode as '*' and unknown
// dot-dash runs decode as an <E/T> label. The two directions are not exact
// inverses for prosign fallbacks or codes shared by several tokens.

use crate::dictionary::{char_code, Dictionary};
use crate::patterns::BREAK_CODE;
use crate::types::CodecOptions;

/// Marker emitted for characters with no code.
pub const UNKNOWN_SENTINEL: char = '*';

/// Translate plain text to code text.
///
/// Text between `<` and `>` is sent as one prosign with no letter spacing.
pub fn encode(plaintext: &str, options: &CodecOptions) -> String {
    let dictionary = Dictionary::standard();
    let mut code = String::new();
    let mut token = String::new();
    let mut in_prosign = false;
    let mut bracketed = false;

    for ch in plaintext.to_uppercase().chars() {
        match ch {
            '<' => {
                in_prosign = true;
                bracketed = true;
                continue;
            }
            '>' => in_prosign = false,
            _ => token.push(ch),
        }
        if !in_prosign {
            encode_token(&token, bracketed, dictionary, options, &mut code);
            token.clear();
            bracketed = false;
        }
    }

    // An unterminated prosign is never sent
    code
}

fn encode_token(
    token: &str,
    bracketed: bool,
    dictionary: &Dictionary,
    options: &CodecOptions,
    code: &mut String,
) {
    match token {
        "" => {}
        " " => code.push('/'),
        "\n" => {
            if options.interpret_break && !code.ends_with('\n') {
                code.push(' ');
                code.push_str(BREAK_CODE);
            }
            code.push('\n');
        }
        _ => {
            if code.ends_with(|c: char| c == '.' || c == '-') {
                code.push(' ');
            }
            let found = if bracketed {
                dictionary.code_for(&format!("<{}>", token))
            } else {
                dictionary.code_for(token)
            };
            match found {
                Some(pattern) => code.push_str(pattern),
                None => {
                    // Unknown prosign: send its characters back to back
                    for ch in token.chars() {
                        match char_code(ch) {
                            Some(pattern) => code.push_str(pattern),
                            None => code.push(UNKNOWN_SENTINEL),
                        }
                    }
                }
            }
        }
    }
}

/// Translate code text to plain text.
pub fn decode(codetext: &str, options: &CodecOptions) -> String {
    let dictionary = Dictionary::standard();
    let mut plain = String::new();

    for token in CodeTokens::new(codetext) {
        match token {
            "/" => {
                if !options.interpret_break || !plain.ends_with('\n') {
                    plain.push(' ');
                }
            }
            "\n" => {
                if !options.interpret_break || !plain.ends_with("\n\n") {
                    plain.push('\n');
                }
            }
            "*" => plain.push(UNKNOWN_SENTINEL),
            run => match dictionary.plain_for(run) {
                Some(text) => {
                    plain.push_str(text);
                    if options.interpret_break && run == BREAK_CODE {
                        plain.push_str("\n\n");
                    }
                }
                None => plain.push_str(&unknown_label(run)),
            },
        }
    }

    plain
}

/// Readable stand-in for an unmapped run: dots become E, dashes become T.
pub fn unknown_label(run: &str) -> String {
    let mut label = String::with_capacity(run.len() + 2);
    label.push('<');
    label.extend(run.chars().map(|c| if c == '.' { 'E' } else { 'T' }));
    label.push('>');
    label
}

/// Splits code text into dot-dash runs and single `/`, `\n` or `*` tokens.
/// Anything else only separates tokens.
struct CodeTokens<'a> {
    rest: &'a str,
}

impl<'a> CodeTokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for CodeTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self
            .rest
            .find(|c: char| matches!(c, '.' | '-' | '/' | '\n' | '*'))?;
        let rest = &self.rest[start..];
        let len = if rest.starts_with(|c: char| c == '.' || c == '-') {
            rest.find(|c: char| c != '.' && c != '-').unwrap_or(rest.len())
        } else {
            1
        };
        let (token, tail) = rest.split_at(len);
        self.rest = tail;
        Some(token)
    }
}
