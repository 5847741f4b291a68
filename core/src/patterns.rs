// Morse code pattern table - O(1) character-to-code mapping
// Codes are written with '.' for a dot and '-' for a dash.

pub type MorsePattern = &'static str;

/// Single-character entries in reference order.
///
/// Order matters: the reverse (code to plain) map is claimed in this order
/// before any prosign is considered.
pub const CHARACTERS: &[(char, MorsePattern)] = &[
    // Letters
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    // Numbers
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    // Word separator
    (' ', "/"),
    // Punctuation
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('"', ".-..-."),
    ('@', ".--.-."),
];

/// Prosign names in registration order. Earlier names win reverse-map
/// collisions against later ones; single characters always win.
pub const PROSIGNS: &[&str] = &[
    "AS",    // Wait
    "DE",    // This is from
    "AA",    // Unknown station
    "AR",    // Out
    "VE",    // Verified
    "INT",   // Interrogative
    "HH",    // Correction
    "BT",    // Break
    "KA",    // Attention
    "CT",    // Start of transmission
    "KN",    // Invitation for named station to transmit
    "NJ",    // Shift to Wabun code
    "SK",    // End of contact
    "SN",    // Understood
    "SOS",   // Distress
    "NNNNN", // Answering sign (obsolete)
    "RRRRR", // Receipt (obsolete)
];

/// Code of the BT (break) prosign.
pub const BREAK_CODE: MorsePattern = "-...-";

// Direct lookup table for ASCII; lowercase letters share the uppercase codes
static MORSE_PATTERNS: [Option<MorsePattern>; 128] = {
    let mut patterns = [None; 128];
    let mut i = 0;
    while i < CHARACTERS.len() {
        let (ch, code) = CHARACTERS[i];
        patterns[ch as usize] = Some(code);
        patterns[ch.to_ascii_lowercase() as usize] = Some(code);
        i += 1;
    }
    patterns
};

/// Get morse pattern for a character - O(1) lookup
pub fn get_morse_pattern(ch: char) -> Option<MorsePattern> {
    MORSE_PATTERNS.get(ch as usize).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get_morse_pattern('A'), Some(".-"));
        assert_eq!(get_morse_pattern('a'), Some(".-"));
        assert_eq!(get_morse_pattern('9'), Some("----."));
    }

    #[test]
    fn test_lookup_misses() {
        assert_eq!(get_morse_pattern('#'), None);
        assert_eq!(get_morse_pattern('!'), None);
        assert_eq!(get_morse_pattern('$'), None);
        assert_eq!(get_morse_pattern('é'), None);
        assert_eq!(get_morse_pattern('\n'), None);
    }

    #[test]
    fn test_break_code_matches_bt() {
        let bt: String = "BT".chars().filter_map(get_morse_pattern).collect();
        assert_eq!(bt, BREAK_CODE);
    }
}
