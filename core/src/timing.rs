use crate::error::MorseResult;
use crate::types::{MorseElement, MorseElementType, PlaybackParams};

// Timing constants
const UNIT_MS_AT_ONE_WPM: f64 = 1200.0; // PARIS standard: unit = 1200 / WPM milliseconds
const UNITS_PER_DASH: f64 = 3.0;
const UNITS_PER_ELEMENT_GAP: f64 = 1.0;

/// Unit duration in milliseconds for a speed in words per minute.
pub fn unit_ms(wpm: f64) -> f64 {
    UNIT_MS_AT_ONE_WPM / wpm
}

/// Build the tone/silence schedule a player follows to sound out `code`.
///
/// Every mark is followed by a one-unit silence, so a letter space adds
/// `letter_gap_units - 1` and a word space `word_gap_units - 1`. Adjacent
/// silences are merged. Characters other than `.`, `-`, ` ` and `/` are
/// skipped.
pub fn playback_schedule(code: &str, params: &PlaybackParams) -> MorseResult<Vec<MorseElement>> {
    params.validate()?;

    let unit = unit_ms(params.wpm);
    let mut elements: Vec<MorseElement> = Vec::new();

    for symbol in code.chars() {
        let (tone_units, silence_units) = match symbol {
            '.' => (1.0, UNITS_PER_ELEMENT_GAP),
            '-' => (UNITS_PER_DASH, UNITS_PER_ELEMENT_GAP),
            ' ' => (0.0, params.letter_gap_units - UNITS_PER_ELEMENT_GAP),
            '/' => (0.0, params.word_gap_units - UNITS_PER_ELEMENT_GAP),
            _ => continue,
        };

        if tone_units > 0.0 {
            elements.push(MorseElement {
                element_type: MorseElementType::Tone,
                duration_ms: tone_units * unit,
            });
        }

        let silence_ms = silence_units * unit;
        match elements.last_mut() {
            Some(last) if last.element_type == MorseElementType::Silence => {
                last.duration_ms += silence_ms;
            }
            _ => elements.push(MorseElement {
                element_type: MorseElementType::Silence,
                duration_ms: silence_ms,
            }),
        }
    }

    Ok(elements)
}

/// Total length of a schedule in milliseconds.
pub fn schedule_duration_ms(elements: &[MorseElement]) -> f64 {
    elements.iter().map(|e| e.duration_ms).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MorseError;

    fn tone(ms: f64) -> MorseElement {
        MorseElement {
            element_type: MorseElementType::Tone,
            duration_ms: ms,
        }
    }

    fn silence(ms: f64) -> MorseElement {
        MorseElement {
            element_type: MorseElementType::Silence,
            duration_ms: ms,
        }
    }

    #[test]
    fn test_unit_from_wpm() {
        assert_eq!(unit_ms(20.0), 60.0);
        assert_eq!(unit_ms(12.0), 100.0);
    }

    #[test]
    fn test_letter_a() {
        let schedule = playback_schedule(".-", &PlaybackParams::default()).unwrap();
        assert_eq!(schedule, vec![tone(60.0), silence(60.0), tone(180.0), silence(60.0)]);
    }

    #[test]
    fn test_gaps_are_merged() {
        let schedule = playback_schedule(". ./.", &PlaybackParams::default()).unwrap();
        assert_eq!(
            schedule,
            vec![
                tone(60.0),
                silence(180.0),
                tone(60.0),
                silence(420.0),
                tone(60.0),
                silence(60.0),
            ]
        );
    }

    #[test]
    fn test_custom_gap_ratios() {
        let params = PlaybackParams {
            wpm: 12.0,
            letter_gap_units: 4.0,
            word_gap_units: 10.0,
        };
        let schedule = playback_schedule("./.", &params).unwrap();
        assert_eq!(schedule, vec![tone(100.0), silence(1000.0), tone(100.0), silence(100.0)]);
    }

    #[test]
    fn test_skips_other_characters() {
        let schedule = playback_schedule("*\n.", &PlaybackParams::default()).unwrap();
        assert_eq!(schedule, vec![tone(60.0), silence(60.0)]);
    }

    #[test]
    fn test_duration() {
        let schedule = playback_schedule("...", &PlaybackParams::default()).unwrap();
        assert_eq!(schedule_duration_ms(&schedule), 360.0);
    }

    #[test]
    fn test_invalid_wpm() {
        let params = PlaybackParams {
            wpm: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            playback_schedule(".", &params),
            Err(MorseError::InvalidConfig(_))
        ));
    }
}
