use crate::error::{MorseError, MorseResult};
use serde::{Deserialize, Serialize};

/// Classified output of the timing interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MorseSymbol {
    Dot,
    Dash,
    SymbolGap,
    LetterGap,
    WordGap,
}

impl MorseSymbol {
    /// Character this symbol contributes to a code string.
    /// Intra-character gaps contribute nothing.
    pub fn code_char(self) -> Option<char> {
        match self {
            MorseSymbol::Dot => Some('.'),
            MorseSymbol::Dash => Some('-'),
            MorseSymbol::SymbolGap => None,
            MorseSymbol::LetterGap => Some(' '),
            MorseSymbol::WordGap => Some('/'),
        }
    }

    /// Unit weight used by calibration: dot = 1, dash = 3.
    pub fn units(self) -> u32 {
        match self {
            MorseSymbol::Dot => 1,
            MorseSymbol::Dash => 3,
            _ => 0,
        }
    }
}

/// Render a run of symbols as code text.
pub fn symbols_to_code(symbols: &[MorseSymbol]) -> String {
    symbols.iter().filter_map(|s| s.code_char()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    On,
    Off,
}

/// A raw key interval: how long the key was held down (`On`) or left up (`Off`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub kind: SignalKind,
    pub duration_ms: f64,
}

impl Signal {
    pub fn on(duration_ms: f64) -> Self {
        Self {
            kind: SignalKind::On,
            duration_ms,
        }
    }

    pub fn off(duration_ms: f64) -> Self {
        Self {
            kind: SignalKind::Off,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScribeState {
    Uncalibrated,
    Calibrated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecOptions {
    /// Treat the BT prosign as a paragraph break and newlines as BT.
    pub interpret_break: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScribeParams {
    pub letter_gap_units: f64,
    pub word_gap_units: f64,
    pub auto_decode: bool,
    pub interpret_break: bool,
}

impl Default for ScribeParams {
    fn default() -> Self {
        Self {
            letter_gap_units: 3.0,
            word_gap_units: 7.0,
            auto_decode: false,
            interpret_break: false,
        }
    }
}

impl ScribeParams {
    pub fn validate(&self) -> MorseResult<()> {
        validate_gap_units(self.letter_gap_units, self.word_gap_units)
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            interpret_break: self.interpret_break,
        }
    }

    /// Gap length (in units) separating an intra-character gap from a letter gap.
    pub fn symbol_vs_letter_units(&self) -> f64 {
        (1.0 + self.letter_gap_units) / 2.0
    }

    /// Gap length (in units) separating a letter gap from a word gap.
    pub fn letter_vs_word_units(&self) -> f64 {
        (self.letter_gap_units + self.word_gap_units) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackParams {
    pub wpm: f64,
    pub letter_gap_units: f64,
    pub word_gap_units: f64,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            wpm: 20.0,
            letter_gap_units: 3.0,
            word_gap_units: 7.0,
        }
    }
}

impl PlaybackParams {
    pub fn validate(&self) -> MorseResult<()> {
        if !self.wpm.is_finite() || self.wpm <= 0.0 {
            return Err(MorseError::InvalidConfig(format!(
                "wpm must be a positive number, got {}",
                self.wpm
            )));
        }
        validate_gap_units(self.letter_gap_units, self.word_gap_units)
    }
}

fn validate_gap_units(letter_gap_units: f64, word_gap_units: f64) -> MorseResult<()> {
    if !letter_gap_units.is_finite() || letter_gap_units <= 1.0 {
        return Err(MorseError::InvalidConfig(format!(
            "letter gap must be longer than one unit, got {}",
            letter_gap_units
        )));
    }
    if !word_gap_units.is_finite() || word_gap_units <= letter_gap_units {
        return Err(MorseError::InvalidConfig(format!(
            "word gap ({}) must be longer than letter gap ({})",
            word_gap_units, letter_gap_units
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MorseElementType {
    Tone,
    Silence,
}

/// One step of a playback schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorseElement {
    pub element_type: MorseElementType,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretResult {
    pub code: String,
    pub text: String,
    pub calibrated: bool,
    pub unit_ms: Option<f64>,
    pub signals_processed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scribe_params_json_defaults() {
        let params: ScribeParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.letter_gap_units, 3.0);
        assert_eq!(params.word_gap_units, 7.0);
        assert!(!params.auto_decode);

        let params: ScribeParams =
            serde_json::from_str(r#"{"wordGapUnits": 9, "autoDecode": true}"#).unwrap();
        assert_eq!(params.letter_gap_units, 3.0);
        assert_eq!(params.word_gap_units, 9.0);
        assert!(params.auto_decode);
        assert!(!params.interpret_break);
    }

    #[test]
    fn test_gap_thresholds() {
        let params = ScribeParams::default();
        assert_eq!(params.symbol_vs_letter_units(), 2.0);
        assert_eq!(params.letter_vs_word_units(), 5.0);
    }

    #[test]
    fn test_params_validation() {
        assert!(ScribeParams::default().validate().is_ok());

        let params = ScribeParams {
            letter_gap_units: 1.0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(MorseError::InvalidConfig(_))));

        let params = ScribeParams {
            letter_gap_units: 5.0,
            word_gap_units: 5.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = PlaybackParams {
            wpm: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_signal_json() {
        let signals: Vec<Signal> =
            serde_json::from_str(r#"[{"kind": "on", "durationMs": 60}, {"kind": "off", "durationMs": 180.5}]"#)
                .unwrap();
        assert_eq!(signals, vec![Signal::on(60.0), Signal::off(180.5)]);
    }

    #[test]
    fn test_symbols_to_code() {
        let symbols = [
            MorseSymbol::Dot,
            MorseSymbol::SymbolGap,
            MorseSymbol::Dash,
            MorseSymbol::LetterGap,
            MorseSymbol::Dash,
            MorseSymbol::WordGap,
        ];
        assert_eq!(symbols_to_code(&symbols), ".- -/");
    }
}
