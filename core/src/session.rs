use crate::codec;
use crate::error::MorseResult;
use crate::interpret::Scribe;
use crate::types::{MorseSymbol, ScribeParams, ScribeState};

/// A scribe together with the code and plain text buffers it writes into.
///
/// Mirrors a transcriber screen: key presses append to the code buffer,
/// encode/decode copy between the two buffers, `reset` forgets the
/// operator's speed and `clear` empties the buffers.
#[derive(Debug, Clone, Default)]
pub struct ScribeSession {
    scribe: Scribe,
    code: String,
    plain: String,
}

impl ScribeSession {
    pub fn new(params: ScribeParams) -> MorseResult<Self> {
        Ok(Self {
            scribe: Scribe::new(params)?,
            code: String::new(),
            plain: String::new(),
        })
    }

    pub fn scribe(&self) -> &Scribe {
        &self.scribe
    }

    pub fn params(&self) -> &ScribeParams {
        self.scribe.params()
    }

    pub fn set_params(&mut self, params: ScribeParams) -> MorseResult<()> {
        self.scribe.set_params(params)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn set_plain(&mut self, plain: impl Into<String>) {
        self.plain = plain.into();
    }

    pub fn press(&mut self, timestamp_ms: f64) -> Vec<MorseSymbol> {
        let symbols = self.scribe.press(timestamp_ms);
        self.absorb(symbols)
    }

    pub fn release(&mut self, timestamp_ms: f64) -> Vec<MorseSymbol> {
        let symbols = self.scribe.release(timestamp_ms);
        self.absorb(symbols)
    }

    fn absorb(&mut self, symbols: Vec<MorseSymbol>) -> Vec<MorseSymbol> {
        self.code
            .extend(symbols.iter().copied().filter_map(MorseSymbol::code_char));
        if self.scribe.params().auto_decode && self.scribe.state() == ScribeState::Calibrated {
            self.decode();
        }
        symbols
    }

    /// Replace the code buffer with the encoding of the plain buffer.
    pub fn encode(&mut self) -> &str {
        self.code = codec::encode(&self.plain, &self.scribe.params().codec_options());
        &self.code
    }

    /// Replace the plain buffer with the decoding of the code buffer.
    pub fn decode(&mut self) -> &str {
        self.plain = codec::decode(&self.code, &self.scribe.params().codec_options());
        &self.plain
    }

    /// Forget calibration. Buffers are left alone.
    pub fn reset(&mut self) {
        self.scribe.reset();
    }

    /// Empty both buffers and any unclassified events. Calibration is kept.
    pub fn clear(&mut self) {
        self.code.clear();
        self.plain.clear();
        self.scribe.discard_pending();
    }
}
