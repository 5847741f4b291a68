// Morse code translation and straight-key transcription
// Text <-> code codec plus an interpreter that learns the operator's speed

pub mod codec;
pub mod dictionary;
pub mod error;
pub mod interpret;
pub mod patterns;
pub mod session;
pub mod timing;
pub mod types;

// Re-export main public API
pub use codec::{decode, encode};
pub use dictionary::{reference_table, Dictionary, DictionaryEntry};
pub use error::{MorseError, MorseResult};
pub use interpret::{interpret_signals, Scribe};
pub use session::ScribeSession;
pub use timing::playback_schedule;
pub use types::*;

// Public API for direct Rust usage
pub fn encode_text(text: &str, params: &ScribeParams) -> String {
    codec::encode(text, &params.codec_options())
}

pub fn decode_code(code: &str, params: &ScribeParams) -> String {
    codec::decode(code, &params.codec_options())
}

/// Schedule for sounding out `text` at the given speed.
pub fn generate_playback(
    text: &str,
    codec_options: &CodecOptions,
    playback_params: &PlaybackParams,
) -> MorseResult<Vec<MorseElement>> {
    let code = codec::encode(text, codec_options);
    timing::playback_schedule(&code, playback_params)
}
