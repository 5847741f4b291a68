// End-to-end: text -> code -> playback schedule -> key events -> scribe -> text
use morse_scribe::{
    encode, playback_schedule, CodecOptions, MorseElement, MorseElementType, PlaybackParams,
    ScribeParams, ScribeSession, ScribeState,
};

/// Key a schedule into a session as press/release timestamps.
fn key_schedule(session: &mut ScribeSession, schedule: &[MorseElement], start_ms: f64) -> f64 {
    let mut t = start_ms;
    for element in schedule {
        match element.element_type {
            MorseElementType::Tone => {
                session.press(t);
                t += element.duration_ms;
                session.release(t);
            }
            MorseElementType::Silence => t += element.duration_ms,
        }
    }
    t
}

fn schedule_for(text: &str, wpm: f64) -> Vec<MorseElement> {
    let code = encode(text, &CodecOptions::default());
    playback_schedule(
        &code,
        &PlaybackParams {
            wpm,
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn test_perfect_keying_after_calibration_preamble() {
    let mut session = ScribeSession::new(ScribeParams {
        auto_decode: true,
        ..Default::default()
    })
    .unwrap();

    // Calibration eats the gaps of "TEE", so it arrives as "-.." (D)
    let schedule = schedule_for("TEE HELLO WORLD", 20.0);
    key_schedule(&mut session, &schedule, 0.0);

    assert_eq!(session.scribe().state(), ScribeState::Calibrated);
    assert_eq!(
        session.code(),
        "-../.... . .-.. .-.. ---/.-- --- .-. .-.. -.."
    );
    assert_eq!(session.plain(), "D HELLO WORLD");
    assert_eq!(session.scribe().unit_ms(), Some(60.0));
}

#[test]
fn test_second_message_after_clear() {
    let mut session = ScribeSession::default();
    let end = key_schedule(&mut session, &schedule_for("TEE", 15.0), 0.0);
    session.clear();

    // Gap to the next message is a word space, which lands first
    let schedule = schedule_for("CQ CQ", 15.0);
    key_schedule(&mut session, &schedule, end + 700.0);
    session.decode();
    assert_eq!(session.plain(), " CQ CQ");
}

#[test]
fn test_reset_forgets_speed() {
    let mut session = ScribeSession::default();
    let end = key_schedule(&mut session, &schedule_for("TEE", 20.0), 0.0);
    assert_eq!(session.scribe().state(), ScribeState::Calibrated);

    session.reset();
    session.clear();

    // Much slower operator; without a reset the old unit would misread these
    let schedule = schedule_for("TEE MEET", 6.0);
    key_schedule(&mut session, &schedule, end + 10_000.0);
    session.decode();
    assert_eq!(session.scribe().unit_ms(), Some(200.0));
    assert_eq!(session.plain(), "D MEET");
}

#[test]
fn test_prosign_keyed_as_one_run() {
    let mut session = ScribeSession::default();
    let end = key_schedule(&mut session, &schedule_for("TEE ", 20.0), 0.0);
    session.clear();

    let schedule = schedule_for("<SK>", 20.0);
    key_schedule(&mut session, &schedule, end);
    assert_eq!(session.code(), "/...-.-");
    session.decode();
    assert_eq!(session.plain(), " <SK>");
}
