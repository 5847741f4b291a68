use crate::codec;
use crate::error::MorseResult;
use crate::types::*;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Calibration is only attempted once more than this many events are buffered.
const CALIBRATION_MIN_EVENTS: usize = 4;

/// Calibration needs more than this many marks.
const CALIBRATION_MIN_MARKS: usize = 2;

/// A mark shorter than this many estimated units is a dot.
const DOT_VS_DASH_UNITS: f64 = 2.0;

/// Adaptive straight-key interpreter.
///
/// Starts with no idea of the operator's speed. Events are buffered until the
/// marks seen so far split clearly into short and long ones; from then on
/// every event is classified as it arrives against a running unit estimate
/// (`total_on_time_ms / total_on_units`) that keeps absorbing each new mark.
#[derive(Debug, Clone)]
pub struct Scribe {
    params: ScribeParams,
    total_on_time_ms: f64,
    total_on_units: u32,
    pending: VecDeque<Signal>,
    since: Option<f64>,
}

impl Scribe {
    pub fn new(params: ScribeParams) -> MorseResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            total_on_time_ms: 0.0,
            total_on_units: 0,
            pending: VecDeque::new(),
            since: None,
        })
    }

    pub fn params(&self) -> &ScribeParams {
        &self.params
    }

    /// Swap gap ratios or decode flags without losing calibration.
    pub fn set_params(&mut self, params: ScribeParams) -> MorseResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn state(&self) -> ScribeState {
        if self.total_on_units == 0 {
            ScribeState::Uncalibrated
        } else {
            ScribeState::Calibrated
        }
    }

    /// Current unit estimate in milliseconds, once calibrated.
    pub fn unit_ms(&self) -> Option<f64> {
        (self.total_on_units > 0).then(|| self.total_on_time_ms / self.total_on_units as f64)
    }

    pub fn total_on_time_ms(&self) -> f64 {
        self.total_on_time_ms
    }

    pub fn total_on_units(&self) -> u32 {
        self.total_on_units
    }

    /// Events recorded but not yet classified.
    pub fn pending(&self) -> &VecDeque<Signal> {
        &self.pending
    }

    /// Key went down at `timestamp_ms`. Records the preceding gap, if any.
    pub fn press(&mut self, timestamp_ms: f64) -> Vec<MorseSymbol> {
        let symbols = match self.since {
            Some(since) => self.push_signal(Signal::off(timestamp_ms - since)),
            None => Vec::new(),
        };
        self.since = Some(timestamp_ms);
        symbols
    }

    /// Key came up at `timestamp_ms`. Records the mark just finished.
    pub fn release(&mut self, timestamp_ms: f64) -> Vec<MorseSymbol> {
        let symbols = match self.since {
            Some(since) => self.push_signal(Signal::on(timestamp_ms - since)),
            None => Vec::new(),
        };
        self.since = Some(timestamp_ms);
        symbols
    }

    /// Record one interval and run a classification pass.
    ///
    /// Returns the symbols classified by this pass, in order. Intervals with a
    /// non-positive or non-finite duration are discarded.
    pub fn push_signal(&mut self, signal: Signal) -> Vec<MorseSymbol> {
        if !is_valid_duration(signal.duration_ms) {
            warn!(?signal, "discarding interval with invalid duration");
            return Vec::new();
        }
        self.pending.push_back(signal);
        match self.state() {
            ScribeState::Uncalibrated => self.calibrate(),
            ScribeState::Calibrated => self.drain(),
        }
    }

    /// Forget calibration, buffered events and the last transition time.
    pub fn reset(&mut self) {
        debug!(
            unit_ms = ?self.unit_ms(),
            discarded = self.pending.len(),
            "resetting scribe calibration"
        );
        self.total_on_time_ms = 0.0;
        self.total_on_units = 0;
        self.pending.clear();
        self.since = None;
    }

    /// Drop buffered events but keep calibration.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    fn calibrate(&mut self) -> Vec<MorseSymbol> {
        if self.pending.len() <= CALIBRATION_MIN_EVENTS {
            return Vec::new();
        }

        let marks: Vec<f64> = self
            .pending
            .iter()
            .filter(|s| s.kind == SignalKind::On)
            .map(|s| s.duration_ms)
            .collect();
        if marks.len() <= CALIBRATION_MIN_MARKS {
            debug!(marks = marks.len(), "too few marks to calibrate");
            return Vec::new();
        }

        let min = marks.iter().copied().fold(f64::INFINITY, f64::min);
        let max = marks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min * 2.0 >= max {
            debug!(min, max, "marks not yet split into dots and dashes");
            return Vec::new();
        }

        let middle = (min + max) / 2.0;
        let mut symbols = Vec::with_capacity(marks.len());
        let mut dropped_gaps = 0usize;
        // Gaps seen before calibration are not classified
        for signal in std::mem::take(&mut self.pending) {
            match signal.kind {
                SignalKind::On => {
                    let symbol = if signal.duration_ms < middle {
                        MorseSymbol::Dot
                    } else {
                        MorseSymbol::Dash
                    };
                    self.total_on_units += symbol.units();
                    self.total_on_time_ms += signal.duration_ms;
                    symbols.push(symbol);
                }
                SignalKind::Off => dropped_gaps += 1,
            }
        }

        debug!(
            min,
            max,
            middle,
            dropped_gaps,
            unit_ms = ?self.unit_ms(),
            "calibrated"
        );
        symbols
    }

    fn drain(&mut self) -> Vec<MorseSymbol> {
        let mut symbols = Vec::with_capacity(self.pending.len());
        while let Some(signal) = self.pending.pop_front() {
            let unit_ms = self.total_on_time_ms / self.total_on_units as f64;
            let symbol = match signal.kind {
                SignalKind::On => {
                    let symbol = classify_mark(signal.duration_ms, unit_ms);
                    self.total_on_units += symbol.units();
                    self.total_on_time_ms += signal.duration_ms;
                    symbol
                }
                SignalKind::Off => classify_gap(&self.params, signal.duration_ms, unit_ms),
            };
            trace!(?signal, unit_ms, ?symbol, "classified");
            symbols.push(symbol);
        }
        symbols
    }
}

impl Default for Scribe {
    fn default() -> Self {
        Self {
            params: ScribeParams::default(),
            total_on_time_ms: 0.0,
            total_on_units: 0,
            pending: VecDeque::new(),
            since: None,
        }
    }
}

fn is_valid_duration(duration_ms: f64) -> bool {
    duration_ms.is_finite() && duration_ms > 0.0
}

/// Dot or dash for a mark of `duration_ms` given a unit of `unit_ms`.
pub fn classify_mark(duration_ms: f64, unit_ms: f64) -> MorseSymbol {
    if duration_ms < DOT_VS_DASH_UNITS * unit_ms {
        MorseSymbol::Dot
    } else {
        MorseSymbol::Dash
    }
}

/// Symbol, letter or word gap for a space of `duration_ms` given a unit of `unit_ms`.
pub fn classify_gap(params: &ScribeParams, duration_ms: f64, unit_ms: f64) -> MorseSymbol {
    if duration_ms < params.symbol_vs_letter_units() * unit_ms {
        MorseSymbol::SymbolGap
    } else if duration_ms < params.letter_vs_word_units() * unit_ms {
        MorseSymbol::LetterGap
    } else {
        MorseSymbol::WordGap
    }
}

/// Run a recorded list of intervals through a fresh scribe.
pub fn interpret_signals(signals: &[Signal], params: &ScribeParams) -> MorseResult<InterpretResult> {
    let mut scribe = Scribe::new(params.clone())?;
    let mut code = String::new();
    let mut signals_processed = 0;

    for &signal in signals {
        if is_valid_duration(signal.duration_ms) {
            signals_processed += 1;
        }
        code.extend(scribe.push_signal(signal).into_iter().filter_map(MorseSymbol::code_char));
    }

    let text = codec::decode(&code, &params.codec_options());
    Ok(InterpretResult {
        code,
        text,
        calibrated: scribe.state() == ScribeState::Calibrated,
        unit_ms: scribe.unit_ms(),
        signals_processed,
    })
}
