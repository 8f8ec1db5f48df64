use crate::io::configuration::MAX_MIDI_VALUE;
use crate::io::error::{Result, VariationError};

/// Chromatic note letters in pitch order; lowercase letters are the sharps
pub const NOTE_LETTERS: [char; 12] = ['C', 'c', 'D', 'd', 'E', 'F', 'f', 'G', 'g', 'A', 'a', 'B'];

/// Map a note name such as `C4` or `f2` to its note number
///
/// The first character selects the pitch class from [`NOTE_LETTERS`], the rest
/// is a signed octave. The number is `(octave + 2) * 12 + pitch_class`, so
/// `C1` is 36 and `C4` is 72.
///
/// # Errors
///
/// Returns [`VariationError::InvalidPitchName`] if the token is empty, the
/// letter is not in the alphabet or the octave is not an integer.
pub fn note_number(token: &str) -> Result<i32> {
    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(|| pitch_error(token, "empty note name"))?;

    let pitch_class = NOTE_LETTERS
        .iter()
        .position(|&candidate| candidate == letter)
        .ok_or_else(|| pitch_error(token, format!("unknown note letter '{letter}'")))?;

    let octave_text = chars.as_str();
    if octave_text.is_empty() {
        return Err(pitch_error(token, "missing octave"));
    }
    let octave: i32 = octave_text
        .parse()
        .map_err(|e| pitch_error(token, format!("octave '{octave_text}' is not an integer: {e}")))?;

    octave
        .checked_add(2)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(pitch_class as i32))
        .ok_or_else(|| pitch_error(token, "octave out of range"))
}

/// Map a note name to a MIDI key in `0..=127`
///
/// # Errors
///
/// Returns an error if the name is invalid or falls outside the MIDI key range.
pub fn midi_note(token: &str) -> Result<u8> {
    let number = note_number(token)?;
    u8::try_from(number)
        .ok()
        .filter(|&key| key <= MAX_MIDI_VALUE)
        .ok_or_else(|| pitch_error(token, format!("note number {number} is outside 0..=127")))
}

fn pitch_error(token: &str, reason: impl Into<String>) -> VariationError {
    VariationError::InvalidPitchName {
        token: token.to_string(),
        reason: reason.into(),
    }
}
