//! Decoding of the persisted waveform representation.
//!
//! Waveforms are stored as a loosely delimited string of positive decimal
//! numbers (the storage layer serializes them out of a jsonb column, so the
//! exact delimiters vary: commas, brackets, whitespace).

/// Extract every embedded positive decimal number, in order.
///
/// `None`, empty input and input without any digits all decode to an empty
/// sequence. Values are returned exactly as stored; the persisted sequence
/// is already normalized to `[0, 1]` amplitudes.
pub fn decode_waveform(raw: Option<&str>) -> Vec<f32> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let bytes = raw.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        // Fractional part only counts when a digit follows the dot, so a
        // trailing "1." decodes as 1 and leaves the dot as a delimiter.
        if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        if let Ok(value) = raw[start..i].parse::<f32>() {
            values.push(value);
        }
    }

    values
}

/// Pick `count` evenly spaced samples from `samples`.
///
/// Rendering surfaces draw a fixed number of bars; this keeps the drawn
/// shape proportional regardless of the stored resolution. Returns an empty
/// vec when either side is empty.
pub fn sample_evenly(samples: &[f32], count: usize) -> Vec<f32> {
    if samples.is_empty() || count == 0 {
        return Vec::new();
    }

    let ratio = samples.len() as f32 / count as f32;
    (0..count)
        .map(|i| {
            let index = ((i as f32 * ratio) as usize).min(samples.len() - 1);
            samples[index]
        })
        .collect()
}
