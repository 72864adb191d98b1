//! Shared derived values: age, weight conversion, BMI, MRN generation.
//!
//! These existed in several copy-pasted variants across the report and form
//! surfaces; they live here once so the form preview and the report can
//! never drift apart. All inputs are untrusted free text from a form, so
//! every function is total and degrades to the `"-"` sentinel instead of
//! failing.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Sentinel rendered for missing/unparsable clinical values.
pub const MISSING: &str = "-";

const LBS_PER_KG: f64 = 0.45359237;
const METERS_PER_INCH: f64 = 0.0254;

/// Whole years as of `today`, decremented while this year's birthday is
/// still ahead. Empty or unparsable input yields the sentinel.
pub fn calculate_age(date_of_birth: &str, today: NaiveDate) -> String {
    if date_of_birth.is_empty() {
        return MISSING.into();
    }
    let Ok(birth) = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") else {
        return MISSING.into();
    };

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.to_string()
}

/// Weight normalized to kilograms with one decimal. A `lb`/`lbs` marker
/// anywhere in the string means the number is pounds.
pub fn convert_to_kg(weight: &str) -> String {
    if weight.is_empty() {
        return MISSING.into();
    }
    let Some(value) = parse_leading_number(weight) else {
        return MISSING.into();
    };

    let kg = if weight.to_lowercase().contains("lb") {
        value * LBS_PER_KG
    } else {
        value
    };
    format!("{kg:.1}")
}

/// BMI to one decimal. Height is either `<feet>'<inches>"` or bare
/// centimetres; weight goes through [`convert_to_kg`].
pub fn calculate_bmi(height: &str, weight: &str) -> String {
    if height.is_empty() || weight.is_empty() {
        return MISSING.into();
    }

    let height_m = if height.contains('\'') {
        let cleaned = height.replace('"', "");
        let mut parts = cleaned.split('\'');
        let feet = parts.next().and_then(parse_leading_number);
        let inches = parts.next().and_then(parse_leading_number).unwrap_or(0.0);
        feet.map(|f| (f * 12.0 + inches) * METERS_PER_INCH)
    } else {
        parse_leading_number(height).map(|cm| cm / 100.0)
    };

    let weight_kg = parse_leading_number(&convert_to_kg(weight));

    match (height_m, weight_kg) {
        (Some(m), Some(kg)) if m > 0.0 => format!("{:.1}", kg / (m * m)),
        _ => MISSING.into(),
    }
}

/// Generate a medical record number: `MRN-` followed by 8 random
/// uppercase alphanumerics.
pub fn generate_mrn() -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect();
    format!("MRN-{suffix}")
}

/// Leading numeric prefix of a free-text value: `"170lbs"` parses as 170,
/// `"abc"` as nothing.
fn parse_leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '-' | '+' if i == 0 => end = i + 1,
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    trimmed[..end].parse::<f64>().ok()
}
