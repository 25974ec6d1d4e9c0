//! Display text for numeric finding grades.
//!
//! Grades are small integers; anything above the top of a scale saturates at
//! the top entry so a bounced grade still renders.

/// Shared wording for tightness and ADL difficulty grades 0–5.
pub const DIFFICULTY_TEXT: [&str; 6] = [
    "None",
    "Mild",
    "Mild to moderate",
    "Moderate",
    "Moderate to severe",
    "Severe",
];

pub const TENDERNESS_TEXT: [&str; 5] = [
    "(0) = No tenderness",
    "(+1) = Patient states that the area is mildly tender-sore",
    "(+2) = Patient states that the area is moderately tender",
    "(+3) = Patient complains of considerable tenderness and withdraws momentarily in response to the test pressure",
    "(+4) = Patient complains of severe tenderness, withdraws immediately in response to test pressure, and is unable to bear sustained pressure",
];

pub const SPASM_TEXT: [&str; 5] = [
    "(0) = No spasm",
    "(+1) = No spontaneous spasms; vigorous sensory and motor stimulation results in spasms",
    "(+2) = Occasional spontaneous spasms and easily induced spasms",
    "(+3) = More than 1 but less than 10 spontaneous spasms per hour",
    "(+4) = More than 10 spontaneous spasms per hour",
];

/// Manual muscle testing ladder. Index grows with strength.
pub const STRENGTH_LADDER: [&str; 6] = ["3/5", "3+/5", "4-/5", "4/5", "4+/5", "5/5"];

fn saturating<'a>(table: &[&'a str], grade: u8) -> &'a str {
    let idx = usize::from(grade).min(table.len() - 1);
    table[idx]
}

pub fn tightness_text(grade: u8) -> &'static str {
    saturating(&DIFFICULTY_TEXT, grade)
}

pub fn difficulty_text(grade: u8) -> &'static str {
    saturating(&DIFFICULTY_TEXT, grade)
}

pub fn tenderness_text(grade: u8) -> &'static str {
    saturating(&TENDERNESS_TEXT, grade)
}

pub fn spasm_text(grade: u8) -> &'static str {
    saturating(&SPASM_TEXT, grade)
}

pub fn strength_label(index: u8) -> &'static str {
    saturating(&STRENGTH_LADDER, index)
}

/// Snap a pain value to the nearest half point.
pub fn snap_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Snap a pain value down to the half point at or below it.
pub fn snap_half_down(value: f64) -> f64 {
    (value * 2.0).floor() / 2.0
}
