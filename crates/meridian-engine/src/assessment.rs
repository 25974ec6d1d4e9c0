//! Composite change score and assessment wording.
//!
//! Both functions are pure: the same input always produces the same output,
//! and every string returned comes from one of the vocabulary constants
//! below.

use meridian_core::models::clinical::Trend;
use meridian_core::models::schedule::Channel;
use meridian_core::models::visit::AssessmentBlock;

pub const PRESENT: [&str; 2] = [
    "slight improvement of symptom(s).",
    "improvement of symptom(s).",
];

pub const PATIENT_CHANGE: [&str; 2] = ["slightly decreased", "decreased"];

/// Items `what_changed` may list, joined with `", "` and `" and "`.
pub const WHAT_CHANGED_ITEMS: [&str; 6] = [
    "pain frequency",
    "pain",
    "difficulty in performing ADLs",
    "joint ROM",
    "muscles strength",
    "muscles tightness",
];

/// Items `finding_type` may list, joined like `what_changed`.
pub const FINDING_TYPE_ITEMS: [&str; 6] = [
    "joint ROM limitation",
    "joint ROM",
    "muscles strength",
    "muscles tightness",
    "muscles tenderness",
    "muscles spasms",
];

pub const PHYSICAL_CHANGE: [&str; 3] = ["remained the same", "slightly reduced", "reduced"];

pub const TOLERATED: [&str; 3] = [
    "session well",
    "treatment well",
    "treatment without discomfort",
];

pub const RESPONSE_NEUTRAL: [&str; 3] = [
    "good positive reaction",
    "well reaction",
    "positive reaction",
];

pub const RESPONSE_IMPROVING: [&str; 3] = [
    "good positive reaction",
    "reduced symptoms after treatment",
    "improved mobility after treatment",
];

pub const ADVERSE_EFFECT: [&str; 3] = [
    "No adverse side effect post treatment.",
    "No adverse reaction reported post treatment.",
    "No negative side effect observed post treatment.",
];

/// Cumulative drop since baseline that, late in the course, reads as
/// strong improvement.
const STRONG_CUMULATIVE_DROP: f64 = 3.0;
const STRONG_CUMULATIVE_PROGRESS: f64 = 0.5;
/// Single-visit drop that reads as strong improvement at any point.
const STRONG_VISIT_DROP: f64 = 0.7;
const PAIN_SURFACE_DELTA: f64 = 0.3;
const ADL_SURFACE_DELTA: f64 = 0.5;
const WHAT_CHANGED_CAP: usize = 2;
const ROM_UPGRADE_PROGRESS: f64 = 0.6;
const ROM_UPGRADE_CUMULATIVE: f64 = 2.0;

/// Per-visit movement of every scored channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionDeltas {
    /// Pain drop since the previous visit (positive = better).
    pub pain_delta: f64,
    pub symptom_scale: Trend,
    pub severity: Trend,
    pub frequency: Trend,
    pub adl: Trend,
    pub tightness: Trend,
    pub tenderness: Trend,
    pub spasm: Trend,
    pub rom: Trend,
    pub strength: Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub score: f64,
    pub changed_dims: Vec<Channel>,
}

/// Weighted sum of this visit's changes, rounded to three decimals.
pub fn compute_dimension_score(deltas: &DimensionDeltas) -> DimensionScore {
    let mut score = 0.0;
    let mut changed_dims = Vec::new();

    if deltas.pain_delta > 0.0 {
        score += 1.0 * (deltas.pain_delta / 2.0).min(1.0);
        changed_dims.push(Channel::Pain);
    }

    let weighted = [
        (Channel::SymptomScale, 0.8, deltas.symptom_scale),
        (Channel::Severity, 0.8, deltas.severity),
        (Channel::Frequency, 1.0, deltas.frequency),
        (Channel::Adl, 1.0, deltas.adl),
        (Channel::Tightness, 0.6, deltas.tightness),
        (Channel::Tenderness, 0.6, deltas.tenderness),
        (Channel::Spasm, 0.6, deltas.spasm),
        (Channel::Rom, 0.8, deltas.rom),
        (Channel::Strength, 0.8, deltas.strength),
    ];
    for (channel, weight, trend) in weighted {
        let contribution = weight * trend.weight_factor();
        if contribution > 0.0 {
            score += contribution;
            changed_dims.push(channel);
        }
    }

    DimensionScore {
        score: (score * 1000.0).round() / 1000.0,
        changed_dims,
    }
}

/// Signals the assessment wording is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoaInput {
    pub visit_index: u32,
    pub progress: f64,
    pub pain_delta: f64,
    pub cumulative_drop: f64,
    pub adl_delta: f64,
    pub frequency_improved: bool,
    pub rom: Trend,
    pub strength: Trend,
    pub tightness: Trend,
    pub tenderness: Trend,
    pub spasm: Trend,
}

impl SoaInput {
    fn objective(&self) -> [Trend; 5] {
        [self.rom, self.strength, self.tightness, self.tenderness, self.spasm]
    }

    /// Cumulative-and-late or large single drop.
    pub fn is_strong(&self) -> bool {
        (self.cumulative_drop >= STRONG_CUMULATIVE_DROP
            && self.progress >= STRONG_CUMULATIVE_PROGRESS)
            || self.pain_delta >= STRONG_VISIT_DROP
    }

    fn rom_upgraded(&self) -> bool {
        self.progress >= ROM_UPGRADE_PROGRESS && self.cumulative_drop >= ROM_UPGRADE_CUMULATIVE
    }
}

/// Join as `"a"`, `"a and b"`, `"a, b and c"`.
pub fn join_items(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn what_changed(input: &SoaInput) -> String {
    let mut items: Vec<&str> = Vec::with_capacity(WHAT_CHANGED_CAP);
    if input.frequency_improved {
        items.push("pain frequency");
    } else if input.pain_delta > PAIN_SURFACE_DELTA {
        items.push("pain");
    }
    if input.adl_delta > ADL_SURFACE_DELTA {
        items.push("difficulty in performing ADLs");
    }
    for (trend, item) in [
        (input.rom, "joint ROM"),
        (input.strength, "muscles strength"),
        (input.tightness, "muscles tightness"),
    ] {
        if items.len() >= WHAT_CHANGED_CAP {
            break;
        }
        if trend.is_changed() {
            items.push(item);
        }
    }
    if items.is_empty() {
        items.push("pain");
    }
    join_items(&items)
}

fn finding_type(input: &SoaInput) -> String {
    let rom = if input.rom_upgraded() {
        "joint ROM"
    } else {
        "joint ROM limitation"
    };
    let items: Vec<&str> = [
        (input.rom, rom),
        (input.strength, "muscles strength"),
        (input.tightness, "muscles tightness"),
        (input.tenderness, "muscles tenderness"),
        (input.spasm, "muscles spasms"),
    ]
    .into_iter()
    .filter(|(trend, _)| trend.is_changed())
    .map(|(_, item)| item)
    .collect();

    if items.is_empty() {
        "joint ROM limitation".to_string()
    } else {
        join_items(&items)
    }
}

fn physical_change(input: &SoaInput) -> &'static str {
    let objective = input.objective();
    if objective.iter().all(|t| !t.is_changed()) {
        PHYSICAL_CHANGE[0]
    } else if objective.contains(&Trend::Improved) {
        Trend::Improved.reduced_label()
    } else {
        Trend::SlightlyImproved.reduced_label()
    }
}

fn rotate<'a>(options: &[&'a str], visit_index: u32, offset: usize) -> &'a str {
    options[(visit_index as usize + offset) % options.len()]
}

/// Map this visit's signals to the assessment phrases.
pub fn derive_assessment(input: &SoaInput) -> AssessmentBlock {
    let strong = input.is_strong();
    let physical = physical_change(input);
    let response_pool: &[&str] = if physical == PHYSICAL_CHANGE[2] {
        &RESPONSE_IMPROVING
    } else {
        &RESPONSE_NEUTRAL
    };

    AssessmentBlock {
        present: PRESENT[usize::from(strong)].to_string(),
        patient_change: PATIENT_CHANGE[usize::from(strong)].to_string(),
        what_changed: what_changed(input),
        physical_change: physical.to_string(),
        finding_type: finding_type(input),
        tolerated: rotate(&TOLERATED, input.visit_index, 0).to_string(),
        response: rotate(response_pool, input.visit_index, 1).to_string(),
        adverse_effect: rotate(&ADVERSE_EFFECT, input.visit_index, 2).to_string(),
    }
}
