//! Muscle/finding selection.
//!
//! Three nested lists are drawn per course: tightness, then tenderness from
//! the selected tightness muscles, then spasm from the selected tender ones.
//! Narrowing in that order is what keeps `spasm ⊆ tenderness ⊆ tightness`
//! without any filtering afterwards.

use std::borrow::Cow;

use meridian_core::models::clinical::{BodyPart, SeverityLevel};
use meridian_core::models::visit::{MuscleCounts, SelectedMuscles};
use meridian_regions::region_for;

use crate::error::EngineError;
use crate::rng::SeededGenerator;

/// Maximum list sizes for a severity band.
pub fn max_counts(severity: SeverityLevel) -> MuscleCounts {
    let (tightness, tenderness, spasm) = match severity {
        SeverityLevel::Severe => (5, 4, 3),
        SeverityLevel::ModerateToSevere => (4, 3, 2),
        SeverityLevel::Moderate => (4, 2, 2),
        SeverityLevel::MildToModerate => (3, 2, 1),
        SeverityLevel::Mild => (2, 1, 1),
    };
    MuscleCounts {
        tightness,
        tenderness,
        spasm,
    }
}

/// Keep the members of `ordered` that appear in `pool`, in `ordered` order.
fn intersect(ordered: &[String], pool: &[String], limit: usize) -> Vec<String> {
    ordered
        .iter()
        .filter(|m| pool.contains(m))
        .take(limit)
        .cloned()
        .collect()
}

/// Draw the initial muscle lists for a course.
pub fn select_initial(body_part: BodyPart, severity: SeverityLevel, seed: u32) -> SelectedMuscles {
    let pools = region_for(body_part).muscles();
    let max = max_counts(severity);
    let mut rng = SeededGenerator::new(Some(seed));

    let mut shuffled = pools.tightness.clone();
    rng.shuffle(&mut shuffled);
    shuffled.truncate(max.tightness);

    let tenderness = intersect(&shuffled, &pools.tenderness, max.tenderness);
    let spasm = intersect(&tenderness, &pools.spasm, max.spasm);

    SelectedMuscles {
        tightness: shuffled,
        tenderness,
        spasm,
    }
}

/// [`select_initial`] for untrusted string input. Unknown body parts and
/// severity bands are configuration errors.
pub fn select_initial_named(
    body_part: &str,
    severity: &str,
    seed: u32,
) -> Result<SelectedMuscles, EngineError> {
    let body_part: BodyPart = body_part.parse()?;
    let severity: SeverityLevel = severity.parse()?;
    Ok(select_initial(body_part, severity, seed))
}

/// Shrink the lists to fit a milder severity band.
///
/// Returns `Cow::Borrowed(current)` when every list already fits, which
/// callers use to detect "no change". Otherwise each list is trimmed from
/// its end and the nested lists are re-derived from the trimmed parents.
pub fn reduce(current: &SelectedMuscles, severity: SeverityLevel) -> Cow<'_, SelectedMuscles> {
    let max = max_counts(severity);
    if current.counts().fits_within(&max) {
        return Cow::Borrowed(current);
    }

    let tightness: Vec<String> = current
        .tightness
        .iter()
        .take(max.tightness)
        .cloned()
        .collect();
    let tenderness = intersect(&current.tenderness, &tightness, max.tenderness);
    let spasm = intersect(&current.spasm, &tenderness, max.spasm);

    Cow::Owned(SelectedMuscles {
        tightness,
        tenderness,
        spasm,
    })
}
