use thiserror::Error;

use crate::ImageVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no image variants to choose from")]
    NoVariants,
}

/// Picks the variant best suited to the minimum size, scanning in stored order.
///
/// A minimum below 1 leaves that axis unconstrained. With no constraints at all
/// the smallest variant wins; otherwise the smallest variant that still meets
/// the constraint does.
pub fn select_best_fit(
    variants: &[ImageVariant],
    min_width: i32,
    min_height: i32,
) -> Result<&ImageVariant, SelectionError> {
    let (first, rest) = variants.split_first().ok_or(SelectionError::NoVariants)?;

    let width_free = min_width < 1;
    let height_free = min_height < 1;

    let mut best = first;
    for candidate in rest {
        let width_better = dimension_is_better(min_width, best.width(), candidate.width());
        let height_better = dimension_is_better(min_height, best.height(), candidate.height());

        let replace = match (width_free, height_free) {
            (true, true) | (false, false) => width_better && height_better,
            (true, false) => height_better,
            (false, true) => width_better,
        };
        engine_logging::engine_trace!(
            "best fit candidate {} (width {}, height {}, replace {})",
            candidate,
            width_better,
            height_better,
            replace
        );
        if replace {
            best = candidate;
        }
    }

    engine_logging::engine_debug!(
        "best fit for {}x{} picked {}",
        min_width,
        min_height,
        best
    );
    Ok(best)
}

fn dimension_is_better(min_value: i32, best_value: i32, candidate_value: i32) -> bool {
    if min_value < 1 {
        return candidate_value < best_value;
    }
    if best_value < min_value {
        return candidate_value > min_value;
    }
    candidate_value >= min_value && candidate_value < best_value
}
