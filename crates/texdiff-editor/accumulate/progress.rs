//! Progress reporting for long accumulations

/// Receives the completed fraction of an accumulation
///
/// Fractions are in `[0, 1]`, never decrease, and the last report of a
/// successful run is exactly `1.0`.
pub trait ProgressListener {
    /// Called after each pairwise step and once at the end
    fn on_progress(&mut self, fraction: f32);
}

impl<F: FnMut(f32)> ProgressListener for F {
    fn on_progress(&mut self, fraction: f32) {
        self(fraction);
    }
}

/// Listener that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_progress(&mut self, _fraction: f32) {}
}

/// Fraction of `done` out of `total`, clamped to `[0, 1]`
pub(crate) fn fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        1.0
    } else {
        (done as f32 / total as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_listeners() {
        let mut seen = Vec::new();
        {
            let mut listener = |f: f32| seen.push(f);
            listener.on_progress(0.5);
            listener.on_progress(1.0);
        }
        assert_eq!(seen, vec![0.5, 1.0]);
        NoProgress.on_progress(0.3);
    }

    #[test]
    fn fraction_bounds() {
        assert!((fraction(0, 0) - 1.0).abs() < f32::EPSILON);
        assert!((fraction(1, 4) - 0.25).abs() < f32::EPSILON);
        assert!((fraction(5, 4) - 1.0).abs() < f32::EPSILON);
    }
}
