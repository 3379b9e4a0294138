//! Score to node size mapping.

/// Linear mapping from a score range onto a size range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeScale {
	min_score: f64,
	span: f64,
	min_size: f64,
	max_size: f64,
}

impl SizeScale {
	/// Build a scale over `scores`. An empty input behaves as the range
	/// `0..1`; a zero-width range is widened to `epsilon`.
	pub fn new(scores: &[f64], min_size: f64, max_size: f64, epsilon: f64) -> Self {
		let (min_score, max_score) = if scores.is_empty() {
			(0.0, 1.0)
		} else {
			scores
				.iter()
				.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
					(lo.min(s), hi.max(s))
				})
		};
		Self {
			min_score,
			span: (max_score - min_score).max(epsilon),
			min_size,
			max_size,
		}
	}

	pub fn size(&self, score: f64) -> f64 {
		(score - self.min_score) / self.span * (self.max_size - self.min_size) + self.min_size
	}
}
