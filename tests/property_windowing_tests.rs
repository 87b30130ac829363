use runchart::core::{Sample, StepBound, StepRange, nearest_sample_index, trim_samples};
use proptest::prelude::*;

fn sorted_samples(steps: &[f64]) -> Vec<Sample> {
    let mut steps = steps.to_vec();
    steps.sort_by(f64::total_cmp);
    steps
        .iter()
        .enumerate()
        .map(|(i, &step)| Sample::raw(step, i as f64))
        .collect()
}

fn bound(raw: Option<f64>) -> StepBound {
    raw.map_or(StepBound::Unbounded, StepBound::At)
}

proptest! {
    #[test]
    fn trimmed_output_is_ordered_subsequence(
        steps in proptest::collection::vec(-1_000.0f64..1_000.0, 0..80),
        min in proptest::option::of(-1_200.0f64..1_200.0),
        max in proptest::option::of(-1_200.0f64..1_200.0),
        smooth_range in 0.0f64..200.0
    ) {
        let samples = sorted_samples(&steps);
        let range = StepRange::new(bound(min), bound(max));

        let trimmed = trim_samples(&samples, range, smooth_range);

        // Sample values are their original index, so order is checkable.
        let mut last_index = -1.0;
        for sample in &trimmed {
            prop_assert!(sample.value > last_index);
            last_index = sample.value;
            prop_assert_eq!(samples[sample.value as usize], *sample);
            if let Some(min) = min {
                prop_assert!(sample.step >= min);
            }
            if let Some(max) = max {
                prop_assert!(sample.step <= max);
            }
        }
        prop_assert!(trimmed.len() <= samples.len());
    }

    #[test]
    fn located_index_is_a_nearest_sample(
        steps in proptest::collection::vec(-1_000.0f64..1_000.0, 1..80),
        cursor in -1_500.0f64..1_500.0
    ) {
        let samples = sorted_samples(&steps);

        let idx = nearest_sample_index(&samples, Some(cursor)).expect("non-empty");
        prop_assert!(idx < samples.len());

        let chosen = (samples[idx].step - cursor).abs();
        let best = samples
            .iter()
            .map(|s| (s.step - cursor).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!(chosen <= best + 1e-9);

        prop_assert_eq!(nearest_sample_index(&samples, None), Some(samples.len() - 1));
    }
}
