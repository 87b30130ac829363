use runchart::core::{Sample, SampleReadout, nearest_sample_index};

fn at_steps(steps: &[f64]) -> Vec<Sample> {
    steps.iter().map(|&s| Sample::raw(s, s * 2.0)).collect()
}

#[test]
fn cursor_snaps_to_closer_neighbour() {
    let samples = at_steps(&[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(nearest_sample_index(&samples, Some(22.0)), Some(2));
    assert_eq!(nearest_sample_index(&samples, Some(27.0)), Some(3));
    assert_eq!(nearest_sample_index(&samples, Some(10.0)), Some(1));
}

#[test]
fn missing_cursor_selects_latest_sample() {
    let samples = at_steps(&[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(nearest_sample_index(&samples, None), Some(3));
}

#[test]
fn cursor_outside_series_clamps_to_ends() {
    let samples = at_steps(&[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(nearest_sample_index(&samples, Some(-50.0)), Some(0));
    assert_eq!(nearest_sample_index(&samples, Some(500.0)), Some(3));
}

#[test]
fn equidistant_cursor_prefers_right_neighbour() {
    let samples = at_steps(&[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(nearest_sample_index(&samples, Some(15.0)), Some(2));
}

#[test]
fn empty_series_has_no_index() {
    assert_eq!(nearest_sample_index(&[], None), None);
    assert_eq!(nearest_sample_index(&[], Some(3.0)), None);
}

#[test]
fn single_sample_is_always_selected() {
    let samples = at_steps(&[5.0]);
    assert_eq!(nearest_sample_index(&samples, Some(-1.0)), Some(0));
    assert_eq!(nearest_sample_index(&samples, Some(9.0)), Some(0));
}

#[test]
fn readout_shows_raw_value_only_when_it_differs() {
    let differs = SampleReadout::of(Sample::new(3.0, 2.0, 1.5));
    assert_eq!(differs.primary, 1.5);
    assert_eq!(differs.secondary, Some(2.0));

    let same = SampleReadout::of(Sample::new(3.0, 2.0, 2.0 + 1e-9));
    assert_eq!(same.secondary, None);
}

#[test]
fn readout_follows_cursor() {
    let samples = vec![
        Sample::new(0.0, 1.0, 1.0),
        Sample::new(10.0, 4.0, 3.0),
        Sample::new(20.0, 9.0, 9.0),
    ];

    let readout = SampleReadout::at(&samples, Some(11.0)).expect("readout");
    assert_eq!(readout.step, 10.0);
    assert_eq!(readout.secondary, Some(4.0));

    let latest = SampleReadout::at(&samples, None).expect("readout");
    assert_eq!(latest.step, 20.0);
    assert!(SampleReadout::at(&[], None).is_none());
}
