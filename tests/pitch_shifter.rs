//! Tests for the pitch shifter engine

mod wav_writer;

use underwater_dsp::{PitchShifter, SampleRate};

const SAMPLE_RATE: f32 = 44100.0;
const WINDOW_MS: f32 = 40.0;

fn shifter(channels: usize) -> PitchShifter {
    let sample_rate = SampleRate::new(SAMPLE_RATE).unwrap();
    PitchShifter::new(&sample_rate, WINDOW_MS, channels)
}

#[test]
fn ratio_follows_semitones() {
    let mut shifter = shifter(1);

    shifter.set_pitch(0.0);
    assert_eq!(shifter.ratio(), 1.0);

    for quarter_tones in -48..=48 {
        let semitones = quarter_tones as f32 * 0.5;
        shifter.set_pitch(semitones);
        assert_eq!(shifter.ratio(), 2.0_f32.powf(semitones / 12.0), "{semitones}");
        assert!(shifter.ratio() > 0.0);
    }
}

#[test]
fn unison_reproduces_sine() {
    let mut shifter = shifter(1);
    let latency = shifter.latency();
    let input = signals::sine(1000.0, SAMPLE_RATE, 0.9, 8192);

    let output: Vec<f32> = input
        .iter()
        .map(|&x| shifter.process_sample(x, 0))
        .collect();

    let error: Vec<f32> = output[latency..]
        .iter()
        .zip(input.iter())
        .map(|(y, x)| y - x)
        .collect();
    let error_db = 20.0 * (signals::rms(&error) / signals::rms(&input)).log10();

    assert!(error_db < -40.0, "error {error_db} dB");
    assert!(output[..latency].iter().all(|&y| y == 0.0));
}

#[test]
fn silence_in_silence_out() {
    for semitones in [-24.0, -7.5, 0.0, 0.1, 3.0, 12.0, 24.0] {
        let mut shifter = shifter(2);
        shifter.set_pitch(semitones);

        for _ in 0..5000 {
            assert_eq!(shifter.process_sample(0.0, 0), 0.0);
            assert_eq!(shifter.process_sample(0.0, 1), 0.0);
        }
    }
}

#[test]
fn channels_are_independent() {
    let left = signals::sine(330.0, SAMPLE_RATE, 1.0, 6000);
    let right = signals::sine(97.0, SAMPLE_RATE, 0.5, 6000);

    let mut stereo = shifter(2);
    let mut mono_left = shifter(1);
    let mut mono_right = shifter(1);
    let mut silent = shifter(2);

    for shifter in [&mut stereo, &mut mono_left, &mut mono_right, &mut silent] {
        shifter.set_pitch(5.0);
    }

    for (&l, &r) in left.iter().zip(right.iter()) {
        assert_eq!(stereo.process_sample(l, 0), mono_left.process_sample(l, 0));
        assert_eq!(stereo.process_sample(r, 1), mono_right.process_sample(r, 0));

        // A busy channel 0 must not leak into a silent channel 1.
        silent.process_sample(l, 0);
        assert_eq!(silent.process_sample(0.0, 1), 0.0);
    }
}

#[test]
fn nan_pitch_stays_finite() {
    let mut shifter = shifter(1);
    let input = signals::sine(440.0, SAMPLE_RATE, 1.0, 1000);

    shifter.set_pitch(f32::NAN);
    assert!(shifter.ratio() > 0.0);

    for &x in input.iter() {
        let y = shifter.process_sample(x, 0);
        assert!(y.is_finite());
        assert!(y.abs() <= 1.0 + 1e-6);
    }
}

#[test]
fn non_finite_input_does_not_poison_history() {
    let input = signals::sine(440.0, SAMPLE_RATE, 1.0, 6000);
    let mut corrupted = input.clone();
    corrupted[100] = f32::NAN;
    corrupted[101] = f32::INFINITY;
    corrupted[2000] = f32::NEG_INFINITY;

    let mut clean = input.clone();
    clean[100] = 0.0;
    clean[101] = 0.0;
    clean[2000] = 0.0;

    let mut a = shifter(1);
    let mut b = shifter(1);
    a.set_pitch(-3.0);
    b.set_pitch(-3.0);

    for (&x, &c) in corrupted.iter().zip(clean.iter()) {
        let y = a.process_sample(x, 0);
        assert!(y.is_finite());
        assert_eq!(y, b.process_sample(c, 0));
    }
}

#[test]
fn pitch_changes_are_click_free() {
    let frequency = 220.0;
    let input = signals::sine(frequency, SAMPLE_RATE, 1.0, 44100);
    let mut shifter = shifter(1);
    let mut output = Vec::with_capacity(input.len());

    for (n, &x) in input.iter().enumerate() {
        // Hard steps every 100 samples across the whole range.
        let step = (n / 100) % 7;
        shifter.set_pitch(step as f32 * 8.0 - 24.0);
        output.push(shifter.process_sample(x, 0));
    }

    // A four times faster sine, plus the slope of the crossfade window.
    let max_slope = std::f32::consts::TAU * frequency * 4.0 / SAMPLE_RATE;
    let jump = signals::max_jump(&output);
    assert!(jump < max_slope + 0.07, "jump {jump}");

    wav_writer::write("pitch_shifter/steps.wav", SAMPLE_RATE as u32, &output).ok();
}

#[test]
fn octave_shifts_double_and_halve_frequency() {
    // Half a window spans a whole number of periods, so both taps stay in
    // phase and the crossfade adds no phase drift of its own.
    let frequency = 200.0;
    let input = signals::sine(frequency, SAMPLE_RATE, 1.0, 3 * 44100);

    for (semitones, expected) in [(12.0, 400.0), (-12.0, 100.0), (7.0, 299.66)] {
        let mut shifter = shifter(1);
        shifter.set_pitch(semitones);

        let output: Vec<f32> = input
            .iter()
            .map(|&x| shifter.process_sample(x, 0))
            .collect();

        let settled = &output[44100..];
        let measured = signals::zero_crossing_rate(settled, SAMPLE_RATE) * 0.5;
        assert!(
            (measured / expected - 1.0).abs() < 0.02,
            "{semitones} st: measured {measured} Hz, expected {expected} Hz"
        );

        wav_writer::write(
            format!("pitch_shifter/shift_{semitones}.wav"),
            SAMPLE_RATE as u32,
            &output,
        )
        .ok();
    }
}

#[test]
fn block_and_sample_processing_agree() {
    let input = signals::sine(523.0, SAMPLE_RATE, 0.7, 4096);
    let mut per_sample = shifter(1);
    let mut per_block = shifter(1);
    per_sample.set_pitch(-5.0);
    per_block.set_pitch(-5.0);

    let expected: Vec<f32> = input
        .iter()
        .map(|&x| per_sample.process_sample(x, 0))
        .collect();

    let mut output = input.clone();
    for block in output.chunks_mut(256) {
        per_block.process(0, block);
    }

    assert_eq!(output, expected);
}
