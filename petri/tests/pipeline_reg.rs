//! End-to-end pipeline regression test
//!
//! Run with:
//! ```
//! cargo test -p petri --test pipeline_reg
//! ```

use petri::pipeline::{self, OutputPaths, PipelineError, PipelineParams};
use petri_test::{RegParams, gray_from_p6, p6_bytes, solid_p6};
use std::fs;

#[test]
fn pipeline_black_square_reg() {
    let mut rp = RegParams::new("pipeline_black_square");
    let dir = tempfile::tempdir().unwrap();

    // 4x4 all-black input: grayscale all 0, blurred all 0, every pixel
    // below the default threshold, one component spanning the image.
    let input = dir.path().join("input.ppm");
    fs::write(&input, solid_p6(4, 4, 0, 0, 0)).unwrap();

    let outputs = OutputPaths::in_dir(dir.path());
    let report = pipeline::run(&input, &outputs, &PipelineParams::default()).unwrap();

    rp.compare_values(4.0, report.width as f64, 0.0);
    rp.compare_values(4.0, report.height as f64, 0.0);
    rp.compare_values(1.0, f64::from(report.colony_count), 0.0);

    let gray = gray_from_p6(&fs::read(&outputs.grayscale).unwrap());
    let blurred = gray_from_p6(&fs::read(&outputs.blurred).unwrap());
    let thresh = gray_from_p6(&fs::read(&outputs.thresholded).unwrap());

    rp.compare_values(0.0, gray.data().iter().map(|&v| f64::from(v)).sum(), 0.0);
    rp.compare_values(0.0, blurred.data().iter().map(|&v| f64::from(v)).sum(), 0.0);
    let all_foreground = thresh.data().iter().all(|&v| v == 255);
    rp.compare_values(1.0, f64::from(u8::from(all_foreground)), 0.0);

    assert!(rp.cleanup(), "pipeline black square regression failed");
}

#[test]
fn pipeline_two_colonies_reg() {
    let mut rp = RegParams::new("pipeline_two_colonies");
    let dir = tempfile::tempdir().unwrap();

    // Bright 12x12 plate with two dark 3x3 colonies, both well away
    // from the image border.
    let (w, h) = (12, 12);
    let mut rgb = vec![255u8; w * h * 3];
    let mut paint = |top: usize, left: usize| {
        for row in top..top + 3 {
            for col in left..left + 3 {
                let at = (row * w + col) * 3;
                rgb[at..at + 3].fill(0);
            }
        }
    };
    paint(2, 2);
    paint(7, 7);

    let input = dir.path().join("plate.ppm");
    fs::write(&input, p6_bytes(w, h, &rgb)).unwrap();

    let outputs = OutputPaths::in_dir(dir.path());
    let report = pipeline::run(&input, &outputs, &PipelineParams::default()).unwrap();

    // The zero padding ring darkens the four corner pixels below the
    // default threshold (254 * 0.5625 = 142), so each corner counts as
    // a single-pixel component alongside the two colonies.
    rp.compare_values(6.0, f64::from(report.colony_count), 0.0);

    // White input collapses to luma 254, not 255.
    let gray = gray_from_p6(&fs::read(&outputs.grayscale).unwrap());
    rp.compare_values(254.0, f64::from(gray.get(0, 0).unwrap()), 0.0);
    rp.compare_values(0.0, f64::from(gray.get(3, 3).unwrap()), 0.0);

    let thresh = gray_from_p6(&fs::read(&outputs.thresholded).unwrap());
    rp.compare_values(255.0, f64::from(thresh.get(3, 3).unwrap()), 0.0); // colony core
    rp.compare_values(255.0, f64::from(thresh.get(8, 8).unwrap()), 0.0); // second colony
    rp.compare_values(0.0, f64::from(thresh.get(5, 5).unwrap()), 0.0); // plate between
    rp.compare_values(255.0, f64::from(thresh.get(0, 0).unwrap()), 0.0); // corner artifact
    rp.compare_values(0.0, f64::from(thresh.get(0, 5).unwrap()), 0.0); // edge stays plate

    assert!(rp.cleanup(), "pipeline two colonies regression failed");
}

#[test]
fn pipeline_clean_plate_reg() {
    let mut rp = RegParams::new("pipeline_clean_plate");
    let dir = tempfile::tempdir().unwrap();

    // With a threshold low enough that even the corner attenuation
    // stays background, a blank plate counts zero colonies and the
    // thresholded artifact is uniformly 0.
    let input = dir.path().join("blank.ppm");
    fs::write(&input, solid_p6(10, 8, 255, 255, 255)).unwrap();

    let outputs = OutputPaths::in_dir(dir.path());
    let params = PipelineParams {
        threshold: 100,
        ..Default::default()
    };
    let report = pipeline::run(&input, &outputs, &params).unwrap();

    rp.compare_values(0.0, f64::from(report.colony_count), 0.0);
    let thresh = gray_from_p6(&fs::read(&outputs.thresholded).unwrap());
    rp.compare_values(0.0, thresh.data().iter().map(|&v| f64::from(v)).sum(), 0.0);

    assert!(rp.cleanup(), "pipeline clean plate regression failed");
}

#[test]
fn pipeline_rejects_bad_input_before_writing() {
    let dir = tempfile::tempdir().unwrap();

    // Wrong magic number: the run fails before any artifact exists.
    let input = dir.path().join("broken.ppm");
    fs::write(&input, b"P5\n4 4\n255\n").unwrap();

    let outputs = OutputPaths::in_dir(dir.path());
    let err = pipeline::run(&input, &outputs, &PipelineParams::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Input { .. }));

    assert!(!outputs.grayscale.exists());
    assert!(!outputs.blurred.exists());
    assert!(!outputs.thresholded.exists());
}

#[test]
fn pipeline_missing_input_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let outputs = OutputPaths::in_dir(dir.path());
    let err = pipeline::run(
        dir.path().join("nope.ppm"),
        &outputs,
        &PipelineParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Input { .. }));
}

#[test]
fn pipeline_tolerant_header_is_opt_in() {
    let dir = tempfile::tempdir().unwrap();

    let mut bytes = b"P6\n# incubator 3\n2 2\n255\n".to_vec();
    bytes.extend_from_slice(&[0u8; 12]);
    let input = dir.path().join("commented.ppm");
    fs::write(&input, &bytes).unwrap();

    let outputs = OutputPaths::in_dir(dir.path());

    // Strict (the default) rejects the comment.
    let err = pipeline::run(&input, &outputs, &PipelineParams::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Input { .. }));

    // The tolerant reader accepts it.
    let params = PipelineParams {
        tolerance: petri::io::HeaderTolerance::SkipComments,
        ..Default::default()
    };
    let report = pipeline::run(&input, &outputs, &params).unwrap();
    assert_eq!(report.colony_count, 1);
}
