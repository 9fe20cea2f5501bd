use std::collections::HashSet;
use std::convert::Infallible;
use std::error::Error as _;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use imageproc::drawing::draw_line_segment_mut;
use sig_verify::sig_core::{
    BinaryImage, DESCRIPTOR_BYTES, Descriptor, DescriptorMatcher, FeatureExtractor, Features, Keypoint, Match,
};
use sig_verify::{
    ImageRole, Stage, Verdict, Verifier, VerifierBuilder, VerifierConfig, VerifyError, draw_matches, verify,
};

fn encode(img: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

/// Dark pen strokes on white paper, three pixels wide
fn draw_signature(width: u32, height: u32, strokes: &[&[(f32, f32)]]) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    for stroke in strokes {
        for segment in stroke.windows(2) {
            for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
                draw_line_segment_mut(
                    &mut img,
                    (segment[0].0 + dx, segment[0].1 + dy),
                    (segment[1].0 + dx, segment[1].1 + dy),
                    Luma([0]),
                );
            }
        }
    }
    img
}

fn signature() -> GrayImage {
    draw_signature(
        220,
        120,
        &[
            &[(30.0, 80.0), (50.0, 35.0), (62.0, 85.0), (80.0, 40.0), (95.0, 82.0)],
            &[(100.0, 60.0), (125.0, 38.0), (140.0, 75.0), (160.0, 45.0), (190.0, 70.0)],
            &[(40.0, 95.0), (185.0, 92.0)],
        ],
    )
}

fn other_signature() -> GrayImage {
    draw_signature(
        220,
        120,
        &[
            &[(35.0, 40.0), (185.0, 40.0), (35.0, 90.0), (185.0, 90.0)],
            &[(110.0, 30.0), (110.0, 100.0)],
        ],
    )
}

fn signature_png() -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(signature()))
}

fn blank_png() -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([255]))))
}

fn config() -> VerifierConfig {
    let mut config = VerifierConfig::default();
    config.features.n_threads = 2;
    config
}

fn blank_png_of_width(width: u32) -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(GrayImage::from_pixel(width, 8, Luma([255]))))
}

fn descriptor_for(i: usize) -> Descriptor {
    let mut d = [0u8; DESCRIPTOR_BYTES];
    d[..8].copy_from_slice(&(i as u64).to_le_bytes());
    d
}

/// Reports one keypoint per image column so tests control the counts
/// through the image width.
#[derive(Default)]
struct ColumnExtractor {
    calls: AtomicUsize,
}

impl FeatureExtractor for ColumnExtractor {
    type Error = Infallible;

    fn extract(&self, image: &BinaryImage) -> Result<Features, Infallible> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let keypoints = (0..image.width())
            .map(|x| Keypoint {
                x: x as f32,
                y: 0.0,
                angle: 0.0,
                response: 1.0,
            })
            .collect();
        let descriptors = (0..image.width()).map(descriptor_for).collect();
        Ok(Features::new(keypoints, descriptors).unwrap())
    }
}

/// Pairs the first `count` indices on both sides
struct FixedMatcher {
    count: usize,
}

impl DescriptorMatcher for FixedMatcher {
    type Error = Infallible;

    fn match_descriptors(&self, _: &[Descriptor], _: &[Descriptor], _: bool) -> Result<Vec<Match>, Infallible> {
        Ok((0..self.count)
            .map(|i| Match {
                reference_index: i,
                test_index: i,
                distance: 0,
            })
            .collect())
    }
}

/// One keypoint per ink sample with a descriptor unique to its position
struct InkExtractor;

impl FeatureExtractor for InkExtractor {
    type Error = Infallible;

    fn extract(&self, image: &BinaryImage) -> Result<Features, Infallible> {
        let mut keypoints = Vec::new();
        let mut descriptors = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.get(x, y) == BinaryImage::OFF {
                    keypoints.push(Keypoint {
                        x: x as f32,
                        y: y as f32,
                        angle: 0.0,
                        response: 1.0,
                    });
                    descriptors.push(descriptor_for(y * image.width() + x));
                }
            }
        }
        Ok(Features::new(keypoints, descriptors).unwrap())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("sensor offline")]
struct SensorOffline;

struct FailingExtractor;

impl FeatureExtractor for FailingExtractor {
    type Error = SensorOffline;

    fn extract(&self, _: &BinaryImage) -> Result<Features, SensorOffline> {
        Err(SensorOffline)
    }
}

struct FailingMatcher;

impl DescriptorMatcher for FailingMatcher {
    type Error = SensorOffline;

    fn match_descriptors(&self, _: &[Descriptor], _: &[Descriptor], _: bool) -> Result<Vec<Match>, SensorOffline> {
        Err(SensorOffline)
    }
}

fn stub_report(ref_width: u32, test_width: u32, matches: usize) -> sig_verify::VerificationReport {
    let verifier =
        Verifier::with_collaborators(config(), ColumnExtractor::default(), FixedMatcher { count: matches }).unwrap();
    verifier
        .verify(&blank_png_of_width(ref_width), &blank_png_of_width(test_width))
        .unwrap()
}

#[test]
fn identical_images_with_full_matches_are_accepted() {
    let report = stub_report(40, 40, 40);
    assert_eq!(report.reference_keypoint_count(), 40);
    assert_eq!(report.test_keypoint_count(), 40);
    assert_eq!(report.match_ratio(), 1.0);
    assert_eq!(report.verdict(), Verdict::Matched);
}

#[test]
fn poorly_matched_pair_is_rejected() {
    let report = stub_report(50, 60, 10);
    assert_eq!(report.display_ratio(), 0.17);
    assert_eq!(report.verdict(), Verdict::NotMatched);
}

#[test]
fn well_matched_pair_is_accepted() {
    let report = stub_report(30, 30, 25);
    assert_eq!(report.display_ratio(), 0.83);
    assert_eq!(report.verdict(), Verdict::Matched);
}

#[test]
fn ratio_at_cutoff_is_rejected() {
    let report = stub_report(10, 10, 7);
    assert_eq!(report.verdict(), Verdict::NotMatched);
}

#[test]
fn malformed_test_image_aborts_before_extraction() {
    let extractor = ColumnExtractor::default();
    let verifier = Verifier::with_collaborators(config(), &extractor, FixedMatcher { count: 0 }).unwrap();
    let err = verifier.verify(&signature_png(), b"\x89PNG not really").unwrap_err();

    assert!(matches!(err, VerifyError::Decode { role: ImageRole::Test, .. }));
    assert_eq!(err.stage(), Stage::Normalize);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn extractor_error_is_passed_through() {
    let verifier = Verifier::with_collaborators(config(), FailingExtractor, FixedMatcher { count: 0 }).unwrap();
    let err = verifier.verify(&signature_png(), &signature_png()).unwrap_err();

    assert_eq!(err.stage(), Stage::Extract);
    assert_eq!(err.role(), Some(ImageRole::Reference));
    let source = err.source().unwrap();
    assert!(source.downcast_ref::<SensorOffline>().is_some());
}

#[test]
fn matcher_error_is_passed_through() {
    let verifier = Verifier::with_collaborators(config(), ColumnExtractor::default(), FailingMatcher).unwrap();
    let err = verifier.verify(&blank_png(), &blank_png()).unwrap_err();

    assert!(matches!(err, VerifyError::Matcher { .. }));
    assert_eq!(err.stage(), Stage::Match);
    assert!(err.source().unwrap().downcast_ref::<SensorOffline>().is_some());
}

#[test]
fn identical_image_with_unique_descriptors_scores_one() {
    let verifier = Verifier::with_collaborators(config(), InkExtractor, sig_match::BruteForceMatcher::new()).unwrap();
    let png = signature_png();
    let report = verifier.verify(&png, &png).unwrap();

    assert!(report.reference_keypoint_count() > 0);
    assert_eq!(report.match_count(), report.reference_keypoint_count());
    assert_eq!(report.match_ratio(), 1.0);
    assert_eq!(report.verdict(), Verdict::Matched);
}

#[test]
fn blank_images_have_zero_ratio() {
    let verifier = Verifier::new(config()).unwrap();
    let report = verifier.verify(&blank_png(), &blank_png()).unwrap();
    assert_eq!(report.match_count(), 0);
    assert_eq!(report.match_ratio(), 0.0);
    assert_eq!(report.verdict(), Verdict::NotMatched);
}

#[test]
fn identical_signatures_match_every_distinct_descriptor() {
    let verifier = Verifier::new(config()).unwrap();
    let png = signature_png();
    let verification = verifier.verify_detailed(&png, &png).unwrap();

    let descriptors = verification.reference.features.descriptors();
    assert!(!descriptors.is_empty());
    assert_eq!(verification.reference.features, verification.test.features);

    let distinct: HashSet<&Descriptor> = descriptors.iter().collect();
    assert_eq!(verification.matches.len(), distinct.len());
    for m in &verification.matches {
        assert_eq!(m.reference_index, m.test_index);
        assert_eq!(m.distance, 0);
    }
}

#[test]
fn verification_is_deterministic() {
    let verifier = Verifier::new(config()).unwrap();
    let reference = signature_png();
    let test = encode(DynamicImage::ImageLuma8(other_signature()));

    let first = verifier.verify_detailed(&reference, &test).unwrap();
    let second = verifier.verify_detailed(&reference, &test).unwrap();
    assert_eq!(first, second);

    let fresh = Verifier::new(config()).unwrap().verify(&reference, &test).unwrap();
    assert_eq!(first.report, fresh);
}

#[test]
fn different_signatures_stay_within_bounds() {
    let verifier = Verifier::new(config()).unwrap();
    let report = verifier
        .verify(&signature_png(), &encode(DynamicImage::ImageLuma8(other_signature())))
        .unwrap();
    assert!((0.0..=1.0).contains(&report.match_ratio()));
    assert!(report.match_count() <= report.reference_keypoint_count().min(report.test_keypoint_count()));
}

#[test]
fn colour_and_gray_encodings_agree() {
    let gray = signature();
    let rgb = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
    let verifier = Verifier::new(config()).unwrap();

    let from_gray = verifier.verify(&signature_png(), &signature_png()).unwrap();
    let from_rgb = verifier
        .verify(&signature_png(), &encode(DynamicImage::ImageRgb8(rgb)))
        .unwrap();
    assert_eq!(from_gray, from_rgb);
}

#[test]
fn concurrent_calls_share_one_verifier() {
    let verifier = Verifier::new(config()).unwrap();
    let reference = signature_png();
    let test = encode(DynamicImage::ImageLuma8(other_signature()));
    let expected = verifier.verify(&reference, &test).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| verifier.verify(&reference, &test).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn builder_and_free_function_agree() {
    let reference = signature_png();
    let test = encode(DynamicImage::ImageLuma8(other_signature()));

    let built = VerifierBuilder::new()
        .binarize_threshold(127)
        .match_ratio_cutoff(0.7)
        .build()
        .unwrap()
        .verify(&reference, &test)
        .unwrap();
    let free = verify(&reference, &test, 127, 0.7).unwrap();
    assert_eq!(built, free);
}

#[test]
fn free_function_rejects_bad_cutoff() {
    let err = verify(&blank_png(), &blank_png(), 127, 1.5).unwrap_err();
    assert_eq!(err.stage(), Stage::Setup);
}

#[test]
fn visualization_spans_both_images() {
    let verifier = Verifier::new(config()).unwrap();
    let reference = signature_png();
    let test = encode(DynamicImage::ImageLuma8(draw_signature(
        150,
        160,
        &[&[(30.0, 40.0), (120.0, 130.0)], &[(30.0, 130.0), (120.0, 40.0)]],
    )));
    let verification = verifier.verify_detailed(&reference, &test).unwrap();
    let canvas = draw_matches(&verification);
    assert_eq!(canvas.dimensions(), (220 + 150, 160));
}

#[test]
fn report_json_has_stable_shape() {
    let report = stub_report(30, 30, 25);
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["referenceKeypointCount"], 30);
    assert_eq!(value["testKeypointCount"], 30);
    assert_eq!(value["matchCount"], 25);
    assert_eq!(value["matchRatio"], 0.83);
    assert_eq!(value["verdict"], "MATCHED");
}
