// tests/report_format.rs
//
// The report text is parsed line by line by downstream consumers: every label
// must appear exactly once, in a fixed order, with 2-decimal numerics.

use interview_feedback::face::{FaceAnalysis, FaceExpressions};
use interview_feedback::feedback::FEEDBACK_ERROR_TEXT;
use interview_feedback::report::{generate_report, generate_report_with_face, ReportInput};

const LABELS: [&str; 15] = [
    "Question: ",
    "Transcript: ",
    "Feedback: ",
    "Face Analysis: ",
    "Confidence Scores:",
    "- Vocabulary, Speed & Length Confidence Score: ",
    "- Speed & Complexity Confidence Score: ",
    "- Vocabulary & Speed Confidence Score: ",
    "Sentiment Analysis: ",
    "Report details:",
    "- Time taken for answer: ",
    "- Word count: ",
    "- Long words (more than 6 characters): ",
    "- Words per second: ",
    "- Average word length: ",
];

fn sample_text() -> String {
    let input = ReportInput {
        question: "What is your experience with the MERN stack?",
        transcript: "I built great dashboards um with MongoDB and Express",
        feedback: "Mostly correct; mention Node.js event loop.",
        face_analysis: "No face detected.",
    };
    generate_report(&input, 6.0).render()
}

#[test]
fn labels_appear_once_in_order() {
    let text = sample_text();
    let mut last = 0usize;
    for label in LABELS {
        assert_eq!(
            text.matches(label).count(),
            1,
            "label {label:?} should appear exactly once\n{text}"
        );
        let pos = text.find(label).unwrap();
        assert!(pos >= last, "label {label:?} out of order\n{text}");
        last = pos;
    }
    assert_eq!(text.lines().count(), LABELS.len());
}

#[test]
fn numeric_fields_have_two_decimals() {
    let text = sample_text();
    let value_of = |label: &str| -> String {
        let line = text.lines().find(|l| l.starts_with(label)).unwrap();
        line[label.len()..].to_string()
    };

    // 9 words / 6s
    assert_eq!(value_of("- Words per second: "), "1.50");
    // 52 chars / 9 words
    assert_eq!(value_of("- Average word length: "), "5.78");
    // 52 / 4
    assert_eq!(value_of("- Time taken for answer: "), "13.00 seconds");
    assert_eq!(value_of("- Word count: "), "9");
    // dashboards, MongoDB, Express
    assert_eq!(value_of("- Long words (more than 6 characters): "), "3");

    for label in LABELS[5..8].iter().copied() {
        let v = value_of(label);
        let num = v.strip_suffix('%').expect("percent suffix");
        let (_, frac) = num.split_once('.').expect("decimal point");
        assert_eq!(frac.len(), 2, "{label}{v}");
    }

    // one "great" (+2) among 9 tokens: ((2+9)/18)*100-100
    assert_eq!(value_of("Sentiment Analysis: "), "Negative (-38.89)");
}

#[test]
fn degraded_collaborator_text_is_embedded_verbatim() {
    let r = generate_report_with_face(
        "How do you manage state in a React application?",
        "",
        FEEDBACK_ERROR_TEXT,
        &FaceAnalysis::NoFace,
        0.0,
    );
    let text = r.render();
    assert!(text.contains("Feedback: An error occurred while generating feedback.\n"));
    assert!(text.contains("Face Analysis: No face detected.\n"));
    assert!(text.contains("- Vocabulary & Speed Confidence Score: 0.00%"));
    assert!(text.contains("Sentiment Analysis: Neutral (0.00)"));
}

#[test]
fn face_expressions_render_as_json() {
    let face = FaceAnalysis::Expressions(vec![FaceExpressions {
        neutral: 0.5,
        happy: 0.5,
        ..Default::default()
    }]);
    let r = generate_report_with_face("Q", "ok", "", &face, 1.0);
    assert!(r.face_analysis.contains("\"happy\": 0.5"));
    assert!(r.render().contains("Face Analysis: [\n"));
}

#[test]
fn subnormal_elapsed_prints_zero_speed() {
    let input = ReportInput {
        question: "Q",
        transcript: "good great excellent",
        feedback: "",
        face_analysis: "No face detected.",
    };
    let r = generate_report(&input, 1e-320);
    assert!(r.words_per_second.is_finite());
    let text = r.render();
    assert!(text.contains("- Words per second: 0.00\n"), "{text}");
    assert!(!text.contains("inf"));
}

#[test]
fn multiline_transcript_is_embedded_raw() {
    let input = ReportInput {
        question: "Q",
        transcript: "first line\nsecond line",
        feedback: "",
        face_analysis: "No face detected.",
    };
    let text = generate_report(&input, 2.0).render();
    assert!(text.contains("Transcript: first line\nsecond line\n"));
    // the field spills onto an extra line
    assert_eq!(text.lines().count(), LABELS.len() + 1);
}
