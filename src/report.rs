//! # Report Assembler
//! Pure formatting of one answer's scores into the downloadable text report.
//! No I/O; callers decide where the text goes.
//!
//! Field order and labels are stable: consumers parse the text line by line.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::analyze::{anon_id, score_answer, AnswerScores, ConfidenceAlgorithm};
use crate::face::FaceAnalysis;

/// Suggested file name for the downloaded report.
pub const REPORT_FILE_NAME: &str = "interview_report.txt";

/// Caller-supplied text fields for one answer.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub question: &'a str,
    pub transcript: &'a str,
    /// Opaque feedback text (may already be a fallback message).
    pub feedback: &'a str,
    /// Opaque face-analysis text.
    pub face_analysis: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceLine {
    pub algorithm: ConfidenceAlgorithm,
    pub label: &'static str,
    pub score: f64,
}

/// Immutable report for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub question: String,
    pub transcript: String,
    pub feedback: String,
    pub face_analysis: String,
    pub confidence: Vec<ConfidenceLine>,
    pub sentiment_label: String,
    pub sentiment_score: f64,
    pub time_taken_secs: f64,
    pub word_count: usize,
    pub long_word_count: usize,
    pub words_per_second: f64,
    pub average_word_length: f64,
}

/// Combine caller text with computed scores.
pub fn assemble(input: &ReportInput<'_>, scores: &AnswerScores) -> Report {
    let confidence = scores
        .confidence
        .iter()
        .map(|(algorithm, score)| ConfidenceLine {
            algorithm,
            label: algorithm.label(),
            score,
        })
        .collect();

    Report {
        question: input.question.to_string(),
        transcript: input.transcript.to_string(),
        feedback: input.feedback.to_string(),
        face_analysis: input.face_analysis.to_string(),
        confidence,
        sentiment_label: scores.sentiment.label.to_string(),
        sentiment_score: scores.sentiment.score,
        time_taken_secs: scores.timing.derived_time_secs,
        word_count: scores.timing.word_count,
        long_word_count: scores.timing.long_word_count,
        words_per_second: scores.timing.words_per_second,
        average_word_length: scores.timing.average_word_length,
    }
}

/// Score and assemble in one step.
pub fn generate_report(input: &ReportInput<'_>, elapsed_secs: f64) -> Report {
    let scores = score_answer(input.transcript, elapsed_secs);
    let report = assemble(input, &scores);
    info!(
        target: "report",
        id = %anon_id(input.transcript),
        words = report.word_count,
        sentiment = %report.sentiment_label,
        "report assembled"
    );
    report
}

/// Convenience for callers holding a structured face result.
pub fn generate_report_with_face(
    question: &str,
    transcript: &str,
    feedback: &str,
    face: &FaceAnalysis,
    elapsed_secs: f64,
) -> Report {
    let face_text = face.to_report_text();
    let input = ReportInput {
        question,
        transcript,
        feedback,
        face_analysis: &face_text,
    };
    generate_report(&input, elapsed_secs)
}

impl Report {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// One field per line in a fixed order. The free-text fields (question,
/// transcript, feedback, face analysis) are written as-is: a value holding a
/// newline or a label string spills into the lines a line-based reader sees.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question: {}", self.question)?;
        writeln!(f, "Transcript: {}", self.transcript)?;
        writeln!(f, "Feedback: {}", self.feedback)?;
        writeln!(f, "Face Analysis: {}", self.face_analysis)?;
        writeln!(f, "Confidence Scores:")?;
        for line in &self.confidence {
            writeln!(f, "- {}: {:.2}%", line.label, line.score)?;
        }
        writeln!(
            f,
            "Sentiment Analysis: {} ({:.2})",
            self.sentiment_label, self.sentiment_score
        )?;
        writeln!(f, "Report details:")?;
        writeln!(
            f,
            "- Time taken for answer: {:.2} seconds",
            self.time_taken_secs
        )?;
        writeln!(f, "- Word count: {}", self.word_count)?;
        writeln!(
            f,
            "- Long words (more than 6 characters): {}",
            self.long_word_count
        )?;
        writeln!(f, "- Words per second: {:.2}", self.words_per_second)?;
        writeln!(f, "- Average word length: {:.2}", self.average_word_length)
    }
}
