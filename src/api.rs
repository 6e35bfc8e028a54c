//! HTTP surface: question bank, scoring, feedback, and report download.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyze::{anon_id, derived_time_secs, score_answer, AnswerScores};
use crate::config::FeedbackConfig;
use crate::face::FaceAnalysis;
use crate::feedback::{build_client, feedback_or_fallback, DynFeedbackClient};
use crate::metrics::{record_report, record_scores};
use crate::questions::{Question, QuestionBank};
use crate::report::{assemble, Report, ReportInput, REPORT_FILE_NAME};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionBank>,
    pub feedback: DynFeedbackClient,
}

impl AppState {
    pub fn new(questions: QuestionBank, feedback: DynFeedbackClient) -> Self {
        Self {
            questions: Arc::new(questions),
            feedback,
        }
    }

    /// Question bank and feedback client configured from env/config files.
    pub fn from_env() -> Self {
        let questions = QuestionBank::from_env();
        let feedback = build_client(&FeedbackConfig::from_env());
        Self::new(questions, feedback)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/questions", get(list_questions))
        .route("/questions/{index}", get(get_question))
        .route("/score", post(score))
        .route("/feedback", post(feedback))
        .route("/report", post(report_text))
        .route("/report/json", post(report_json))
        .with_state(state)
}

// ------------------------------------------------------------
// Errors
// ------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    UnknownQuestion(usize),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::UnknownQuestion(i) => {
                (StatusCode::NOT_FOUND, format!("unknown question index {i}"))
            }
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

// ------------------------------------------------------------
// Questions
// ------------------------------------------------------------

#[derive(Serialize)]
struct QuestionOut {
    index: usize,
    question: String,
    tech_stack: String,
    next_index: usize,
    previous_index: usize,
}

fn question_out(bank: &QuestionBank, index: usize, q: &Question) -> QuestionOut {
    QuestionOut {
        index,
        question: q.question.clone(),
        tech_stack: q.tech_stack.clone(),
        next_index: bank.next_index(index),
        previous_index: bank.previous_index(index),
    }
}

async fn list_questions(State(state): State<AppState>) -> Json<Vec<QuestionOut>> {
    let bank = &state.questions;
    Json(
        bank.iter()
            .enumerate()
            .map(|(i, q)| question_out(bank, i, q))
            .collect(),
    )
}

async fn get_question(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<QuestionOut>, ApiError> {
    let bank = &state.questions;
    let q = bank.get(index).ok_or(ApiError::UnknownQuestion(index))?;
    Ok(Json(question_out(bank, index, q)))
}

/// Explicit question text wins; otherwise look up the index (default 0).
fn resolve_question(
    bank: &QuestionBank,
    question: Option<String>,
    index: Option<usize>,
) -> Result<String, ApiError> {
    if let Some(q) = question {
        return Ok(q);
    }
    let i = index.unwrap_or(0);
    bank.get(i)
        .map(|q| q.question.clone())
        .ok_or(ApiError::UnknownQuestion(i))
}

// ------------------------------------------------------------
// Scoring
// ------------------------------------------------------------

#[derive(Deserialize)]
struct ScoreReq {
    transcript: String,
    /// Measured answer duration; derived from transcript length when absent.
    #[serde(default)]
    elapsed_secs: Option<f64>,
}

fn elapsed_or_derived(transcript: &str, elapsed: Option<f64>) -> f64 {
    elapsed.unwrap_or_else(|| derived_time_secs(transcript))
}

async fn score(Json(body): Json<ScoreReq>) -> Json<AnswerScores> {
    let elapsed = elapsed_or_derived(&body.transcript, body.elapsed_secs);
    let scores = score_answer(&body.transcript, elapsed);
    record_scores(&scores);
    Json(scores)
}

// ------------------------------------------------------------
// Feedback
// ------------------------------------------------------------

#[derive(Deserialize)]
struct FeedbackReq {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    question_index: Option<usize>,
    answer: String,
}

#[derive(Serialize)]
struct FeedbackResp {
    feedback: String,
    provider: &'static str,
}

async fn feedback(
    State(state): State<AppState>,
    Json(body): Json<FeedbackReq>,
) -> Result<Json<FeedbackResp>, ApiError> {
    let question = resolve_question(&state.questions, body.question, body.question_index)?;
    let text = feedback_or_fallback(state.feedback.as_ref(), &question, &body.answer).await;
    Ok(Json(FeedbackResp {
        feedback: text,
        provider: state.feedback.provider_name(),
    }))
}

// ------------------------------------------------------------
// Report
// ------------------------------------------------------------

#[derive(Deserialize)]
struct ReportReq {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    question_index: Option<usize>,
    transcript: String,
    #[serde(default)]
    elapsed_secs: Option<f64>,
    /// Feedback text obtained earlier (e.g. from /feedback).
    #[serde(default)]
    feedback: Option<String>,
    /// Face summary: free text or a list of expression probabilities.
    #[serde(default)]
    face: Option<FaceAnalysis>,
}

fn build_report(state: &AppState, body: ReportReq) -> Result<Report, ApiError> {
    let question = resolve_question(&state.questions, body.question, body.question_index)?;
    let face_text = body.face.unwrap_or_default().to_report_text();
    let feedback = body.feedback.unwrap_or_default();
    let elapsed = elapsed_or_derived(&body.transcript, body.elapsed_secs);

    let scores = score_answer(&body.transcript, elapsed);
    record_scores(&scores);

    let input = ReportInput {
        question: &question,
        transcript: &body.transcript,
        feedback: &feedback,
        face_analysis: &face_text,
    };
    let report = assemble(&input, &scores);
    record_report();
    info!(
        target: "api",
        id = %anon_id(&body.transcript),
        words = report.word_count,
        "report generated"
    );
    Ok(report)
}

async fn report_text(
    State(state): State<AppState>,
    Json(body): Json<ReportReq>,
) -> Result<Response, ApiError> {
    let report = build_report(&state, body)?;
    let disposition = format!("attachment; filename=\"{REPORT_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.render(),
    )
        .into_response())
}

async fn report_json(
    State(state): State<AppState>,
    Json(body): Json<ReportReq>,
) -> Result<Json<Report>, ApiError> {
    build_report(&state, body).map(Json)
}
