//! Route handlers.
//!
//! The stateless endpoints (`/questions`, `/evaluate`, `/summary`) serve clients
//! that keep interview state themselves. `/sessions/...` drives the server-side state
//! machine, one locked `SessionState` per candidate.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use super::error::ApiError;
use super::types::{
    AnswerRequest, AnswerResponse, EvaluateRequest, FeedbackRequest, FeedbackResponse,
    HealthResponse, QuestionView, QuestionsResponse, ReportResponse, SessionView, SummaryRequest,
};
use super::AppState;
use crate::domain::models::{
    clamp_score, EvaluationResult, Registration, SessionPhase, SummaryEntry, SummaryResult,
    FEEDBACK_THANKS,
};

type ApiResult<T> = Result<T, ApiError>;

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        bank_size: state.interviewer.bank.len(),
        active_sessions: state.sessions.len().await,
    })
}

/// `GET /questions`: a fresh sample without reference answers
pub async fn questions(State(state): State<Arc<AppState>>) -> ApiResult<Json<QuestionsResponse>> {
    let set = state.interviewer.bank.sample(state.interviewer.question_count)?;
    Ok(Json(QuestionsResponse {
        questions: set.questions,
    }))
}

/// `POST /evaluate`
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> ApiResult<Json<EvaluationResult>> {
    let question_text = state.interviewer.bank.lookup_text(request.question_id)?;
    let result = state
        .interviewer
        .evaluator
        .evaluate(question_text, &request.user_answer)
        .await;
    Ok(Json(result))
}

/// `POST /summary`
pub async fn summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Json<SummaryResult> {
    // Unknown ids contribute an empty question text
    let entries: Vec<SummaryEntry> = request
        .answers
        .into_iter()
        .map(|answer| SummaryEntry {
            question: state
                .interviewer
                .bank
                .lookup_text(answer.id)
                .unwrap_or_default()
                .to_string(),
            user_answer: answer.user_answer,
            score: clamp_score(answer.score),
        })
        .collect();

    Json(
        state
            .interviewer
            .summarizer
            .summarize(&request.user_name, &entries)
            .await,
    )
}

/// `POST /sessions`: register and start in one step
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let (id, session) = state.sessions.create().await;
    let controller = &state.interviewer.controller;

    let mut guard = session.lock().await;
    if let Err(err) = controller.start(&mut guard, &registration) {
        drop(guard);
        state.sessions.remove(id).await?;
        return Err(err.into());
    }

    let view = SessionView::new(&guard, controller.remaining(&guard));
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /sessions/{id}`
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let session = state.sessions.get(id).await?;
    let controller = &state.interviewer.controller;

    let mut guard = session.lock().await;
    controller.tick(&mut guard);
    Ok(Json(SessionView::new(&guard, controller.remaining(&guard))))
}

/// `GET /sessions/{id}/question`
pub async fn current_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<QuestionView>> {
    let session = state.sessions.get(id).await?;
    let controller = &state.interviewer.controller;

    let mut guard = session.lock().await;
    controller.tick(&mut guard);
    let question = controller.current_question(&guard)?.clone();

    Ok(Json(QuestionView {
        position: guard.cursor() + 1,
        total_questions: guard.total_questions(),
        remaining_secs: controller.remaining(&guard).num_seconds(),
        question,
    }))
}

/// `POST /sessions/{id}/answers`
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<Json<AnswerResponse>> {
    let session = state.sessions.get(id).await?;

    let mut guard = session.lock().await;
    let outcome = state
        .interviewer
        .controller
        .submit(&mut guard, &request.answer)
        .await?;

    let tip = (outcome.phase == SessionPhase::InProgress)
        .then(|| state.interviewer.commentary.tip(outcome.cursor))
        .flatten();

    Ok(Json(AnswerResponse {
        record: outcome.record,
        phase: outcome.phase,
        answered: outcome.cursor,
        total_questions: guard.total_questions(),
        tip,
    }))
}

/// `GET /sessions/{id}/report`
pub async fn report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReportResponse>> {
    let session = state.sessions.get(id).await?;

    let mut guard = session.lock().await;
    let report = state.interviewer.controller.report(&mut guard).await?;
    drop(guard);

    let notes = report
        .answers
        .iter()
        .filter_map(|record| state.interviewer.commentary.answer_note(record))
        .collect();

    Ok(Json(ReportResponse { report, notes }))
}

/// `POST /sessions/{id}/feedback`: closing feedback after completion
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<FeedbackRequest>,
) -> ApiResult<Json<FeedbackResponse>> {
    let session = state.sessions.get(id).await?;
    let mut guard = session.lock().await;
    state
        .interviewer
        .controller
        .record_feedback(&mut guard, &request.feedback)?;

    Ok(Json(FeedbackResponse {
        message: FEEDBACK_THANKS.to_string(),
    }))
}
