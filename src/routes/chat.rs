use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, MISSING_FIELDS},
    services::interaction_log::InteractionRecord,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let Json(payload) = payload.map_err(|rejection| {
            tracing::warn!(error = %rejection, "rejected chat body");
            match rejection {
                // No JSON body at all reads as an empty request.
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::BadRequest(MISSING_FIELDS.to_string())
                }
                other => AppError::BadRequest(other.body_text()),
            }
        })?;

        let chat = payload.validate()?;
        let prompt = state.prompt.build(&chat.books, &chat.query);

        let reply = state.generator.generate(&prompt).await?;
        tracing::info!(reply_len = reply.len(), "generated reply");

        if let Some(store) = &state.store {
            let record = InteractionRecord::now(chat.query, reply.clone());
            // A failed write is logged and the reply still goes out.
            if let Err(err) = store.insert(&record).await {
                tracing::warn!(error = %err, "failed to save interaction");
            }
        }

        Ok::<_, AppError>(Json(ChatResponse { reply }))
    }
    .instrument(span)
    .await
}
