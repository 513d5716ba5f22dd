use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::cash_notes::models::{
    CashNote, CashNoteFilter, CreateCashNoteRequest, UpdateCashNoteRequest,
};
use crate::modules::cash_notes::repositories::CashNoteRepository;

/// Service for the manual cash ledger
pub struct CashNoteService {
    repo: Arc<dyn CashNoteRepository>,
}

impl CashNoteService {
    pub fn new(repo: Arc<dyn CashNoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateCashNoteRequest,
        created_by: &str,
    ) -> Result<CashNote> {
        request.validate()?;

        let now = Utc::now();
        let note = CashNote {
            id: Uuid::new_v4().to_string(),
            note_type: request.note_type,
            amount: request.amount,
            description: request.description.trim().to_string(),
            date: request.date.unwrap_or(now),
            created_by: created_by.to_string(),
            created_at: now,
        };

        self.repo.insert(&note).await?;

        info!(
            note_id = %note.id,
            note_type = %note.note_type,
            amount = %note.amount,
            "Recorded cash note"
        );

        Ok(note)
    }

    pub async fn get_note(&self, id: &str) -> Result<CashNote> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Cash note {}", id)))
    }

    pub async fn list_notes(&self, filter: &CashNoteFilter) -> Result<Vec<CashNote>> {
        self.repo.list(filter).await
    }

    pub async fn update_note(&self, id: &str, request: UpdateCashNoteRequest) -> Result<CashNote> {
        let mut note = self.get_note(id).await?;
        request.apply(&mut note)?;

        self.repo.update(&note).await?;
        info!(note_id = %note.id, "Updated cash note");

        Ok(note)
    }

    pub async fn delete_note(&self, id: &str) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found(format!("Cash note {}", id)));
        }
        info!(note_id = %id, "Deleted cash note");
        Ok(())
    }
}
