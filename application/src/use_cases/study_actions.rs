//! Study actions: the two entry points the presentation layer calls.
//!
//! [`StudyActions::ask_ai`] and [`StudyActions::find_books`] accept exactly
//! their flow's request shape and return exactly its response shape, or the
//! classified [`FlowError`]. They add nothing on top of [`ExecuteFlowUseCase`].

use crate::ports::progress::{FlowProgressNotifier, NoFlowProgress};
use crate::use_cases::execute_flow::{ExecuteFlowUseCase, FlowError};
use scholar_domain::{
    AskQuestionRequest, AskQuestionResponse, FindBooksRequest, FindBooksResponse, FlowCatalog,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct StudyActions {
    catalog: Arc<FlowCatalog>,
    executor: ExecuteFlowUseCase,
}

impl StudyActions {
    pub fn new(catalog: Arc<FlowCatalog>, executor: ExecuteFlowUseCase) -> Self {
        Self { catalog, executor }
    }

    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    /// Answer a question about a subject (`askAi`)
    pub async fn ask_ai(
        &self,
        request: &AskQuestionRequest,
    ) -> Result<AskQuestionResponse, FlowError> {
        self.ask_ai_with_progress(request, &NoFlowProgress).await
    }

    pub async fn ask_ai_with_progress(
        &self,
        request: &AskQuestionRequest,
        progress: &dyn FlowProgressNotifier,
    ) -> Result<AskQuestionResponse, FlowError> {
        self.executor
            .execute_typed_with_progress(self.catalog.ask_question(), request, progress)
            .await
    }

    /// Recommend books for a subject (`findBooks`)
    pub async fn find_books(
        &self,
        request: &FindBooksRequest,
    ) -> Result<FindBooksResponse, FlowError> {
        self.find_books_with_progress(request, &NoFlowProgress).await
    }

    pub async fn find_books_with_progress(
        &self,
        request: &FindBooksRequest,
        progress: &dyn FlowProgressNotifier,
    ) -> Result<FindBooksResponse, FlowError> {
        self.executor
            .execute_typed_with_progress(self.catalog.find_books(), request, progress)
            .await
    }
}
