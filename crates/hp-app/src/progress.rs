//! Progress events emitted while a dataset is processed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingDataset,
    SolvingDesign,
    SolvingRows,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingDataset => "loading dataset",
            RunStage::SolvingDesign => "solving design",
            RunStage::SolvingRows => "solving rows",
            RunStage::SavingResults => "saving results",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowProgress {
    /// Rows processed so far, including the current one.
    pub done: usize,
    pub total: usize,
    pub solved: usize,
    pub failed: usize,
}

impl RowProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub rows: Option<RowProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            rows: None,
        }
    }
}

/// Optional progress sink.
pub type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;
