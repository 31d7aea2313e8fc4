//! Text classification trait and result types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MesaResult;

/// One classification result: a label and its confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted label.
    pub label: String,
    /// Confidence score in [0, 1].
    pub score: f64,
}

/// Core text-classification trait - all classifier providers implement this.
///
/// Implementations catch their own inference failures and return them as
/// errors; they never panic on a bad response.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify a piece of text, returning one or more labeled results.
    async fn classify(&self, text: &str) -> MesaResult<Vec<Classification>>;

    /// Model identifier this classifier was built for.
    fn model_id(&self) -> &str;
}
