//! Free-text command router.
//!
//! Pattern-matches keywords in the incoming message and dispatches to the
//! assistant. Every exchange is appended to the interaction memory, whatever
//! the outcome; a failed append is logged and never shadows the response.

use std::path::Path;

use tracing::warn;

use mesa_core::{MemoryLog, MesaConfig, MesaResult};

use crate::assistant::Assistant;

/// Keyword dispatcher over the assistant's command surface.
///
/// Commands:
/// - `connect: <database>`
/// - `analyze file: <path>`
/// - `search: <table>, <question>`
/// - `search history: <keyword>`
/// - `history`
pub struct Router {
    assistant: Assistant,
    memory: MemoryLog,
    default_database: String,
}

impl Router {
    /// Wrap an assistant, sharing its interaction memory.
    pub fn new(assistant: Assistant) -> Self {
        let memory = assistant.memory().clone();
        let default_database = assistant.default_database().to_string();
        Self {
            assistant,
            memory,
            default_database,
        }
    }

    /// Build the whole stack from a configuration.
    pub fn from_config(config: &MesaConfig) -> MesaResult<Self> {
        Ok(Self::new(Assistant::new(config)?))
    }

    /// Handle one free-text command and return the response shown to the
    /// user. The exchange is recorded regardless of the path taken.
    pub async fn handle(&self, message: &str) -> String {
        let lower = message.to_lowercase();

        // Most specific keywords first: "search history" would otherwise be
        // shadowed by "search" or "history", and an argument naming another
        // command must not reroute the message.
        let response = if lower.contains("search history") {
            match Self::argument(message) {
                Some(keyword) => self.assistant.search_history(keyword),
                None => "Expected 'search history: <keyword>'.".to_string(),
            }
        } else if lower.contains("analyze file") {
            match Self::argument(message) {
                Some(path) => {
                    self.assistant
                        .process_file(&self.default_database, Path::new(path), None)
                        .await
                }
                None => "Expected 'analyze file: <path>'.".to_string(),
            }
        } else if lower.contains("connect") {
            match Self::argument(message) {
                Some(name) => self.assistant.connect_database(name),
                None => "Expected 'connect: <database>'.".to_string(),
            }
        } else if lower.contains("history") {
            self.assistant.get_history()
        } else if lower.contains("search") {
            match Self::argument(message).and_then(Self::table_and_question) {
                Some((table, question)) => {
                    self.assistant.ask_natural_language(table, question).await
                }
                None => "Expected 'search: <table>, <question>'.".to_string(),
            }
        } else {
            "Command not recognized.".to_string()
        };

        if let Err(e) = self.memory.append(message, response.as_str()) {
            warn!(error = %e, "failed to record interaction");
        }
        response
    }

    /// Text after the first colon, trimmed; `None` when absent or blank.
    fn argument(message: &str) -> Option<&str> {
        message
            .splitn(2, ':')
            .nth(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Split a `<table>, <question>` argument.
    fn table_and_question(argument: &str) -> Option<(&str, &str)> {
        let (table, question) = argument.split_once(',')?;
        let table = table.trim();
        let question = question.trim();
        if table.is_empty() || question.is_empty() {
            None
        } else {
            Some((table, question))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::ModelConfig;
    use std::io::Write;

    fn offline_router(dir: &Path) -> Router {
        let token = ModelConfig {
            model: String::new(),
            api_token: Some("test-token".to_string()),
            base_url: None,
        };
        let config = MesaConfig {
            databases_dir: dir.join("databases"),
            memory_path: dir.join("memory.json"),
            default_database: "mi_base".to_string(),
            classifier: token.clone(),
            translator: token,
        };
        Router::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_command_is_recognized_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let router = offline_router(dir.path());

        let response = router.handle("hola").await;
        assert_eq!(response, "Command not recognized.");

        let history = router.memory.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_message, "hola");
        assert_eq!(history[0].assistant_response, "Command not recognized.");
    }

    #[tokio::test]
    async fn test_connect_command() {
        let dir = tempfile::tempdir().unwrap();
        let router = offline_router(dir.path());

        let response = router.handle("connect: test").await;
        assert_eq!(response, "Connected to database 'test'.");
        assert!(dir.path().join("databases").join("test.db").exists());
    }

    #[tokio::test]
    async fn test_analyze_file_command_ingests_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("clientes.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "nombre,ciudad").unwrap();
        writeln!(file, "ana,quito").unwrap();

        let router = offline_router(dir.path());
        let response = router
            .handle(&format!("analyze file: {}", csv_path.display()))
            .await;
        assert_eq!(
            response,
            "Table 'clientes' created and 1 row(s) inserted into database 'mi_base'."
        );
    }

    #[tokio::test]
    async fn test_search_history_wins_over_search_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let router = offline_router(dir.path());

        router.handle("connect: test").await;
        let response = router.handle("search history: connect").await;

        // A search-history response, not a table search and not the full log
        assert!(response.contains("connect: test"));
        assert!(!response.contains("search history: connect"));
    }

    #[tokio::test]
    async fn test_history_command_returns_full_log() {
        let dir = tempfile::tempdir().unwrap();
        let router = offline_router(dir.path());

        router.handle("hola").await;
        let response = router.handle("history").await;
        assert!(response.contains("\"user_message\": \"hola\""));
    }

    #[tokio::test]
    async fn test_malformed_arguments_get_usage_hints() {
        let dir = tempfile::tempdir().unwrap();
        let router = offline_router(dir.path());

        assert_eq!(
            router.handle("connect:").await,
            "Expected 'connect: <database>'."
        );
        assert_eq!(
            router.handle("search: solo_tabla").await,
            "Expected 'search: <table>, <question>'."
        );
    }

    #[test]
    fn test_argument_parsing() {
        assert_eq!(Router::argument("connect: mi_base"), Some("mi_base"));
        assert_eq!(Router::argument("analyze file: a/b.csv"), Some("a/b.csv"));
        assert_eq!(Router::argument("history"), None);
        assert_eq!(Router::argument("connect:   "), None);
    }

    #[test]
    fn test_table_and_question_parsing() {
        assert_eq!(
            Router::table_and_question("ventas, top 10"),
            Some(("ventas", "top 10"))
        );
        assert_eq!(Router::table_and_question("ventas"), None);
        assert_eq!(Router::table_and_question("ventas,  "), None);
    }
}
