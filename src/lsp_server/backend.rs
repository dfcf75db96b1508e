//! LSP Backend Implementation for the Hurler Language Server
//!
//! This module implements the Language Server Protocol backend using tower-lsp.
//! It adapts the pure providers in `language_server` to the protocol and turns
//! the `hurler.runHurl` command into a `hurl` run.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CodeLens as LspCodeLens, CodeLensOptions, CodeLensParams, Command as LspCommand,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, ExecuteCommandOptions, ExecuteCommandParams, Hover as LspHover,
    HoverContents, HoverParams, HoverProviderCapability, InitializeParams, InitializeResult,
    InitializedParams, MarkedString, MessageType, Position as LspPosition, Range as LspRange,
    ServerCapabilities, ServerInfo, ShowDocumentParams, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer};

use super::document::{DocumentError, DocumentManager};
use crate::config::{load_config, HurlerConfig};
use crate::language_server::codelens::{self, RUN_COMMAND};
use crate::language_server::{hover, Position, Range};
use crate::runner::{self, RunError, RunPlan};

/// LSP Backend for the Hurler extension
///
/// Holds the open documents, the current settings and the workspace root.
/// Every request recomputes its answer from these.
#[derive(Debug)]
pub struct Backend {
    /// LSP client for sending notifications and requests to the editor
    client: Client,

    /// Document manager for tracking open files
    documents: Arc<DocumentManager>,

    /// Current `hurler` settings
    config: Arc<RwLock<HurlerConfig>>,

    /// Workspace root used for relative `environmentFile` settings
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
}

impl Backend {
    /// Creates a new Backend instance with default settings
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hurler::lsp_server::backend::Backend;
    ///
    /// let (service, socket) = tower_lsp::LspService::new(|client| Backend::new(client));
    /// ```
    pub fn new(client: Client) -> Self {
        Self::with_config(client, HurlerConfig::default())
    }

    /// Creates a new Backend instance with the given settings
    pub fn with_config(client: Client, config: HurlerConfig) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentManager::new()),
            config: Arc::new(RwLock::new(config)),
            workspace_root: Arc::new(RwLock::new(None)),
        }
    }

    /// Logs a message to the client
    async fn log_message(&self, typ: MessageType, message: impl std::fmt::Display) {
        self.client.log_message(typ, message).await;
    }

    /// Logs an informational message
    async fn log_info(&self, message: impl std::fmt::Display) {
        self.log_message(MessageType::INFO, message).await;
    }

    /// Logs a warning message
    async fn log_warn(&self, message: impl std::fmt::Display) {
        self.log_message(MessageType::WARNING, message).await;
    }

    /// Logs an error message
    async fn log_error(&self, message: impl std::fmt::Display) {
        self.log_message(MessageType::ERROR, message).await;
    }

    /// Returns a copy of the current settings
    pub fn current_config(&self) -> HurlerConfig {
        self.config
            .read()
            .map(|config| config.clone())
            .unwrap_or_default()
    }

    /// Replaces the current settings
    pub fn set_config(&self, config: HurlerConfig) {
        if let Ok(mut current) = self.config.write() {
            *current = config;
        }
    }

    /// Sets the workspace root
    pub fn set_workspace_root(&self, root: PathBuf) {
        if let Ok(mut current) = self.workspace_root.write() {
            *current = Some(root);
        }
    }

    /// Workspace root, or an empty path when none is known
    fn base_path(&self) -> PathBuf {
        self.workspace_root
            .read()
            .ok()
            .and_then(|root| root.clone())
            .unwrap_or_default()
    }

    /// Validates the active document and starts `hurl` on it
    ///
    /// The output artifact is truncated before dispatch; a failure there
    /// aborts the run without starting anything.
    pub fn run_active_document(&self) -> std::result::Result<RunPlan, RunError> {
        let path = self
            .documents
            .active_document()
            .and_then(|document| document.path);

        let plan = runner::prepare_run(path.as_deref(), &self.current_config(), &self.base_path())?;
        runner::dispatch(&plan)?;
        Ok(plan)
    }

    /// Asks the editor to show the output artifact beside the document
    ///
    /// Not synchronized with the run; the artifact may still be empty.
    fn open_output(&self, plan: &RunPlan) {
        let uri = match Url::from_file_path(&plan.output_path) {
            Ok(uri) => uri,
            Err(()) => {
                log::warn!(
                    "cannot build a URI for {}",
                    plan.output_path.display()
                );
                return;
            }
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            let params = ShowDocumentParams {
                uri: uri.clone(),
                external: Some(false),
                take_focus: Some(false),
                selection: None,
            };
            match client.show_document(params).await {
                Ok(true) => log::debug!("opened {}", uri),
                Ok(false) => log::warn!("editor declined to open {}", uri),
                Err(e) => log::warn!("failed to open {}: {}", uri, e),
            }
        });
    }
}

/// Converts an internal range to an LSP range
fn to_lsp_range(range: Range) -> LspRange {
    LspRange {
        start: LspPosition {
            line: range.start.line as u32,
            character: range.start.character as u32,
        },
        end: LspPosition {
            line: range.end.line as u32,
            character: range.end.character as u32,
        },
    }
}

/// Maps a run failure to the JSON-RPC error returned to the editor
fn to_rpc_error(error: &RunError) -> tower_lsp::jsonrpc::Error {
    match error {
        RunError::NoActiveDocument | RunError::NotHurlFile(_) => {
            tower_lsp::jsonrpc::Error::invalid_params(error.to_string())
        }
        RunError::OutputFile { .. } | RunError::Spawn(_) => {
            let mut rpc_error = tower_lsp::jsonrpc::Error::internal_error();
            rpc_error.message = error.to_string().into();
            rpc_error
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    /// Initialize the language server
    ///
    /// Records the workspace root, reads settings from the initialization
    /// options and declares code lens, hover and the run command.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.log_info(format!(
            "Initializing Hurler Language Server (process ID: {:?})",
            params.process_id
        ))
        .await;

        #[allow(deprecated)]
        let root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok())
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()
                    .and_then(|folders| folders.first())
                    .and_then(|folder| folder.uri.to_file_path().ok())
            });

        if let Some(root) = root {
            self.log_info(format!("Workspace root: {}", root.display()))
                .await;
            self.set_workspace_root(root);
        }

        self.set_config(load_config(params.initialization_options));

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),

            code_lens_provider: Some(CodeLensOptions {
                resolve_provider: Some(false),
            }),

            hover_provider: Some(HoverProviderCapability::Simple(true)),

            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![RUN_COMMAND.to_string()],
                work_done_progress_options: Default::default(),
            }),

            ..Default::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "hurler-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.log_info("Hurler Language Server initialized successfully")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.log_info("Shutting down Hurler Language Server").await;
        self.documents.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;

        self.log_info(format!("Document opened: {}", uri)).await;

        if let Err(e) = self.documents.insert(uri.clone(), params.text_document.text) {
            self.log_error(format!("Failed to insert document {}: {}", uri, e))
                .await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // Full sync: exactly one change carrying the whole text
        let Some(change) = params.content_changes.into_iter().next() else {
            self.log_warn(format!("No content changes received for document: {}", uri))
                .await;
            return;
        };

        match self.documents.update(uri.clone(), change.text.clone()) {
            Ok(()) => {}
            Err(DocumentError::NotFound) => {
                if let Err(e) = self.documents.insert(uri.clone(), change.text) {
                    self.log_error(format!("Failed to insert document {}: {}", uri, e))
                        .await;
                }
            }
            Err(e) => {
                self.log_error(format!("Failed to update document {}: {}", uri, e))
                    .await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        self.log_info(format!("Document closed: {}", uri)).await;

        if self.documents.remove(&uri).is_none() {
            self.log_warn(format!("Document not found when closing: {}", uri))
                .await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let config = load_config(Some(params.settings));
        self.log_info(format!(
            "Configuration updated (environmentFile: {:?})",
            config.environment_file
        ))
        .await;
        self.set_config(config);
    }

    /// Handle textDocument/codeLens request
    ///
    /// Puts a "Run Hurl File" lens on every request line.
    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<LspCodeLens>>> {
        let uri = params.text_document.uri;

        let document = match self.documents.get(&uri) {
            Some(document) => document,
            None => {
                self.log_warn(format!("Document not found for code lens: {}", uri))
                    .await;
                return Ok(Some(Vec::new()));
            }
        };

        let lenses = match &document.path {
            Some(path) => codelens::provide_code_lens(&document.text, path),
            None => Vec::new(),
        };

        let lsp_lenses: Vec<LspCodeLens> = lenses
            .into_iter()
            .map(|lens| LspCodeLens {
                range: to_lsp_range(lens.range),
                command: Some(LspCommand {
                    title: lens.command.title,
                    command: lens.command.command,
                    arguments: None,
                }),
                data: None,
            })
            .collect();

        self.log_info(format!(
            "Provided {} code lens(es) for: {}",
            lsp_lenses.len(),
            uri
        ))
        .await;

        Ok(Some(lsp_lenses))
    }

    /// Handle textDocument/hover request
    ///
    /// Shows the value of the `{{variable}}` under the cursor as two
    /// markdown parts: the variable name and the lookup result.
    async fn hover(&self, params: HoverParams) -> Result<Option<LspHover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let lsp_position = params.text_document_position_params.position;

        let document = match self.documents.get(uri) {
            Some(document) => document,
            None => {
                self.log_warn(format!("Document not found for hover: {}", uri))
                    .await;
                return Ok(None);
            }
        };

        // Hovering counts as interacting with the document
        let _ = self.documents.set_active(uri);

        let position = Position::new(lsp_position.line as usize, lsp_position.character as usize);
        let settings = self.current_config().environment_settings(&self.base_path());

        let Some(internal_hover) = hover::provide_hover(&document.text, position, &settings) else {
            return Ok(None);
        };

        Ok(Some(LspHover {
            contents: HoverContents::Array(vec![
                MarkedString::String(internal_hover.header),
                MarkedString::String(internal_hover.body),
            ]),
            range: internal_hover.range.map(to_lsp_range),
        }))
    }

    /// Handle workspace/executeCommand request
    ///
    /// `hurler.runHurl` takes no arguments and runs the active document.
    /// Failures are shown to the user and abort the run.
    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if params.command != RUN_COMMAND {
            self.log_warn(format!("Unknown command: {}", params.command))
                .await;
            return Err(tower_lsp::jsonrpc::Error::invalid_params(format!(
                "Unknown command: {}",
                params.command
            )));
        }

        match self.run_active_document() {
            Ok(plan) => {
                self.log_info(format!("Running: {}", plan.command)).await;
                self.open_output(&plan);
                Ok(None)
            }
            Err(e) => {
                self.log_error(&e).await;
                self.client.show_message(MessageType::ERROR, &e).await;
                Err(to_rpc_error(&e))
            }
        }
    }
}
