//! Tool implementations for the sandboxed filesystem server.
//!
//! Tool and argument names are wire contract: the caller is an external
//! model that addresses them in camelCase exactly as cataloged here. Each
//! tool returns a single text payload; internal [`FsError`] kinds are
//! flattened to `Error: ...` text at this boundary and nowhere deeper.

use crate::SandboxServer;
use crate::error::FsError;
use crate::sandbox;
use crate::walker;
use rmcp::{
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Parameters for creating a file.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileParams {
    /// Path to the file to create, relative to the base directory.
    pub file_path: String,
    /// Content to write to the file.
    pub content: String,
}

/// How `editFile` applies its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Overwrite the entire file.
    #[default]
    Replace,
    /// Append to the existing content.
    Append,
}

/// Parameters for editing an existing file.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditFileParams {
    /// Path to the file to edit, relative to the base directory.
    pub file_path: String,
    /// New content for the file.
    pub content: String,
    /// Edit mode: replace the entire content or append to it.
    #[serde(default)]
    pub mode: EditMode,
}

/// Parameters for deleting a file.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    /// Path to the file to delete, relative to the base directory.
    pub file_path: String,
}

/// Parameters for listing a directory.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    /// Directory to list, relative to the base directory. Defaults to ".".
    pub directory_path: Option<String>,
    /// Whether to descend into subdirectories. Defaults to false.
    pub recursive: Option<bool>,
}

/// Parameters for reading a file.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileParams {
    /// Path to the file to read, relative to the base directory.
    pub file_path: String,
}

/// Parameters for moving the sandbox root.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetBaseDirectoryParams {
    /// Path to the new base directory. Must already exist.
    pub directory: String,
}

/// Flatten an operation outcome into the single-text-payload contract.
fn render(outcome: Result<String, FsError>) -> String {
    match outcome {
        Ok(message) => message,
        Err(e) => format!("Error: {e}"),
    }
}

#[tool_router]
impl SandboxServer {
    /// Create a server sandboxed to `root`. The directory is created lazily
    /// before the first operation, so it need not exist yet.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
            tool_router: Self::tool_router(),
        }
    }

    /// Snapshot the current base directory, creating it if missing. Runs
    /// before every dispatch regardless of which tool was requested.
    async fn ensure_root(&self) -> Result<PathBuf, FsError> {
        let root = self.root.read().await.clone();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| FsError::io("creating base directory", &root, e))?;
        Ok(root)
    }

    #[tool(name = "createFile", description = "Create a new file with specified content")]
    async fn create_file(&self, Parameters(params): Parameters<CreateFileParams>) -> String {
        render(self.do_create_file(params).await)
    }

    async fn do_create_file(&self, params: CreateFileParams) -> Result<String, FsError> {
        let root = self.ensure_root().await?;
        let full = sandbox::resolve(&root, &params.file_path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FsError::io("creating directory", parent, e))?;
        }
        if tokio::fs::try_exists(&full)
            .await
            .map_err(|e| FsError::io("checking file", &full, e))?
        {
            return Err(FsError::AlreadyExists {
                path: params.file_path,
            });
        }
        tokio::fs::write(&full, &params.content)
            .await
            .map_err(|e| FsError::io("creating file", &params.file_path, e))?;
        tracing::debug!(path = %full.display(), "created file");
        Ok(format!(
            "Successfully created file '{}' with {} characters.",
            params.file_path,
            params.content.chars().count()
        ))
    }

    #[tool(
        name = "editFile",
        description = "Edit an existing file by replacing its content or appending to it"
    )]
    async fn edit_file(&self, Parameters(params): Parameters<EditFileParams>) -> String {
        render(self.do_edit_file(params).await)
    }

    async fn do_edit_file(&self, params: EditFileParams) -> Result<String, FsError> {
        let root = self.ensure_root().await?;
        let full = sandbox::resolve(&root, &params.file_path)?;

        if !tokio::fs::try_exists(&full)
            .await
            .map_err(|e| FsError::io("checking file", &full, e))?
        {
            return Err(FsError::NotFound {
                path: params.file_path,
            });
        }
        let written = params.content.chars().count();
        match params.mode {
            EditMode::Append => {
                let mut file = tokio::fs::OpenOptions::new()
                    .append(true)
                    .open(&full)
                    .await
                    .map_err(|e| FsError::io("appending to file", &params.file_path, e))?;
                file.write_all(params.content.as_bytes())
                    .await
                    .map_err(|e| FsError::io("appending to file", &params.file_path, e))?;
                // tokio::fs::File buffers; dropping without a flush can lose
                // the write.
                file.flush()
                    .await
                    .map_err(|e| FsError::io("appending to file", &params.file_path, e))?;
                Ok(format!(
                    "Successfully appended {written} characters to '{}'.",
                    params.file_path
                ))
            }
            EditMode::Replace => {
                tokio::fs::write(&full, &params.content)
                    .await
                    .map_err(|e| FsError::io("replacing file", &params.file_path, e))?;
                Ok(format!(
                    "Successfully replaced content of '{}' with {written} characters.",
                    params.file_path
                ))
            }
        }
    }

    #[tool(name = "deleteFile", description = "Delete a file")]
    async fn delete_file(&self, Parameters(params): Parameters<DeleteFileParams>) -> String {
        render(self.do_delete_file(params).await)
    }

    async fn do_delete_file(&self, params: DeleteFileParams) -> Result<String, FsError> {
        let root = self.ensure_root().await?;
        let full = sandbox::resolve(&root, &params.file_path)?;
        tokio::fs::remove_file(&full)
            .await
            .map_err(|e| FsError::io("deleting file", &params.file_path, e))?;
        Ok(format!(
            "Successfully deleted file '{}'.",
            params.file_path
        ))
    }

    #[tool(
        name = "listFiles",
        description = "List files and directories in a specified directory"
    )]
    async fn list_files(&self, Parameters(params): Parameters<ListFilesParams>) -> String {
        render(self.do_list_files(params).await)
    }

    async fn do_list_files(&self, params: ListFilesParams) -> Result<String, FsError> {
        let root = self.ensure_root().await?;
        let directory = params.directory_path.unwrap_or_else(|| ".".to_string());
        let recursive = params.recursive.unwrap_or(false);
        let full = sandbox::resolve(&root, &directory)?;
        let lines = walker::list(&full, recursive).await;
        Ok(format!("Contents of '{directory}':\n{}", lines.join("\n")))
    }

    #[tool(name = "readFile", description = "Read the contents of a file")]
    async fn read_file(&self, Parameters(params): Parameters<ReadFileParams>) -> String {
        render(self.do_read_file(params).await)
    }

    async fn do_read_file(&self, params: ReadFileParams) -> Result<String, FsError> {
        let root = self.ensure_root().await?;
        let full = sandbox::resolve(&root, &params.file_path)?;
        let content = tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| FsError::io("reading file", &params.file_path, e))?;
        Ok(format!("Content of '{}':\n\n{content}", params.file_path))
    }

    #[tool(
        name = "setBaseDirectory",
        description = "Set the base directory for file operations"
    )]
    async fn set_base_directory(
        &self,
        Parameters(params): Parameters<SetBaseDirectoryParams>,
    ) -> String {
        render(self.do_set_base_directory(params).await)
    }

    async fn do_set_base_directory(
        &self,
        params: SetBaseDirectoryParams,
    ) -> Result<String, FsError> {
        self.ensure_root().await?;
        // Intentionally not sandbox-constrained: this call escapes the
        // current root to establish a new one.
        let dir = std::path::absolute(&params.directory)
            .map_err(|e| FsError::io("setting base directory", &params.directory, e))?;
        let meta = tokio::fs::metadata(&dir)
            .await
            .map_err(|e| FsError::io("setting base directory", &dir, e))?;
        if !meta.is_dir() {
            return Err(FsError::io(
                "setting base directory",
                &dir,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        *self.root.write().await = dir.clone();
        tracing::info!(root = %dir.display(), "base directory changed");
        Ok(format!(
            "Successfully set base directory to '{}'.",
            dir.display()
        ))
    }
}
