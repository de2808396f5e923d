//! Report file loading

use std::path::Path;

use anyhow::Context;
use application::services::ReportDocument;

/// Content type for a report file, by extension
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

/// Read a report from disk
///
/// `mime_override` wins over the extension.
pub async fn load_report(
    path: &Path,
    mime_override: Option<&str>,
) -> anyhow::Result<ReportDocument> {
    let mime = mime_override
        .or_else(|| mime_from_path(path))
        .with_context(|| {
            format!(
                "cannot tell the report type of {}; pass --mime",
                path.display()
            )
        })?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(ReportDocument::from_bytes(bytes, mime)?)
}
