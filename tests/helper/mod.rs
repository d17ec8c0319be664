//! Shared test utilities

use std::path::PathBuf;

use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

pub const GIST_PATH: &str = "/ervinb/ecab6ca35ec87ed0cadf";

/// Gist page markup linking `ips.txt` at `revision`
pub fn gist_page(revision: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <div class="file-actions">
    <a href="/ervinb/ecab6ca35ec87ed0cadf/raw/{revision}/ips.txt" class="btn btn-sm">Raw</a>
  </div>
</body>
</html>
"#
    )
}

/// Serves `body` at the gist path with `status`
pub async fn serve_page(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", GIST_PATH)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

pub fn gist_url(server: &ServerGuard) -> String {
    format!("{}{}", server.url(), GIST_PATH)
}

/// Temp dir holding the save file path (file not created)
pub fn state_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("previous_version");
    (temp_dir, path)
}
