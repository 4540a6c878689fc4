//! Static file serving module
//!
//! Files under the assets directory are served verbatim at their relative
//! path. The app mounts this as the router's fallback, so explicit routes
//! take precedence over files with the same path.

use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::AssetsConfig;
use crate::http::{cache, mime, Request, Response};
use crate::logger;
use crate::routing;
use hyper::{Method, StatusCode};

#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
    index_files: Vec<String>,
}

impl StaticAssets {
    /// `None` when static serving is disabled or the directory is missing
    pub fn from_config(config: &AssetsConfig) -> Option<Self> {
        let dir = config.dir.as_deref()?;
        match Path::new(dir).canonicalize() {
            Ok(root) if root.is_dir() => Some(Self {
                root,
                index_files: config.index_files.clone(),
            }),
            _ => {
                logger::log_warning(&format!(
                    "Static directory not found or inaccessible '{dir}', static serving disabled"
                ));
                None
            }
        }
    }

    /// Fallback handler: the file for `req`, or the router's 404
    pub async fn respond(&self, req: Request) -> Response {
        match self.serve(&req).await {
            Some(resp) => resp,
            None => routing::not_found(req).await,
        }
    }

    /// Serve `req` from the assets directory if a file exists for it
    pub async fn serve(&self, req: &Request) -> Option<Response> {
        if req.method != Method::GET && req.method != Method::HEAD {
            return None;
        }

        let file_path = self.resolve(&req.path)?;
        let content = match fs::read(&file_path).await {
            Ok(c) => c,
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {}",
                    file_path.display(),
                    e
                ));
                return None;
            }
        };

        let etag = cache::etag_for(&content);
        if cache::is_fresh(req.header("if-none-match"), &etag) {
            return Some(Response::not_modified(&etag));
        }

        let content_type = mime::content_type_for(&file_path);
        Some(
            Response::new(StatusCode::OK, Some(content_type), content)
                .with_header("etag", &etag)
                .with_header("cache-control", "public, max-age=0"),
        )
    }

    /// Map a request path to a file inside the root, trying index files for
    /// directories
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
            return None;
        }

        let mut file_path = self.root.join(relative);
        if file_path.is_dir() {
            file_path = self
                .index_files
                .iter()
                .map(|index| file_path.join(index))
                .find(|candidate| candidate.is_file())?;
        }

        // Symlinks may still point outside the root
        let canonical = file_path.canonicalize().ok()?;
        if !canonical.starts_with(&self.root) || !canonical.is_file() {
            return None;
        }
        Some(canonical)
    }
}
