//! Common test utilities for integration tests.
//!
//! Each test gets its own temporary workspace holding the private config,
//! module directories and workspace metadata.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use cms_api::{app::create_app, config::Config, wizard_app::create_wizard_app};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const COMPLETE_CONFIG: &str = "export const privateEnv = createPrivateConfig({
\tDB_TYPE: 'mongodb',
\tDB_HOST: 'localhost',
\tDB_PORT: 27017,
\tDB_NAME: 'sveltycms',
\tJWT_SECRET_KEY: 'secret-value',
\tENCRYPTION_KEY: 'another-secret'
});
";

pub const EMPTY_SECRET_CONFIG: &str = "export const privateEnv = createPrivateConfig({
\tDB_HOST: 'localhost',
\tDB_NAME: 'sveltycms',
\tJWT_SECRET_KEY: '',
});
";

pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp workspace"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn private_config_path(&self) -> PathBuf {
        self.root().join("config").join("private.ts")
    }

    pub fn write_private_config(&self, content: &str) {
        let path = self.private_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read_private_config(&self) -> String {
        std::fs::read_to_string(self.private_config_path()).unwrap()
    }

    /// Writes `<dir>/<name>.js` for every name.
    pub fn write_modules(&self, dir: &str, names: &[&str]) {
        let dir = self.root().join(dir);
        std::fs::create_dir_all(&dir).unwrap();
        for name in names {
            std::fs::write(dir.join(format!("{}.js", name)), format!("export default '{}';", name))
                .unwrap();
        }
    }

    pub fn write_workspace_metadata(&self, version: &str, locales: &[&str]) {
        std::fs::write(
            self.root().join("package.json"),
            format!(r#"{{"version": "{}", "workspaces": ["apps/*"]}}"#, version),
        )
        .unwrap();
        let inlang = self.root().join("project.inlang");
        std::fs::create_dir_all(&inlang).unwrap();
        std::fs::write(
            inlang.join("settings.json"),
            serde_json::json!({ "locales": locales }).to_string(),
        )
        .unwrap();
    }

    pub fn config(&self, overrides: &[(&str, &str)]) -> Config {
        let root = self.root().to_string_lossy().to_string();
        let mut all = vec![("setup.workspace_root", root.as_str())];
        all.extend_from_slice(overrides);
        Config::load_for_test(&all).expect("Failed to load test config")
    }

    pub fn cms_app(&self) -> Router {
        create_app(self.config(&[]), self.root())
    }

    pub fn wizard_app(&self) -> Router {
        create_wizard_app(self.config(&[]), self.root())
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn set_cookie(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
}
