use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable overriding `setup.wizard_url`.
pub const SETUP_WIZARD_URL_ENV: &str = "SETUP_WIZARD_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    /// Setup gate configuration shared by the CMS and the setup wizard
    #[serde(default)]
    pub setup: SetupConfig,
    /// Setup wizard server configuration
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Adds `Strict-Transport-Security` to responses; enable behind TLS only
    #[serde(default)]
    pub hsts_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupConfig {
    /// Where unconfigured CMS requests are redirected
    #[serde(default = "default_wizard_url")]
    pub wizard_url: String,

    /// Private config file, relative to the workspace root unless absolute
    #[serde(default = "default_private_config_path")]
    pub private_config_path: String,

    /// Workspace root; discovered from the working directory when unset
    #[serde(default)]
    pub workspace_root: Option<String>,

    /// Session cookie cleared when a request is sent to setup
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            wizard_url: default_wizard_url(),
            private_config_path: default_private_config_path(),
            workspace_root: None,
            session_cookie_name: default_session_cookie_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_wizard_port")]
    pub port: u16,

    /// Where a configured installation is sent instead of the wizard
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Directory holding the wizard step components
    #[serde(default = "default_components_dir")]
    pub components_dir: String,

    #[serde(default = "default_theme")]
    pub default_theme: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_wizard_port(),
            login_url: default_login_url(),
            components_dir: default_components_dir(),
            default_theme: default_theme(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Built CMS frontend
    #[serde(default = "default_frontend_dir")]
    pub dir: String,

    /// Cache max-age for hashed assets under `_app/immutable/`
    #[serde(default = "default_immutable_cache_max_age")]
    pub immutable_cache_max_age: u64,

    #[serde(default = "default_mutable_cache_max_age")]
    pub mutable_cache_max_age: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_frontend_dir(),
            immutable_cache_max_age: default_immutable_cache_max_age(),
            mutable_cache_max_age: default_mutable_cache_max_age(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Directory holding the rich-text editor modules
    #[serde(default = "default_editor_modules_dir")]
    pub modules_dir: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            modules_dir: default_editor_modules_dir(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5173
}
fn default_wizard_port() -> u16 {
    5174
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_wizard_url() -> String {
    "http://localhost:5174".to_string()
}
fn default_private_config_path() -> String {
    "config/private.ts".to_string()
}
fn default_session_cookie_name() -> String {
    "auth_session".to_string()
}
fn default_login_url() -> String {
    "/login".to_string()
}
fn default_components_dir() -> String {
    "apps/setup-wizard/build/components".to_string()
}
fn default_theme() -> String {
    "light".to_string()
}
fn default_frontend_dir() -> String {
    "build/client".to_string()
}
fn default_immutable_cache_max_age() -> u64 {
    31536000
}
fn default_mutable_cache_max_age() -> u64 {
    60
}
fn default_editor_modules_dir() -> String {
    "build/client/editor".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with CMS__ prefix
    /// 4. SETUP_WIZARD_URL for the redirect target
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CMS").separator("__"))
            .set_override_option("setup.wizard_url", std::env::var(SETUP_WIZARD_URL_ENV).ok())?
            .set_default("server.host", default_host())?
            .set_default("logging.level", default_log_level())?
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Built entirely from embedded defaults and overrides, without config
    /// files or environment variables.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 5173
            request_timeout_secs = 30

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            hsts_enabled = false

            [setup]
            wizard_url = "http://localhost:5174"
            private_config_path = "config/private.ts"
            session_cookie_name = "auth_session"

            [wizard]
            host = "127.0.0.1"
            port = 5174
            login_url = "/login"
            components_dir = "apps/setup-wizard/build/components"
            default_theme = "light"

            [frontend]
            enabled = false
            dir = "build/client"

            [editor]
            modules_dir = "build/client/editor"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.setup.wizard_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "setup.wizard_url (or SETUP_WIZARD_URL) must be set".to_string(),
            ));
        }

        if !self.setup.wizard_url.starts_with("http://")
            && !self.setup.wizard_url.starts_with("https://")
        {
            return Err(ConfigValidationError::InvalidValue(format!(
                "setup.wizard_url must be an http(s) URL, got '{}'",
                self.setup.wizard_url
            )));
        }

        if self.server.port == 0 || self.wizard.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.server.port == self.wizard.port && self.server.host == self.wizard.host {
            return Err(ConfigValidationError::InvalidValue(
                "CMS and setup wizard cannot share host and port".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    pub fn wizard_socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.wizard.host, self.wizard.port).parse()
    }

    /// Workspace root holding `config/`, `package.json` and `project.inlang/`.
    pub fn workspace_root(&self) -> PathBuf {
        match &self.setup.workspace_root {
            Some(root) => PathBuf::from(root),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                shared::workspace::find_workspace_root(&cwd)
            }
        }
    }

    /// Resolved location of the private config file.
    pub fn private_config_path(&self, workspace_root: &Path) -> PathBuf {
        resolve(workspace_root, &self.setup.private_config_path)
    }

    pub fn components_dir(&self, workspace_root: &Path) -> PathBuf {
        resolve(workspace_root, &self.wizard.components_dir)
    }

    pub fn editor_modules_dir(&self, workspace_root: &Path) -> PathBuf {
        resolve(workspace_root, &self.editor.modules_dir)
    }

    pub fn frontend_dir(&self, workspace_root: &Path) -> PathBuf {
        resolve(workspace_root, &self.frontend.dir)
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
