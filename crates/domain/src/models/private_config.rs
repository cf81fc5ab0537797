//! Private configuration record written by the setup wizard.

use serde::{Deserialize, Serialize};
use shared::crypto::generate_secret;
use validator::Validate;

/// Bootstrap configuration the CMS needs before normal operation.
///
/// Persisted as a text template of `KEY: value,` assignments (see
/// [`PrivateConfig::render`]). Field names follow the keys of that template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PrivateConfig {
    #[validate(custom(function = "shared::validation::validate_db_type"))]
    pub db_type: String,

    #[validate(custom(function = "shared::validation::validate_required_value"))]
    pub db_host: String,

    #[validate(range(min = 1, message = "DB_PORT must be between 1 and 65535"))]
    pub db_port: u16,

    #[validate(custom(function = "shared::validation::validate_required_value"))]
    pub db_name: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_template_safe"))]
    pub db_user: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_template_safe"))]
    pub db_password: String,

    #[serde(default = "default_retry_attempts")]
    #[validate(range(min = 1, max = 20, message = "DB_RETRY_ATTEMPTS must be between 1 and 20"))]
    pub db_retry_attempts: u32,

    #[serde(default = "default_retry_delay")]
    #[validate(range(max = 60000, message = "DB_RETRY_DELAY must not exceed 60000 ms"))]
    pub db_retry_delay: u32,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_secret"))]
    pub jwt_secret_key: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_secret"))]
    pub encryption_key: String,

    #[serde(default)]
    pub multi_tenant: bool,
}

fn default_retry_attempts() -> u32 {
    5
}

fn default_retry_delay() -> u32 {
    3000
}

const TEMPLATE_HEADER: &str = "/**
 * @file config/private.ts
 * @description Private configuration. Generated by the setup wizard, do not commit.
 */
import { createPrivateConfig } from './schemas.js';

export const privateEnv = createPrivateConfig({
";

const TEMPLATE_FOOTER: &str = "});
";

impl PrivateConfig {
    /// The placeholder record written on first run of the setup wizard.
    pub fn blank() -> Self {
        Self {
            db_type: "mongodb".to_string(),
            db_host: String::new(),
            db_port: 27017,
            db_name: String::new(),
            db_user: String::new(),
            db_password: String::new(),
            db_retry_attempts: default_retry_attempts(),
            db_retry_delay: default_retry_delay(),
            jwt_secret_key: String::new(),
            encryption_key: String::new(),
            multi_tenant: false,
        }
    }

    /// Fills empty `JWT_SECRET_KEY` and `ENCRYPTION_KEY` with random secrets.
    pub fn with_generated_secrets(mut self) -> Self {
        if self.jwt_secret_key.is_empty() {
            self.jwt_secret_key = generate_secret();
        }
        if self.encryption_key.is_empty() {
            self.encryption_key = generate_secret();
        }
        self
    }

    /// Renders the record into the on-disk template.
    pub fn render(&self) -> String {
        let mut out = String::from(TEMPLATE_HEADER);
        let lines: [(&str, String); 11] = [
            ("DB_TYPE", quoted(&self.db_type)),
            ("DB_HOST", quoted(&self.db_host)),
            ("DB_PORT", self.db_port.to_string()),
            ("DB_NAME", quoted(&self.db_name)),
            ("DB_USER", quoted(&self.db_user)),
            ("DB_PASSWORD", quoted(&self.db_password)),
            ("DB_RETRY_ATTEMPTS", self.db_retry_attempts.to_string()),
            ("DB_RETRY_DELAY", self.db_retry_delay.to_string()),
            ("JWT_SECRET_KEY", quoted(&self.jwt_secret_key)),
            ("ENCRYPTION_KEY", quoted(&self.encryption_key)),
            ("MULTI_TENANT", self.multi_tenant.to_string()),
        ];
        let last = lines.len() - 1;
        for (i, (key, value)) in lines.iter().enumerate() {
            out.push('\t');
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            if i != last {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(TEMPLATE_FOOTER);
        out
    }
}

fn quoted(value: &str) -> String {
    format!("'{}'", value)
}
