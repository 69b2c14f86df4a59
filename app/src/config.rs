use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endereço padrão da API pública de CNPJ.
pub const DEFAULT_BASE_URL: &str = "https://publica.cnpj.ws";

/// Tempo máximo de cada requisição.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuração do cliente HTTP.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL base da API, sem barra final (ex.: `https://publica.cnpj.ws`).
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cnpj-consulta/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Opções por consulta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    /// Devolve o registro simplificado em vez do JSON completo.
    pub simplify: bool,
}
