use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::header::{ACCEPT, CACHE_CONTROL, EXPIRES, PRAGMA, USER_AGENT};
use reqwest::StatusCode;

use crate::cnpj::Cnpj;
use crate::config::ClientConfig;
use crate::error::LookupError;
use crate::models::CompanyRecord;

// Tamanho máximo do corpo de erro guardado na mensagem
const MAX_CORPO_ERRO: usize = 200;

/// Cliente da API de consulta de CNPJ.
///
/// Faz exatamente uma requisição por chamada, sem retry e sem cache.
/// Clonar é barato: o pool de conexões do `reqwest::Client` é compartilhado,
/// mas nenhuma resposta é guardada entre chamadas.
#[derive(Debug, Clone)]
pub struct CnpjClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl CnpjClient {
    pub fn new(config: ClientConfig) -> reqwest::Result<Self> {
        // O User-Agent vai por requisição, com sufixo anti-cache
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL do recurso, sem os parâmetros anti-cache.
    pub fn endpoint(&self, cnpj: &Cnpj) -> String {
        format!("{}/cnpj/{}", self.base_url, cnpj.as_str())
    }

    /// Busca o registro completo de um CNPJ já validado.
    ///
    /// - 404 vira [`LookupError::NotFound`]
    /// - 429 vira [`LookupError::RateLimited`]
    /// - qualquer outra falha vira [`LookupError::RequestFailed`]
    pub async fn fetch(&self, cnpj: &Cnpj) -> Result<CompanyRecord, LookupError> {
        let url = self.endpoint(cnpj);
        let (carimbo, token) = cache_buster();

        let response = self
            .client
            .get(&url)
            .query(&[("_t", carimbo.to_string()), ("_r", token)])
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, format!("{}-{}", self.user_agent, carimbo))
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| self.falha_transporte(cnpj, e))?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound {
                    cnpj: cnpj.as_str().to_string(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(LookupError::RateLimited {
                    cnpj: cnpj.as_str().to_string(),
                })
            }
            s if !s.is_success() => {
                let corpo = response.text().await.unwrap_or_default();
                return Err(LookupError::RequestFailed {
                    cnpj: cnpj.as_str().to_string(),
                    status: Some(s.as_u16()),
                    message: mensagem_http(s, &corpo),
                    source: None,
                });
            }
            _ => {}
        }

        response
            .json::<CompanyRecord>()
            .await
            .map_err(|e| LookupError::RequestFailed {
                cnpj: cnpj.as_str().to_string(),
                status: Some(status.as_u16()),
                message: format!("resposta inválida da API: {}", e),
                source: Some(e),
            })
    }

    fn falha_transporte(&self, cnpj: &Cnpj, e: reqwest::Error) -> LookupError {
        let message = if e.is_timeout() {
            format!("tempo limite de {}ms excedido", self.timeout.as_millis())
        } else if e.is_connect() {
            format!("falha ao conectar em {}: {}", self.base_url, e)
        } else {
            format!("erro de transporte: {}", e)
        };
        LookupError::RequestFailed {
            cnpj: cnpj.as_str().to_string(),
            status: e.status().map(|s| s.as_u16()),
            message,
            source: Some(e),
        }
    }
}

// Carimbo em milissegundos + token aleatório, únicos por requisição
fn cache_buster() -> (i64, String) {
    let carimbo = chrono::Utc::now().timestamp_millis();
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    (carimbo, token)
}

fn mensagem_http(status: StatusCode, corpo: &str) -> String {
    let corpo = corpo.trim();
    if corpo.is_empty() {
        return format!("HTTP {}", status);
    }
    let trecho: String = corpo.chars().take(MAX_CORPO_ERRO).collect();
    format!("HTTP {}: {}", status, trecho)
}
