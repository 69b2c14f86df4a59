use serde::Serialize;
use thiserror::Error;

/// Dica exibida quando o CNPJ informado não passa na validação.
pub const DICA_FORMATO: &str =
    "Informe um CNPJ de 14 dígitos, com ou sem pontuação (ex.: \"11.222.333/0001-81\" ou \"11222333000181\")";

/// Classificação de uma falha de consulta, exposta a quem chama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    RateLimited,
    RequestFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::RequestFailed => "request_failed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Erros de uma consulta de CNPJ.
///
/// Nenhuma variante é tratada internamente: decidir se tenta de novo ou se
/// segue para o próximo item é responsabilidade de quem chama.
#[derive(Debug, Error)]
pub enum LookupError {
    /// CNPJ sem 14 dígitos, com todos os dígitos iguais ou com DV incorreto.
    /// Sempre detectado antes de qualquer acesso à rede.
    #[error("O CNPJ \"{cnpj}\" não é válido. Informe um CNPJ de 14 dígitos, com ou sem pontuação (ex.: \"11.222.333/0001-81\" ou \"11222333000181\")")]
    InvalidInput { cnpj: String },

    /// A API respondeu 404 para o CNPJ.
    #[error("Empresa com CNPJ \"{cnpj}\" não foi encontrada")]
    NotFound { cnpj: String },

    /// A API respondeu 429. Aguarde antes de consultar novamente.
    #[error("Muitas requisições à API de CNPJ ao consultar \"{cnpj}\"; aguarde antes de tentar novamente")]
    RateLimited { cnpj: String },

    /// Qualquer outra falha de transporte, HTTP não-2xx ou corpo inválido.
    #[error("Falha na consulta do CNPJ \"{cnpj}\": {message}")]
    RequestFailed {
        cnpj: String,
        /// Status HTTP, quando a falha veio de uma resposta.
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidInput { .. } => ErrorKind::InvalidInput,
            LookupError::NotFound { .. } => ErrorKind::NotFound,
            LookupError::RateLimited { .. } => ErrorKind::RateLimited,
            LookupError::RequestFailed { .. } => ErrorKind::RequestFailed,
        }
    }

    /// Valor do CNPJ que originou o erro, como foi recebido pela etapa que falhou.
    pub fn cnpj(&self) -> &str {
        match self {
            LookupError::InvalidInput { cnpj }
            | LookupError::NotFound { cnpj }
            | LookupError::RateLimited { cnpj }
            | LookupError::RequestFailed { cnpj, .. } => cnpj,
        }
    }

    /// Orientação ao usuário sobre como corrigir a entrada.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LookupError::InvalidInput { .. } => Some(DICA_FORMATO),
            LookupError::NotFound { .. } => {
                Some("Verifique se o número está correto e se a empresa está registrada no Brasil")
            }
            LookupError::RateLimited { .. } => {
                Some("Aguarde um momento antes de fazer outra requisição")
            }
            LookupError::RequestFailed { .. } => None,
        }
    }

    /// Status HTTP associado, se houver.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::NotFound { .. } => Some(404),
            LookupError::RateLimited { .. } => Some(429),
            LookupError::RequestFailed { status, .. } => *status,
            LookupError::InvalidInput { .. } => None,
        }
    }

    /// Substitui o CNPJ guardado no erro (ex.: pelo valor original, com pontuação).
    pub(crate) fn with_cnpj(mut self, original: &str) -> Self {
        match &mut self {
            LookupError::InvalidInput { cnpj }
            | LookupError::NotFound { cnpj }
            | LookupError::RateLimited { cnpj }
            | LookupError::RequestFailed { cnpj, .. } => *cnpj = original.to_string(),
        }
        self
    }
}

/// Falha de um item dentro de um lote, com o índice da entrada.
#[derive(Debug, Error)]
#[error("Item {index}: {source}")]
pub struct BatchError {
    pub index: usize,
    #[source]
    pub source: LookupError,
}

impl BatchError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_has_value_and_hint() {
        let err = LookupError::InvalidInput {
            cnpj: "12.345".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("12.345"));
        assert!(msg.contains("11.222.333/0001-81"));
        assert!(msg.contains("11222333000181"));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn kinds_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorKind::RateLimited).unwrap();
        assert_eq!(json, "\"rate_limited\"");
        assert_eq!(ErrorKind::RequestFailed.to_string(), "request_failed");
    }

    #[test]
    fn batch_error_keeps_index() {
        let err = BatchError {
            index: 3,
            source: LookupError::NotFound {
                cnpj: "11222333000181".to_string(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Item 3:"));
    }

    #[test]
    fn with_cnpj_replaces_value() {
        let err = LookupError::RateLimited {
            cnpj: "11222333000181".to_string(),
        }
        .with_cnpj("11.222.333/0001-81");
        assert_eq!(err.cnpj(), "11.222.333/0001-81");
        assert_eq!(err.status(), Some(429));
    }
}
