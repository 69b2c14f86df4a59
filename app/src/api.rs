use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError, Result as ActixResult};
use serde::Deserialize;

use crate::client::CnpjClient;
use crate::config::LookupOptions;
use crate::error::LookupError;
use crate::lookup::lookup;

pub struct AppState {
    pub client: CnpjClient,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConsultaQuery {
    #[serde(default, alias = "simplify")]
    pub simplificar: bool,
}

impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            LookupError::NotFound { .. } => StatusCode::NOT_FOUND,
            LookupError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LookupError::RequestFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "erro": self.to_string(),
            "tipo": self.kind(),
            "cnpj": self.cnpj(),
            "dica": self.hint(),
        }))
    }
}

pub async fn consultar_cnpj(
    cnpj: web::Path<String>,
    query: web::Query<ConsultaQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LookupError> {
    let options = LookupOptions {
        simplify: query.simplificar,
    };
    let dados = lookup(&state.client, &cnpj, options).await?;
    Ok(HttpResponse::Ok().json(dados))
}

async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "mensagem": "API CNPJ está funcionando"
    })))
}

/// Rotas do servidor; usado também nos testes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/cnpj/{cnpj}", web::get().to(consultar_cnpj))
        .route("/health", web::get().to(health_check));
}
