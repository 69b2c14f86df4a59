use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use colored::Colorize;

use cnpj_consulta::api::{self, AppState};
use cnpj_consulta::{ClientConfig, CnpjClient};

use crate::ui;

pub async fn start_server(config: ClientConfig, host: &str, port: u16) -> Result<()> {
    let upstream = config.base_url.clone();
    let client = CnpjClient::new(config).context("Falha ao criar cliente HTTP")?;

    let app_state = web::Data::new(AppState { client });

    let address = format!("{}:{}", host, port);

    ui::print_header("🌐 Servidor API REST");
    ui::print_success(&format!("Servidor iniciando em http://{}", address));
    ui::print_info(&format!("API de origem: {}", upstream));
    ui::print_info("Endpoints disponíveis:");
    eprintln!("  {} GET /cnpj/{{cnpj}}  - Consulta dados completos de um CNPJ (?simplificar=true)", "•".cyan());
    eprintln!("  {} GET /health         - Verifica status do servidor", "•".cyan());
    ui::print_verbose(&format!("Exemplo: curl http://{}/cnpj/11222333000181", address));
    ui::print_separator();

    HttpServer::new(move || App::new().app_data(app_state.clone()).configure(api::configure))
        .bind(&address)
        .with_context(|| format!("Falha ao abrir {}", address))?
        .workers(num_cpus::get())
        .run()
        .await?;

    Ok(())
}
