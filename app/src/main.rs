mod consulta;
mod servidor;
mod ui;
mod utils;
mod validacao;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cnpj_consulta::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "cnpj-consulta")]
#[command(about = "Consulta dados cadastrais de empresas brasileiras por CNPJ", long_about = None)]
struct Cli {
    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// URL base da API de CNPJ
    #[arg(long, global = true, env = "CNPJ_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Timeout de cada requisição, em segundos
    #[arg(long, global = true, env = "CNPJ_API_TIMEOUT", default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consulta um ou mais CNPJs na API e imprime o resultado em JSON
    Consultar {
        /// CNPJs, com ou sem pontuação
        cnpjs: Vec<String>,
        /// Arquivo com um CNPJ por linha
        #[arg(short, long)]
        arquivo: Option<PathBuf>,
        /// Retorna a versão simplificada do registro
        #[arg(short, long)]
        simplificar: bool,
        /// Número máximo de consultas simultâneas
        #[arg(short, long, default_value = "3")]
        concorrencia: usize,
        /// Continua o lote quando um item falha, registrando o erro na saída
        #[arg(long)]
        continuar_em_falha: bool,
        /// Grava o JSON em arquivo em vez de imprimir
        #[arg(short = 'o', long)]
        saida: Option<PathBuf>,
        /// JSON em uma única linha
        #[arg(long)]
        compacto: bool,
    },
    /// Valida CNPJs localmente (dígitos verificadores), sem acessar a API
    Validar {
        /// CNPJs, com ou sem pontuação
        cnpjs: Vec<String>,
    },
    /// Inicia servidor web que repassa consultas à API de CNPJ
    Servidor {
        /// Porta do servidor
        #[arg(short, long, default_value = "8080")]
        porta: u16,
        /// Endereço do servidor
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);

    let config = ClientConfig::default()
        .with_base_url(cli.api_url)
        .with_timeout(Duration::from_secs(cli.timeout));

    match cli.command {
        Commands::Consultar {
            cnpjs,
            arquivo,
            simplificar,
            concorrencia,
            continuar_em_falha,
            saida,
            compacto,
        } => {
            let args = consulta::ConsultaArgs {
                cnpjs,
                arquivo,
                simplificar,
                concorrencia,
                continuar_em_falha,
                saida,
                compacto,
            };
            consulta::consultar(config, args).await?;
        }
        Commands::Validar { cnpjs } => {
            validacao::validar(&cnpjs)?;
        }
        Commands::Servidor { porta, host } => {
            servidor::start_server(config, &host, porta).await?;
        }
    }

    Ok(())
}
