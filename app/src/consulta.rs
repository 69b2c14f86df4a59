use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;

use cnpj_consulta::{
    lookup_batch_fail_fast, lookup_batch_with, ClientConfig, CnpjClient, ErrorKind, LookupItem,
    LookupOptions, LookupOutput,
};

use crate::{ui, utils};

pub struct ConsultaArgs {
    pub cnpjs: Vec<String>,
    pub arquivo: Option<PathBuf>,
    pub simplificar: bool,
    pub concorrencia: usize,
    pub continuar_em_falha: bool,
    pub saida: Option<PathBuf>,
    pub compacto: bool,
}

#[derive(Serialize)]
struct ErroSaida {
    mensagem: String,
    tipo: ErrorKind,
}

#[derive(Serialize)]
struct ItemSaida<'a> {
    indice: usize,
    cnpj: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dados: Option<&'a LookupOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    erro: Option<ErroSaida>,
}

impl<'a> From<&'a LookupItem> for ItemSaida<'a> {
    fn from(item: &'a LookupItem) -> Self {
        let (dados, erro) = match &item.result {
            Ok(dados) => (Some(dados), None),
            Err(e) => (
                None,
                Some(ErroSaida {
                    mensagem: e.to_string(),
                    tipo: e.kind(),
                }),
            ),
        };
        ItemSaida {
            indice: item.index,
            cnpj: &item.input,
            dados,
            erro,
        }
    }
}

pub async fn consultar(config: ClientConfig, args: ConsultaArgs) -> Result<()> {
    let mut entradas = args.cnpjs;
    if let Some(arquivo) = &args.arquivo {
        let lidos = utils::read_cnpj_list(arquivo)?;
        ui::print_verbose(&format!("{} CNPJ(s) lidos de {:?}", lidos.len(), arquivo));
        entradas.extend(lidos);
    }
    if entradas.is_empty() {
        anyhow::bail!("Nenhum CNPJ informado. Passe os números como argumento ou use --arquivo");
    }

    ui::print_header("🔎 Consulta de CNPJ");
    ui::print_info(&format!("API: {}", config.base_url));
    ui::print_verbose(&format!(
        "Timeout: {}ms | Concorrência: {} | Simplificar: {}",
        config.timeout.as_millis(),
        args.concorrencia,
        args.simplificar
    ));

    if args.concorrencia == 0 {
        ui::print_warning("Concorrência 0 não é válida; usando 1");
    }

    let client = CnpjClient::new(config).context("Falha ao criar cliente HTTP")?;
    let options = LookupOptions {
        simplify: args.simplificar,
    };

    let total = entradas.len();
    let pb = if total > 1 && !ui::is_quiet() {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("📊 [{bar:40.cyan/blue}] {pos}/{len} | {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let progresso = |item: &LookupItem| {
        pb.inc(1);
        pb.set_message(utils::format_progress(pb.position() as usize, total));
        pb.suspend(|| match &item.result {
            Ok(LookupOutput::Full(record)) => ui::print_company_summary(record),
            Ok(LookupOutput::Simplified(_)) => {
                ui::print_verbose(&format!("[{}] {} consultado", item.index, item.input))
            }
            Err(e) => ui::print_verbose(&format!("[{}] {} falhou: {}", item.index, item.input, e.kind())),
        });
    };

    let itens = if args.continuar_em_falha {
        lookup_batch_with(&client, entradas.as_slice(), options, args.concorrencia, progresso).await
    } else {
        // Para no primeiro erro, na ordem da entrada; nada é gravado
        let resultado =
            lookup_batch_fail_fast(&client, entradas.as_slice(), options, args.concorrencia, progresso)
                .await;
        match resultado {
            Ok(itens) => itens,
            Err(erro) => {
                pb.finish_and_clear();
                ui::print_lookup_error(Some(erro.index), &erro.source);
                return Err(erro.into());
            }
        }
    };
    pb.finish_and_clear();

    let falhas = itens.iter().filter(|i| i.result.is_err()).count();

    if falhas > 0 {
        ui::print_warning(&format!("{} item(ns) com falha; seguindo com os demais", falhas));
        for item in &itens {
            if let Err(e) = &item.result {
                ui::print_lookup_error(Some(item.index), e);
            }
        }
    }

    let saida: Vec<ItemSaida> = itens.iter().map(ItemSaida::from).collect();
    let json = if args.compacto {
        serde_json::to_string(&saida)?
    } else {
        serde_json::to_string_pretty(&saida)?
    };

    match &args.saida {
        Some(caminho) => {
            utils::write_output(caminho, &json)?;
            ui::print_success(&format!("Resultado gravado em {:?}", caminho));
        }
        None => println!("{}", json),
    }

    ui::print_statistics(&[
        ("Consultados", total as u64),
        ("Sucesso", (total - falhas) as u64),
        ("Falhas", falhas as u64),
    ]);

    Ok(())
}
