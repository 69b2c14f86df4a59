use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

use cnpj_consulta::{format_cnpj, CompanyRecord, LookupError};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn init(quiet: bool, verbose: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// As mensagens vão para stderr; stdout fica reservado ao JSON de saída
pub fn print_info(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "ℹ".blue(), message);
    }
}

pub fn print_success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "✓".green().bold(), message.green());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_header(message: &str) {
    if !is_quiet() {
        eprintln!("\n{}", message.bold().cyan());
        eprintln!("{}", "─".repeat(message.chars().count()).cyan());
    }
}

pub fn print_verbose(message: &str) {
    if is_verbose() && !is_quiet() {
        eprintln!("  {}", message.dimmed());
    }
}

/// Erro de consulta com a dica correspondente, quando houver.
pub fn print_lookup_error(index: Option<usize>, error: &LookupError) {
    let prefixo = index.map(|i| format!("[{}] ", i)).unwrap_or_default();
    print_error(&format!("{}{} ({})", prefixo, error, error.kind()));
    if let Some(dica) = error.hint() {
        if !is_quiet() {
            eprintln!("    {}", dica.dimmed());
        }
    }
}

/// Resumo de uma empresa em modo verboso.
pub fn print_company_summary(record: &CompanyRecord) {
    if !is_verbose() || is_quiet() {
        return;
    }
    let cnpj = record
        .get_text("cnpj")
        .map(|c| format_cnpj(&c))
        .unwrap_or_else(|| "-".to_string());
    let razao = record.razao_social().unwrap_or_else(|| "-".to_string());
    let situacao = record.situacao_cadastral().unwrap_or_else(|| "-".to_string());
    eprintln!("  {} {} | {}", cnpj.bold(), razao, situacao.cyan());
    if let Some(fantasia) = record.nome_fantasia().filter(|f| !f.is_empty()) {
        eprintln!("    {} {}", "Nome fantasia:".dimmed(), fantasia);
    }
    for atividade in record.atividades_principais() {
        eprintln!(
            "    {} {} - {}",
            "CNAE:".dimmed(),
            atividade.codigo,
            atividade.descricao
        );
    }
}

pub fn print_statistics(stats: &[(&str, u64)]) {
    if is_quiet() {
        return;
    }

    eprintln!("\n{}", "Estatísticas:".bold().cyan());
    for (label, value) in stats {
        eprintln!("  {}: {}", label.bold(), value.to_string().green());
    }
}

pub fn print_separator() {
    if !is_quiet() {
        eprintln!("{}", "=".repeat(60).dimmed());
    }
}
