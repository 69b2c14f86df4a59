use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Lê uma lista de CNPJs, um por linha.
///
/// Linhas em branco e linhas começando com `#` são ignoradas; o restante
/// é mantido como está (a validação acontece depois, por item).
pub fn read_cnpj_list(path: &Path) -> Result<Vec<String>> {
    let conteudo = fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler arquivo de CNPJs: {:?}", path))?;
    Ok(parse_cnpj_list(&conteudo))
}

pub fn parse_cnpj_list(conteudo: &str) -> Vec<String> {
    conteudo
        .lines()
        .map(str::trim)
        .filter(|linha| !linha.is_empty() && !linha.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Grava a saída JSON em arquivo, criando o diretório pai se preciso.
pub fn write_output(path: &Path, conteudo: &str) -> Result<()> {
    if let Some(pai) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !pai.exists() {
            fs::create_dir_all(pai)
                .with_context(|| format!("Falha ao criar diretório: {:?}", pai))?;
        }
    }
    fs::write(path, conteudo).with_context(|| format!("Falha ao gravar arquivo: {:?}", path))
}

pub fn format_progress(current: usize, total: usize) -> String {
    if total == 0 {
        return "0.0% (0/0)".to_string();
    }
    let percent = (current as f64 / total as f64) * 100.0;
    format!("{:.1}% ({}/{})", percent, current, total)
}
