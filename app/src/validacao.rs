use anyhow::Result;
use colored::Colorize;

use crate::ui;
use cnpj_consulta::{check_digits, format_cnpj, is_valid, normalize};

/// Valida localmente, sem acessar a API. Falha se algum número for inválido.
pub fn validar(cnpjs: &[String]) -> Result<()> {
    if cnpjs.is_empty() {
        anyhow::bail!("Nenhum CNPJ informado");
    }

    let mut invalidos = 0;
    for entrada in cnpjs {
        let limpo = normalize(entrada);
        if is_valid(&limpo) {
            println!("{}\t{}", format_cnpj(&limpo), "válido".green());
            continue;
        }

        invalidos += 1;
        println!("{}\t{}", entrada, "inválido".red());
        if limpo.len() != 14 {
            ui::print_verbose(&format!("{} dígito(s) encontrados, esperado 14", limpo.len()));
        } else if let Some((dv1, dv2)) = check_digits(&limpo[..12]) {
            ui::print_verbose(&format!("Dígitos verificadores esperados: {}{}", dv1, dv2));
        }
    }

    if invalidos > 0 {
        anyhow::bail!("{} de {} CNPJ(s) inválido(s)", invalidos, cnpjs.len());
    }
    ui::print_success(&format!("{} CNPJ(s) válido(s)", cnpjs.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_list() {
        let lista = vec!["11.222.333/0001-81".to_string(), "00000000000191".to_string()];
        assert!(validar(&lista).is_ok());
    }

    #[test]
    fn rejects_when_any_is_invalid() {
        let lista = vec!["11222333000181".to_string(), "11111111111111".to_string()];
        let err = validar(&lista).unwrap_err();
        assert!(err.to_string().contains("1 de 2"));
        assert!(validar(&[]).is_err());
    }
}
