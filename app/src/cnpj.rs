use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// Remove tudo que não for dígito ASCII.
///
/// Não verifica tamanho nem DV: `"11.222.333/0001-81"` vira `"11222333000181"`
/// e uma string vazia continua vazia.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Soma ponderada da direita para a esquerda, pesos 2..=9 em ciclo (módulo 11).
fn digito_verificador(digitos: &[u8]) -> u8 {
    let mut soma: u32 = 0;
    let mut peso: u32 = 2;
    for &d in digitos.iter().rev() {
        soma += d as u32 * peso;
        peso = if peso == 9 { 2 } else { peso + 1 };
    }
    let resto = soma % 11;
    if resto < 2 {
        0
    } else {
        (11 - resto) as u8
    }
}

/// Calcula os dois dígitos verificadores a partir dos 12 primeiros dígitos.
///
/// Retorna `None` se a entrada não tiver exatamente 12 dígitos ASCII.
pub fn check_digits(base: &str) -> Option<(u8, u8)> {
    if base.len() != 12 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digitos: Vec<u8> = base.bytes().map(|b| b - b'0').collect();
    let dv1 = digito_verificador(&digitos);
    digitos.push(dv1);
    let dv2 = digito_verificador(&digitos);
    Some((dv1, dv2))
}

/// Valida um CNPJ já normalizado (somente dígitos).
pub fn is_valid(normalized: &str) -> bool {
    if normalized.len() != 14 || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digitos: Vec<u8> = normalized.bytes().map(|b| b - b'0').collect();

    // Números com todos os dígitos iguais são sempre inválidos
    if digitos.iter().all(|&d| d == digitos[0]) {
        return false;
    }

    if digito_verificador(&digitos[..12]) != digitos[12] {
        return false;
    }
    digito_verificador(&digitos[..13]) == digitos[13]
}

/// Formata 14 dígitos como `NN.NNN.NNN/NNNN-NN`. Outras entradas voltam sem alteração.
pub fn format_cnpj(normalized: &str) -> String {
    if normalized.len() != 14 || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return normalized.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &normalized[0..2],
        &normalized[2..5],
        &normalized[5..8],
        &normalized[8..12],
        &normalized[12..14]
    )
}

/// CNPJ com 14 dígitos e DVs conferidos.
///
/// Só é construído via [`Cnpj::parse`], então quem recebe um `Cnpj` pode
/// ir direto para a consulta.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cnpj(String);

impl Cnpj {
    /// Normaliza e valida. O erro carrega o valor exatamente como foi recebido.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let limpo = normalize(raw);
        if is_valid(&limpo) {
            Ok(Cnpj(limpo))
        } else {
            Err(LookupError::InvalidInput {
                cnpj: raw.to_string(),
            })
        }
    }

    /// Os 14 dígitos, sem pontuação.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raiz do CNPJ (8 primeiros dígitos), comum a matriz e filiais.
    pub fn basico(&self) -> &str {
        &self.0[..8]
    }

    pub fn is_matriz(&self) -> bool {
        &self.0[8..12] == "0001"
    }

    pub fn formatted(&self) -> String {
        format_cnpj(&self.0)
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cnpj {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cnpj::parse(s)
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn normalize_strips_punctuation_and_spaces() {
        assert_eq!(normalize("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize(" 11 222 333 0001 81\n"), "11222333000181");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("abc"), "");
        // Dígitos não ASCII são descartados
        assert_eq!(normalize("１２3"), "3");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["11.222.333/0001-81", "x1y2z3", "", "--//..", "0001"] {
            let once = normalize(s);
            assert!(once.bytes().all(|b| b.is_ascii_digit()));
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn known_valid_numbers() {
        assert!(is_valid("11222333000181"));
        assert!(is_valid("00000000000191"));
        assert!(is_valid("00623904000173"));
    }

    #[test]
    fn corrupted_check_digits_are_rejected() {
        assert!(!is_valid("11222333000180"));
        assert!(!is_valid("11222333000171"));
        assert!(!is_valid("12345678901234"));
        assert!(!is_valid("00623904000171"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("1122233300018"));
        assert!(!is_valid("112223330001810"));
        assert!(!is_valid("11.222.333/0001-81"));
    }

    #[test]
    fn repeated_digits_are_rejected() {
        for d in 0..=9 {
            let s = d.to_string().repeat(14);
            assert!(!is_valid(&s), "{} deveria ser inválido", s);
        }
    }

    #[test]
    fn validity_ignores_formatting() {
        assert_eq!(
            is_valid(&normalize("11.222.333/0001-81")),
            is_valid("11222333000181")
        );
    }

    #[test]
    fn check_digits_match_validator() {
        assert_eq!(check_digits("112223330001"), Some((8, 1)));
        assert_eq!(check_digits("000000000001"), Some((9, 1)));
        assert_eq!(check_digits("11222333000"), None);
        assert_eq!(check_digits("11222333000a"), None);
    }

    #[test]
    fn parse_builds_valid_cnpj() {
        let cnpj = Cnpj::parse("11.222.333/0001-81").unwrap();
        assert_eq!(cnpj.as_str(), "11222333000181");
        assert_eq!(cnpj.basico(), "11222333");
        assert!(cnpj.is_matriz());
        assert_eq!(cnpj.to_string(), "11.222.333/0001-81");

        let parsed: Cnpj = "00000000000191".parse().unwrap();
        assert_eq!(parsed.formatted(), "00.000.000/0001-91");
    }

    #[test]
    fn parse_rejects_with_original_value() {
        let err = Cnpj::parse("12.345.678/9012-34").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.cnpj(), "12.345.678/9012-34");
    }

    #[test]
    fn format_leaves_other_inputs_alone() {
        assert_eq!(format_cnpj("123"), "123");
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
    }
}
