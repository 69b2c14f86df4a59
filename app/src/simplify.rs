use crate::models::{CompanyRecord, Endereco, SimplifiedCompanyRecord};

/// Projeta o registro completo no formato simplificado.
///
/// Não altera `record`: cada campo é copiado para a nova estrutura.
pub fn simplify(record: &CompanyRecord) -> SimplifiedCompanyRecord {
    let campo = |nome: &str| record.get(nome).cloned();

    SimplifiedCompanyRecord {
        cnpj: campo("cnpj"),
        razao_social: campo("razao_social"),
        nome_fantasia: campo("nome_fantasia"),
        situacao_cadastral: campo("situacao_cadastral"),
        data_situacao_cadastral: campo("data_situacao_cadastral"),
        porte: campo("porte"),
        natureza_juridica: campo("natureza_juridica"),
        capital_social: campo("capital_social"),
        endereco: Endereco {
            logradouro: campo("logradouro"),
            numero: campo("numero"),
            complemento: campo("complemento"),
            bairro: campo("bairro"),
            cep: campo("cep"),
            municipio: campo("municipio"),
            uf: campo("uf"),
        },
        telefone: campo("telefone1"),
        email: campo("email"),
        atividade_principal: campo("atividade_principal"),
        data_inicio_atividade: campo("data_inicio_atividade"),
    }
}
