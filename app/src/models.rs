use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registro completo devolvido pela API de CNPJ.
///
/// Mantido como um mapa aberto: campos desconhecidos passam sem alteração
/// e a serialização devolve o mesmo JSON recebido.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyRecord(Map<String, Value>);

/// Item de `atividade_principal` (CNAE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atividade {
    #[serde(default, deserialize_with = "texto_flexivel")]
    pub codigo: String,
    #[serde(default, deserialize_with = "texto_flexivel")]
    pub descricao: String,
}

// A API às vezes manda códigos numéricos
fn texto_flexivel<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(valor_como_texto(&value).unwrap_or_default())
}

fn valor_como_texto(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl CompanyRecord {
    pub fn from_map(map: Map<String, Value>) -> Self {
        CompanyRecord(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Valor escalar como texto; `None` para campos ausentes, nulos ou compostos.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(valor_como_texto)
    }

    pub fn razao_social(&self) -> Option<String> {
        self.get_text("razao_social")
    }

    pub fn nome_fantasia(&self) -> Option<String> {
        self.get_text("nome_fantasia")
    }

    pub fn situacao_cadastral(&self) -> Option<String> {
        self.get_text("situacao_cadastral")
    }

    /// Lista de atividades principais; entradas malformadas são ignoradas.
    pub fn atividades_principais(&self) -> Vec<Atividade> {
        match self.0.get("atividade_principal") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CompanyRecord {
    fn from(map: Map<String, Value>) -> Self {
        CompanyRecord(map)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endereco {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<Value>,
}

/// Versão reduzida do registro, com o endereço agrupado e um único telefone.
///
/// Campos ausentes na origem ficam `None` e são omitidos na serialização.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedCompanyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situacao_cadastral: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_situacao_cadastral: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub porte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natureza_juridica: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_social: Option<Value>,
    pub endereco: Endereco,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atividade_principal: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio_atividade: Option<Value>,
}
