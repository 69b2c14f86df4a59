use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::client::CnpjClient;
use crate::cnpj::Cnpj;
use crate::config::LookupOptions;
use crate::error::{BatchError, LookupError};
use crate::models::{CompanyRecord, SimplifiedCompanyRecord};
use crate::simplify::simplify;

/// Resultado de uma consulta: o JSON completo ou a versão simplificada.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupOutput {
    Full(CompanyRecord),
    Simplified(SimplifiedCompanyRecord),
}

impl LookupOutput {
    pub fn from_record(record: CompanyRecord, options: LookupOptions) -> Self {
        if options.simplify {
            LookupOutput::Simplified(simplify(&record))
        } else {
            LookupOutput::Full(record)
        }
    }
}

/// Normaliza, valida, consulta e (opcionalmente) simplifica um CNPJ.
///
/// CNPJ inválido falha antes de qualquer requisição. Os erros carregam o
/// valor exatamente como foi informado.
pub async fn lookup(
    client: &CnpjClient,
    raw: &str,
    options: LookupOptions,
) -> Result<LookupOutput, LookupError> {
    let cnpj = Cnpj::parse(raw)?;
    let record = client.fetch(&cnpj).await.map_err(|e| e.with_cnpj(raw))?;
    Ok(LookupOutput::from_record(record, options))
}

/// Resultado de um item de lote, associado ao índice da entrada.
#[derive(Debug)]
pub struct LookupItem {
    pub index: usize,
    pub input: String,
    pub result: Result<LookupOutput, LookupError>,
}

/// Consulta vários CNPJs com no máximo `concurrency` requisições simultâneas.
///
/// A saída tem o mesmo tamanho e a mesma ordem da entrada. Falhas não
/// interrompem o lote e nada é repetido.
pub async fn lookup_batch<S: AsRef<str>>(
    client: &CnpjClient,
    inputs: &[S],
    options: LookupOptions,
    concurrency: usize,
) -> Vec<LookupItem> {
    lookup_batch_with(client, inputs, options, concurrency, |_| {}).await
}

/// Igual a [`lookup_batch`], chamando `on_done` a cada item concluído
/// (na ordem em que terminam, não na ordem da entrada).
pub async fn lookup_batch_with<S, F>(
    client: &CnpjClient,
    inputs: &[S],
    options: LookupOptions,
    concurrency: usize,
    on_done: F,
) -> Vec<LookupItem>
where
    S: AsRef<str>,
    F: Fn(&LookupItem),
{
    let semaphore = Semaphore::new(concurrency.max(1));

    let tasks = inputs.iter().enumerate().map(|(index, raw)| {
        let semaphore = &semaphore;
        let on_done = &on_done;
        async move {
            let raw = raw.as_ref();
            // O semáforo nunca é fechado; sem permissão, segue mesmo assim
            let _permit = semaphore.acquire().await.ok();
            let item = LookupItem {
                index,
                input: raw.to_string(),
                result: lookup(client, raw, options).await,
            };
            on_done(&item);
            item
        }
    });

    // join_all devolve na ordem em que os futuros foram criados
    join_all(tasks).await
}

/// Consulta em lote parando na primeira falha, na ordem da entrada.
///
/// Os itens são consumidos em ordem com no máximo `concurrency` requisições
/// em andamento. Ao encontrar o primeiro erro, as consultas ainda pendentes
/// são descartadas e nenhum item posterior é enviado. Com `concurrency == 1`
/// nenhuma requisição é feita depois da falha.
pub async fn lookup_batch_fail_fast<S, F>(
    client: &CnpjClient,
    inputs: &[S],
    options: LookupOptions,
    concurrency: usize,
    on_done: F,
) -> Result<Vec<LookupItem>, BatchError>
where
    S: AsRef<str>,
    F: Fn(&LookupItem),
{
    let mut pendentes = stream::iter(inputs.iter().enumerate())
        .map(move |(index, raw)| async move {
            let raw = raw.as_ref();
            LookupItem {
                index,
                input: raw.to_string(),
                result: lookup(client, raw, options).await,
            }
        })
        .buffered(concurrency.max(1));

    let mut saida = Vec::with_capacity(inputs.len());
    while let Some(item) = pendentes.next().await {
        on_done(&item);
        let LookupItem {
            index,
            input,
            result,
        } = item;
        match result {
            Ok(output) => saida.push(LookupItem {
                index,
                input,
                result: Ok(output),
            }),
            Err(source) => return Err(BatchError { index, source }),
        }
    }
    Ok(saida)
}

/// Converte um lote já executado em sucesso total ou na primeira falha, na ordem da entrada.
pub fn into_strict(items: Vec<LookupItem>) -> Result<Vec<(usize, LookupOutput)>, BatchError> {
    let mut saida = Vec::with_capacity(items.len());
    for item in items {
        match item.result {
            Ok(output) => saida.push((item.index, output)),
            Err(source) => {
                return Err(BatchError {
                    index: item.index,
                    source,
                })
            }
        }
    }
    Ok(saida)
}
