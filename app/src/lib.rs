//! Consulta de dados cadastrais de empresas brasileiras por CNPJ.
//!
//! Fluxo de uma consulta: [`normalize`] → [`is_valid`] → [`CnpjClient::fetch`]
//! → [`simplify`] (opcional). A função [`lookup`] encadeia tudo.

pub mod api;
pub mod client;
pub mod cnpj;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod simplify;

pub use client::CnpjClient;
pub use cnpj::{check_digits, format_cnpj, is_valid, normalize, Cnpj};
pub use config::{ClientConfig, LookupOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{BatchError, ErrorKind, LookupError};
pub use lookup::{
    into_strict, lookup, lookup_batch, lookup_batch_fail_fast, lookup_batch_with, LookupItem,
    LookupOutput,
};
pub use models::{Atividade, CompanyRecord, Endereco, SimplifiedCompanyRecord};
pub use simplify::simplify;
