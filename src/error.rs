use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the sales sheet. The loader logs these and hands
/// back no table instead of propagating them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("O arquivo '{}' não foi encontrado.", path.display())]
    NotFound { path: PathBuf },

    #[error("Ocorreu um erro ao carregar o arquivo '{}': {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("O arquivo '{}' não contém nenhuma planilha.", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("A coluna '{column}' não existe em '{}'.", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Ocorreu um erro ao acessar '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while writing the pending-payments workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Falha ao gravar o relatório '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Failures while rendering or presenting the status chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Nenhuma fonte utilizável no conjunto de fontes embutido.")]
    FontUnavailable,

    #[error("Fonte embutida inválida: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Falha ao criar '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao codificar o PNG '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}
