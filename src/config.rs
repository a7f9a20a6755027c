use std::path::PathBuf;

use crate::chart::style::ChartStyle;

// ---------------------------------------------------------------------------
// Fixed locations and literals
// ---------------------------------------------------------------------------

pub const INPUT_PATH: &str = "dados/vendas_consultoria.xlsx";
pub const REPORT_PATH: &str = "relatorio_pendencias.xlsx";
pub const CHART_PATH: &str = "distribuicao_pagamentos_profissional.png";

pub const STATUS_COLUMN: &str = "Status Pagamento";
pub const STATUS_PAID: &str = "Pago";
pub const STATUS_PENDING: &str = "Pendente";

/// Everything the pipeline needs, gathered in one value.
/// There is no runtime configuration: `Default` is the only constructor used
/// by `main`, tests override individual fields.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
    pub status_column: String,
    pub pending_status: String,
    pub style: ChartStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_PATH),
            report_path: PathBuf::from(REPORT_PATH),
            chart_path: PathBuf::from(CHART_PATH),
            status_column: STATUS_COLUMN.to_string(),
            pending_status: STATUS_PENDING.to_string(),
            style: ChartStyle::default(),
        }
    }
}
