/// Data layer: core types, loading, filtering and the report workbook.
///
/// Architecture:
/// ```text
///  dados/vendas_consultoria.xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first worksheet → SalesTable (or nothing, logged)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  SalesTable   │  columns + rows of CellValue
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  status == "Pendente" → Option<SalesTable>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  relatorio_pendencias.xlsx
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
