use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use super::model::{CellValue, SalesTable};
use crate::error::ReportError;

/// What the report step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Written(PathBuf),
    Skipped,
}

/// Write the pending rows to a new workbook at `path`.
///
/// `None` means the filter found nothing: no file is created. The sheet has
/// a header row and one row per record, without an index column.
pub fn write_report(
    pending: Option<&SalesTable>,
    path: &Path,
) -> Result<ReportOutcome, ReportError> {
    let Some(table) = pending else {
        log::info!("Não foi possível gerar o relatório.");
        return Ok(ReportOutcome::Skipped);
    };

    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    write_table(workbook.add_worksheet(), table).map_err(write_error)?;
    workbook.save(path).map_err(write_error)?;

    log::info!(
        "Relatório de pagamentos pendentes gerado em '{}'.",
        path.display()
    );
    Ok(ReportOutcome::Written(path.to_path_buf()))
}

fn write_table(worksheet: &mut Worksheet, table: &SalesTable) -> Result<(), XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(s) if s.is_empty() => {}
                CellValue::Text(s) => {
                    worksheet.write_string(r, col, s)?;
                }
                CellValue::Int(i) => {
                    worksheet.write_number(r, col, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(r, col, *f)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, col, *b)?;
                }
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(r, col, *serial, &datetime_format)?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::find_pending_payments;
    use crate::data::loader::load_workbook;
    use tempfile::tempdir;

    const STATUS: &str = "Status Pagamento";

    fn sales() -> SalesTable {
        let statuses = ["Pago", "Pendente", "Pago", "Pendente", "Pendente"];
        SalesTable::new(
            vec![
                "Cliente".into(),
                "Valor".into(),
                "Data".into(),
                "Recorrente".into(),
                STATUS.into(),
            ],
            statuses
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    vec![
                        CellValue::Text(format!("Cliente {i}")),
                        CellValue::Float(1000.0 + i as f64 * 0.25 + 0.1),
                        CellValue::DateTime(45_000.5 + i as f64),
                        CellValue::Bool(i % 2 == 0),
                        (*s).into(),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn no_result_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relatorio.xlsx");

        assert_eq!(write_report(None, &path).unwrap(), ReportOutcome::Skipped);
        assert!(!path.exists());
    }

    #[test]
    fn report_has_pending_rows_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relatorio.xlsx");
        let sales = sales();
        let pending = find_pending_payments(&sales, STATUS, "Pendente");

        let outcome = write_report(pending.as_ref(), &path).unwrap();
        assert_eq!(outcome, ReportOutcome::Written(path.clone()));

        let reloaded = load_workbook(&path, STATUS).unwrap();
        assert_eq!(reloaded.len(), 3);
        for i in 0..reloaded.len() {
            assert_eq!(reloaded.value(i, STATUS), Some(&CellValue::from("Pendente")));
        }
    }

    #[test]
    fn round_trip_keeps_columns_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relatorio.xlsx");
        let pending = find_pending_payments(&sales(), STATUS, "Pendente").unwrap();

        write_report(Some(&pending), &path).unwrap();
        let reloaded = load_workbook(&path, STATUS).unwrap();

        assert_eq!(reloaded.columns(), pending.columns());
        assert_eq!(reloaded.rows(), pending.rows());
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sem_pasta").join("relatorio.xlsx");
        let pending = find_pending_payments(&sales(), STATUS, "Pendente");

        let err = write_report(pending.as_ref(), &path).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
        assert!(err
            .to_string()
            .starts_with(&format!("Falha ao gravar o relatório '{}'", path.display())));
    }
}
