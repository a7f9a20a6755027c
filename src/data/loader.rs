use std::io::ErrorKind;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::model::{CellValue, SalesTable};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the sales sheet, logging the outcome.
///
/// Every failure is reported on the console and turned into `None` so the
/// caller can skip the rest of the pipeline.
pub fn load_sales(path: &Path, status_column: &str) -> Option<SalesTable> {
    match load_workbook(path, status_column) {
        Ok(table) => {
            log::info!("Dados da planilha carregados com sucesso!");
            log::debug!("{} linhas, colunas {:?}", table.len(), table.columns());
            Some(table)
        }
        Err(e) => {
            log::error!("Erro: {e}");
            None
        }
    }
}

/// Read the first worksheet of `path` into a [`SalesTable`].
///
/// The workbook format (xlsx, xlsm, xlsb, xls, ods) is detected by the
/// reader. The first row is the header; fully blank rows are skipped.
pub fn load_workbook(path: &Path, status_column: &str) -> Result<SalesTable, LoadError> {
    if let Err(source) = std::fs::metadata(path) {
        return Err(match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        });
    }

    let workbook_error = |source| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let table = table_from_range(&range);
    if table.column_index(status_column).is_none() {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: status_column.to_string(),
        });
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Range → SalesTable
// ---------------------------------------------------------------------------

fn table_from_range(range: &Range<Data>) -> SalesTable {
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => format!("Unnamed: {i}"),
                other => other.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    SalesTable::new(columns, records)
}

/// Convert a workbook cell. Whole-number floats become integers: xlsx stores
/// every number as a double, and this keeps a write/reload cycle stable.
fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlog;
    use log::Level;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    const STATUS: &str = "Status Pagamento";

    fn write_sheet(path: &Path, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if let Ok(n) = value.parse::<f64>() {
                    sheet.write_number(r as u32, c as u16, n).unwrap();
                } else if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nao_existe.xlsx");

        let err = load_workbook(&path, STATUS).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(load_sales(&path, STATUS).is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_file_logs_a_single_error_naming_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");

        let (table, records) = testlog::capture(|| load_sales(&path, STATUS));

        assert!(table.is_none());
        assert_eq!(records.len(), 1);
        let (level, message) = &records[0];
        assert_eq!(*level, Level::Error);
        assert!(message.contains("não foi encontrado"));
        assert!(message.contains(&path.display().to_string()));
    }

    #[test]
    fn unreadable_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = load_workbook(&path, STATUS).unwrap_err();
        assert!(matches!(err, LoadError::Workbook { .. }));
        assert!(load_sales(&path, STATUS).is_none());
    }

    #[test]
    fn reads_header_and_typed_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");
        write_sheet(
            &path,
            &[
                &["Cliente", "Valor", STATUS],
                &["Ana", "1500", "Pago"],
                &["Bruno", "820.5", "Pendente"],
            ],
        );

        let table = load_workbook(&path, STATUS).unwrap();
        assert_eq!(table.columns(), &["Cliente", "Valor", STATUS]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "Valor"), Some(&CellValue::Int(1500)));
        assert_eq!(table.value(1, "Valor"), Some(&CellValue::Float(820.5)));
        assert_eq!(table.value(1, STATUS), Some(&CellValue::from("Pendente")));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");
        write_sheet(
            &path,
            &[
                &["Cliente", STATUS],
                &["Ana", "Pago"],
                &["", ""],
                &["Caio", "Pendente"],
            ],
        );

        let table = load_workbook(&path, STATUS).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "Cliente"), Some(&CellValue::from("Caio")));
    }

    #[test]
    fn missing_status_column_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");
        write_sheet(&path, &[&["Cliente", "Valor"], &["Ana", "10"]]);

        let err = load_workbook(&path, STATUS).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == STATUS));
    }

    #[test]
    fn header_names_are_kept_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vendas.xlsx");
        write_sheet(&path, &[&["Cliente", " Status Pagamento "], &["Ana", "Pago"]]);

        let err = load_workbook(&path, STATUS).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));

        let table = load_workbook(&path, " Status Pagamento ").unwrap();
        assert_eq!(table.columns(), &["Cliente", " Status Pagamento "]);
    }
}
