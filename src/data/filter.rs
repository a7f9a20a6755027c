use super::model::SalesTable;

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Return indices of rows whose `column` cell is exactly the text `value`.
///
/// A row passes when:
/// * The table has the column, and
/// * The cell is text equal to `value` (no trimming, case-sensitive)
///
/// A table without the column yields no indices.
pub fn matching_indices(table: &SalesTable, column: &str, value: &str) -> Vec<usize> {
    let Some(col) = table.column_index(column) else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(col).and_then(|c| c.as_str()) == Some(value))
        .map(|(i, _)| i)
        .collect()
}

/// Select the rows whose status is `pending_status`.
///
/// No match gives `None` rather than an empty table, so the report step has
/// nothing to write.
pub fn find_pending_payments(
    table: &SalesTable,
    status_column: &str,
    pending_status: &str,
) -> Option<SalesTable> {
    let indices = matching_indices(table, status_column, pending_status);
    if indices.is_empty() {
        log::info!("Nenhum pagamento pendente encontrado.");
        return None;
    }
    log::info!(
        "Pagamentos pendentes encontrados: {} clientes.",
        indices.len()
    );
    Some(table.select_rows(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::testlog;
    use log::Level;

    const STATUS: &str = "Status Pagamento";

    fn table(statuses: &[&str]) -> SalesTable {
        SalesTable::new(
            vec!["Cliente".into(), STATUS.into()],
            statuses
                .iter()
                .enumerate()
                .map(|(i, s)| vec![CellValue::Text(format!("cliente {i}")), (*s).into()])
                .collect(),
        )
    }

    #[test]
    fn seven_paid_three_pending() {
        let mut statuses = vec!["Pago"; 7];
        statuses.extend(["Pendente"; 3]);
        let sales = table(&statuses);

        let pending = find_pending_payments(&sales, STATUS, "Pendente").unwrap();
        assert_eq!(pending.len(), 3);
        assert_eq!(pending.columns(), sales.columns());
        for i in 0..pending.len() {
            assert_eq!(pending.value(i, STATUS), Some(&CellValue::from("Pendente")));
        }
        assert_eq!(sales.len(), 10);
    }

    #[test]
    fn all_paid_gives_no_result() {
        let sales = table(&["Pago"; 4]);
        let (pending, records) =
            testlog::capture(|| find_pending_payments(&sales, STATUS, "Pendente"));

        assert!(pending.is_none());
        assert_eq!(
            records,
            vec![(Level::Info, "Nenhum pagamento pendente encontrado.".to_string())]
        );
    }

    #[test]
    fn pending_count_is_logged() {
        let sales = table(&["Pendente", "Pago", "Pendente"]);
        let (_, records) = testlog::capture(|| find_pending_payments(&sales, STATUS, "Pendente"));
        assert_eq!(
            records,
            vec![(Level::Info, "Pagamentos pendentes encontrados: 2 clientes.".to_string())]
        );
    }

    #[test]
    fn empty_table_gives_no_result() {
        let sales = table(&[]);
        assert!(find_pending_payments(&sales, STATUS, "Pendente").is_none());
    }

    #[test]
    fn match_is_exact() {
        let sales = table(&["pendente", "Pendente ", "Pendente", "Pago"]);
        assert_eq!(matching_indices(&sales, STATUS, "Pendente"), vec![2]);
    }

    #[test]
    fn subset_preserves_row_order() {
        let sales = table(&["Pendente", "Pago", "Pendente"]);
        let pending = find_pending_payments(&sales, STATUS, "Pendente").unwrap();
        assert_eq!(pending.rows(), sales.select_rows(&[0, 2]).rows());
        assert_eq!(pending.value(1, "Cliente"), Some(&CellValue::from("cliente 2")));
    }

    #[test]
    fn unknown_column_matches_nothing() {
        let sales = table(&["Pendente"]);
        assert!(matching_indices(&sales, "Situação", "Pendente").is_empty());
    }
}
