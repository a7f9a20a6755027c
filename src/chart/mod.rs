/// Status chart: counting, layout, rasterization and output sinks.
///
/// ```text
///   SalesTable ──► StatusCounts ──► PieChart ──┬──► PngSink     (file, 300 DPI)
///                                              ├──► WindowSink  (blocking viewer)
///                                              └──► HeadlessSink
/// ```

pub mod layout;
pub mod raster;
pub mod sink;
pub mod style;

use layout::{PieChart, StatusCounts};
use sink::ChartSink;
use style::ChartStyle;

use crate::data::model::SalesTable;
use crate::error::ChartError;

/// Count statuses in `table` and hand the resulting pie to every sink, in
/// order. Returns the chart, or `None` when there was nothing to draw.
pub fn render_status_chart(
    table: Option<&SalesTable>,
    status_column: &str,
    style: &ChartStyle,
    sinks: &mut [&mut dyn ChartSink],
) -> Result<Option<PieChart>, ChartError> {
    let Some(table) = table else {
        log::warn!("Não foi possível gerar o gráfico, o DataFrame está vazio.");
        return Ok(None);
    };

    let counts = StatusCounts::from_table(table, status_column);
    let Some(chart) = PieChart::build(&counts, table.len(), style) else {
        log::warn!("Não há dados de status de pagamento para gerar o gráfico.");
        return Ok(None);
    };

    for sink in sinks.iter_mut() {
        sink.present(&chart, style)?;
    }
    Ok(Some(chart))
}
