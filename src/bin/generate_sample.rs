use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

/// Excel serial number of 2024-01-01.
const FIRST_SALE_DAY: f64 = 45_292.0;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first_names = ["Ana", "Bruno", "Carla", "Diego", "Elisa", "Fábio", "Gabriela", "Heitor"];
    let last_names = ["Silva", "Souza", "Oliveira", "Lima", "Pereira", "Costa"];
    let services: [(&str, f64); 4] = [
        ("Diagnóstico Financeiro", 1800.0),
        ("Planejamento Tributário", 3500.0),
        ("Mentoria de Vendas", 1200.0),
        ("Auditoria de Processos", 5200.0),
    ];
    let n_sales = 40;

    let output_path = Path::new("dados/vendas_consultoria.xlsx");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();
    let date = Format::new().set_num_format("dd/mm/yyyy");
    let money = Format::new().set_num_format("#,##0.00");

    let columns = ["Cliente", "Serviço", "Valor", "Data da Venda", "Status Pagamento"];
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    let mut pending = 0;
    for i in 0..n_sales {
        let row = i + 1;
        let client = format!("{} {}", rng.pick(&first_names), rng.pick(&last_names));
        let (service, base) = *rng.pick(&services);
        let value = (base * (0.8 + 0.4 * rng.next_f64()) * 100.0).round() / 100.0;
        let day = FIRST_SALE_DAY + (rng.next_u64() % 365) as f64;
        let status = if rng.next_f64() < 0.3 {
            pending += 1;
            "Pendente"
        } else {
            "Pago"
        };

        sheet.write_string(row, 0, client)?;
        sheet.write_string(row, 1, service)?;
        sheet.write_number_with_format(row, 2, value, &money)?;
        sheet.write_number_with_format(row, 3, day, &date)?;
        sheet.write_string(row, 4, status)?;
    }
    sheet.autofit();

    workbook
        .save(output_path)
        .with_context(|| format!("saving {}", output_path.display()))?;

    println!(
        "Wrote {n_sales} sales ({pending} pending) to {}",
        output_path.display()
    );
    Ok(())
}
