use std::path::PathBuf;

use rust_xlsxwriter::Workbook;

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

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.below(options.len() as u64) as usize]
    }
}

const PRODUCT_LINES: [(&str, &str); 3] = [
    ("SOCK", "Socks"),
    ("TIGH", "Tights"),
    ("LEGW", "Leg warmers"),
];

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("input/FinalOutput230520.xlsx"));
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }

    let mut rng = SimpleRng::new(42);

    // Twelve monthly buckets, 2022-06 → 2023-05
    let months: Vec<String> = (0..12)
        .map(|i| {
            let m = 5 + i;
            format!("{}-{:02}", 2022 + m / 12, m % 12 + 1)
        })
        .collect();

    let mut headers: Vec<String> = [
        "ProductLine",
        "ItemCode",
        "Category1",
        "Category2",
        "Category3",
        "Category4",
        "UDF_SEASON_CLASS",
        "UDF_GENDER",
        "UDF_PRODUCT_CATEGORY",
        "ProductLineDesc",
        "QuantityOnHand",
        "QuantityOnPurchaseOrder",
        "QuantityOnSalesOrder",
        "QuantityOnBackOrder",
        "3MCov",
        "StockPrev",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    headers.extend(months.iter().cloned());

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, h) in headers.iter().enumerate() {
        sheet
            .write_string(0, c as u16, h.as_str())
            .expect("Failed to write header");
    }

    let mut row: u32 = 1;
    for (line, desc) in PRODUCT_LINES {
        for item in 0..40 {
            let mut col: u16 = 0;
            let text = |sheet: &mut rust_xlsxwriter::Worksheet, col: &mut u16, v: &str| {
                sheet.write_string(row, *col, v).expect("Failed to write cell");
                *col += 1;
            };
            text(sheet, &mut col, line);
            text(sheet, &mut col, &format!("{line}-{item:04}"));
            text(sheet, &mut col, rng.pick(&["Basic", "Premium", "Sport"]));
            text(sheet, &mut col, rng.pick(&["Cotton", "Wool", "Nylon"]));
            text(sheet, &mut col, rng.pick(&["Short", "Knee", "Long"]));
            text(sheet, &mut col, rng.pick(&["Plain", "Pattern"]));
            text(sheet, &mut col, rng.pick(&["SS", "FW", "NOS"]));
            text(sheet, &mut col, rng.pick(&["M", "F", "U"]));
            text(sheet, &mut col, rng.pick(&["Everyday", "Outdoor", "Formal"]));
            text(sheet, &mut col, desc);

            // Stock and order quantities; roughly 1 in 25 on-hand values is junk.
            if rng.below(25) == 0 {
                text(sheet, &mut col, "n/a");
            } else {
                sheet
                    .write_number(row, col, rng.below(500) as f64)
                    .expect("Failed to write cell");
                col += 1;
            }
            for max in [200, 150, 40] {
                sheet
                    .write_number(row, col, rng.below(max) as f64)
                    .expect("Failed to write cell");
                col += 1;
            }

            // 3MCov and StockPrev
            let coverage = (rng.next_f64() * 12.0 * 100.0).round() / 100.0;
            sheet.write_number(row, col, coverage).expect("Failed to write cell");
            sheet
                .write_number(row, col + 1, rng.below(600) as f64)
                .expect("Failed to write cell");
            col += 2;

            // Monthly sales with a mild seasonal swing.
            for i in 0..months.len() {
                let season = 1.0 + 0.4 * ((i as f64 / 12.0) * std::f64::consts::TAU).sin();
                let sales = (rng.below(60) as f64 * season).round();
                sheet
                    .write_number(row, col, sales)
                    .expect("Failed to write cell");
                col += 1;
            }
            row += 1;
        }
    }

    workbook
        .save(&output_path)
        .expect("Failed to write workbook");

    println!(
        "Wrote {} inventory records ({} monthly columns) to {}",
        row - 1,
        months.len(),
        output_path.display()
    );
}
