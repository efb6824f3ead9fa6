use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster eras: (category, number of flights, payload range kg, success rate).
const ERAS: [(&str, usize, (f64, f64), f64); 5] = [
    ("v1.0", 5, (0.0, 700.0), 0.0),
    ("v1.1", 15, (500.0, 4500.0), 0.35),
    ("FT", 24, (1000.0, 9600.0), 0.7),
    ("B4", 11, (2000.0, 9600.0), 0.55),
    ("B5", 1, (3600.0, 3600.0), 1.0),
];

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Row {
    flight_number: i64,
    site: &'static str,
    outcome: i64,
    payload: f64,
    booster_version: String,
    category: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for (category, flights, (lo, hi), success_rate) in ERAS {
        for _ in 0..flights {
            let flight_number = rows.len() as i64 + 1;
            // Round to whole kilograms like the published manifests.
            let payload = rng.uniform(lo, hi).round();
            rows.push(Row {
                flight_number,
                site: rng.pick(&SITES),
                outcome: i64::from(rng.next_f64() < success_rate),
                payload,
                booster_version: format!("F9 {category} B{}", 1000 + flight_number),
                category,
            });
        }
    }

    // Write CSV
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for r in &rows {
        writer
            .write_record([
                r.flight_number.to_string(),
                r.site.to_string(),
                r.outcome.to_string(),
                format!("{:.1}", r.payload),
                r.booster_version.clone(),
                r.category.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.outcome))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let successes = rows.iter().filter(|r| r.outcome == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {csv_path} and {parquet_path}",
        rows.len()
    );
}
