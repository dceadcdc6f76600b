use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

struct Row {
    flight_number: i64,
    site: String,
    class: i64,
    payload_mass_kg: f64,
    booster_category: String,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sites = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

    // (category, launches, typical payload kg, base success probability)
    let boosters: [(&str, usize, f64, f64); 5] = [
        ("v1.0", 5, 500.0, 0.2),
        ("v1.1", 12, 2500.0, 0.45),
        ("FT", 20, 4200.0, 0.75),
        ("B4", 10, 5200.0, 0.8),
        ("B5", 9, 6000.0, 0.92),
    ];

    let mut rows: Vec<Row> = Vec::new();
    let mut flight_number: i64 = 1;

    for (category, launches, typical_payload, success_prob) in boosters {
        for _ in 0..launches {
            let payload = rng
                .gauss(typical_payload, typical_payload * 0.45)
                .clamp(0.0, 9600.0);
            // heavier payloads push against the booster's margin
            let p = (success_prob - 0.1 * (payload / 9600.0)).clamp(0.05, 0.98);
            let class = i64::from(rng.next_f64() < p);

            rows.push(Row {
                flight_number,
                site: rng.pick(&sites).to_string(),
                class,
                payload_mass_kg: (payload * 10.0).round() / 10.0,
                booster_category: category.to_string(),
            });
            flight_number += 1;
        }
    }

    write_csv(&rows).expect("Failed to write CSV");
    write_parquet(&rows).expect("Failed to write Parquet");

    println!(
        "Wrote {} launch records to launch_records.csv and launch_records.parquet",
        rows.len()
    );
}

fn write_csv(rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path("launch_records.csv")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for row in rows {
        writer.write_record([
            row.flight_number.to_string(),
            row.site.clone(),
            row.class.to_string(),
            row.payload_mass_kg.to_string(),
            row.booster_category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
    let site_array = StringArray::from(rows.iter().map(|r| r.site.as_str()).collect::<Vec<_>>());
    let payload_array = Float64Array::from(rows.iter().map(|r| r.payload_mass_kg).collect::<Vec<_>>());
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let booster_array = StringArray::from(
        rows.iter()
            .map(|r| r.booster_category.as_str())
            .collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(site_array),
            Arc::new(payload_array),
            Arc::new(class_array),
            Arc::new(booster_array),
        ],
    )?;

    let file = std::fs::File::create("launch_records.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
