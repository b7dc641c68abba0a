use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planyo_client::decoder::decode_data;
use planyo_client::reservation::ReservationList;
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde_json::{json, Value};

// Builds a list payload with a realistic mix of clean and malformed numeric fields
fn list_payload(count: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    let rooms = ["Room 1", "Room 2", "Room 12", "Bunkhouse", "Shepherd's Hut"];
    let agencies = [Some("Booking.com"), Some("Airbnb"), None];

    let results: Vec<Value> = (0..count)
        .map(|i| {
            let day = rng.gen_range(1..28);
            let status = if rng.gen_bool(0.05) {
                "n/a".to_string()
            } else {
                rng.gen_range(1..8).to_string()
            };

            let mut properties = json!({
                "persons": rng.gen_range(1..5).to_string(),
                "First_Name_1": "Ann",
                "Last_name_1": "Example",
            });
            if let Some(agency) = agencies.choose(&mut rng).copied().flatten() {
                properties["agency"] = json!(agency);
            }

            json!({
                "reservation_id": 10_000 + i,
                "first_name": "Ann",
                "last_name": "Example",
                "email": "ann@example.com",
                "phone_number": "+44 20 7946 0000",
                "name": rooms.choose(&mut rng).copied().unwrap_or("Room 1"),
                "creation_time": "2025-08-01 12:00:00",
                "start_time": format!("2025-09-{:02} 15:00:00", day),
                "end_time": format!("2025-09-{:02} 11:00:00", day + 1),
                "status": status,
                "total_price": format!("{}.{:02}", rng.gen_range(40..900), rng.gen_range(0..100)),
                "amount_paid": "0",
                "properties": properties,
                "regular_products": [
                    {"id": "17", "name": "Breakfast", "unit_price": "12.50", "quantity": "2"}
                ]
            })
        })
        .collect();

    serde_json::to_vec(&json!({
        "data": { "results": results },
        "response_code": 0,
        "response_message": ""
    }))
    .unwrap()
}

pub fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_list_decode");

    for count in [10, 100, 1000].iter() {
        let payload = list_payload(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &payload, |b, payload| {
            b.iter(|| {
                let list: ReservationList = decode_data(black_box(payload)).unwrap();
                black_box(list.results.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
