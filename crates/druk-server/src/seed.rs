use druk_core::{validate_submission, EntitySchema, FieldMap, Mode, Result};

use serde_json::json;

/// Static catalog data behind `POST /api/seed`. Each catalog entry passes
/// through the same create-validation as an API payload, so seeded records
/// satisfy the same completeness guarantees as user-created ones.
pub fn catalog(schema: &EntitySchema) -> Result<Vec<FieldMap>> {
    let raw = match schema.entity.as_str() {
        "tours" => tours(),
        "hotels" => hotels(),
        "festivals" => festivals(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(|fields| validate_submission(schema, &fields, Mode::Create))
        .collect()
}

/// Entities that `POST /api/seed` populates, in insert order.
pub const SEEDED_ENTITIES: [&str; 3] = ["tours", "hotels", "festivals"];

fn rows(value: serde_json::Value) -> Vec<FieldMap> {
    serde_json::from_value(value).expect("static catalog must be an array of objects")
}

fn tours() -> Vec<FieldMap> {
    rows(json!([
        {
            "name": "Druk Path Trek",
            "description": "Six-day trek from Paro to Thimphu across high ridgeline lakes.",
            "price": 1450,
            "duration": 6,
            "category": "trekking"
        },
        {
            "name": "Western Valleys Cultural Tour",
            "description": "Paro, Thimphu and Punakha dzongs, markets and farmhouses.",
            "price": 1150,
            "duration": 5,
            "category": "cultural"
        },
        {
            "name": "Jomolhari Base Camp Trek",
            "description": "Classic eight-day route beneath Bhutan's sacred peak.",
            "price": 2100,
            "duration": 8,
            "category": "trekking"
        },
        {
            "name": "Paro Tsechu Festival Tour",
            "description": "Timed around the spring tsechu with valley sightseeing.",
            "price": 1350,
            "duration": 4,
            "category": "festival"
        },
        {
            "name": "Bumthang Luxury Retreat",
            "description": "Lodge-based week in the spiritual heartland.",
            "price": 3200,
            "duration": 7,
            "category": "luxury"
        }
    ]))
}

fn hotels() -> Vec<FieldMap> {
    rows(json!([
        {
            "name": "Zhiwa Ling Heritage",
            "location": "Paro",
            "description": "Traditional stone-and-timber palace hotel.",
            "pricePerNight": 450,
            "rating": 4.8,
            "category": "luxury"
        },
        {
            "name": "Dhumra Farm Resort",
            "location": "Punakha",
            "description": "Working farm overlooking the Punakha valley.",
            "pricePerNight": 140,
            "rating": 4.4,
            "category": "farmstay"
        },
        {
            "name": "Hotel Druk",
            "location": "Thimphu",
            "description": "City hotel on the clock tower square.",
            "pricePerNight": 120,
            "rating": 4.1,
            "category": "standard"
        },
        {
            "name": "Gangtey Lodge",
            "location": "Phobjikha",
            "description": "Boutique lodge above the crane valley.",
            "pricePerNight": 520,
            "rating": 4.9,
            "category": "boutique"
        }
    ]))
}

fn festivals() -> Vec<FieldMap> {
    rows(json!([
        {
            "name": "Paro Tsechu",
            "location": "Paro Dzong",
            "description": "Masked cham dances closing with the unfurling of a giant thongdrel.",
            "month": "March",
            "durationDays": 5
        },
        {
            "name": "Thimphu Tshechu",
            "location": "Tashichho Dzong",
            "description": "The capital's largest festival, held in the dzong courtyard.",
            "month": "September",
            "durationDays": 3
        },
        {
            "name": "Black-Necked Crane Festival",
            "location": "Gangtey Gonpa",
            "description": "Celebrates the cranes' winter arrival in the Phobjikha valley.",
            "month": "November",
            "durationDays": 1
        },
        {
            "name": "Jambay Lhakhang Drup",
            "location": "Bumthang",
            "description": "Night-time fire blessing and naked dance at one of Bhutan's oldest temples.",
            "month": "October",
            "durationDays": 4
        }
    ]))
}
