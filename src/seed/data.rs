use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::model::{Contract, Dataset, Document, House, News, Protocol, Report};
use crate::store::{AdminStore, StoreResult};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn decimal(raw: &str) -> BigDecimal {
    BigDecimal::from_str(raw).unwrap_or_default()
}

/// Small demonstration dataset: three houses with their paperwork, a few
/// news items and one report set.
pub fn demo_dataset() -> Dataset {
    let houses = vec![
        House {
            id: 1,
            address: "Lenina St 12".to_string(),
            date: day(2019, 4, 15),
            area: decimal("3120.4"),
            tariff: decimal("28.915"),
        },
        House {
            id: 2,
            address: "Amurskaya St 5".to_string(),
            date: day(2023, 9, 1),
            area: decimal("1840"),
            tariff: decimal("31.2"),
        },
        House {
            id: 3,
            address: "Sovetskaya St 40".to_string(),
            date: day(2021, 2, 20),
            area: decimal("2675.55"),
            tariff: decimal("29.675"),
        },
    ];

    let contracts = vec![
        Contract {
            id: 1,
            text: "Management agreement for Lenina St 12".to_string(),
            house_id: 1,
        },
        Contract {
            id: 2,
            text: "Management agreement for Amurskaya St 5".to_string(),
            house_id: 2,
        },
        Contract {
            id: 3,
            text: "Elevator servicing agreement".to_string(),
            house_id: 1,
        },
    ];

    let protocols = vec![
        Protocol {
            id: 1,
            name: "Annual general meeting".to_string(),
            number: 1,
            date: day(2023, 3, 14),
            link: "/files/protocols/1.pdf".to_string(),
            house_id: 1,
        },
        Protocol {
            id: 2,
            name: "Choice of management company".to_string(),
            number: 2,
            date: day(2023, 9, 1),
            link: "/files/protocols/2.pdf".to_string(),
            house_id: 2,
        },
    ];

    let documents = vec![
        Document {
            id: 1,
            name: "Technical passport".to_string(),
            number: 114,
            date: day(2019, 4, 15),
            link: "/files/documents/114.pdf".to_string(),
            house_id: 1,
        },
        Document {
            id: 2,
            name: "Heating readiness certificate".to_string(),
            number: 207,
            date: day(2024, 9, 10),
            link: "/files/documents/207.pdf".to_string(),
            house_id: 3,
        },
    ];

    let news = vec![
        News {
            id: 1,
            title: "Heating season starts".to_string(),
            date: day(2024, 10, 1),
            image: "/static/img/heating.jpg".to_string(),
            report: false,
            text: "Heating will be switched on in all houses by October 5.".to_string(),
        },
        News {
            id: 2,
            title: "Annual report published".to_string(),
            date: day(2024, 4, 2),
            image: "/static/img/report.jpg".to_string(),
            report: true,
            text: "The 2023 work report is available on the reports page.".to_string(),
        },
    ];

    let reports = vec![
        Report {
            id: 1,
            text: "Roof repaired at Lenina St 12".to_string(),
            image: "/static/img/roof.jpg".to_string(),
            report_id: 2023,
        },
        Report {
            id: 2,
            text: "Entrance renovated at Amurskaya St 5".to_string(),
            image: "/static/img/entrance.jpg".to_string(),
            report_id: 2023,
        },
    ];

    Dataset {
        houses,
        news,
        reports,
        contracts,
        protocols,
        documents,
    }
}

/// Loads the demo dataset; rows that already exist are left untouched.
pub async fn load_seed_data<S: AdminStore + ?Sized>(store: &S) -> StoreResult<()> {
    let dataset = demo_dataset();
    store.load_dataset(&dataset).await?;
    log::info!(
        "seed data loaded: {} houses, {} news",
        dataset.houses.len(),
        dataset.news.len()
    );
    Ok(())
}
