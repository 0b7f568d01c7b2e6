use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::model::Id;

/// An apartment building under management.
///
/// `area` and `tariff` are stored as `NUMERIC` and kept exact; rounding to
/// two digits happens only when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: Id,
    pub address: String,
    pub date: NaiveDate,
    pub area: BigDecimal,
    pub tariff: BigDecimal,
}

/// A management contract attached to a house.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    pub id: Id,
    pub text: String,
    pub house_id: Id,
}

/// Minutes of a residents' meeting for a house.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    pub id: Id,
    pub name: String,
    pub number: i32,
    pub date: NaiveDate,
    pub link: String,
    pub house_id: Id,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Id,
    pub name: String,
    pub number: i32,
    pub date: NaiveDate,
    pub link: String,
    pub house_id: Id,
}

/// Rows that belong to exactly one house and go away with it.
pub trait HouseOwned {
    fn house_id(&self) -> Id;
}

impl HouseOwned for Contract {
    fn house_id(&self) -> Id {
        self.house_id
    }
}

impl HouseOwned for Protocol {
    fn house_id(&self) -> Id {
        self.house_id
    }
}

impl HouseOwned for Document {
    fn house_id(&self) -> Id {
        self.house_id
    }
}
