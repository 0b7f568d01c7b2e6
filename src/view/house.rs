use serde::Serialize;

use crate::model::{Contract, Document, House, Id, Protocol};
use crate::view::format::{format_date, format_two_places};

/// JSON shape of a house. Field order is the order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseView {
    pub id: Id,
    pub address: String,
    pub date: String,
    pub area: String,
    pub tariff: String,
}

impl From<&House> for HouseView {
    fn from(house: &House) -> Self {
        Self {
            id: house.id,
            address: house.address.clone(),
            date: format_date(house.date),
            area: format_two_places(&house.area),
            tariff: format_two_places(&house.tariff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractView {
    pub id: Id,
    pub txt: String,
    pub house_id: Id,
}

impl From<&Contract> for ContractView {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id,
            txt: contract.text.clone(),
            house_id: contract.house_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolView {
    pub id: Id,
    pub name: String,
    pub number: i32,
    pub date: String,
    pub house_id: Id,
    pub link: String,
}

impl From<&Protocol> for ProtocolView {
    fn from(protocol: &Protocol) -> Self {
        Self {
            id: protocol.id,
            name: protocol.name.clone(),
            number: protocol.number,
            date: format_date(protocol.date),
            house_id: protocol.house_id,
            link: protocol.link.clone(),
        }
    }
}

// Same columns as a protocol, but `link` precedes `house_id` here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub id: Id,
    pub name: String,
    pub number: i32,
    pub date: String,
    pub link: String,
    pub house_id: Id,
}

impl From<&Document> for DocumentView {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id,
            name: document.name.clone(),
            number: document.number,
            date: format_date(document.date),
            link: document.link.clone(),
            house_id: document.house_id,
        }
    }
}
