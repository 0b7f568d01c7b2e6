use crate::model::{Contract, Document, House, Id, News, Protocol, Report};

/// A full snapshot of every table, used to load data outside the HTTP
/// surface (seeding, tests).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub houses: Vec<House>,
    pub news: Vec<News>,
    pub reports: Vec<Report>,
    pub contracts: Vec<Contract>,
    pub protocols: Vec<Protocol>,
    pub documents: Vec<Document>,
}

impl Dataset {
    /// Dependents whose `house_id` has no matching house in this dataset,
    /// as `(table, row id, house id)`.
    pub fn dangling_house_refs(&self) -> Vec<(&'static str, Id, Id)> {
        let known: std::collections::HashSet<_> = self.houses.iter().map(|h| h.id).collect();
        let mut dangling = Vec::new();
        for c in &self.contracts {
            if !known.contains(&c.house_id) {
                dangling.push(("contracts", c.id, c.house_id));
            }
        }
        for p in &self.protocols {
            if !known.contains(&p.house_id) {
                dangling.push(("protocols", p.id, p.house_id));
            }
        }
        for d in &self.documents {
            if !known.contains(&d.house_id) {
                dangling.push(("documents", d.id, d.house_id));
            }
        }
        dangling
    }
}
