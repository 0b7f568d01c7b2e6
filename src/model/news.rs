use chrono::NaiveDate;

use crate::model::Id;

/// A news item shown on the front page.
///
/// `report` marks items that announce a published report.
#[derive(Debug, Clone, PartialEq)]
pub struct News {
    pub id: Id,
    pub title: String,
    pub date: NaiveDate,
    pub image: String,
    pub report: bool,
    pub text: String,
}

/// One entry of a grouped report set. `report_id` identifies the set.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: Id,
    pub text: String,
    pub image: String,
    pub report_id: i32,
}
