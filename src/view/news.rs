use serde::Serialize;

use crate::model::{Id, News, Report};
use crate::view::format::format_date;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsView {
    pub id: Id,
    pub title: String,
    pub date: String,
    pub image: String,
    pub report: bool,
    pub txt: String,
}

impl From<&News> for NewsView {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            date: format_date(news.date),
            image: news.image.clone(),
            report: news.report,
            txt: news.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: Id,
    pub txt: String,
    pub image: String,
    pub report_id: i32,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            txt: report.text.clone(),
            image: report.image.clone(),
            report_id: report.report_id,
        }
    }
}
