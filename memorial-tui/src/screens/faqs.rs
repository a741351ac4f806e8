use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::Faq;
use memorial_lib::model::localized;

use super::Listing;

pub struct Faqs;

#[derive(Debug, Clone)]
pub struct FaqRow {
    pub id: String,
    pub order: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub active: bool,
}

impl Record for FaqRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "order" => CellValue::from(self.order),
            "question" => CellValue::from(&self.question),
            "answer" => CellValue::from(&self.answer),
            "category" => CellValue::from(self.category.as_ref()),
            "state" => CellValue::from(if self.active { "Visible" } else { "Hidden" }),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Faqs {
    type Entity = Faq;
    type Row = FaqRow;

    const TITLE: &'static str = "FAQ";
    const NOUN: &'static str = "question";

    fn row(faq: &Faq, lang: &str) -> FaqRow {
        FaqRow {
            id: faq.id.clone(),
            order: faq.order,
            question: localized(&faq.question, lang).to_string(),
            answer: localized(&faq.answer, lang).to_string(),
            category: faq.category.clone(),
            active: faq.is_active,
        }
    }

    fn row_id(row: &FaqRow) -> &str {
        &row.id
    }

    fn row_label(row: &FaqRow) -> String {
        format!("#{}", row.order)
    }

    fn columns() -> Vec<Column<FaqRow>> {
        vec![
            Column::new("order", "#"),
            Column::new("question", "Question"),
            Column::new("category", "Category"),
            Column::new("state", "State").facets(["Visible", "Hidden"]),
        ]
    }

    /// Searches answers too, although they are not shown as a column.
    fn search_key() -> SearchKey {
        SearchKey::fields(["question", "answer"])
    }

    fn search_placeholder() -> &'static str {
        "Search questions and answers..."
    }
}
