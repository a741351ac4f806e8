use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::Tribute;
use memorial_lib::model::TributeStatus;

use super::Listing;

pub struct Tributes;

#[derive(Debug, Clone)]
pub struct TributeRow {
    pub id: String,
    pub name: String,
    pub lifespan: String,
    pub age: Option<u32>,
    pub country: String,
    pub author: String,
    pub status: &'static str,
    pub candles: u64,
    pub views: u64,
}

impl Record for TributeRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "lifespan" => CellValue::from(&self.lifespan),
            "age" => CellValue::from(self.age),
            "country" => CellValue::from(&self.country),
            "author" => CellValue::from(&self.author),
            "status" => CellValue::from(self.status),
            "candles" => CellValue::from(self.candles),
            "views" => CellValue::from(self.views),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Tributes {
    type Entity = Tribute;
    type Row = TributeRow;

    const TITLE: &'static str = "Tributes";
    const NOUN: &'static str = "tribute";

    fn row(tribute: &Tribute, _lang: &str) -> TributeRow {
        let author = tribute
            .author
            .as_ref()
            .map(|a| format!("{} {}", a.first_name, a.last_name).trim().to_string())
            .unwrap_or_default();
        TributeRow {
            id: tribute.id.clone(),
            name: tribute.deceased_name.clone(),
            lifespan: tribute.lifespan(),
            age: tribute.age_at_death(),
            country: tribute.country.clone().unwrap_or_default(),
            author,
            status: tribute.status.label(),
            candles: tribute.candles,
            views: tribute.views,
        }
    }

    fn row_id(row: &TributeRow) -> &str {
        &row.id
    }

    fn row_label(row: &TributeRow) -> String {
        format!("\"{}\"", row.name)
    }

    fn columns() -> Vec<Column<TributeRow>> {
        vec![
            Column::new("name", "Deceased"),
            Column::new("lifespan", "Life").sortable(false),
            Column::new("age", "Age"),
            Column::new("country", "Country"),
            Column::new("author", "Author"),
            Column::new("status", "Status").facets(TributeStatus::LABELS),
            Column::new("candles", "Candles"),
            Column::new("views", "Views"),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::fields(["name", "author"])
    }

    fn search_placeholder() -> &'static str {
        "Search by deceased or author..."
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use memorial_lib::model::TributeAuthor;

    use super::*;

    #[test]
    fn test_row_flattens_author_and_status() {
        let tribute = Tribute {
            id: "t1".into(),
            deceased_name: "Ivan Horvat".into(),
            date_of_birth: Utc.with_ymd_and_hms(1938, 3, 1, 0, 0, 0).single(),
            date_of_death: Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).single(),
            place: None,
            country: Some("Croatia".into()),
            status: TributeStatus::Published,
            author: Some(TributeAuthor {
                id: "u1".into(),
                first_name: "Ana".into(),
                last_name: "Horvat".into(),
                email: "ana@example.hr".into(),
            }),
            candles: 12,
            views: 340,
            created_at: None,
        };

        let row = Tributes::row(&tribute, "en");
        assert_eq!(row.author, "Ana Horvat");
        assert_eq!(row.status, "Published");
        assert_eq!(row.age, Some(87));
        assert_eq!(row.field("country"), CellValue::text("Croatia"));
        assert_eq!(Tributes::row_label(&row), "\"Ivan Horvat\"");
    }
}
