use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::Country;
use memorial_lib::model::localized;

use super::Listing;

pub struct Countries;

#[derive(Debug, Clone)]
pub struct CountryRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub phone_code: Option<String>,
    pub currency: Option<String>,
    pub active: bool,
    pub tributes: u64,
}

impl Record for CountryRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "code" => CellValue::from(&self.code),
            "phone_code" => CellValue::from(self.phone_code.as_ref()),
            "currency" => CellValue::from(self.currency.as_ref()),
            "state" => CellValue::from(if self.active { "Active" } else { "Inactive" }),
            "tributes" => CellValue::from(self.tributes),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Countries {
    type Entity = Country;
    type Row = CountryRow;

    const TITLE: &'static str = "Countries";
    const NOUN: &'static str = "country";

    fn row(country: &Country, lang: &str) -> CountryRow {
        CountryRow {
            id: country.id.clone(),
            name: localized(&country.name, lang).to_string(),
            code: country.code.to_uppercase(),
            phone_code: country.phone_code.clone(),
            currency: country.currency.clone(),
            active: country.is_active,
            tributes: country.tributes_count,
        }
    }

    fn row_id(row: &CountryRow) -> &str {
        &row.id
    }

    fn row_label(row: &CountryRow) -> String {
        format!("{} ({})", row.name, row.code)
    }

    fn columns() -> Vec<Column<CountryRow>> {
        vec![
            Column::new("name", "Name"),
            Column::new("code", "Code"),
            Column::new("phone_code", "Phone"),
            Column::new("currency", "Currency"),
            Column::new("state", "State").facets(["Active", "Inactive"]),
            Column::new("tributes", "Tributes"),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::fields(["name", "code"])
    }

    fn search_placeholder() -> &'static str {
        "Search countries..."
    }
}
