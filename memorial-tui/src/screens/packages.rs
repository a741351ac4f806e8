use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::Package;
use memorial_lib::model::localized;

use super::Listing;

pub struct Packages;

#[derive(Debug, Clone)]
pub struct PackageRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub display_price: String,
    pub duration_days: u32,
    pub featured: bool,
    pub active: bool,
}

impl Record for PackageRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "price" => CellValue::from(self.price),
            "duration" => CellValue::from(self.duration_days),
            "featured" => CellValue::from(self.featured),
            "state" => CellValue::from(if self.active { "Active" } else { "Inactive" }),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Packages {
    type Entity = Package;
    type Row = PackageRow;

    const TITLE: &'static str = "Packages";
    const NOUN: &'static str = "package";

    fn row(package: &Package, lang: &str) -> PackageRow {
        PackageRow {
            id: package.id.clone(),
            name: localized(&package.name, lang).to_string(),
            price: package.price,
            display_price: package.display_price(),
            duration_days: package.duration_days,
            featured: package.is_featured,
            active: package.is_active,
        }
    }

    fn row_id(row: &PackageRow) -> &str {
        &row.id
    }

    fn row_label(row: &PackageRow) -> String {
        format!("\"{}\" ({})", row.name, row.display_price)
    }

    fn columns() -> Vec<Column<PackageRow>> {
        vec![
            Column::new("name", "Name"),
            // Sorts on the number, shows the formatted price.
            Column::new("price", "Price").cell(|row: &PackageRow, _| row.display_price.clone()),
            Column::new("duration", "Days"),
            Column::new("featured", "Featured").cell(|_, value| match value {
                CellValue::Bool(true) => "★".to_string(),
                _ => String::new(),
            }),
            Column::new("state", "State").facets(["Active", "Inactive"]),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::column("name")
    }

    fn search_placeholder() -> &'static str {
        "Filter packages..."
    }
}

#[cfg(test)]
mod tests {
    use memorial_grid::DataGrid;
    use memorial_lib::model::LocalizedText;

    use super::*;

    fn package(id: &str, name: &str, price: f64) -> Package {
        Package {
            id: id.into(),
            name: vec![LocalizedText::new("en", name)],
            description: Vec::new(),
            price,
            currency: "EUR".into(),
            duration_days: 365,
            is_featured: price > 50.0,
            is_active: true,
        }
    }

    #[test]
    fn test_price_sorts_numerically() {
        let rows = vec![
            Packages::row(&package("p1", "Premium", 120.0), "en"),
            Packages::row(&package("p2", "Basic", 9.5), "en"),
            Packages::row(&package("p3", "Standard", 49.0), "en"),
        ];
        let mut grid = DataGrid::new(Packages::columns());
        grid.set_rows(rows);
        grid.toggle_sort("price");

        let names: Vec<_> = grid.visible_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Basic", "Standard", "Premium"]);
        assert_eq!(grid.columns()[1].render_cell(grid.visible_rows()[0]), "9.50 EUR");
        assert_eq!(grid.columns()[3].render_cell(grid.visible_rows()[2]), "★");
    }
}
