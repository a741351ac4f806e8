use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::Admin;
use memorial_lib::model::AdminRole;

use super::Listing;
use super::format_date;

pub struct Admins;

#[derive(Debug, Clone)]
pub struct AdminRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub active: bool,
    pub last_login: Option<String>,
}

impl Record for AdminRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "email" => CellValue::from(&self.email),
            "role" => CellValue::from(self.role),
            "active" => CellValue::from(self.active),
            "last_login" => CellValue::from(self.last_login.as_ref()),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Admins {
    type Entity = Admin;
    type Row = AdminRow;

    const TITLE: &'static str = "Admins";
    const NOUN: &'static str = "admin";

    fn row(admin: &Admin, _lang: &str) -> AdminRow {
        AdminRow {
            id: admin.id.clone(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role.label(),
            active: admin.is_active,
            last_login: format_date(admin.last_login_at),
        }
    }

    fn row_id(row: &AdminRow) -> &str {
        &row.id
    }

    fn row_label(row: &AdminRow) -> String {
        row.email.clone()
    }

    fn columns() -> Vec<Column<AdminRow>> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("role", "Role").facets(AdminRole::LABELS),
            Column::new("active", "Active").cell(|_, value| match value {
                CellValue::Bool(true) => "yes".to_string(),
                _ => "no".to_string(),
            }),
            Column::new("last_login", "Last login"),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::fields(["name", "email"])
    }

    fn search_placeholder() -> &'static str {
        "Search admins..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_column_renders_yes_no() {
        let admin = Admin {
            id: "a1".into(),
            name: "Root".into(),
            email: "root@example.org".into(),
            role: AdminRole::SuperAdmin,
            is_active: true,
            last_login_at: None,
            created_at: None,
        };
        let row = Admins::row(&admin, "en");
        let columns = Admins::columns();
        assert_eq!(columns[2].render_cell(&row), "Super admin");
        assert_eq!(columns[3].render_cell(&row), "yes");
        assert_eq!(columns[4].render_cell(&row), "");
    }
}
