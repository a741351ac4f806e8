use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::User;
use memorial_lib::model::UserStatus;

use super::Listing;
use super::format_date;

pub struct Users;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub country: String,
    pub status: &'static str,
    pub tributes: u64,
    pub joined: Option<String>,
}

impl Record for UserRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "email" => CellValue::from(&self.email),
            "country" => CellValue::from(&self.country),
            "status" => CellValue::from(self.status),
            "tributes" => CellValue::from(self.tributes),
            "joined" => CellValue::from(self.joined.as_ref()),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Users {
    type Entity = User;
    type Row = UserRow;

    const TITLE: &'static str = "Users";
    const NOUN: &'static str = "user";

    fn row(user: &User, _lang: &str) -> UserRow {
        UserRow {
            id: user.id.clone(),
            name: user.full_name(),
            email: user.email.clone(),
            country: user.country.clone().unwrap_or_default(),
            status: user.status().label(),
            tributes: user.tributes_count,
            joined: format_date(user.created_at),
        }
    }

    fn row_id(row: &UserRow) -> &str {
        &row.id
    }

    fn row_label(row: &UserRow) -> String {
        format!("{} <{}>", row.name, row.email)
    }

    fn columns() -> Vec<Column<UserRow>> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("country", "Country"),
            Column::new("status", "Status").facets(UserStatus::LABELS),
            Column::new("tributes", "Tributes"),
            Column::new("joined", "Joined"),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::fields(["name", "email"])
    }

    fn search_placeholder() -> &'static str {
        "Search by name or email..."
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            first_name: "Maria".into(),
            last_name: "Lopez".into(),
            email: "maria@example.org".into(),
            phone: None,
            country: Some("ES".into()),
            is_verified: false,
            is_blocked: false,
            tributes_count: 3,
            created_at: Utc.with_ymd_and_hms(2025, 11, 2, 9, 30, 0).single(),
        }
    }

    #[test]
    fn test_row_derives_status_and_date() {
        let row = Users::row(&user(), "en");
        assert_eq!(row.name, "Maria Lopez");
        assert_eq!(row.status, "Unverified");
        assert_eq!(row.joined.as_deref(), Some("2025-11-02"));
        assert_eq!(Users::row_label(&row), "Maria Lopez <maria@example.org>");
    }

    #[test]
    fn test_status_facet_matches_derived_label() {
        let mut blocked = user();
        blocked.is_blocked = true;
        let row = Users::row(&blocked, "en");

        let status = Users::columns().remove(3);
        let facets = memorial_grid::FilterValue::Facets(vec!["Blocked".into()]);
        assert!(status.matches(&row, &facets));
    }
}
