//! Headless data grid for paginated admin list views.
//!
//! A [`DataGrid`] renders one already-fetched page of rows. It owns the
//! local sort, column filter and search state, and reports page or page-size
//! changes back to its owner as [`GridEvent`]s. The owner holds the
//! authoritative [`PageInfo`] and performs the fetch.
//!
//! # Example
//!
//! ```
//! use memorial_grid::{CellValue, Column, DataGrid, GridEvent, PageInfo, Record, SearchKey};
//!
//! struct Faq {
//!     question: String,
//!     answer: String,
//! }
//!
//! impl Record for Faq {
//!     fn field(&self, key: &str) -> CellValue {
//!         match key {
//!             "question" => CellValue::from(self.question.as_str()),
//!             "answer" => CellValue::from(self.answer.as_str()),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let mut grid = DataGrid::new(vec![
//!     Column::new("question", "Question"),
//!     Column::new("answer", "Answer"),
//! ])
//! .with_search_key(SearchKey::fields(["question", "answer"]));
//!
//! grid.set_rows(vec![Faq {
//!     question: "How do I publish a tribute?".into(),
//!     answer: "From the tributes page.".into(),
//! }]);
//! grid.set_page_info(PageInfo::new(1, 3, 25));
//!
//! assert_eq!(grid.next_page(), vec![GridEvent::PageChange(2)]);
//! ```

mod column;
mod filter;
mod grid;
mod pagination;
mod sort;
mod value;
mod view;

pub use column::*;
pub use filter::*;
pub use grid::*;
pub use pagination::*;
pub use sort::*;
pub use value::*;
pub use view::*;
