// Table rendering for entity results.

use prettytable::{format, Cell, Row, Table};

use crate::entity::Entity;

/// Build a grid table for `records` with the entity's column headers.
pub fn table<E: Entity>(records: &[E]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        E::COLUMNS
            .iter()
            .map(|title| Cell::new(title).style_spec("bFc"))
            .collect(),
    ));
    for record in records {
        table.add_row(Row::new(
            record.cells().iter().map(|cell| Cell::new(cell)).collect(),
        ));
    }
    table
}

/// Message shown instead of a table when nothing matched.
pub fn empty_message<E: Entity>() -> String {
    format!("No {} found.", E::PLURAL)
}

/// Rendered result of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Table(String),
    /// Nothing matched; holds the message to show instead.
    Empty(String),
}

pub fn listing<E: Entity>(records: &[E]) -> Listing {
    if records.is_empty() {
        return Listing::Empty(empty_message::<E>());
    }
    Listing::Table(table(records).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Product, User};

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.into(),
            price,
            expiration_date: None,
        }
    }

    #[test]
    fn empty_records_give_message_not_table() {
        assert_eq!(listing::<Product>(&[]), Listing::Empty("No products found.".to_string()));
        assert_eq!(listing::<User>(&[]), Listing::Empty("No users found.".to_string()));
    }

    #[test]
    fn columns_appear_in_order() {
        let Listing::Table(out) = listing(&[product(1, "Milk", 2.5)]) else {
            panic!("expected a table");
        };
        let header = out.lines().find(|l| l.contains("ID")).unwrap();
        let positions: Vec<usize> = ["ID", "Name", "Price", "Expiration Date"]
            .iter()
            .map(|col| header.find(col).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn one_row_per_record() {
        let records = [product(1, "Milk", 2.5), product(2, "Cheese", 11.0)];
        let Listing::Table(out) = listing(&records) else {
            panic!("expected a table");
        };
        assert!(out.contains("Milk") && out.contains("$2.50"));
        assert!(out.contains("Cheese") && out.contains("$11.00"));
        assert_eq!(table(&records).len(), 2);
    }
}
