// Remote entities managed through the API. Products and users share one
// CRUD flow; the `Entity` trait carries what differs between them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::ui::Console;
use crate::validate;

/// Which entity a menu action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Products,
    Users,
}

/// Whether a draft is collected for a new record or to replace one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Update,
}

pub trait Entity: DeserializeOwned {
    /// Lower-case singular noun, e.g. `product`.
    const SINGULAR: &'static str;
    /// Lower-case plural noun, e.g. `products`.
    const PLURAL: &'static str;
    /// Collection endpoint; single records live at `<COLLECTION>/<id>`.
    const COLLECTION: &'static str;
    /// Table headers, in display order.
    const COLUMNS: [&'static str; 4];

    /// Payload sent on create and update.
    type Draft: Serialize;

    /// Table cells matching `COLUMNS`.
    fn cells(&self) -> [String; 4];

    /// Collect and validate a draft interactively.
    fn prompt_draft<C: Console>(console: &mut C, mode: DraftMode) -> Result<Self::Draft, CliError>;

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub expiration_date: String,
}

impl Entity for Product {
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
    const COLLECTION: &'static str = "/api/products";
    const COLUMNS: [&'static str; 4] = ["ID", "Name", "Price", "Expiration Date"];

    type Draft = ProductDraft;

    fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.name.clone(),
            format!("${:.2}", self.price),
            self.expiration_date.clone().unwrap_or_else(|| "N/A".into()),
        ]
    }

    fn prompt_draft<C: Console>(console: &mut C, mode: DraftMode) -> Result<ProductDraft, CliError> {
        let new = match mode {
            DraftMode::Create => "",
            DraftMode::Update => "new ",
        };
        let name = console.text(&format!("Enter {new}product name"))?;
        let price = console.decimal(&format!("Enter {new}product price"))?;
        let expiration_date = console.text(&format!("Enter {new}expiration date (YYYY-MM-DD)"))?;

        validate::non_negative(price, "Price")?;
        let expiration_date = validate::date(&expiration_date)?;

        Ok(ProductDraft {
            name,
            price,
            expiration_date: expiration_date.format("%Y-%m-%d").to_string(),
        })
    }
}

/// A user as returned by the API. The password is write-only and never
/// comes back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// `None` on update keeps the stored password.
    pub password: Option<String>,
    pub age: i64,
}

impl Entity for User {
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
    const COLLECTION: &'static str = "/api/users";
    const COLUMNS: [&'static str; 4] = ["ID", "Name", "Email", "Age"];

    type Draft = UserDraft;

    fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.age.map(|a| a.to_string()).unwrap_or_else(|| "N/A".into()),
        ]
    }

    fn prompt_draft<C: Console>(console: &mut C, mode: DraftMode) -> Result<UserDraft, CliError> {
        let draft = match mode {
            DraftMode::Create => UserDraft {
                name: console.text("Enter name")?,
                email: console.text("Enter email")?,
                password: Some(console.secret("Enter password")?),
                age: console.integer("Enter age")?,
            },
            DraftMode::Update => {
                let name = console.text("Enter new name")?;
                let email = console.text("Enter new email")?;
                let password =
                    console.optional_text("Enter new password (leave blank to keep unchanged)")?;
                let age = console.integer("Enter new age")?;
                UserDraft {
                    name,
                    email,
                    password: Some(password).filter(|p| !p.is_empty()),
                    age,
                }
            }
        };
        Ok(draft)
    }
}
