//! Client payloads

use serde::Deserialize;
use shared::AppResult;
use shared::models::{ClientCreate, ClientFilter, ClientUpdate};

use super::{FieldReader, Payload, query_text, required};

pub const FIELDS: &[&str] = &["name", "email", "phone", "company"];
const REQUIRED: &[&str] = &["name", "email"];

fn normalize_email(email: String) -> String {
    email.to_lowercase()
}

pub fn create(body: &Payload) -> AppResult<ClientCreate> {
    body.reject_unknown(FIELDS)?;
    body.require(REQUIRED)?;

    let mut r = FieldReader::new(body);
    let name = r.text("name");
    let email = r.text("email").map(normalize_email);
    let phone = r.nullable_text("phone").flatten();
    let company = r.nullable_text("company").flatten();
    r.finish()?;

    Ok(ClientCreate {
        name: required(name, "name")?,
        email: required(email, "email")?,
        phone,
        company,
    })
}

pub fn update(body: &Payload) -> AppResult<ClientUpdate> {
    body.reject_unknown(FIELDS)?;

    let mut r = FieldReader::new(body);
    let update = ClientUpdate {
        name: r.text("name"),
        email: r.text("email").map(normalize_email),
        phone: r.nullable_text("phone"),
        company: r.nullable_text("company"),
    };
    r.finish()?;
    Ok(update)
}

/// `GET /clients` query string
#[derive(Debug, Default, Deserialize)]
pub struct ClientQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl ClientQuery {
    pub fn into_filter(self) -> ClientFilter {
        ClientFilter {
            name: query_text(self.name),
            email: query_text(self.email),
            phone: query_text(self.phone),
            company: query_text(self.company),
        }
    }
}
