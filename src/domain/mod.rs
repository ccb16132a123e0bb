use std::collections::BTreeMap;

use validator::ValidationErrors;

pub mod booking;
pub mod dto;
pub mod hotel;
pub mod query;
pub mod room;
pub mod user;

/// Field name -> message, keyed by the camelCase name the client sent.
pub type FieldErrors = BTreeMap<String, String>;

pub fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|err| err.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("{} is not valid", camel_case(&field)));

            (camel_case(&field), message)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }

    out
}
