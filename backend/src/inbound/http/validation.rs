//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::catalogue::CatalogueId;
use crate::domain::{
    DisplayName, EmailAddress, Error, PhoneNumber, UserValidationError,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

pub(crate) fn parse_catalogue_id(value: String, field: FieldName) -> Result<CatalogueId, Error> {
    CatalogueId::new(value.clone())
        .map_err(|err| field_error(field, format!("{}: {err}", field.as_str()), &value))
}

fn user_field_error(field: FieldName, err: &UserValidationError, value: &str) -> Error {
    field_error(field, format!("{}: {err}", field.as_str()), value)
}

pub(crate) fn parse_display_name(value: String, field: FieldName) -> Result<DisplayName, Error> {
    DisplayName::new(value.clone()).map_err(|err| user_field_error(field, &err, &value))
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value.clone()).map_err(|err| user_field_error(field, &err, &value))
}

pub(crate) fn parse_phone(value: String, field: FieldName) -> Result<PhoneNumber, Error> {
    PhoneNumber::new(value.clone()).map_err(|err| user_field_error(field, &err, &value))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn uuid_errors_carry_field_details() {
        let error = parse_uuid("nope", FieldName::new("depositId")).expect_err("invalid uuid");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
        let details = error.details.expect("details");
        assert_eq!(details["field"], "depositId");
        assert_eq!(details["value"], "nope");
    }

    #[rstest]
    fn catalogue_id_errors_carry_field_details() {
        let error = parse_catalogue_id("Not Valid".to_owned(), FieldName::new("wasteTypeId"))
            .expect_err("invalid slug");
        let details = error.details.expect("details");
        assert_eq!(details["field"], "wasteTypeId");
    }

    #[rstest]
    fn email_parse_accepts_valid_addresses() {
        let email =
            parse_email("User@Example.com".to_owned(), FieldName::new("email")).expect("valid");
        assert_eq!(email.as_ref(), "user@example.com");
    }
}
