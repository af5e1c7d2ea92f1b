use std::fmt;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto::Endpoint;
use crate::form::{EntityForm, FieldSpec};
use crate::validation::{validate_form, FormValidation};

/// Resources whose records feed select inputs and parent filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Regions,
    Provinces,
    Cities,
    Categories,
    Hotels,
    RoomTypes,
    Rooms,
    Roles,
    Users,
    Accounts,
}

impl Lookup {
    pub fn label(&self) -> &'static str {
        match self {
            Lookup::Regions => "Region",
            Lookup::Provinces => "Province",
            Lookup::Cities => "City",
            Lookup::Categories => "Category",
            Lookup::Hotels => "Hotel",
            Lookup::RoomTypes => "Room type",
            Lookup::Rooms => "Room",
            Lookup::Roles => "Role",
            Lookup::Users => "User",
            Lookup::Accounts => "Account",
        }
    }
}

/// A backend collection managed through a list/filter/save/delete page.
///
/// Entities implement this once and every page, hook and client method is
/// written against the trait.
pub trait Resource: Clone + PartialEq + fmt::Debug + DeserializeOwned + 'static {
    /// Payload of `POST /X/Crear` and `PUT /X/{id}`
    type Request: Serialize + Clone + PartialEq + fmt::Debug + 'static;

    const ENDPOINT: Endpoint;
    const TITLE: &'static str;
    /// Whether existing records may be edited and deleted
    const MUTABLE: bool = true;

    fn id(&self) -> i64;

    /// Short text used in tables, selects and confirmation prompts
    fn label(&self) -> String;

    /// Strings matched by the free-text filter
    fn search_fields(&self) -> Vec<&str>;

    /// Foreign key used by the equality filter, if the resource has one
    fn parent_id(&self) -> Option<i64> {
        None
    }

    fn parent_lookup() -> Option<Lookup> {
        None
    }

    fn sort_key(&self) -> String {
        self.label()
    }

    fn form_specs() -> &'static [FieldSpec];

    /// Blank form for a new record, with any field defaults filled in
    fn new_form() -> EntityForm {
        EntityForm::default()
    }

    /// Copy a record into an edit form
    fn to_form(&self) -> EntityForm;

    /// Translate a validated form into the backend DTO
    fn to_request(form: &EntityForm) -> Result<Self::Request>;

    /// Checks spanning several fields, run after the per-field rules
    fn cross_validate(_form: &EntityForm, _validation: &mut FormValidation) {}

    fn validate(form: &EntityForm) -> FormValidation {
        let mut validation = validate_form(Self::form_specs(), form);
        Self::cross_validate(form, &mut validation);
        validation
    }
}
