use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dto::{Endpoint, FkRef};
use crate::form::{EntityForm, FieldKind, FieldSpec};
use crate::resource::{Lookup, Resource};
use crate::validation::{PatternKind, Rule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Console user; also the guest referenced by reservations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "rol", default)]
    pub role: Option<FkRef>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub username: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "rol")]
    pub role: FkRef,
}

const ROLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "name",
        "Name",
        FieldKind::Text,
        &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(40)],
    ),
    FieldSpec::new("description", "Description", FieldKind::TextArea, &[Rule::MaxLength(255)]),
];

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "username",
        "Username",
        FieldKind::Text,
        &[
            Rule::Required,
            Rule::MinLength(4),
            Rule::MaxLength(20),
            Rule::Pattern(PatternKind::Username),
        ],
    ),
    FieldSpec::new(
        "full_name",
        "Full name",
        FieldKind::Text,
        &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)],
    ),
    FieldSpec::new(
        "email",
        "Email",
        FieldKind::Text,
        &[Rule::Required, Rule::MaxLength(120), Rule::Pattern(PatternKind::Email)],
    ),
    FieldSpec::new("active", "Active", FieldKind::Checkbox, &[]),
    FieldSpec::new("role", "Role", FieldKind::Select(Lookup::Roles), &[Rule::Required]),
];

impl Resource for Role {
    type Request = RoleRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Roles");
    const TITLE: &'static str = "Roles";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn form_specs() -> &'static [FieldSpec] {
        ROLE_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with_opt("description", self.description.as_ref())
    }

    fn to_request(form: &EntityForm) -> Result<RoleRequest> {
        Ok(RoleRequest {
            name: form.text("name"),
            description: form.opt_text("description"),
        })
    }
}

impl Resource for User {
    type Request = UserRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Usuarios");
    const TITLE: &'static str = "Users";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.full_name, self.username)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.username.as_str(),
            self.full_name.as_str(),
            self.email.as_str(),
        ];
        fields.extend(self.role.as_ref().and_then(|r| r.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.role)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Roles)
    }

    fn sort_key(&self) -> String {
        self.full_name.clone()
    }

    fn form_specs() -> &'static [FieldSpec] {
        USER_FIELDS
    }

    fn new_form() -> EntityForm {
        EntityForm::default().with("active", true)
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("username", &self.username)
            .with("full_name", &self.full_name)
            .with("email", &self.email)
            .with("active", self.active)
            .with_opt("role", FkRef::id_of(&self.role))
    }

    fn to_request(form: &EntityForm) -> Result<UserRequest> {
        Ok(UserRequest {
            username: form.text("username"),
            full_name: form.text("full_name"),
            email: form.text("email"),
            active: form.is_checked("active"),
            role: FkRef::new(form.parse_i64("role")?),
        })
    }
}
