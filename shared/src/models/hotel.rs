use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dto::{Endpoint, FkRef};
use crate::form::{EntityForm, FieldKind, FieldSpec};
use crate::resource::{Lookup, Resource};
use crate::validation::{PatternKind, Rule};

/// Hotel category (star rating)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estrellas")]
    pub stars: u8,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estrellas")]
    pub stars: u8,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<FkRef>,
    #[serde(rename = "categoria", default)]
    pub category: Option<FkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "ciudad")]
    pub city: FkRef,
    #[serde(rename = "categoria")]
    pub category: FkRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "capacidad")]
    pub capacity: u32,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "capacidad")]
    pub capacity: u32,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "piso")]
    pub floor: i32,
    #[serde(rename = "precioNoche")]
    pub nightly_price: f64,
    #[serde(default)]
    pub hotel: Option<FkRef>,
    #[serde(rename = "tipoHabitacion", default)]
    pub room_type: Option<FkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequest {
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "piso")]
    pub floor: i32,
    #[serde(rename = "precioNoche")]
    pub nightly_price: f64,
    pub hotel: FkRef,
    #[serde(rename = "tipoHabitacion")]
    pub room_type: FkRef,
}

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)];
const DESCRIPTION_RULES: &[Rule] = &[Rule::MaxLength(255)];

const CATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new(
        "stars",
        "Stars",
        FieldKind::Number,
        &[Rule::Required, Rule::Integer, Rule::Range { min: 1.0, max: 5.0 }],
    ),
    FieldSpec::new("description", "Description", FieldKind::TextArea, DESCRIPTION_RULES),
];

const HOTEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new(
        "address",
        "Address",
        FieldKind::Text,
        &[Rule::Required, Rule::MinLength(5), Rule::MaxLength(150)],
    ),
    FieldSpec::new("phone", "Phone", FieldKind::Text, &[Rule::Pattern(PatternKind::Phone)]),
    FieldSpec::new(
        "email",
        "Email",
        FieldKind::Text,
        &[Rule::MaxLength(120), Rule::Pattern(PatternKind::Email)],
    ),
    FieldSpec::new("city", "City", FieldKind::Select(Lookup::Cities), &[Rule::Required]),
    FieldSpec::new(
        "category",
        "Category",
        FieldKind::Select(Lookup::Categories),
        &[Rule::Required],
    ),
];

const ROOM_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new(
        "capacity",
        "Capacity",
        FieldKind::Number,
        &[Rule::Required, Rule::Integer, Rule::Range { min: 1.0, max: 10.0 }],
    ),
    FieldSpec::new("description", "Description", FieldKind::TextArea, DESCRIPTION_RULES),
];

const ROOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "number",
        "Number",
        FieldKind::Text,
        &[Rule::Required, Rule::MaxLength(10)],
    ),
    FieldSpec::new(
        "floor",
        "Floor",
        FieldKind::Number,
        &[Rule::Required, Rule::Integer, Rule::Range { min: 0.0, max: 200.0 }],
    ),
    FieldSpec::new(
        "nightly_price",
        "Price per night",
        FieldKind::Number,
        &[Rule::Required, Rule::Min(0.01)],
    ),
    FieldSpec::new("hotel", "Hotel", FieldKind::Select(Lookup::Hotels), &[Rule::Required]),
    FieldSpec::new(
        "room_type",
        "Room type",
        FieldKind::Select(Lookup::RoomTypes),
        &[Rule::Required],
    ),
];

impl Resource for Category {
    type Request = CategoryRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Categorias");
    const TITLE: &'static str = "Categories";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({}★)", self.name, self.stars)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_key(&self) -> String {
        self.name.clone()
    }

    fn form_specs() -> &'static [FieldSpec] {
        CATEGORY_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with("stars", self.stars)
            .with_opt("description", self.description.as_ref())
    }

    fn to_request(form: &EntityForm) -> Result<CategoryRequest> {
        let stars = u8::try_from(form.parse_i64("stars")?)?;
        Ok(CategoryRequest {
            name: form.text("name"),
            stars,
            description: form.opt_text("description"),
        })
    }
}

impl Resource for Hotel {
    type Request = HotelRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Hoteles");
    const TITLE: &'static str = "Hotels";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.address.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.city.as_ref().and_then(|c| c.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.city)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Cities)
    }

    fn form_specs() -> &'static [FieldSpec] {
        HOTEL_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with("address", &self.address)
            .with_opt("phone", self.phone.as_ref())
            .with_opt("email", self.email.as_ref())
            .with_opt("city", FkRef::id_of(&self.city))
            .with_opt("category", FkRef::id_of(&self.category))
    }

    fn to_request(form: &EntityForm) -> Result<HotelRequest> {
        Ok(HotelRequest {
            name: form.text("name"),
            address: form.text("address"),
            phone: form.opt_text("phone"),
            email: form.opt_text("email"),
            city: FkRef::new(form.parse_i64("city")?),
            category: FkRef::new(form.parse_i64("category")?),
        })
    }
}

impl Resource for RoomType {
    type Request = RoomTypeRequest;

    const ENDPOINT: Endpoint = Endpoint::new("TiposHabitacion");
    const TITLE: &'static str = "Room types";

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
        ROOM_TYPE_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with("capacity", self.capacity)
            .with_opt("description", self.description.as_ref())
    }

    fn to_request(form: &EntityForm) -> Result<RoomTypeRequest> {
        let capacity = u32::try_from(form.parse_i64("capacity")?)?;
        Ok(RoomTypeRequest {
            name: form.text("name"),
            capacity,
            description: form.opt_text("description"),
        })
    }
}

impl Resource for Room {
    type Request = RoomRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Habitaciones");
    const TITLE: &'static str = "Rooms";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        match self.hotel.as_ref().and_then(|h| h.name.as_deref()) {
            Some(hotel) => format!("{} · {}", hotel, self.number),
            None => format!("Room {}", self.number),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.number.as_str()];
        fields.extend(self.hotel.as_ref().and_then(|h| h.name.as_deref()));
        fields.extend(self.room_type.as_ref().and_then(|t| t.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.hotel)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Hotels)
    }

    fn form_specs() -> &'static [FieldSpec] {
        ROOM_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("number", &self.number)
            .with("floor", self.floor)
            .with("nightly_price", self.nightly_price)
            .with_opt("hotel", FkRef::id_of(&self.hotel))
            .with_opt("room_type", FkRef::id_of(&self.room_type))
    }

    fn to_request(form: &EntityForm) -> Result<RoomRequest> {
        let floor = i32::try_from(form.parse_i64("floor")?)?;
        Ok(RoomRequest {
            number: form.text("number"),
            floor,
            nightly_price: form.parse_f64("nightly_price")?,
            hotel: FkRef::new(form.parse_i64("hotel")?),
            room_type: FkRef::new(form.parse_i64("room_type")?),
        })
    }
}
