use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dto::{Endpoint, FkRef};
use crate::form::{EntityForm, FieldKind, FieldSpec};
use crate::resource::{Lookup, Resource};
use crate::validation::{PatternKind, Rule};

/// Administrative region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo", default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub region: Option<FkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub region: FkRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigoPostal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "provincia", default)]
    pub province: Option<FkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigoPostal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "provincia")]
    pub province: FkRef,
}

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(80)];

const REGION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new(
        "code",
        "Code",
        FieldKind::Text,
        &[Rule::Required, Rule::MaxLength(6), Rule::Pattern(PatternKind::RegionCode)],
    ),
];

const PROVINCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new("region", "Region", FieldKind::Select(Lookup::Regions), &[Rule::Required]),
];

const CITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text, NAME_RULES),
    FieldSpec::new(
        "postal_code",
        "Postal code",
        FieldKind::Text,
        &[Rule::Pattern(PatternKind::PostalCode)],
    ),
    FieldSpec::new("province", "Province", FieldKind::Select(Lookup::Provinces), &[Rule::Required]),
];

impl Resource for Region {
    type Request = RegionRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Regiones");
    const TITLE: &'static str = "Regions";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }

    fn form_specs() -> &'static [FieldSpec] {
        REGION_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with("code", &self.code)
    }

    fn to_request(form: &EntityForm) -> Result<RegionRequest> {
        Ok(RegionRequest {
            name: form.text("name"),
            code: form.text("code"),
        })
    }
}

impl Resource for Province {
    type Request = ProvinceRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Provincias");
    const TITLE: &'static str = "Provinces";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(name) = self.region.as_ref().and_then(|r| r.name.as_deref()) {
            fields.push(name);
        }
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.region)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Regions)
    }

    fn form_specs() -> &'static [FieldSpec] {
        PROVINCE_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with_opt("region", self.parent_id())
    }

    fn to_request(form: &EntityForm) -> Result<ProvinceRequest> {
        Ok(ProvinceRequest {
            name: form.text("name"),
            region: FkRef::new(form.parse_i64("region")?),
        })
    }
}

impl Resource for City {
    type Request = CityRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Ciudades");
    const TITLE: &'static str = "Cities";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.postal_code.as_deref());
        fields.extend(self.province.as_ref().and_then(|p| p.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.province)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Provinces)
    }

    fn form_specs() -> &'static [FieldSpec] {
        CITY_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("name", &self.name)
            .with_opt("postal_code", self.postal_code.as_ref())
            .with_opt("province", self.parent_id())
    }

    fn to_request(form: &EntityForm) -> Result<CityRequest> {
        Ok(CityRequest {
            name: form.text("name"),
            postal_code: form.opt_text("postal_code"),
            province: FkRef::new(form.parse_i64("province")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_province_deserializes_nested_region() {
        let json = r#"{"id": 2, "nombre": "Cachapoal",
            "region": {"id": 6, "nombre": "O'Higgins", "codigo": "VI"}}"#;
        let province: Province = serde_json::from_str(json).unwrap();
        assert_eq!(province.parent_id(), Some(6));
        assert_eq!(province.search_fields(), vec!["Cachapoal", "O'Higgins"]);
    }

    #[test]
    fn test_province_request_wraps_region_id() {
        let form = EntityForm::default().with("name", " Cachapoal ").with("region", "6");
        let request = Province::to_request(&form).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "nombre": "Cachapoal", "region": { "id": 6 } })
        );
    }

    #[test]
    fn test_city_request_omits_blank_postal_code() {
        let form = EntityForm::default().with("name", "Rancagua").with("province", "2");
        let json = serde_json::to_value(City::to_request(&form).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "nombre": "Rancagua", "provincia": { "id": 2 } }));
    }

    #[test]
    fn test_city_round_trips_through_form() {
        let city = City {
            id: 11,
            name: "Rancagua".to_string(),
            postal_code: Some("2820000".to_string()),
            province: Some(FkRef::named(2, "Cachapoal")),
        };
        let form = city.to_form();
        assert_eq!(form.id, Some(11));
        assert_eq!(form.get("province"), "2");
        let request = City::to_request(&form).unwrap();
        assert_eq!(request.province, FkRef::new(2));
        assert_eq!(request.postal_code.as_deref(), Some("2820000"));
    }

    #[test]
    fn test_region_name_too_short_is_invalid() {
        let form = EntityForm::default().with("name", "Ay").with("code", "XV");
        let validation = Region::validate(&form);
        assert!(!validation.is_valid());
        assert_eq!(validation.first_error_for("name"), Some(&ValidationError::TooShort(3)));
        assert!(!validation.has_error("code"));
    }

    #[test]
    fn test_province_requires_region() {
        let form = EntityForm::default().with("name", "Cachapoal");
        let validation = Province::validate(&form);
        assert_eq!(validation.first_error_for("region"), Some(&ValidationError::Required));
    }
}
