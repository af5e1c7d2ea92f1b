use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dto::{Endpoint, FkRef};
use crate::form::{EntityForm, FieldKind, FieldSpec};
use crate::resource::{Lookup, Resource};
use crate::validation::{FormValidation, Rule, ValidationError, DATE_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "CONFIRMADA")]
    Confirmed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
    #[serde(rename = "FINALIZADA")]
    Completed,
    /// A status this console does not know yet; the form asks for a new one
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub const CHOICES: &'static [(&'static str, &'static str)] = &[
        ("PENDIENTE", "Pending"),
        ("CONFIRMADA", "Confirmed"),
        ("CANCELADA", "Cancelled"),
        ("FINALIZADA", "Completed"),
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDIENTE",
            ReservationStatus::Confirmed => "CONFIRMADA",
            ReservationStatus::Cancelled => "CANCELADA",
            ReservationStatus::Completed => "FINALIZADA",
            ReservationStatus::Unknown => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Unknown => "Unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDIENTE" => Some(ReservationStatus::Pending),
            "CONFIRMADA" => Some(ReservationStatus::Confirmed),
            "CANCELADA" => Some(ReservationStatus::Cancelled),
            "FINALIZADA" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }
}

/// Accepts `2025-03-01` as well as date-time shapes such as `2025-03-01T14:00:00`
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    #[serde(rename = "fechaEntrada", deserialize_with = "deserialize_date")]
    pub check_in: NaiveDate,
    #[serde(rename = "fechaSalida", deserialize_with = "deserialize_date")]
    pub check_out: NaiveDate,
    #[serde(rename = "cantidadHuespedes")]
    pub guests: u32,
    #[serde(rename = "estado")]
    pub status: ReservationStatus,
    #[serde(rename = "usuario", default)]
    pub user: Option<FkRef>,
    #[serde(rename = "habitacion", default)]
    pub room: Option<FkRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(rename = "fechaEntrada")]
    pub check_in: NaiveDate,
    #[serde(rename = "fechaSalida")]
    pub check_out: NaiveDate,
    #[serde(rename = "cantidadHuespedes")]
    pub guests: u32,
    #[serde(rename = "estado")]
    pub status: ReservationStatus,
    #[serde(rename = "usuario")]
    pub user: FkRef,
    #[serde(rename = "habitacion")]
    pub room: FkRef,
}

impl Reservation {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

const RESERVATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("check_in", "Check-in", FieldKind::Date, &[Rule::Required, Rule::Date]),
    FieldSpec::new("check_out", "Check-out", FieldKind::Date, &[Rule::Required, Rule::Date]),
    FieldSpec::new(
        "guests",
        "Guests",
        FieldKind::Number,
        &[Rule::Required, Rule::Integer, Rule::Range { min: 1.0, max: 10.0 }],
    ),
    FieldSpec::new(
        "status",
        "Status",
        FieldKind::Choice(ReservationStatus::CHOICES),
        &[Rule::Required],
    ),
    FieldSpec::new("user", "Guest", FieldKind::Select(Lookup::Users), &[Rule::Required]),
    FieldSpec::new("room", "Room", FieldKind::Select(Lookup::Rooms), &[Rule::Required]),
];

impl Resource for Reservation {
    type Request = ReservationRequest;

    const ENDPOINT: Endpoint = Endpoint::new("Reservas");
    const TITLE: &'static str = "Reservations";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("#{} ({} → {})", self.id, self.check_in, self.check_out)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.status.display_name()];
        fields.extend(self.user.as_ref().and_then(|u| u.name.as_deref()));
        fields.extend(self.room.as_ref().and_then(|r| r.name.as_deref()));
        fields
    }

    fn parent_id(&self) -> Option<i64> {
        FkRef::id_of(&self.room)
    }

    fn parent_lookup() -> Option<Lookup> {
        Some(Lookup::Rooms)
    }

    fn sort_key(&self) -> String {
        self.check_in.to_string()
    }

    fn form_specs() -> &'static [FieldSpec] {
        RESERVATION_FIELDS
    }

    fn to_form(&self) -> EntityForm {
        EntityForm::for_record(self.id)
            .with("check_in", self.check_in)
            .with("check_out", self.check_out)
            .with("guests", self.guests)
            .with("status", self.status.code())
            .with_opt("user", FkRef::id_of(&self.user))
            .with_opt("room", FkRef::id_of(&self.room))
    }

    fn to_request(form: &EntityForm) -> Result<ReservationRequest> {
        let status_code = form.text("status");
        let status = ReservationStatus::from_code(&status_code)
            .ok_or_else(|| anyhow!("Unknown reservation status '{}'", status_code))?;
        Ok(ReservationRequest {
            check_in: form.parse_date("check_in")?,
            check_out: form.parse_date("check_out")?,
            guests: u32::try_from(form.parse_i64("guests")?)?,
            status,
            user: FkRef::new(form.parse_i64("user")?),
            room: FkRef::new(form.parse_i64("room")?),
        })
    }

    fn cross_validate(form: &EntityForm, validation: &mut FormValidation) {
        if let (Ok(check_in), Ok(check_out)) =
            (form.parse_date("check_in"), form.parse_date("check_out"))
        {
            if check_out <= check_in {
                validation.push(
                    "check_out",
                    ValidationError::Custom("Check-out must be after check-in".to_string()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(check_in: &str, check_out: &str) -> EntityForm {
        EntityForm::default()
            .with("check_in", check_in)
            .with("check_out", check_out)
            .with("guests", "2")
            .with("status", "PENDIENTE")
            .with("user", "7")
            .with("room", "12")
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        assert!(Reservation::validate(&form("2025-03-01", "2025-03-04")).is_valid());

        let same_day = Reservation::validate(&form("2025-03-01", "2025-03-01"));
        assert!(same_day.has_error("check_out"));

        let reversed = Reservation::validate(&form("2025-03-05", "2025-03-01"));
        assert_eq!(
            reversed.first_error_for("check_out").map(|e| e.to_string()),
            Some("Check-out must be after check-in".to_string())
        );
    }

    #[test]
    fn test_unparseable_dates_report_only_format_errors() {
        let validation = Reservation::validate(&form("2025-13-01", "2025-03-01"));
        assert_eq!(validation.first_error_for("check_in"), Some(&ValidationError::InvalidDate));
        assert!(!validation.has_error("check_out"));
    }

    #[test]
    fn test_request_serializes_dates_and_references() {
        let request = Reservation::to_request(&form("2025-03-01", "2025-03-04")).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fechaEntrada": "2025-03-01",
                "fechaSalida": "2025-03-04",
                "cantidadHuespedes": 2,
                "estado": "PENDIENTE",
                "usuario": { "id": 7 },
                "habitacion": { "id": 12 }
            })
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let bad = form("2025-03-01", "2025-03-04").with("status", "ABIERTA");
        assert!(Reservation::to_request(&bad).is_err());
    }

    #[test]
    fn test_deserialize_and_nights() {
        let json = r#"{
            "id": 3,
            "fechaEntrada": "2025-03-01",
            "fechaSalida": "2025-03-04",
            "cantidadHuespedes": 2,
            "estado": "CONFIRMADA",
            "usuario": {"id": 7, "nombre": "María López"},
            "habitacion": {"id": 12}
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.nights(), 3);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.search_fields(), vec!["Confirmed", "María López"]);
        assert_eq!(reservation.to_form().get("status"), "CONFIRMADA");
    }

    #[test]
    fn test_lenient_decoding_of_status_and_dates() {
        let json = r#"[
            {"id": 1, "fechaEntrada": "2025-03-01T14:00:00", "fechaSalida": "2025-03-02 12:00:00",
             "cantidadHuespedes": 1, "estado": "NO_SHOW"},
            {"id": 2, "fechaEntrada": "2025-04-10", "fechaSalida": "2025-04-12",
             "cantidadHuespedes": 2, "estado": "PENDIENTE"}
        ]"#;
        let reservations: Vec<Reservation> = serde_json::from_str(json).unwrap();
        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[0].status, ReservationStatus::Unknown);
        assert_eq!(reservations[0].nights(), 1);
        assert_eq!(reservations[0].to_form().get("status"), "");
        assert_eq!(reservations[1].status, ReservationStatus::Pending);
    }

    #[test]
    fn test_status_codes_match_choices() {
        for (code, label) in ReservationStatus::CHOICES {
            let status = ReservationStatus::from_code(code).unwrap();
            assert_eq!(status.code(), *code);
            assert_eq!(status.display_name(), *label);
        }
    }
}
