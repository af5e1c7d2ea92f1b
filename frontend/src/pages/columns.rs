use shared::{
    format_amount, Account, Category, City, FkRef, Hotel, Province, Region, Reservation, Role, Room,
    RoomType, Transfer, User,
};

use crate::components::resource_table::TableRow;

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("—")
        .to_string()
}

impl TableRow for Region {
    fn headers() -> &'static [&'static str] {
        &["Name", "Code"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![self.name.clone(), self.code.clone()]
    }
}

impl TableRow for Province {
    fn headers() -> &'static [&'static str] {
        &["Name", "Region"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![self.name.clone(), FkRef::display(&self.region)]
    }
}

impl TableRow for City {
    fn headers() -> &'static [&'static str] {
        &["Name", "Postal code", "Province"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.postal_code),
            FkRef::display(&self.province),
        ]
    }
}

impl TableRow for Category {
    fn headers() -> &'static [&'static str] {
        &["Name", "Stars", "Description"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.name.clone(),
            "★".repeat(usize::from(self.stars)),
            or_dash(&self.description),
        ]
    }
}

impl TableRow for Hotel {
    fn headers() -> &'static [&'static str] {
        &["Name", "Address", "Phone", "Email", "City", "Category"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            or_dash(&self.phone),
            or_dash(&self.email),
            FkRef::display(&self.city),
            FkRef::display(&self.category),
        ]
    }
}

impl TableRow for RoomType {
    fn headers() -> &'static [&'static str] {
        &["Name", "Capacity", "Description"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.name.clone(),
            self.capacity.to_string(),
            or_dash(&self.description),
        ]
    }
}

impl TableRow for Room {
    fn headers() -> &'static [&'static str] {
        &["Number", "Floor", "Price per night", "Hotel", "Room type"]
    }

    fn cells(&self, currency_symbol: &str) -> Vec<String> {
        vec![
            self.number.clone(),
            self.floor.to_string(),
            format_amount(self.nightly_price, currency_symbol),
            FkRef::display(&self.hotel),
            FkRef::display(&self.room_type),
        ]
    }
}

impl TableRow for Reservation {
    fn headers() -> &'static [&'static str] {
        &["Check-in", "Check-out", "Nights", "Guests", "Status", "Guest", "Room"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.check_in.to_string(),
            self.check_out.to_string(),
            self.nights().to_string(),
            self.guests.to_string(),
            self.status.display_name().to_string(),
            FkRef::display(&self.user),
            FkRef::display(&self.room),
        ]
    }
}

impl TableRow for Role {
    fn headers() -> &'static [&'static str] {
        &["Name", "Description"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![self.name.clone(), or_dash(&self.description)]
    }
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["Username", "Full name", "Email", "Role", "Active"]
    }

    fn cells(&self, _currency_symbol: &str) -> Vec<String> {
        vec![
            self.username.clone(),
            self.full_name.clone(),
            self.email.clone(),
            FkRef::display(&self.role),
            if self.active { "Yes" } else { "No" }.to_string(),
        ]
    }
}

impl TableRow for Account {
    fn headers() -> &'static [&'static str] {
        &["Number", "Holder", "Balance"]
    }

    fn cells(&self, currency_symbol: &str) -> Vec<String> {
        vec![
            self.number.clone(),
            self.holder.clone(),
            format_amount(self.balance, currency_symbol),
        ]
    }
}

impl TableRow for Transfer {
    fn headers() -> &'static [&'static str] {
        &["Date", "From", "To", "Amount", "Concept"]
    }

    fn cells(&self, currency_symbol: &str) -> Vec<String> {
        vec![
            or_dash(&self.date),
            FkRef::display(&self.origin),
            FkRef::display(&self.target),
            format_amount(self.amount, currency_symbol),
            self.concept.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ReservationStatus;
    use wasm_bindgen_test::*;

    fn assert_aligned<R: TableRow>(item: &R) {
        assert_eq!(item.cells("$").len(), R::headers().len(), "{}", R::TITLE);
    }

    #[wasm_bindgen_test]
    fn test_cells_match_headers() {
        assert_aligned(&Region {
            id: 1,
            name: "Valparaíso".to_string(),
            code: "V".to_string(),
        });
        assert_aligned(&Account {
            id: 1,
            number: "12345678".to_string(),
            holder: "Ana Pérez".to_string(),
            balance: 10.0,
        });
        assert_aligned(&Transfer {
            id: 1,
            origin: Some(FkRef::new(1)),
            target: Some(FkRef::new(2)),
            amount: 5.0,
            concept: "Rent".to_string(),
            date: None,
        });
    }

    #[wasm_bindgen_test]
    fn test_room_price_uses_currency_symbol() {
        let room = Room {
            id: 3,
            number: "101".to_string(),
            floor: 1,
            nightly_price: 45000.0,
            hotel: Some(FkRef::named(1, "Hotel Mar")),
            room_type: None,
        };
        let cells = room.cells("CLP ");
        assert_eq!(cells[2], "CLP 45000.00");
        assert_eq!(cells[3], "Hotel Mar");
        assert_eq!(cells[4], "—");
    }

    #[wasm_bindgen_test]
    fn test_reservation_shows_nights_and_status() {
        let reservation = Reservation {
            id: 9,
            check_in: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            guests: 2,
            status: ReservationStatus::Confirmed,
            user: Some(FkRef::new(4)),
            room: None,
        };
        let cells = reservation.cells("$");
        assert_eq!(cells[0], "2024-03-01");
        assert_eq!(cells[2], "3");
        assert_eq!(cells[5], "#4");
    }

    #[wasm_bindgen_test]
    fn test_blank_optional_text_renders_dash() {
        assert_eq!(or_dash(&Some("  ".to_string())), "—");
        assert_eq!(or_dash(&None), "—");
        assert_eq!(or_dash(&Some("info".to_string())), "info");
    }
}
