pub mod columns;
pub mod crud_page;

/// Screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Regions,
    Provinces,
    Cities,
    Categories,
    Hotels,
    RoomTypes,
    Rooms,
    Reservations,
    Roles,
    Users,
    Accounts,
    Transfers,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Regions => "Regions",
            Page::Provinces => "Provinces",
            Page::Cities => "Cities",
            Page::Categories => "Categories",
            Page::Hotels => "Hotels",
            Page::RoomTypes => "Room types",
            Page::Rooms => "Rooms",
            Page::Reservations => "Reservations",
            Page::Roles => "Roles",
            Page::Users => "Users",
            Page::Accounts => "Accounts",
            Page::Transfers => "Transfers",
        }
    }
}

/// Navigation groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Geography,
    Lodging,
    Access,
    Banking,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Geography,
        Section::Lodging,
        Section::Access,
        Section::Banking,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Geography => "Geography",
            Section::Lodging => "Lodging",
            Section::Access => "Access",
            Section::Banking => "Banking",
        }
    }

    pub fn pages(&self) -> &'static [Page] {
        match self {
            Section::Geography => &[Page::Regions, Page::Provinces, Page::Cities],
            Section::Lodging => &[
                Page::Categories,
                Page::Hotels,
                Page::RoomTypes,
                Page::Rooms,
                Page::Reservations,
            ],
            Section::Access => &[Page::Roles, Page::Users],
            Section::Banking => &[Page::Accounts, Page::Transfers],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_every_page_is_in_exactly_one_section() {
        let pages: Vec<Page> = Section::ALL
            .iter()
            .flat_map(|section| section.pages().iter().copied())
            .collect();
        assert_eq!(pages.len(), 12);
        for page in &pages {
            assert_eq!(pages.iter().filter(|p| *p == page).count(), 1, "{:?}", page);
        }
    }
}
