use serde::{Deserialize, Serialize};

/// Foreign-key reference as the backend expects it: a nested `{ "id": n }` object.
///
/// Responses sometimes carry the referenced record's display name as well; it is
/// kept when present and never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FkRef {
    pub id: i64,
    #[serde(rename = "nombre", default, skip_serializing)]
    pub name: Option<String>,
}

impl FkRef {
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Extract the id from an optional reference
    pub fn id_of(reference: &Option<FkRef>) -> Option<i64> {
        reference.as_ref().map(|r| r.id)
    }

    /// Display text for tables: the name when the server sent one, otherwise `#id`
    pub fn display(reference: &Option<FkRef>) -> String {
        match reference {
            Some(FkRef { name: Some(name), .. }) => name.clone(),
            Some(FkRef { id, .. }) => format!("#{}", id),
            None => "—".to_string(),
        }
    }
}

/// REST base path of a resource collection.
///
/// The backend follows the same conventions for every collection:
/// `GET /X/Listar`, `POST /X/Crear` and `GET|PUT|DELETE /X/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub base: &'static str,
}

impl Endpoint {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn list_path(&self) -> String {
        format!("/{}/Listar", self.base)
    }

    pub fn create_path(&self) -> String {
        format!("/{}/Crear", self.base)
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("/{}/{}", self.base, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fk_ref_serializes_as_nested_id() {
        let json = serde_json::to_value(FkRef::named(7, "Biobío")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7 }));
    }

    #[test]
    fn test_fk_ref_accepts_name_from_server() {
        let fk: FkRef = serde_json::from_str(r#"{"id": 3, "nombre": "Valparaíso"}"#).unwrap();
        assert_eq!(fk.id, 3);
        assert_eq!(fk.name.as_deref(), Some("Valparaíso"));

        let bare: FkRef = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(bare, FkRef::new(4));
    }

    #[test]
    fn test_fk_ref_display() {
        assert_eq!(FkRef::display(&Some(FkRef::named(1, "Norte"))), "Norte");
        assert_eq!(FkRef::display(&Some(FkRef::new(9))), "#9");
        assert_eq!(FkRef::display(&None), "—");
        assert_eq!(FkRef::id_of(&Some(FkRef::new(9))), Some(9));
        assert_eq!(FkRef::id_of(&None), None);
    }

    #[test]
    fn test_endpoint_paths() {
        let endpoint = Endpoint::new("Hoteles");
        assert_eq!(endpoint.list_path(), "/Hoteles/Listar");
        assert_eq!(endpoint.create_path(), "/Hoteles/Crear");
        assert_eq!(endpoint.item_path(42), "/Hoteles/42");
    }
}
