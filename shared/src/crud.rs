//! State of a list/filter/save/delete page.
//!
//! The state is a pure reducer so the browser hook only spawns requests and
//! dispatches their outcomes. Every mutation is followed by a full reload; the
//! list is never patched locally.

use crate::error::ApiError;
use crate::filter::{apply_filter, ListFilter, SortDirection};
use crate::form::EntityForm;
use crate::resource::Resource;
use crate::validation::{FormValidation, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Feedback shown in the toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Request to issue after a successful form validation
#[derive(Debug, Clone, PartialEq)]
pub enum SaveCommand<Req> {
    Create(Req),
    Update(i64, Req),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrudAction<R: Resource> {
    LoadStarted,
    Loaded(Vec<R>),
    LoadFailed(ApiError),
    FilterQueryChanged(String),
    ParentFilterChanged(Option<i64>),
    SortChanged(Option<SortDirection>),
    NewRecord,
    EditRecord(i64),
    /// Fresh copy of one record fetched from `GET /X/{id}`
    RecordRefreshed(R),
    CancelEdit,
    FieldChanged { field: String, value: String },
    /// Validation failed before any request was made
    SaveRejected(FormValidation),
    SaveStarted,
    SaveFinished(Result<SaveKind, ApiError>),
    DeleteRequested(i64),
    DeleteCancelled,
    DeleteStarted,
    DeleteFinished(Result<(), ApiError>),
    DismissNotice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrudState<R: Resource> {
    pub items: Vec<R>,
    pub filter: ListFilter,
    pub form: EntityForm,
    pub validation: FormValidation,
    /// A list request is in flight
    pub loading: bool,
    /// A create, update or delete request is in flight
    pub saving: bool,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<i64>,
    pub notice: Option<Notice>,
}

impl<R: Resource> Default for CrudState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: ListFilter::default(),
            form: R::new_form(),
            validation: FormValidation::default(),
            loading: false,
            saving: false,
            pending_delete: None,
            notice: None,
        }
    }
}

impl<R: Resource> CrudState<R> {
    pub fn visible(&self) -> Vec<R> {
        apply_filter(&self.items, &self.filter)
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_editing()
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Validate the form and decide between create and update.
    ///
    /// `Ok(None)` while another mutation is in flight. `Err` carries the failed
    /// validation, which the caller dispatches as `SaveRejected`.
    pub fn prepare_save(&self) -> Result<Option<SaveCommand<R::Request>>, FormValidation> {
        if self.saving {
            return Ok(None);
        }
        let validation = R::validate(&self.form);
        if !validation.is_valid() {
            return Err(validation);
        }
        let request = match R::to_request(&self.form) {
            Ok(request) => request,
            Err(e) => {
                let mut validation = FormValidation::default();
                validation.push("form", ValidationError::Custom(e.to_string()));
                return Err(validation);
            }
        };
        Ok(Some(match self.form.id {
            Some(id) if R::MUTABLE => SaveCommand::Update(id, request),
            _ => SaveCommand::Create(request),
        }))
    }

    /// Id to delete once the user confirmed, unless a mutation is in flight
    pub fn confirm_delete(&self) -> Option<i64> {
        if self.saving || !R::MUTABLE {
            return None;
        }
        self.pending_delete
    }

    pub fn apply(mut self, action: CrudAction<R>) -> Self {
        match action {
            CrudAction::LoadStarted => {
                self.loading = true;
            }
            CrudAction::Loaded(items) => {
                self.items = items;
                self.loading = false;
            }
            CrudAction::LoadFailed(error) => {
                self.loading = false;
                self.notice = Some(Notice::error(error.user_message()));
            }
            CrudAction::FilterQueryChanged(query) => {
                self.filter.query = query;
            }
            CrudAction::ParentFilterChanged(parent_id) => {
                self.filter.parent_id = parent_id;
            }
            CrudAction::SortChanged(sort) => {
                self.filter.sort = sort;
            }
            CrudAction::NewRecord | CrudAction::CancelEdit => {
                self.form = R::new_form();
                self.validation = FormValidation::default();
            }
            CrudAction::EditRecord(id) => {
                let form = self.find(id).filter(|_| R::MUTABLE).map(R::to_form);
                if let Some(form) = form {
                    self.form = form;
                    self.validation = FormValidation::default();
                }
            }
            CrudAction::RecordRefreshed(record) => {
                let id = record.id();
                let untouched = self.form.id == Some(id)
                    && self.find(id).map(R::to_form).as_ref() == Some(&self.form);
                if untouched {
                    self.form = record.to_form();
                }
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) {
                    *slot = record;
                }
            }
            CrudAction::FieldChanged { field, value } => {
                self.validation.errors.retain(|e| e.field != field);
                self.form.set(field, value);
            }
            CrudAction::SaveRejected(validation) => {
                self.validation = validation;
            }
            CrudAction::SaveStarted | CrudAction::DeleteStarted => {
                self.saving = true;
                self.notice = None;
            }
            CrudAction::SaveFinished(Ok(kind)) => {
                self.saving = false;
                self.form = R::new_form();
                self.validation = FormValidation::default();
                let message = match kind {
                    SaveKind::Created => "Record created successfully",
                    SaveKind::Updated => "Record updated successfully",
                };
                self.notice = Some(Notice::success(message));
            }
            CrudAction::SaveFinished(Err(error)) => {
                self.saving = false;
                self.notice = Some(Notice::error(error.user_message()));
            }
            CrudAction::DeleteRequested(id) => {
                if R::MUTABLE && self.find(id).is_some() {
                    self.pending_delete = Some(id);
                }
            }
            CrudAction::DeleteCancelled => {
                self.pending_delete = None;
            }
            CrudAction::DeleteFinished(result) => {
                self.saving = false;
                let deleted = self.pending_delete.take();
                match result {
                    Ok(()) => {
                        if deleted.is_some() && deleted == self.form.id {
                            self.form = R::new_form();
                            self.validation = FormValidation::default();
                        }
                        self.notice = Some(Notice::success("Record deleted successfully"));
                    }
                    Err(error) => {
                        self.notice = Some(Notice::error(error.user_message()));
                    }
                }
            }
            CrudAction::DismissNotice => {
                self.notice = None;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::FkRef;
    use crate::models::{Province, Region, Transfer, User};

    fn regions() -> Vec<Region> {
        vec![
            Region {
                id: 1,
                name: "Tarapacá".to_string(),
                code: "I".to_string(),
            },
            Region {
                id: 5,
                name: "Valparaíso".to_string(),
                code: "V".to_string(),
            },
        ]
    }

    fn loaded() -> CrudState<Region> {
        CrudState::default()
            .apply(CrudAction::LoadStarted)
            .apply(CrudAction::Loaded(regions()))
    }

    fn edit(state: CrudState<Region>, field: &str, value: &str) -> CrudState<Region> {
        state.apply(CrudAction::FieldChanged {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    #[test]
    fn test_load_toggles_loading_flag() {
        let state = CrudState::<Region>::default().apply(CrudAction::LoadStarted);
        assert!(state.loading);
        let state = state.apply(CrudAction::Loaded(regions()));
        assert!(!state.loading);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_load_failure_keeps_previous_list() {
        let state = loaded()
            .apply(CrudAction::LoadStarted)
            .apply(CrudAction::LoadFailed(ApiError::Connection("refused".to_string())));
        assert!(!state.loading);
        assert_eq!(state.items, regions());
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_new_form_issues_create() {
        let state = edit(edit(loaded(), "name", "Atacama"), "code", "III");
        match state.prepare_save() {
            Ok(Some(SaveCommand::Create(request))) => {
                assert_eq!(request.name, "Atacama");
                assert_eq!(request.code, "III");
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_target_issues_update() {
        let state = loaded().apply(CrudAction::EditRecord(5));
        assert!(state.is_editing());
        assert_eq!(state.form.get("name"), "Valparaíso");

        let state = edit(state, "name", "Valparaíso Costa");
        match state.prepare_save() {
            Ok(Some(SaveCommand::Update(id, request))) => {
                assert_eq!(id, 5);
                assert_eq!(request.name, "Valparaíso Costa");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_unknown_id_is_ignored() {
        let state = loaded().apply(CrudAction::EditRecord(99));
        assert!(!state.is_editing());
    }

    #[test]
    fn test_invalid_form_blocks_submission() {
        let state = edit(edit(loaded(), "name", "At"), "code", "III");
        let validation = state.prepare_save().unwrap_err();
        assert_eq!(validation.first_error_for("name"), Some(&ValidationError::TooShort(3)));

        let state = state.apply(CrudAction::SaveRejected(validation));
        assert!(state.validation.has_error("name"));

        let state = edit(state, "name", "Atacama");
        assert!(!state.validation.has_error("name"));
    }

    #[test]
    fn test_save_in_flight_blocks_second_submit() {
        let state =
            edit(edit(loaded(), "name", "Atacama"), "code", "III").apply(CrudAction::SaveStarted);
        assert!(state.saving);
        assert_eq!(state.prepare_save(), Ok(None));
    }

    #[test]
    fn test_save_success_resets_form() {
        let state = loaded()
            .apply(CrudAction::EditRecord(1))
            .apply(CrudAction::SaveStarted)
            .apply(CrudAction::SaveFinished(Ok(SaveKind::Updated)));
        assert!(!state.saving);
        assert!(!state.is_editing());
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_save_failure_keeps_form() {
        let state = loaded()
            .apply(CrudAction::EditRecord(1))
            .apply(CrudAction::SaveStarted)
            .apply(CrudAction::SaveFinished(Err(ApiError::Server { status: 500 })));
        assert!(!state.saving);
        assert_eq!(state.form.id, Some(1));
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, ApiError::Server { status: 500 }.user_message());
    }

    #[test]
    fn test_delete_flow() {
        let state = loaded().apply(CrudAction::DeleteRequested(5));
        assert_eq!(state.pending_delete, Some(5));
        assert_eq!(state.confirm_delete(), Some(5));

        let state = state.apply(CrudAction::DeleteStarted);
        assert_eq!(state.confirm_delete(), None);

        let state = state.apply(CrudAction::DeleteFinished(Ok(())));
        assert_eq!(state.pending_delete, None);
        assert!(!state.saving);
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_delete_cancel_and_unknown_id() {
        let state = loaded()
            .apply(CrudAction::DeleteRequested(5))
            .apply(CrudAction::DeleteCancelled);
        assert_eq!(state.pending_delete, None);

        let state = loaded().apply(CrudAction::DeleteRequested(42));
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn test_deleting_edited_record_resets_form() {
        let state = loaded()
            .apply(CrudAction::EditRecord(5))
            .apply(CrudAction::DeleteRequested(5))
            .apply(CrudAction::DeleteStarted)
            .apply(CrudAction::DeleteFinished(Ok(())));
        assert!(!state.is_editing());
    }

    #[test]
    fn test_delete_failure_reports_conflict() {
        let state = loaded()
            .apply(CrudAction::DeleteRequested(1))
            .apply(CrudAction::DeleteStarted)
            .apply(CrudAction::DeleteFinished(Err(ApiError::from_status(409, "in use"))));
        assert_eq!(state.items.len(), 2);
        assert!(state.notice.unwrap().message.contains("referenced"));
    }

    #[test]
    fn test_visible_applies_filter() {
        let provinces = vec![
            Province {
                id: 1,
                name: "Iquique".to_string(),
                region: Some(FkRef::new(1)),
            },
            Province {
                id: 2,
                name: "Quillota".to_string(),
                region: Some(FkRef::new(5)),
            },
        ];
        let state = CrudState::<Province>::default()
            .apply(CrudAction::Loaded(provinces))
            .apply(CrudAction::ParentFilterChanged(Some(5)));
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);

        let state = state
            .apply(CrudAction::ParentFilterChanged(None))
            .apply(CrudAction::FilterQueryChanged("IQUI".to_string()));
        assert_eq!(state.visible()[0].id, 1);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_immutable_resource_ignores_edit_and_delete() {
        let transfer = Transfer {
            id: 3,
            origin: Some(FkRef::new(1)),
            target: Some(FkRef::new(2)),
            amount: 10.0,
            concept: "Lunch".to_string(),
            date: None,
        };
        let state = CrudState::<Transfer>::default()
            .apply(CrudAction::Loaded(vec![transfer]))
            .apply(CrudAction::EditRecord(3))
            .apply(CrudAction::DeleteRequested(3));
        assert!(!state.is_editing());
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.confirm_delete(), None);
    }

    #[test]
    fn test_dismiss_notice() {
        let state = loaded()
            .apply(CrudAction::LoadFailed(ApiError::Server { status: 502 }))
            .apply(CrudAction::DismissNotice);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_new_user_is_created_active() {
        let mut state = CrudState::<User>::default().apply(CrudAction::NewRecord);
        for (field, value) in [
            ("username", "mlopez"),
            ("full_name", "María López"),
            ("email", "mlopez@hotel.cl"),
            ("role", "2"),
        ] {
            state = state.apply(CrudAction::FieldChanged {
                field: field.to_string(),
                value: value.to_string(),
            });
        }

        match state.prepare_save() {
            Ok(Some(SaveCommand::Create(request))) => assert!(request.active),
            other => panic!("expected a create command, got {:?}", other),
        }

        let state = state
            .apply(CrudAction::SaveStarted)
            .apply(CrudAction::SaveFinished(Ok(SaveKind::Created)));
        assert!(state.form.is_checked("active"));
        assert!(!state.form.is_editing());
    }

    #[test]
    fn test_refreshed_record_replaces_untouched_form() {
        let fresh = Region {
            id: 5,
            name: "Valparaíso Costa".to_string(),
            code: "V".to_string(),
        };
        let state = loaded()
            .apply(CrudAction::EditRecord(5))
            .apply(CrudAction::RecordRefreshed(fresh.clone()));
        assert_eq!(state.form.get("name"), "Valparaíso Costa");
        assert_eq!(state.find(5), Some(&fresh));
    }

    #[test]
    fn test_refreshed_record_keeps_user_edits() {
        let fresh = Region {
            id: 5,
            name: "Valparaíso Costa".to_string(),
            code: "V".to_string(),
        };
        let state = edit(loaded().apply(CrudAction::EditRecord(5)), "name", "Copiapó")
            .apply(CrudAction::RecordRefreshed(fresh.clone()));
        assert_eq!(state.form.get("name"), "Copiapó");
        assert_eq!(state.find(5), Some(&fresh));
    }
}
