use shared::{EntityForm, FieldKind, FieldSpec, FormValidation, Resource};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_lookup::use_lookup;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub spec: FieldSpec,
    pub value: String,
    pub error: Option<String>,
    pub disabled: bool,
    pub api_client: ApiClient,
    pub on_change: Callback<(String, String)>,
}

/// A single labelled input with its first validation error
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let spec = props.spec;
    let lookup = match spec.kind {
        FieldKind::Select(lookup) => Some(lookup),
        _ => None,
    };
    let options = use_lookup(lookup, &props.api_client);
    let id = format!("field-{}", spec.name);

    let emit = {
        let on_change = props.on_change.clone();
        move |value: String| on_change.emit((spec.name.to_string(), value))
    };

    let input = match spec.kind {
        FieldKind::Text | FieldKind::Number | FieldKind::Date => {
            let input_type = match spec.kind {
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                _ => "text",
            };
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                emit(input.value());
            });
            html! {
                <input
                    type={input_type}
                    id={id.clone()}
                    step="any"
                    value={props.value.clone()}
                    onchange={onchange}
                    disabled={props.disabled}
                />
            }
        }
        FieldKind::TextArea => {
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlTextAreaElement = e.target_unchecked_into();
                emit(input.value());
            });
            html! {
                <textarea
                    id={id.clone()}
                    rows="3"
                    value={props.value.clone()}
                    onchange={onchange}
                    disabled={props.disabled}
                />
            }
        }
        FieldKind::Checkbox => {
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                emit(input.checked().to_string());
            });
            html! {
                <input
                    type="checkbox"
                    id={id.clone()}
                    checked={matches!(props.value.as_str(), "true" | "on" | "1")}
                    onchange={onchange}
                    disabled={props.disabled}
                />
            }
        }
        FieldKind::Select(_) => {
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                emit(select.value());
            });
            html! {
                <select id={id.clone()} onchange={onchange} disabled={props.disabled}>
                    <option value="" selected={props.value.is_empty()}>{"Select..."}</option>
                    {for options.iter().map(|option| {
                        let value = option.id.to_string();
                        html! {
                            <option value={value.clone()} selected={value == props.value}>
                                {&option.label}
                            </option>
                        }
                    })}
                </select>
            }
        }
        FieldKind::Choice(choices) => {
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                emit(select.value());
            });
            html! {
                <select id={id.clone()} onchange={onchange} disabled={props.disabled}>
                    <option value="" selected={props.value.is_empty()}>{"Select..."}</option>
                    {for choices.iter().map(|(value, label)| html! {
                        <option value={*value} selected={*value == props.value}>{*label}</option>
                    })}
                </select>
            }
        }
    };

    let group_class = classes!("form-group", props.error.is_some().then_some("has-error"));

    html! {
        <div class={group_class}>
            <label for={id}>
                {spec.label}
                {if spec.is_required() { html! { <span class="required">{" *"}</span> } } else { html! {} }}
            </label>
            {input}
            {if let Some(error) = props.error.as_ref() {
                html! { <div class="field-error">{error}</div> }
            } else { html! {} }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResourceFormProps {
    pub form: EntityForm,
    pub validation: FormValidation,
    pub saving: bool,
    pub api_client: ApiClient,
    pub on_field_change: Callback<(String, String)>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Create/edit form generated from the resource's field specs
#[function_component(ResourceForm)]
pub fn resource_form<R: Resource>(props: &ResourceFormProps) -> Html {
    let editing = props.form.is_editing() && R::MUTABLE;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel_click = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let submit_text = match (props.saving, editing) {
        (true, _) => "Saving...",
        (false, true) => "Save changes",
        (false, false) => "Create",
    };

    html! {
        <section class="form-section">
            <h2>
                {match props.form.id.filter(|_| editing) {
                    Some(id) => format!("Edit record #{}", id),
                    None => "New record".to_string(),
                }}
            </h2>

            {if let Some(error) = props.validation.first_error_for("form") {
                html! { <div class="form-message error">{error.to_string()}</div> }
            } else { html! {} }}

            <form class="resource-form" onsubmit={onsubmit}>
                {for R::form_specs().iter().map(|spec| html! {
                    <FormField
                        key={spec.name}
                        spec={*spec}
                        value={props.form.get(spec.name).to_string()}
                        error={props.validation.first_error_for(spec.name).map(|e| e.to_string())}
                        disabled={props.saving}
                        api_client={props.api_client.clone()}
                        on_change={props.on_field_change.clone()}
                    />
                })}

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={props.saving}>
                        {submit_text}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel_click} disabled={props.saving}>
                        {if editing { "Cancel" } else { "Clear" }}
                    </button>
                </div>
            </form>
        </section>
    }
}
