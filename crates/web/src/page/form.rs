use std::sync::Arc;

use checkout::prelude::{
    CheckoutError, CheckoutPage, Collaborators, ContactForm, Field, LinkOpener, Submitted,
    ValidationErrors,
};
use leptos::prelude::*;

use crate::{Shell, browser::WindowLinkOpener};

/// Contact form values and the errors shown under each input.
///
/// Inputs are only re-validated once a submit has been attempted, so a buyer filling the form
/// for the first time is not shown errors for fields they have not reached.
#[derive(Clone, Copy, Debug)]
pub(super) struct FormState {
    pub(super) values: RwSignal<ContactForm>,
    pub(super) errors: RwSignal<ValidationErrors>,
    pub(super) attempted: RwSignal<bool>,
}

impl FormState {
    pub(super) fn new() -> Self {
        Self {
            values: RwSignal::new(ContactForm::default()),
            errors: RwSignal::new(ValidationErrors::default()),
            attempted: RwSignal::new(false),
        }
    }

    /// Record a changed input.
    pub(super) fn input(self, page: &CheckoutPage, field: Field, value: String) {
        self.values.update(|values| values.set(field, value));

        if !self.attempted.get_untracked() {
            return;
        }

        let field_errors = self
            .values
            .with_untracked(|values| page.revalidate(values, field));

        self.errors
            .update(|errors| errors.replace_field(field, field_errors));
    }

    /// Message shown under `field`, if any.
    pub(super) fn error(self, field: Field) -> Option<&'static str> {
        self.errors.with(|errors| errors.first(field))
    }
}

/// Submit the form through the page, routing the outcome into the form and app state.
pub(super) fn submit(
    page: &CheckoutPage,
    form: FormState,
    shell: Shell,
    links: &dyn LinkOpener,
) -> Option<Submitted> {
    form.attempted.set(true);

    let values = form.values.get_untracked();
    let mut store = shell.store();

    let result = page.submit(
        &values,
        Collaborators {
            cart: &mut store,
            navigator: &shell.navigator(),
            notifier: &shell.notifier(),
            links,
        },
    );

    match result {
        Ok(submitted) => {
            form.errors.set(ValidationErrors::default());

            Some(submitted)
        }
        Err(CheckoutError::Validation(errors)) => {
            form.errors.set(errors);

            None
        }
        Err(error) => {
            leptos::logging::warn!("checkout not completed: {error}");

            None
        }
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Phone => "tel",
        _ => "text",
    }
}

fn autocomplete(field: Field) -> &'static str {
    match field {
        Field::Name => "name",
        Field::Email => "email",
        Field::Phone => "tel",
        Field::Address => "street-address",
        Field::City => "address-level2",
        Field::Pincode => "postal-code",
        Field::Message => "off",
    }
}

#[component]
fn FieldInput(
    field: Field,
    required: bool,
    form: FormState,
    page: Arc<CheckoutPage>,
) -> impl IntoView {
    let id = format!("checkout-{}", field.key());
    let error_id = format!("{id}-error");
    let label = if required {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };

    let value = move || form.values.with(|values| values.value(field).to_string());
    let invalid = move || form.error(field).is_some().to_string();
    let on_input = move |ev: leptos::ev::Event| form.input(&page, field, event_target_value(&ev));

    let control = match field {
        Field::Address | Field::Message => view! {
            <textarea
                id=id.clone()
                name=field.key()
                rows="3"
                aria-invalid=invalid
                aria-describedby=error_id.clone()
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any(),
        _ => view! {
            <input
                id=id.clone()
                name=field.key()
                type=input_type(field)
                autocomplete=autocomplete(field)
                aria-invalid=invalid
                aria-describedby=error_id.clone()
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-field">
            <label for=id>{label}</label>
            {control}
            <p id=error_id class="form-error" aria-live="polite">
                {move || form.error(field).unwrap_or_default()}
            </p>
        </div>
    }
}

#[component]
pub(super) fn ContactFormPanel(page: Arc<CheckoutPage>, shell: Shell) -> impl IntoView {
    let form = FormState::new();

    let on_submit = {
        let page = Arc::clone(&page);

        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            submit(&page, form, shell, &WindowLinkOpener);
        }
    };

    let on_back = {
        let page = Arc::clone(&page);

        move |_: leptos::ev::MouseEvent| page.back(&shell.navigator())
    };

    view! {
        <form class="checkout-form" novalidate=true on:submit=on_submit>
            <h2 class="panel-title">"Contact Details"</h2>
            {Field::ALL
                .into_iter()
                .map(|field| {
                    view! {
                        <FieldInput
                            field=field
                            required=page.schema().is_required(field)
                            form=form
                            page=Arc::clone(&page)
                        />
                    }
                })
                .collect_view()}
            <div class="form-actions">
                <button type="button" class="button-secondary" on:click=on_back>
                    "Back"
                </button>
                <button type="submit" class="button-primary">
                    "Send Order"
                </button>
            </div>
        </form>
    }
}
