//! Auth Form Components
//!
//! Login and registration forms with inline validation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api::auth::AvailabilityField;
use crate::context::use_app;
use crate::store::auth::FORM_FIELD;
use crate::validation::{message_for, validate_email, validate_password, validate_username, FieldError};

#[component]
fn FieldMessage(errors: ReadSignal<Vec<FieldError>>, field: &'static str) -> impl IntoView {
    move || message_for(&errors.get(), field).map(|msg| view! { <span class="field-error">{msg}</span> })
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(Vec::<FieldError>::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        let navigate = navigate.clone();
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.auth.login(&user, &pass).await;
            set_busy.set(false);
            match result {
                Ok(()) => {
                    set_errors.set(Vec::new());
                    ctx.after_login();
                    navigate("/", Default::default());
                }
                Err(errs) => set_errors.set(errs),
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h1>"Log in"</h1>
            <label>
                "Username"
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="username" />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="password" />
            </label>
            <FieldMessage errors=errors field=FORM_FIELD />
            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Logging in…" } else { "Log in" }}
            </button>
            <p class="auth-switch">"New here? " <A href="/register">"Create an account"</A></p>
        </form>
    }
}

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (errors, set_errors) = signal(Vec::<FieldError>::new());
    let (busy, set_busy) = signal(false);

    // Replace one field's message, keeping the others
    let set_field = move |field: &'static str, message: Option<String>| {
        set_errors.update(|errs| {
            errs.retain(|e| e.field != field);
            if let Some(message) = message {
                errs.push(FieldError { field, message });
            }
        });
    };

    let check = move |field: AvailabilityField, name: &'static str, value: String, local: Result<(), String>| {
        if let Err(msg) = local {
            set_field(name, Some(msg));
            return;
        }
        set_field(name, None);
        spawn_local(async move {
            let taken = ctx.auth.check_availability(field, &value).await;
            set_field(name, taken);
        });
    };

    let on_username_blur = move |_| {
        let value = username.get_untracked();
        if !value.trim().is_empty() {
            check(AvailabilityField::Username, "username", value.clone(), validate_username(&value));
        }
    };
    let on_email_blur = move |_| {
        let value = email.get_untracked();
        if !value.trim().is_empty() {
            check(AvailabilityField::Email, "email", value.clone(), validate_email(&value));
        }
    };
    let on_password_blur = move |_| {
        let value = password.get_untracked();
        if !value.is_empty() {
            set_field("password", validate_password(&value).err());
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (user, mail, pass, again) = (
            username.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
            confirm.get_untracked(),
        );
        let navigate = navigate.clone();
        set_busy.set(true);
        spawn_local(async move {
            let result = ctx.auth.register(&user, &mail, &pass, &again).await;
            set_busy.set(false);
            match result {
                Ok(()) => {
                    set_errors.set(Vec::new());
                    ctx.after_login();
                    navigate("/", Default::default());
                }
                Err(errs) => set_errors.set(errs),
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h1>"Create an account"</h1>
            <label>
                "Username"
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    on:blur=on_username_blur
                />
                <FieldMessage errors=errors field="username" />
            </label>
            <label>
                "Email"
                <input
                    type="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    on:blur=on_email_blur
                />
                <FieldMessage errors=errors field="email" />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    on:blur=on_password_blur
                />
                <FieldMessage errors=errors field="password" />
            </label>
            <label>
                "Confirm password"
                <input
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="confirm" />
            </label>
            <FieldMessage errors=errors field=FORM_FIELD />
            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Creating account…" } else { "Sign up" }}
            </button>
            <p class="auth-switch">"Already registered? " <A href="/login">"Log in"</A></p>
        </form>
    }
}
