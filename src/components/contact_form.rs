//! Contact Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use folio_core::store::StoreError;
use folio_core::upload::SubmitGuard;
use folio_core::ContactMessage;

use crate::context::use_app_context;
use crate::store::{report_error, show_error, show_success, use_app_store};

#[component]
pub fn ContactForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let guard = StoredValue::new(SubmitGuard::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut contact = ContactMessage::new(name.get_untracked(), email.get_untracked(), message.get_untracked());
        let subject_text = subject.get_untracked();
        if !subject_text.trim().is_empty() {
            contact = contact.with_subject(subject_text);
        }
        if let Err(e) = contact.validate() {
            show_error(&store, e.message);
            return;
        }
        let Some(ticket) = guard.get_value().try_begin() else {
            return;
        };
        busy.set(true);
        let client = ctx.client();

        spawn_local(async move {
            match client.submit_contact(&contact).await {
                Ok(_) => {
                    name.set(String::new());
                    email.set(String::new());
                    subject.set(String::new());
                    message.set(String::new());
                    show_success(&store, "Message sent successfully");
                }
                Err(e) => report_error(&store, &StoreError::from(e)),
            }
            busy.set(false);
            drop(ticket);
        });
    };

    view! {
        <section class="contact">
            <h2>"Get in Touch"</h2>
            <form class="record-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Subject (optional)"
                    prop:value=move || subject.get()
                    on:input=move |ev| subject.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Message"
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>
        </section>
    }
}
