use crate::shared::event_bus::EventBus;
use crate::shared::inline_edit::{EditEvent, FieldCommand, FieldRegistry};
use contracts::domain::a001_in_app_product::{FieldValue, ProductField};
use leptos::prelude::*;

const LOGO_PROMPT: &str = "Please enter your logo's URL.";

/// Answer to the logo URL prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoInput {
    /// Cancelled or left empty: the product has no logo.
    Cleared,
    Url(String),
}

impl LogoInput {
    pub fn from_prompt(answer: Option<String>) -> Self {
        match answer.map(|s| s.trim().to_string()) {
            Some(url) if !url.is_empty() => LogoInput::Url(url),
            _ => LogoInput::Cleared,
        }
    }

    pub fn into_value(self) -> FieldValue {
        match self {
            LogoInput::Cleared => FieldValue::Missing,
            LogoInput::Url(url) => FieldValue::Text(url),
        }
    }
}

/// Logo preview; clicking it while the row is being edited asks for a new
/// URL.
#[component]
pub fn LogoEditor(
    initial: Option<String>,
    #[prop(into)] editing: Signal<bool>,
    bus: EventBus<EditEvent>,
    registry: FieldRegistry,
) -> impl IntoView {
    let url = RwSignal::new(initial.clone());
    let error = RwSignal::new(None::<String>);

    let bus_sv = StoredValue::new_local(bus.clone());

    let apply = Callback::new(move |value: FieldValue| {
        error.set(None);
        url.set(value.as_text().map(str::to_string));
        bus_sv.get_value().publish(&EditEvent::ValueChanged {
            field: ProductField::LogoUrl,
            value,
        });
    });

    registry.register(
        ProductField::LogoUrl,
        Callback::new(move |command: FieldCommand| match command {
            FieldCommand::ShowErrors(errors) => error.set(errors.first().cloned()),
            FieldCommand::SetValue(value) => apply.run(value),
        }),
    );

    if let Some(initial) = initial {
        bus.publish(&EditEvent::ValueChanged {
            field: ProductField::LogoUrl,
            value: FieldValue::Text(initial),
        });
    }

    let on_click = move |_: leptos::ev::MouseEvent| {
        if !editing.get_untracked() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.prompt_with_message(LOGO_PROMPT) {
            Ok(answer) => apply.run(LogoInput::from_prompt(answer).into_value()),
            Err(e) => log::warn!("logo prompt failed: {:?}", e),
        }
    };

    view! {
        <td class="in-app-product-logo">
            <img
                class="in-app-product-logo-url"
                src=move || url.get().unwrap_or_default()
                on:click=on_click
            />
            <span class="field-error">{move || error.get().unwrap_or_default()}</span>
        </td>
    }
}
